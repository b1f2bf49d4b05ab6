//! Typed page metadata and the per-key coercion table.
//!
//! Header values arrive as trimmed strings. A handful of well-known keys are
//! coerced into richer types before they land in a page's [`Metadata`]:
//!
//! | Key | Type | Coercion |
//! |-----|------|----------|
//! | `tags` | [`MetaValue::List`] | split on `,`, each item trimmed, order kept |
//! | `date`, `updated` | [`MetaValue::Date`] | parsed with the configured date format; failure aborts the parse |
//! | `status` | [`MetaValue::Status`] | `live`, `hidden` or `draft`; anything else becomes `live` |
//!
//! Every other key is stored as [`MetaValue::Text`].
//!
//! The table is closed: [`coercion_for`] is a plain `match`, not a lookup by
//! name into arbitrary code.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Header key → typed value. Keys are stored lower-cased.
pub type Metadata = BTreeMap<String, MetaValue>;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("header '{key}': value '{value}' does not match date format '{format}'")]
pub struct HeaderFormatError {
    pub key: String,
    pub value: String,
    pub format: String,
}

/// Publication status of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Rendered and listed.
    #[default]
    Live,
    /// Rendered but left out of the page list given to templates.
    Hidden,
    /// Never rendered.
    Draft,
}

impl Status {
    /// Parse a status header value, falling back to [`Status::Live`].
    pub fn parse_lenient(value: &str) -> Self {
        match value {
            "hidden" => Status::Hidden,
            "draft" => Status::Draft,
            _ => Status::Live,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Live => "live",
            Status::Hidden => "hidden",
            Status::Draft => "draft",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single header value after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Text(String),
    Date(NaiveDateTime),
    List(Vec<String>),
    Status(Status),
}

impl MetaValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MetaValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            MetaValue::Date(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            MetaValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_status(&self) -> Option<Status> {
        match self {
            MetaValue::Status(s) => Some(*s),
            _ => None,
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::Text(value.to_string())
    }
}

impl Serialize for MetaValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetaValue::Text(s) => serializer.serialize_str(s),
            MetaValue::Date(d) => d.serialize(serializer),
            MetaValue::List(items) => items.serialize(serializer),
            MetaValue::Status(s) => s.serialize(serializer),
        }
    }
}

/// A coercion turns a raw header value into a typed one.
///
/// Arguments are `(key, value, date_format)`.
pub type Coercion = fn(&str, &str, &str) -> Result<MetaValue, HeaderFormatError>;

/// Look up the coercion registered for a (lower-cased) header key.
pub fn coercion_for(key: &str) -> Coercion {
    match key {
        "tags" => coerce_tags,
        "date" | "updated" => coerce_date,
        "status" => coerce_status,
        _ => coerce_text,
    }
}

/// Apply the coercion registered for `key` to `value`.
pub fn coerce(key: &str, value: &str, date_format: &str) -> Result<MetaValue, HeaderFormatError> {
    coercion_for(key)(key, value, date_format)
}

fn coerce_text(_key: &str, value: &str, _format: &str) -> Result<MetaValue, HeaderFormatError> {
    Ok(MetaValue::Text(value.to_string()))
}

fn coerce_tags(_key: &str, value: &str, _format: &str) -> Result<MetaValue, HeaderFormatError> {
    Ok(MetaValue::List(
        value.split(',').map(|t| t.trim().to_string()).collect(),
    ))
}

fn coerce_status(_key: &str, value: &str, _format: &str) -> Result<MetaValue, HeaderFormatError> {
    Ok(MetaValue::Status(Status::parse_lenient(value)))
}

fn coerce_date(key: &str, value: &str, format: &str) -> Result<MetaValue, HeaderFormatError> {
    parse_date(value, format)
        .map(MetaValue::Date)
        .ok_or_else(|| HeaderFormatError {
            key: key.to_string(),
            value: value.to_string(),
            format: format.to_string(),
        })
}

/// Parse `value` with a strftime-style `format`.
///
/// Formats without time fields (the default `%Y-%m-%d`) produce midnight.
pub fn parse_date(value: &str, format: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, format)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, format)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
