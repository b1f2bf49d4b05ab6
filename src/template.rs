//! Template rendering.
//!
//! [`TemplateEngine`] is the seam between the build and the template
//! language; [`Jinja`] implements it with minijinja. Named templates come from
//! the project's template directory, falling back to the built-in
//! `default.html` compiled into the binary.
//!
//! Autoescaping is off: page content is already HTML and is inserted as-is.
//!
//! ## Filters
//!
//! - `datetimeformat(fmt="%H:%M / %d-%m-%Y")` formats a page date
//!   (`{{ page.date|datetimeformat("%d %B %Y") }}`).
//! - `ordinalsuffix` appends an English ordinal suffix (`1` → `1st`).

use chrono::{NaiveDate, NaiveDateTime};
use minijinja::{AutoEscape, Environment, Error, ErrorKind, Value, path_loader};
use std::fmt::Write;
use std::path::Path;
use thiserror::Error;

const DEFAULT_TEMPLATE_NAME: &str = "default.html";
/// The built-in `default.html`.
pub const DEFAULT_TEMPLATE_SOURCE: &str = include_str!("../templates/default.html");
const DEFAULT_DATETIME_FORMAT: &str = "%H:%M / %d-%m-%Y";

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("template not found: {0}")]
    NotFound(String),
    #[error("template render failed: {0}")]
    Render(String),
}

impl From<Error> for TemplateError {
    fn from(e: Error) -> Self {
        match e.kind() {
            ErrorKind::TemplateNotFound => {
                TemplateError::NotFound(e.detail().unwrap_or_default().to_string())
            }
            _ => TemplateError::Render(e.to_string()),
        }
    }
}

/// Renders a context through a template.
pub trait TemplateEngine {
    /// Render the named template (a path below the template directory).
    fn render_named(&self, name: &str, context: &Value) -> Result<String, TemplateError>;

    /// Render `source` itself as a template.
    fn render_inline(&self, source: &str, context: &Value) -> Result<String, TemplateError>;
}

pub struct Jinja {
    env: Environment<'static>,
}

impl Jinja {
    /// Engine loading templates from `template_dir`, with the built-in
    /// fallback for `default.html`.
    pub fn new(template_dir: &Path) -> Self {
        let mut env = Environment::new();
        let from_dir = path_loader(template_dir.to_path_buf());
        env.set_loader(move |name| {
            if let Some(source) = from_dir(name)? {
                return Ok(Some(source));
            }
            Ok((name == DEFAULT_TEMPLATE_NAME).then(|| DEFAULT_TEMPLATE_SOURCE.to_string()))
        });
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_filter("datetimeformat", datetimeformat);
        env.add_filter("ordinalsuffix", ordinalsuffix);
        Self { env }
    }
}

impl TemplateEngine for Jinja {
    fn render_named(&self, name: &str, context: &Value) -> Result<String, TemplateError> {
        let template = self.env.get_template(name).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => TemplateError::NotFound(name.to_string()),
            _ => TemplateError::from(e),
        })?;
        Ok(template.render(context)?)
    }

    fn render_inline(&self, source: &str, context: &Value) -> Result<String, TemplateError> {
        Ok(self.env.render_str(source, context)?)
    }
}

/// Parse a serialized page date: `2020-01-31T10:00:00` or `2020-01-31`.
fn parse_context_date(value: &str) -> Option<NaiveDateTime> {
    value.parse::<NaiveDateTime>().ok().or_else(|| {
        value
            .parse::<NaiveDate>()
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    })
}

fn datetimeformat(value: Value, format: Option<String>) -> Result<String, Error> {
    let raw = value.as_str().ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("datetimeformat expects a date, got {}", value.kind()),
        )
    })?;
    let date = parse_context_date(raw).ok_or_else(|| {
        Error::new(ErrorKind::InvalidOperation, format!("not a date: {raw}"))
    })?;
    let format = format.as_deref().unwrap_or(DEFAULT_DATETIME_FORMAT);

    let mut out = String::new();
    write!(out, "{}", date.format(format)).map_err(|_| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("invalid date format: {format}"),
        )
    })?;
    Ok(out)
}

fn ordinalsuffix(value: Value) -> Result<String, Error> {
    let n = match value.as_str() {
        Some(s) => s.trim().parse::<i64>().ok(),
        None => i64::try_from(value.clone()).ok(),
    }
    .ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("ordinalsuffix expects a number, got {value}"),
        )
    })?;
    Ok(format!("{n}{}", ordinal_suffix(n)))
}

fn ordinal_suffix(n: i64) -> &'static str {
    let n = n.unsigned_abs();
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}
