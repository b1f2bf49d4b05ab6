//! The in-memory record for one content file.
//!
//! A [`Page`] starts out with default headers derived from its path and file
//! times (see [`Page::new`]), is overlaid with whatever the file's own headers
//! say ([`Page::apply_parsed`]), and finally receives its resolved URL and
//! output path from the orchestrator.
//!
//! Default headers:
//!
//! | Key | Default |
//! |-----|---------|
//! | `title` | title-cased filename stem |
//! | `slug` | filename stem, or parent dir name for `index.*` below the root |
//! | `date` | file modification time, or now if that can't be read |
//! | `status` | `live` |
//! | `template` | `default.html` |
//! | `url` | `default` (the URL rule to apply) |

use crate::metadata::{MetaValue, Metadata, Status};
use crate::naming;
use chrono::{DateTime, Local, NaiveDateTime};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::path::{Path, PathBuf};

/// Template name that makes a page render its own body as the template.
pub const SELF_TEMPLATE: &str = "self";
pub const DEFAULT_TEMPLATE: &str = "default.html";
pub const DEFAULT_URL_RULE: &str = "default";

/// Context keys owned by the page itself; same-named headers are shadowed.
const RESERVED_KEYS: &[&str] = &["path", "url", "output_ext", "content", "static_files"];

#[derive(Debug, Clone)]
pub struct Page {
    /// Absolute path of the source file.
    pub source_path: PathBuf,
    /// `/`-separated path below the project root. Never starts with `/`.
    pub relative_path: String,
    pub metadata: Metadata,
    /// Raw text until rendered, then the renderer's output.
    pub body: String,
    /// Extension of the rendered file, without the dot.
    pub output_ext: String,
    /// Resolved URL, set once the URL registry has been consulted.
    pub url: Option<String>,
    /// Absolute path of the rendered file below the output root.
    pub output_path: Option<PathBuf>,
    /// Static files copied alongside this page.
    pub static_files: Vec<PathBuf>,
    file_date: NaiveDateTime,
}

impl Page {
    /// Create a page for `source_path` (below `root`) with default headers.
    pub fn new(source_path: &Path, root: &Path, static_files: Vec<PathBuf>) -> Self {
        let name = naming::parse_content_name(source_path, root);
        let file_date = file_time(source_path);

        let mut metadata = Metadata::new();
        metadata.insert("title".into(), MetaValue::Text(name.display_title));
        metadata.insert("slug".into(), MetaValue::Text(name.slug));
        metadata.insert("date".into(), MetaValue::Date(file_date));
        metadata.insert("status".into(), MetaValue::Status(Status::Live));
        metadata.insert("template".into(), DEFAULT_TEMPLATE.into());
        metadata.insert("url".into(), DEFAULT_URL_RULE.into());

        Self {
            source_path: source_path.to_path_buf(),
            relative_path: name.relative_path,
            metadata,
            body: String::new(),
            output_ext: name.extension,
            url: None,
            output_path: None,
            static_files,
            file_date,
        }
    }

    /// Overlay parsed headers and the rendered body.
    ///
    /// `output_ext` is the renderer's fixed extension, if it has one.
    pub fn apply_parsed(&mut self, headers: Metadata, body: String, output_ext: Option<&str>) {
        self.metadata.extend(headers);
        self.body = body;
        if let Some(ext) = output_ext {
            self.output_ext = ext.to_string();
        }
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(MetaValue::as_text)
    }

    pub fn title(&self) -> &str {
        self.text("title").unwrap_or_default()
    }

    pub fn slug(&self) -> &str {
        self.text("slug").unwrap_or_default()
    }

    pub fn template(&self) -> &str {
        self.text("template").unwrap_or(DEFAULT_TEMPLATE)
    }

    /// The raw `url` header: a rule name or a literal output path.
    pub fn url_intent(&self) -> &str {
        self.text("url").unwrap_or(DEFAULT_URL_RULE)
    }

    pub fn date(&self) -> NaiveDateTime {
        self.metadata
            .get("date")
            .and_then(MetaValue::as_date)
            .unwrap_or(self.file_date)
    }

    pub fn status(&self) -> Status {
        self.metadata
            .get("status")
            .and_then(MetaValue::as_status)
            .unwrap_or_default()
    }

    pub fn tags(&self) -> &[String] {
        self.metadata
            .get("tags")
            .and_then(MetaValue::as_list)
            .unwrap_or_default()
    }

    /// Hidden pages are rendered but not listed.
    pub fn is_public(&self) -> bool {
        self.status() != Status::Hidden
    }

    /// Drafts and pages dated after `build_time` are never rendered.
    pub fn is_publishable(&self, build_time: NaiveDateTime) -> bool {
        self.status() != Status::Draft && self.date() <= build_time
    }

    /// Directory holding the source file.
    pub fn source_dir(&self) -> &Path {
        self.source_path.parent().unwrap_or(Path::new(""))
    }
}

impl Serialize for Page {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let statics: Vec<String> = self
            .static_files
            .iter()
            .map(|p| naming::to_slash_path(p.strip_prefix(self.source_dir()).unwrap_or(p)))
            .collect();

        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.metadata {
            if !RESERVED_KEYS.contains(&key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        map.serialize_entry("path", &self.relative_path)?;
        map.serialize_entry("url", &self.url)?;
        map.serialize_entry("output_ext", &self.output_ext)?;
        map.serialize_entry("content", &self.body)?;
        map.serialize_entry("static_files", &statics)?;
        map.end()
    }
}

/// Modification time of `path` in local time, or now if it can't be read.
fn file_time(path: &Path) -> NaiveDateTime {
    std::fs::metadata(path)
        .and_then(|m| m.modified())
        .map(|t| DateTime::<Local>::from(t).naive_local())
        .unwrap_or_else(|_| Local::now().naive_local())
}
