//! Starter project files for `leafpress init`.
//!
//! ```text
//! project/
//! ├── _lib/config.toml         # stock config plus author settings
//! ├── _templates/default.html  # copy of the built-in template
//! └── index.md                 # a first page
//! ```
//!
//! Files that already exist are left alone, so running `init` on an existing
//! project only fills in what is missing.

use crate::config::{self, CONFIG_FILE, DEFAULT_LIB_DIR};
use crate::template::DEFAULT_TEMPLATE_SOURCE;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_TEMPLATE_DIR: &str = "_templates";

const INDEX_PAGE: &str = "\
title: Welcome

# Welcome

This page lives in `index.md`. Add Markdown, reStructuredText or HTML files
next to it and run `leafpress build`.
";

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Who the site belongs to. Written to `config.toml` as template settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    pub email: String,
    pub website_url: String,
}

impl Author {
    /// Placeholder details derived from a login name.
    pub fn for_login(login: &str) -> Self {
        Self {
            name: login.to_string(),
            email: format!("{login}@example.org"),
            website_url: "http://www.example.org".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Created,
    Kept,
}

/// Every starter file, relative to the project, and what happened to it.
#[derive(Debug, Default)]
pub struct ScaffoldReport {
    pub files: Vec<(PathBuf, FileOutcome)>,
}

/// Write the starter files into `project_dir`, creating it if needed.
pub fn quickstart(project_dir: &Path, author: &Author) -> Result<ScaffoldReport, ScaffoldError> {
    let files = [
        (
            Path::new(DEFAULT_LIB_DIR).join(CONFIG_FILE),
            starter_config(author),
        ),
        (
            Path::new(DEFAULT_TEMPLATE_DIR).join("default.html"),
            DEFAULT_TEMPLATE_SOURCE.to_string(),
        ),
        (PathBuf::from("index.md"), INDEX_PAGE.to_string()),
    ];

    let mut report = ScaffoldReport::default();
    for (rel, content) in files {
        let path = project_dir.join(&rel);
        let outcome = write_new(&path, &content).map_err(|source| ScaffoldError::Io {
            path: path.clone(),
            source,
        })?;
        report.files.push((rel, outcome));
    }
    Ok(report)
}

/// The stock config with the author settings filled in.
pub fn starter_config(author: &Author) -> String {
    let mut out = config::stock_config_toml().to_string();
    out.push_str("\nauthor_name = ");
    out.push_str(&toml_string(&author.name));
    out.push_str("\nauthor_email = ");
    out.push_str(&toml_string(&author.email));
    out.push_str("\nwebsite_url = ");
    out.push_str(&toml_string(&author.website_url));
    out.push('\n');
    out
}

fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

fn write_new(path: &Path, content: &str) -> io::Result<FileOutcome> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(FileOutcome::Kept),
        Err(e) => return Err(e),
    };
    file.write_all(content.as_bytes())?;
    Ok(FileOutcome::Created)
}
