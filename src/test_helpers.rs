//! Shared test utilities for the leafpress test suite.
//!
//! Provides project builders, a fixture copy, and lookups over built pages.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_file(tmp.path(), "blog/post.md", "title: Post\n\nBody");
//! let set = site_for(tmp.path()).check().unwrap();
//!
//! let page = find_page(&set, "post");
//! assert_eq!(page.title(), "Post");
//! ```

use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::Settings;
use crate::page::Page;
use crate::site::{PageSet, Site};

// =========================================================================
// Project setup
// =========================================================================

/// Copy `fixtures/project/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/project");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Midnight on the given day.
pub fn day(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// A site for the project at `root`, with settings from its config file.
pub fn site_for(root: &Path) -> Site {
    Site::new(Settings::load(root).unwrap()).unwrap()
}

/// Contents of `rel` below the default output directory.
pub fn read_output(root: &Path, rel: &str) -> String {
    let path = root.join("_output").join(rel);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read output {}: {e}", path.display()))
}

// =========================================================================
// Page lookups: panic with a clear message on miss
// =========================================================================

/// Find a page by slug. Panics if not found.
pub fn find_page<'a>(set: &'a PageSet, slug: &str) -> &'a Page {
    set.pages.iter().find(|p| p.slug() == slug).unwrap_or_else(|| {
        panic!("page '{slug}' not found. Available: {:?}", page_slugs(set))
    })
}

/// Slugs of all pages, in list order.
pub fn page_slugs(set: &PageSet) -> Vec<&str> {
    set.pages.iter().map(|p| p.slug()).collect()
}
