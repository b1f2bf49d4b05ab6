//! Project discovery: one walk over the project tree, partitioned into
//! content files and the static files that travel with them.
//!
//! ## Association rules
//!
//! ```text
//! project/
//! ├── index.md          # content (root)
//! ├── loose.png         # root static → project-wide, copied to output root
//! ├── foo/
//! │   ├── bar.md        # content
//! │   ├── mediafile     # static, same dir as bar.md → belongs to foo/
//! │   └── media/
//! │       └── clip.mp4  # static-only dir → nearest content ancestor, foo/
//! └── downloads/
//!     └── file.zip      # static-only, no content ancestor → root bucket
//! ```
//!
//! - A directory with content files keeps its own static files.
//! - A static-only directory hands its files to the nearest ancestor that has
//!   content, not counting the project root.
//! - Failing that, they land in the root bucket, which is created with an
//!   empty content list if the root has no content of its own.
//!
//! The walk first records every directory's direct files, then associates, so
//! the outcome does not depend on the order directories are visited in.
//!
//! Hidden entries (`.*`), editor backups (`*~`, `#*`) and the configured
//! output/template/lib directories are skipped at every level. Unreadable
//! directories are logged and skipped.

use crate::markup::MarkupRegistry;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("project directory does not exist: {0}")]
    RootMissing(PathBuf),
    #[error("project path is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Content and static files owned by one directory.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DirGroup {
    pub content: Vec<PathBuf>,
    pub statics: Vec<PathBuf>,
}

/// Directory → owned files, built once per build.
#[derive(Debug)]
pub struct AssociationTable {
    root: PathBuf,
    groups: BTreeMap<PathBuf, DirGroup>,
}

impl AssociationTable {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn get(&self, dir: &Path) -> Option<&DirGroup> {
        self.groups.get(dir)
    }

    /// All groups in path order; parents come before their children.
    pub fn groups(&self) -> impl Iterator<Item = (&Path, &DirGroup)> {
        self.groups.iter().map(|(dir, group)| (dir.as_path(), group))
    }

    /// Static files of the root bucket. These are never attached to a page;
    /// they are copied to the output root as-is.
    pub fn project_statics(&self) -> &[PathBuf] {
        self.groups
            .get(&self.root)
            .map(|g| g.statics.as_slice())
            .unwrap_or_default()
    }

    pub fn content_count(&self) -> usize {
        self.groups.values().map(|g| g.content.len()).sum()
    }

    pub fn static_count(&self) -> usize {
        self.groups.values().map(|g| g.statics.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Names skipped everywhere in the tree: dotfiles and editor leftovers.
pub fn is_ignored(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('#') || name.ends_with('~')
}

/// Walk `root` and build its association table.
///
/// `excluded` lists directories never descended into (output, templates, lib).
pub fn discover(
    root: &Path,
    markup: &MarkupRegistry,
    excluded: &[PathBuf],
) -> Result<AssociationTable, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::RootMissing(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(DiscoveryError::NotADirectory(root.to_path_buf()));
    }

    let listing = list_directories(root, markup, excluded);
    let table = associate(root, listing);
    debug!(
        root = %root.display(),
        directories = table.groups.len(),
        content = table.content_count(),
        statics = table.static_count(),
        "discovery finished"
    );
    Ok(table)
}

/// First pass: every directory's direct files, split by kind.
fn list_directories(
    root: &Path,
    markup: &MarkupRegistry,
    excluded: &[PathBuf],
) -> BTreeMap<PathBuf, DirGroup> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 {
                return true;
            }
            let name = entry.file_name().to_string_lossy();
            !is_ignored(&name) && !excluded.iter().any(|ex| ex == entry.path())
        });

    let mut listing: BTreeMap<PathBuf, DirGroup> = BTreeMap::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                warn!(path = %path, error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(dir) = path.parent() else {
            continue;
        };
        let group = listing.entry(dir.to_path_buf()).or_default();
        if markup.is_content(path) {
            group.content.push(path.to_path_buf());
        } else {
            group.statics.push(path.to_path_buf());
        }
    }
    listing
}

/// Second pass: attach static-only directories to their owners.
fn associate(root: &Path, listing: BTreeMap<PathBuf, DirGroup>) -> AssociationTable {
    let content_dirs: BTreeSet<PathBuf> = listing
        .iter()
        .filter(|(_, g)| !g.content.is_empty())
        .map(|(dir, _)| dir.clone())
        .collect();

    let mut groups: BTreeMap<PathBuf, DirGroup> = BTreeMap::new();
    let mut orphans = Vec::new();
    for (dir, group) in listing {
        if group.content.is_empty() {
            orphans.push((dir, group.statics));
        } else {
            groups.insert(dir, group);
        }
    }

    for (dir, statics) in orphans {
        if statics.is_empty() {
            continue;
        }
        let owner = nearest_content_ancestor(&dir, root, &content_dirs)
            .unwrap_or(root)
            .to_path_buf();
        debug!(dir = %dir.display(), owner = %owner.display(), "associating static files");
        groups.entry(owner).or_default().statics.extend(statics);
    }

    AssociationTable {
        root: root.to_path_buf(),
        groups,
    }
}

/// The closest proper ancestor of `dir` below `root` that holds content.
fn nearest_content_ancestor<'a>(
    dir: &'a Path,
    root: &Path,
    content_dirs: &BTreeSet<PathBuf>,
) -> Option<&'a Path> {
    dir.ancestors()
        .skip(1)
        .take_while(|a| *a != root && a.starts_with(root))
        .find(|a| content_dirs.contains(*a))
}
