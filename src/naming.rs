//! Names derived from a content file's location.
//!
//! Pages that don't set `title` or `slug` headers get them from their path:
//!
//! - `blog/my-trip.md` → title "My-Trip", slug "my-trip"
//! - `blog/my-trip/index.md` → title "Index", slug "my-trip"
//! - `index.md` (project root) → title "Index", slug "index"
//!
//! Relative paths are always `/`-separated strings, whatever the host
//! platform uses. They are what URL rule globs are matched against.

use std::path::{Component, Path};

/// Parts of a content file's project-relative path.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// `/`-joined path relative to the project root, e.g. `blog/post.md`.
    pub relative_path: String,
    /// Filename without extension.
    pub stem: String,
    /// Extension without the dot; empty if there is none.
    pub extension: String,
    /// Title-cased stem, used when no `title` header is given.
    pub display_title: String,
    /// Stem, or the parent directory name for `index.*` files below the root.
    pub slug: String,
}

/// Parse the path of a content file below `root`.
///
/// `path` may be absolute (below `root`) or already relative.
pub fn parse_content_name(path: &Path, root: &Path) -> ParsedName {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let relative_path = to_slash_path(relative);

    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let extension = relative
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();

    let parent_name = relative
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().to_string());

    let slug = match parent_name {
        Some(dir) if stem == "index" => dir,
        _ => stem.clone(),
    };

    ParsedName {
        relative_path,
        display_title: title_case(&stem),
        stem,
        extension,
        slug,
    }
}

/// Join the normal components of `path` with `/`.
///
/// Root and prefix components are dropped, so the result never starts with a
/// separator.
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Upper-case the first letter of every word and lower-case the rest.
///
/// A word starts at any letter that does not follow another letter, so
/// `my-trip` becomes `My-Trip` and `2nd-try` becomes `2Nd-Try`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_cased = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_cased {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_cased = true;
        } else {
            out.push(c);
            prev_cased = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_is_slug() {
        let p = parse_content_name(Path::new("/site/foobar.rst"), Path::new("/site"));
        assert_eq!(p.slug, "foobar");
        assert_eq!(p.display_title, "Foobar");
        assert_eq!(p.relative_path, "foobar.rst");
        assert_eq!(p.extension, "rst");
    }

    #[test]
    fn index_takes_parent_dir_as_slug() {
        let p = parse_content_name(Path::new("/site/bar/index.rst"), Path::new("/site"));
        assert_eq!(p.slug, "bar");
        assert_eq!(p.stem, "index");
        assert_eq!(p.relative_path, "bar/index.rst");
    }

    #[test]
    fn index_at_root_keeps_index_slug() {
        let p = parse_content_name(Path::new("/site/index.rst"), Path::new("/site"));
        assert_eq!(p.slug, "index");
    }

    #[test]
    fn nested_index_uses_nearest_dir() {
        let p = parse_content_name(Path::new("/site/a/b/index.md"), Path::new("/site"));
        assert_eq!(p.slug, "b");
    }

    #[test]
    fn relative_input_is_accepted() {
        let p = parse_content_name(Path::new("docs/guide.md"), Path::new("/elsewhere"));
        assert_eq!(p.relative_path, "docs/guide.md");
        assert_eq!(p.slug, "guide");
    }

    #[test]
    fn file_without_extension() {
        let p = parse_content_name(Path::new("/site/README"), Path::new("/site"));
        assert_eq!(p.extension, "");
        assert_eq!(p.stem, "README");
    }

    #[test]
    fn slash_path_has_no_leading_separator() {
        assert_eq!(to_slash_path(Path::new("/a/b/c.md")), "a/b/c.md");
        assert_eq!(to_slash_path(Path::new("a/./b")), "a/b");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("foobar"), "Foobar");
        assert_eq!(title_case("my-trip"), "My-Trip");
        assert_eq!(title_case("hello_WORLD"), "Hello_World");
        assert_eq!(title_case("2nd-try"), "2Nd-Try");
        assert_eq!(title_case(""), "");
    }
}
