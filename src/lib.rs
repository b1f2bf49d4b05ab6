//! # Leafpress
//!
//! A small static site generator. A project is a directory tree: files with a
//! registered markup extension are pages, everything else is a static file
//! that travels with the nearest page above it.
//!
//! # Architecture: One Staged Pipeline
//!
//! ```text
//! Discovering       project/  →  association table   (content + owned statics per dir)
//! Parsing           file      →  Page                 (headers, defaults, rendered body, URL)
//! FilteringSorting  pages     →  newest first         (drafts and future pages dropped)
//! OutputPreparing   _output/  →  deleted, recreated
//! Rendering         Page      →  _output/<url>        (named template or `self`)
//! CopyingStatics    statics   →  next to their page   (skipped when hashes match)
//! ```
//!
//! Failures in the first stage abort the build before the output directory is
//! touched. Everything after that is per page: a page that fails to parse,
//! resolve or render is logged and skipped, and the build carries on.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`header`] | Leading `key: value` block scanner |
//! | [`metadata`] | Typed header values and the per-key coercion table |
//! | [`markup`] | Renderers keyed by file extension (plain, Markdown) |
//! | [`naming`] | Title and slug defaults derived from file paths |
//! | [`page`] | The `Page` record and its template context form |
//! | [`url`] | Ordered glob → rule table that turns a page into a URL |
//! | [`discover`] | Project walk and static file association |
//! | [`statics`] | Content-hashed static file copies |
//! | [`template`] | Template engine seam and its minijinja implementation |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`site`] | The build pipeline and its report |
//! | [`scaffold`] | Starter files written by `init` |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Full Rebuilds Only
//!
//! There is no dependency graph. Every build deletes the output directory and
//! writes it again, which keeps the output an exact function of the project
//! tree. Static copies still skip identical files, so a page that lists the
//! same asset twice is only written once.
//!
//! ## Rules Are Data
//!
//! URL rules and header coercions are explicit tables built before the first
//! page is parsed: header keys map to fixed coercion functions, and URL rules
//! come from built-ins plus `[[urls]]` entries in `config.toml`. Nothing is
//! looked up by reflection or registered through global state.

pub mod config;
pub mod discover;
pub mod header;
pub mod markup;
pub mod metadata;
pub mod naming;
pub mod output;
pub mod page;
pub mod scaffold;
pub mod site;
pub mod statics;
pub mod template;
pub mod url;

#[cfg(test)]
pub(crate) mod test_helpers;
