//! Build orchestration.
//!
//! A build runs through fixed stages, in order:
//!
//! ```text
//! Discovering → Parsing → FilteringSorting → OutputPreparing → Rendering → CopyingStatics → Done
//! ```
//!
//! Only discovery and output preparation can fail the whole build. A failure
//! in discovery happens before the output directory is touched. From parsing
//! on, anything that goes wrong with a single page (unreadable file, bad date
//! header, no URL rule, template error, failed write) is logged with the page
//! path and that page is skipped; the build still finishes and reports how
//! many pages were written.
//!
//! Rebuilds are full: the output directory is deleted and regenerated on
//! every run.

use crate::config::{ConfigError, Settings};
use crate::discover::{self, AssociationTable, DiscoveryError};
use crate::header::ParseError;
use crate::markup::MarkupRegistry;
use crate::page::{Page, SELF_TEMPLATE};
use crate::statics::{self, CopyOutcome};
use crate::template::{Jinja, TemplateEngine, TemplateError};
use crate::url::{self, UrlRegistry, UrlResolutionError};
use chrono::{Local, NaiveDateTime};
use minijinja::{Value, context};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a build.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("cannot prepare output directory {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A failure confined to one page. The page is skipped.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("{}: {source}", path.display())]
    Url {
        path: PathBuf,
        #[source]
        source: UrlResolutionError,
    },
    #[error("{}: {source}", path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: TemplateError,
    },
}

impl PageError {
    pub fn path(&self) -> &Path {
        match self {
            PageError::Io { path, .. }
            | PageError::Parse { path, .. }
            | PageError::Url { path, .. }
            | PageError::Template { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Discovering,
    Parsing,
    FilteringSorting,
    OutputPreparing,
    Rendering,
    CopyingStatics,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Discovering => "discovering",
            Stage::Parsing => "parsing",
            Stage::FilteringSorting => "filtering/sorting",
            Stage::OutputPreparing => "preparing output",
            Stage::Rendering => "rendering",
            Stage::CopyingStatics => "copying statics",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Pages ready to render, newest first.
#[derive(Debug, Default)]
pub struct PageSet {
    pub pages: Vec<Page>,
    /// Pages dropped because of an error.
    pub skipped: usize,
    /// Drafts and future-dated pages.
    pub withheld: usize,
}

impl PageSet {
    /// Pages listed to templates: everything except hidden pages.
    pub fn public(&self) -> Vec<&Page> {
        self.pages.iter().filter(|p| p.is_public()).collect()
    }
}

/// Outcome of a completed build.
#[derive(Debug, Default, Clone, Serialize)]
pub struct BuildReport {
    pub pages_written: usize,
    pub pages_skipped: usize,
    pub pages_withheld: usize,
    pub statics_copied: usize,
    pub statics_unchanged: usize,
    pub statics_failed: usize,
    pub elapsed: Duration,
}

/// One project, ready to build.
pub struct Site {
    settings: Settings,
    markup: MarkupRegistry,
    urls: UrlRegistry,
    engine: Box<dyn TemplateEngine>,
    build_time: NaiveDateTime,
}

impl Site {
    /// Site with the stock renderers, the configured URL rules and a
    /// minijinja engine over the template directory.
    ///
    /// Settings are validated again here, since the build deletes the
    /// output directory.
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let urls = settings.url_registry()?;
        let engine = Box::new(Jinja::new(&settings.template_dir));
        Ok(Self {
            settings,
            markup: MarkupRegistry::default(),
            urls,
            engine,
            build_time: Local::now().naive_local(),
        })
    }

    /// Pin the time pages are compared against when filtering future posts.
    pub fn with_build_time(mut self, build_time: NaiveDateTime) -> Self {
        self.build_time = build_time;
        self
    }

    pub fn with_markup(mut self, markup: MarkupRegistry) -> Self {
        self.markup = markup;
        self
    }

    pub fn with_url_registry(mut self, urls: UrlRegistry) -> Self {
        self.urls = urls;
        self
    }

    pub fn with_engine(mut self, engine: impl TemplateEngine + 'static) -> Self {
        self.engine = Box::new(engine);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Discover, parse, filter and sort, without writing anything.
    pub fn check(&self) -> Result<PageSet, BuildError> {
        let table = self.discover()?;
        Ok(self.load_pages(&table))
    }

    /// Run the full pipeline.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let started = Instant::now();
        let table = self.discover()?;
        let page_set = self.load_pages(&table);

        enter(Stage::OutputPreparing);
        self.prepare_output()?;

        enter(Stage::Rendering);
        let mut report = BuildReport {
            pages_skipped: page_set.skipped,
            pages_withheld: page_set.withheld,
            ..BuildReport::default()
        };
        let written = self.render_pages(&page_set, &mut report);

        enter(Stage::CopyingStatics);
        self.copy_statics(&table, &written, &mut report);

        report.elapsed = started.elapsed();
        enter(Stage::Done);
        info!(
            written = report.pages_written,
            skipped = report.pages_skipped,
            "build finished"
        );
        Ok(report)
    }

    fn discover(&self) -> Result<AssociationTable, DiscoveryError> {
        enter(Stage::Discovering);
        discover::discover(
            &self.settings.project_dir,
            &self.markup,
            &self.settings.excluded_dirs(),
        )
    }

    /// Parsing and FilteringSorting.
    pub fn load_pages(&self, table: &AssociationTable) -> PageSet {
        enter(Stage::Parsing);
        let mut set = PageSet::default();
        for (dir, group) in table.groups() {
            // Root statics are project-wide, never page assets.
            let statics = if dir == table.root() {
                Vec::new()
            } else {
                group.statics.clone()
            };
            for path in &group.content {
                let page = match self.parse_page(path, statics.clone()) {
                    Ok(page) => page,
                    Err(e) => {
                        warn!(path = %e.path().display(), error = %e, "skipping page");
                        set.skipped += 1;
                        continue;
                    }
                };
                if !page.is_publishable(self.build_time) {
                    debug!(
                        path = %page.relative_path,
                        status = %page.status(),
                        date = %page.date(),
                        "withholding page"
                    );
                    set.withheld += 1;
                    continue;
                }
                match self.resolve_output(page) {
                    Ok(page) => set.pages.push(page),
                    Err(e) => {
                        warn!(path = %e.path().display(), error = %e, "skipping page");
                        set.skipped += 1;
                    }
                }
            }
        }

        enter(Stage::FilteringSorting);
        set.pages.sort_by(|a, b| b.date().cmp(&a.date()));
        set
    }

    fn parse_page(&self, path: &Path, statics: Vec<PathBuf>) -> Result<Page, PageError> {
        let source = fs::read_to_string(path).map_err(|source| PageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let renderer = self.markup.for_path(path).ok_or_else(|| PageError::Parse {
            path: path.to_path_buf(),
            source: ParseError::Markup("no renderer for this extension".into()),
        })?;

        let mut page = Page::new(path, &self.settings.project_dir, statics);
        let (metadata, body) = renderer
            .parse(&source, &self.settings.date_format)
            .map_err(|source| PageError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        page.apply_parsed(metadata, body, renderer.output_ext());
        Ok(page)
    }

    fn resolve_output(&self, mut page: Page) -> Result<Page, PageError> {
        let url = self.urls.url_for(&page).map_err(|source| PageError::Url {
            path: page.source_path.clone(),
            source,
        })?;
        page.output_path = Some(url::output_path(&self.settings.output_dir, &url));
        page.url = Some(url);
        Ok(page)
    }

    fn prepare_output(&self) -> Result<(), BuildError> {
        let out = &self.settings.output_dir;
        let wrap = |source| BuildError::Output {
            path: out.clone(),
            source,
        };
        if out.exists() {
            debug!(path = %out.display(), "removing previous output");
            fs::remove_dir_all(out).map_err(wrap)?;
        }
        fs::create_dir_all(out).map_err(wrap)?;
        Ok(())
    }

    /// Render and write every page. Returns the pages that made it to disk.
    fn render_pages<'a>(&self, set: &'a PageSet, report: &mut BuildReport) -> Vec<&'a Page> {
        let pages = Value::from_serialize(set.public());
        let settings = Value::from_serialize(&self.settings);
        let mut seen_outputs = HashSet::new();
        let mut written = Vec::new();

        for page in &set.pages {
            let ctx = context! {
                page => Value::from_serialize(page),
                pages => pages.clone(),
                settings => settings.clone(),
            };
            match self.write_page(page, &ctx) {
                Ok(path) => {
                    if !seen_outputs.insert(path.clone()) {
                        warn!(
                            path = %path.display(),
                            page = %page.relative_path,
                            "output written by more than one page"
                        );
                    }
                    debug!(page = %page.relative_path, output = %path.display(), "wrote page");
                    report.pages_written += 1;
                    written.push(page);
                }
                Err(e) => {
                    warn!(path = %e.path().display(), error = %e, "skipping page");
                    report.pages_skipped += 1;
                }
            }
        }
        written
    }

    fn write_page(&self, page: &Page, ctx: &Value) -> Result<PathBuf, PageError> {
        let template = page.template();
        let html = if template == SELF_TEMPLATE {
            self.engine.render_inline(&page.body, ctx)
        } else {
            self.engine.render_named(template, ctx)
        }
        .map_err(|source| PageError::Template {
            path: page.source_path.clone(),
            source,
        })?;

        let io_err = |source| PageError::Io {
            path: page.source_path.clone(),
            source,
        };
        let out = page.output_path.clone().ok_or_else(|| {
            io_err(io::Error::new(io::ErrorKind::InvalidInput, "page has no output path"))
        })?;
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&out, html).map_err(io_err)?;
        Ok(out)
    }

    /// Project-wide statics go to the output root; page statics go next to
    /// the page's output, mirroring their path below the page's directory.
    fn copy_statics(&self, table: &AssociationTable, pages: &[&Page], report: &mut BuildReport) {
        let root = table.root();
        let out = &self.settings.output_dir;
        let mut copies: BTreeSet<(PathBuf, PathBuf)> = BTreeSet::new();

        for src in table.project_statics() {
            if let Ok(rel) = src.strip_prefix(root) {
                copies.insert((src.clone(), out.join(rel)));
            }
        }
        for page in pages {
            let Some(page_out_dir) = page.output_path.as_deref().and_then(Path::parent) else {
                continue;
            };
            for src in &page.static_files {
                if let Ok(rel) = src.strip_prefix(page.source_dir()) {
                    copies.insert((src.clone(), page_out_dir.join(rel)));
                }
            }
        }

        for (src, dst) in copies {
            match statics::copy_file(&src, &dst) {
                Ok(CopyOutcome::Copied) => {
                    debug!(src = %src.display(), dst = %dst.display(), "copied static file");
                    report.statics_copied += 1;
                }
                Ok(CopyOutcome::Unchanged) => {
                    debug!(dst = %dst.display(), "static file unchanged");
                    report.statics_unchanged += 1;
                }
                Err(e) => {
                    warn!(src = %src.display(), error = %e, "failed to copy static file");
                    report.statics_failed += 1;
                }
            }
        }
    }
}

fn enter(stage: Stage) {
    info!(stage = %stage, "==> stage");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn renders_headers_and_body() {
        let tmp = TempDir::new().unwrap();
        write_file(
            tmp.path(),
            "hello.html",
            "title: Hello\ndate: 2020-01-01\ntemplate: self\n\n<h1>{{ page.title }}</h1>Body text",
        );
        let report = site_for(tmp.path()).build().unwrap();
        assert_eq!(report.pages_written, 1);
        assert_eq!(read_output(tmp.path(), "hello.html"), "<h1>Hello</h1>Body text");
    }

    #[test]
    fn drafts_and_future_pages_are_withheld() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "draft.html", "status: draft\ndate: 2000-01-01\n\nx");
        write_file(tmp.path(), "future.html", "date: 2021-06-02\n\nx");
        write_file(tmp.path(), "now.html", "date: 2021-06-01\n\nx");
        write_file(tmp.path(), "past.html", "date: 2021-05-31\n\nx");

        let site = site_for(tmp.path()).with_build_time(day(2021, 6, 1));
        let report = site.build().unwrap();

        assert_eq!(report.pages_written, 2);
        assert_eq!(report.pages_withheld, 2);
        let out = tmp.path().join("_output");
        assert!(!out.join("draft.html").exists());
        assert!(!out.join("future.html").exists());
        assert!(out.join("now.html").exists());
        assert!(out.join("past.html").exists());
    }

    #[test]
    fn hidden_pages_are_written_but_not_listed() {
        let tmp = TempDir::new().unwrap();
        let list = "template: self\n\n{% for p in pages %}{{ p.slug }};{% endfor %}";
        write_file(tmp.path(), "visible.html", &format!("date: 2020-01-02\n{list}"));
        write_file(tmp.path(), "secret.html", &format!("status: hidden\ndate: 2020-01-03\n{list}"));

        site_for(tmp.path()).build().unwrap();
        assert_eq!(read_output(tmp.path(), "visible.html"), "visible;");
        assert_eq!(read_output(tmp.path(), "secret.html"), "visible;");
    }

    #[test]
    fn pages_are_listed_newest_first_with_stable_ties() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a.html", "date: 2020-01-01\n\nx");
        write_file(tmp.path(), "b.html", "date: 2020-03-01\n\nx");
        write_file(tmp.path(), "c.html", "date: 2020-01-01\n\nx");
        write_file(tmp.path(), "d.html", "date: 2020-02-01\n\nx");

        let set = site_for(tmp.path()).check().unwrap();
        assert_eq!(page_slugs(&set), ["b", "d", "a", "c"]);
    }

    #[test]
    fn fixture_project_pages() {
        let tmp = setup_fixtures();
        let set = site_for(tmp.path())
            .with_build_time(day(2021, 6, 1))
            .check()
            .unwrap();

        assert_eq!(
            page_slugs(&set),
            ["second-post", "first-post", "feed", "index", "about"]
        );
        assert_eq!(set.withheld, 2);
        assert_eq!(set.skipped, 0);

        let first = find_page(&set, "first-post");
        assert_eq!(first.url.as_deref(), Some("blog/2020/first-post/"));
        assert_eq!(first.tags(), ["rust", "web"]);
        assert_eq!(first.static_files, vec![tmp.path().join("blog/img/chart.svg")]);

        assert_eq!(find_page(&set, "index").url.as_deref(), Some("/"));
        assert_eq!(find_page(&set, "feed").output_ext, "xml");
        assert!(!set.public().iter().any(|p| p.slug() == "about"));
    }

    #[test]
    fn stale_output_is_removed() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "index.html", "x");
        write_file(tmp.path(), "_output/stale.html", "old");

        site_for(tmp.path()).build().unwrap();
        let out = tmp.path().join("_output");
        assert!(!out.join("stale.html").exists());
        assert!(out.join("index.html").exists());
    }

    #[test]
    fn template_error_skips_only_that_page() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "good.html", "template: self\n\nok");
        write_file(tmp.path(), "bad.html", "template: missing.html\n\nx");
        write_file(tmp.path(), "broken.html", "template: self\n\n{% if %}");

        let report = site_for(tmp.path()).build().unwrap();
        assert_eq!(report.pages_written, 1);
        assert_eq!(report.pages_skipped, 2);
        assert_eq!(read_output(tmp.path(), "good.html"), "ok");
        assert!(!tmp.path().join("_output/bad.html").exists());
    }

    #[test]
    fn bad_date_header_skips_page() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "bad.html", "date: yesterday\n\nx");
        write_file(tmp.path(), "good.html", "date: 2020-01-01\n\nx");

        let report = site_for(tmp.path()).build().unwrap();
        assert_eq!(report.pages_written, 1);
        assert_eq!(report.pages_skipped, 1);
    }

    #[test]
    fn page_without_url_rule_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a.html", "x");
        let mut urls = UrlRegistry::empty();
        urls.register("blog/*", "default", crate::url::UrlRule::Default)
            .unwrap();

        let set = site_for(tmp.path()).with_url_registry(urls).check().unwrap();
        assert!(set.pages.is_empty());
        assert_eq!(set.skipped, 1);
    }

    #[test]
    fn discovery_failure_leaves_output_untouched() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("out");
        write_file(&out, "keep.html", "keep");

        let settings = Settings::load(&tmp.path().join("missing"))
            .unwrap()
            .with_output_dir(out.clone());
        let site = Site::new(settings).unwrap();
        assert!(matches!(site.build(), Err(BuildError::Discovery(_))));
        assert!(out.join("keep.html").exists());
    }

    #[test]
    fn statics_follow_their_page() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "index.html", "x");
        write_file(tmp.path(), "loose.png", "png");
        write_file(tmp.path(), "foo/bar.html", "url: pretty\ndate: 2020-02-03\n\nx");
        write_file(tmp.path(), "foo/mediafile", "media");
        write_file(tmp.path(), "foo/img/pic.jpg", "jpg");

        let report = site_for(tmp.path()).build().unwrap();
        let out = tmp.path().join("_output");
        assert!(out.join("loose.png").exists());
        assert!(out.join("2020/02/03/bar/index.html").exists());
        assert!(out.join("2020/02/03/bar/mediafile").exists());
        assert!(out.join("2020/02/03/bar/img/pic.jpg").exists());
        assert_eq!(report.statics_copied, 3);
    }

    #[test]
    fn shared_statics_are_copied_once_per_destination() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "post/one.html", "x");
        write_file(tmp.path(), "post/two.html", "x");
        write_file(tmp.path(), "post/shared.png", "png");

        let report = site_for(tmp.path()).build().unwrap();
        assert_eq!(report.statics_copied, 1);
        assert!(tmp.path().join("_output/post/shared.png").exists());
    }

    #[test]
    fn statics_of_withheld_pages_are_not_copied() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "wip/index.html", "status: draft\n\nx");
        write_file(tmp.path(), "wip/photo.png", "png");

        let report = site_for(tmp.path()).build().unwrap();
        assert_eq!(report.statics_copied, 0);
        assert!(!tmp.path().join("_output/wip").exists());
    }

    #[test]
    fn templates_and_lib_are_not_content() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "_templates/default.html", "{{ page.content }}");
        write_file(tmp.path(), "_lib/notes.html", "x");
        write_file(tmp.path(), "index.html", "hi");

        let set = site_for(tmp.path()).check().unwrap();
        assert_eq!(set.pages.len(), 1);
        site_for(tmp.path()).build().unwrap();
        assert_eq!(read_output(tmp.path(), "index.html"), "hi");
    }

    #[test]
    fn output_above_the_project_is_refused() {
        let outer = TempDir::new().unwrap();
        let project = outer.path().join("proj");
        write_file(&project, "index.html", "x");
        write_file(outer.path(), "precious.txt", "keep me");

        let settings = Settings::load(&project)
            .unwrap()
            .with_output_dir(project.join(".."));
        let result = Site::new(settings);

        assert!(matches!(result, Err(ConfigError::Validation(_))));
        assert!(outer.path().join("precious.txt").exists());
        assert!(project.join("index.html").exists());
    }

    #[test]
    fn context_exposes_settings() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "_lib/config.toml", "site_name = \"Notes\"\n");
        write_file(tmp.path(), "index.html", "template: self\n\n{{ settings.site_name }}");

        site_for(tmp.path()).build().unwrap();
        assert_eq!(read_output(tmp.path(), "index.html"), "Notes");
    }

    #[test]
    fn restructuredtext_pages_render_with_their_statics() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "_templates/default.html", "{{ page.content }}");
        write_file(tmp.path(), "index.rst", "title: Root\n\nRoot *page*.\n");
        write_file(tmp.path(), "foo/bar.rst", "title: Bar\n\nBar page.\n");
        write_file(tmp.path(), "foo/mediafile", "media");

        let report = site_for(tmp.path()).build().unwrap();
        assert_eq!(report.pages_written, 2);
        assert!(read_output(tmp.path(), "index.html").contains("<em>page</em>"));
        assert!(read_output(tmp.path(), "foo/bar.html").contains("Bar page."));
        assert_eq!(read_output(tmp.path(), "foo/mediafile"), "media");
    }

    #[test]
    fn extra_renderers_make_more_content() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "notes.org", "template: self\n\norg body");

        let mut markup = MarkupRegistry::default();
        markup.register(&["org"], crate::markup::Plain);
        let report = site_for(tmp.path()).with_markup(markup).build().unwrap();

        assert_eq!(report.pages_written, 1);
        assert_eq!(read_output(tmp.path(), "notes.org"), "org body");
    }

    struct EchoEngine;

    impl TemplateEngine for EchoEngine {
        fn render_named(&self, name: &str, context: &Value) -> Result<String, TemplateError> {
            let title = context
                .get_attr("page")
                .and_then(|page| page.get_attr("title"))
                .map(|t| t.to_string())
                .unwrap_or_default();
            Ok(format!("{name}:{title}"))
        }

        fn render_inline(&self, source: &str, _context: &Value) -> Result<String, TemplateError> {
            Ok(source.to_uppercase())
        }
    }

    #[test]
    fn custom_template_engine() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a.html", "title: Alpha\n\nx");
        write_file(tmp.path(), "b.html", "template: self\n\nbody");

        site_for(tmp.path()).with_engine(EchoEngine).build().unwrap();
        assert_eq!(read_output(tmp.path(), "a.html"), "default.html:Alpha");
        assert_eq!(read_output(tmp.path(), "b.html"), "BODY");
    }

    #[test]
    fn markdown_pages_render_to_html() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "_templates/default.html", "{{ page.content }}");
        write_file(tmp.path(), "notes/index.md", "title: Notes\n\n*hi*");

        site_for(tmp.path()).build().unwrap();
        assert_eq!(
            read_output(tmp.path(), "notes/index.html").trim_end(),
            "<p><em>hi</em></p>"
        );
    }
}
