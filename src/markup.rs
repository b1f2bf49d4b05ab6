//! Markup renderers keyed by file extension.
//!
//! A file is *content* exactly when its extension has a renderer registered
//! here; everything else is a static file. Rendering a content file means
//! scanning its headers (see [`crate::header`]) and turning the remaining body
//! into HTML (or leaving it alone, for the plain renderer).
//!
//! | Extensions | Renderer | Output extension |
//! |------------|----------|------------------|
//! | `html`, `htm`, `xml`, `txt` | [`Plain`] | unchanged |
//! | `md`, `markdown` | [`Markdown`] | `html` |
//! | `rst`, `rest` | [`ReStructuredText`] | `html` |
//!
//! Fenced Markdown code blocks in a language syntect knows are highlighted
//! with CSS classes (`<span class="source rust">`), so a site styles them
//! from its own stylesheet.

use crate::header::{self, ParseError};
use crate::metadata::Metadata;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html as md_html};
use std::path::Path;
use std::sync::LazyLock;
use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// A markup renderer for one family of file extensions.
pub trait Markup {
    /// Extension of the rendered file, or `None` to keep the source extension.
    fn output_ext(&self) -> Option<&str>;

    /// Convert a body (headers already removed) to its output form.
    fn render(&self, body: &str) -> Result<String, ParseError>;

    /// Scan headers, then render the remaining body.
    fn parse(&self, source: &str, date_format: &str) -> Result<(Metadata, String), ParseError> {
        let (metadata, body) = header::parse_headers(source, date_format)?;
        let rendered = self.render(&body)?;
        Ok((metadata, rendered))
    }
}

/// Passes the body through untouched.
#[derive(Debug, Default)]
pub struct Plain;

impl Markup for Plain {
    fn output_ext(&self) -> Option<&str> {
        None
    }

    fn render(&self, body: &str) -> Result<String, ParseError> {
        Ok(body.to_string())
    }
}

/// CommonMark with tables, footnotes, strikethrough and task lists.
#[derive(Debug, Default)]
pub struct Markdown;

impl Markup for Markdown {
    fn output_ext(&self) -> Option<&str> {
        Some("html")
    }

    fn render(&self, body: &str) -> Result<String, ParseError> {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_FOOTNOTES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);

        let mut events = Vec::new();
        // (info string, collected code) while inside a highlighted block
        let mut block: Option<(String, String)> = None;
        for event in Parser::new_ext(body, options) {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref info)))
                    if syntax_for(info).is_some() =>
                {
                    block = Some((info.to_string(), String::new()));
                }
                Event::Text(ref text) if block.is_some() => {
                    if let Some((_, code)) = block.as_mut() {
                        code.push_str(text);
                    }
                }
                Event::End(TagEnd::CodeBlock) if block.is_some() => {
                    if let Some((info, code)) = block.take() {
                        events.push(Event::Html(highlight(&info, &code)?.into()));
                    }
                }
                other => events.push(other),
            }
        }

        let mut html = String::with_capacity(body.len() * 3 / 2);
        md_html::push_html(&mut html, events.into_iter());
        Ok(html)
    }
}

/// Syntax for a fence info string such as `rust` or `python linenos`.
fn syntax_for(info: &str) -> Option<&'static SyntaxReference> {
    let token = info.split_whitespace().next()?;
    SYNTAXES.find_syntax_by_token(token)
}

fn highlight(info: &str, code: &str) -> Result<String, ParseError> {
    let Some(syntax) = syntax_for(info) else {
        return Err(ParseError::Markup(format!("no syntax for '{info}'")));
    };
    let mut generator =
        ClassedHTMLGenerator::new_with_class_style(syntax, &SYNTAXES, ClassStyle::Spaced);
    for line in LinesWithEndings::from(code) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .map_err(|e| ParseError::Markup(e.to_string()))?;
    }
    Ok(format!(
        "<pre class=\"highlight\"><code>{}</code></pre>\n",
        generator.finalize()
    ))
}

/// reStructuredText, rendered to an HTML fragment.
#[derive(Debug, Default)]
pub struct ReStructuredText;

impl Markup for ReStructuredText {
    fn output_ext(&self) -> Option<&str> {
        Some("html")
    }

    fn render(&self, body: &str) -> Result<String, ParseError> {
        let document = rst_parser::parse(body).map_err(|e| ParseError::Markup(e.to_string()))?;
        let mut html = Vec::new();
        rst_renderer::render_html(&document, &mut html, false)
            .map_err(|e| ParseError::Markup(e.to_string()))?;
        String::from_utf8(html).map_err(|e| ParseError::Markup(e.to_string()))
    }
}

/// Ordered extension → renderer table.
///
/// Lookups scan from the most recent registration, so registering an
/// extension again overrides the earlier renderer.
pub struct MarkupRegistry {
    entries: Vec<(Vec<String>, Box<dyn Markup>)>,
}

impl MarkupRegistry {
    /// A registry with no renderers: every file is static.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register `renderer` for the given extensions (without the dot).
    pub fn register(&mut self, extensions: &[&str], renderer: impl Markup + 'static) -> &mut Self {
        let exts = extensions.iter().map(|e| e.to_ascii_lowercase()).collect();
        self.entries.push((exts, Box::new(renderer)));
        self
    }

    /// The renderer for `ext`, compared case-insensitively.
    pub fn for_extension(&self, ext: &str) -> Option<&dyn Markup> {
        let ext = ext.to_ascii_lowercase();
        self.entries
            .iter()
            .rev()
            .find(|(exts, _)| exts.contains(&ext))
            .map(|(_, r)| r.as_ref())
    }

    /// The renderer for a file path, by its extension.
    pub fn for_path(&self, path: &Path) -> Option<&dyn Markup> {
        let ext = path.extension()?.to_str()?;
        self.for_extension(ext)
    }

    /// Whether `path` is a content file.
    pub fn is_content(&self, path: &Path) -> bool {
        self.for_path(path).is_some()
    }
}

impl Default for MarkupRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register(&["html", "htm", "xml", "txt"], Plain)
            .register(&["md", "markdown"], Markdown)
            .register(&["rst", "rest"], ReStructuredText);
        registry
    }
}
