//! URL rules: from a page's declared `url` header to a concrete output URL.
//!
//! The registry is an ordered table of glob patterns, each owning a set of
//! named rules. The built-in table is:
//!
//! | Pattern | Rule | Result |
//! |---------|------|--------|
//! | `*` | `default` | source path with the output extension; `dir/index.html` → `dir/` |
//! | `*` | `pretty` | `$year/$month/$day/$slug/` |
//!
//! Projects add their own rules after the built-ins (see
//! [`crate::config::UrlRuleConfig`]). Resolution walks the patterns from the
//! most recently registered one backwards, so a later `blog/*` entry shadows
//! the catch-all `*` for pages under `blog/`.
//!
//! For the first matching pattern:
//!
//! 1. a rule named like the page's `url` header wins;
//! 2. on the catch-all `*`, any other value than `default` is taken as a
//!    literal output path;
//! 3. otherwise the pattern's `default` rule applies.
//!
//! A matching pattern that offers none of these passes the page on to the
//! earlier patterns. When nothing applies the page has no URL, which is an
//! error for that page.
//!
//! Whatever a rule returns is then expanded: `$year`, `$month`, `$day`,
//! `$slug` and `$ext` (also `${name}`; `$$` is a literal `$`). Unknown
//! placeholders are left as they are.

use crate::page::{DEFAULT_URL_RULE, Page};
use glob::Pattern;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};
use thiserror::Error;

pub const CATCH_ALL: &str = "*";

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\$(?:(?P<escaped>\$)|(?P<named>[_a-zA-Z][_a-zA-Z0-9]*)|\{(?P<braced>[_a-zA-Z][_a-zA-Z0-9]*)\})",
    )
    .expect("valid placeholder regex")
});

#[derive(Error, Debug)]
pub enum UrlResolutionError {
    #[error("no URL rule matches '{path}' (url: '{intent}')")]
    NoRule { path: String, intent: String },
    #[error("URL '{0}' points outside the output directory")]
    EscapesOutput(String),
}

#[derive(Error, Debug)]
#[error("invalid URL rule pattern '{pattern}': {source}")]
pub struct InvalidPatternError {
    pub pattern: String,
    #[source]
    pub source: glob::PatternError,
}

pub type RuleFn = Arc<dyn Fn(&Page) -> String + Send + Sync>;

/// A function from a page to a (possibly templated) URL.
#[derive(Clone)]
pub enum UrlRule {
    /// Source path with the output extension.
    Default,
    /// `$year/$month/$day/$slug/`.
    Pretty,
    /// A fixed template, expanded per page.
    Template(String),
    /// A literal path given in the page's own `url` header.
    Literal(String),
    Custom(RuleFn),
}

impl UrlRule {
    pub fn custom(f: impl Fn(&Page) -> String + Send + Sync + 'static) -> Self {
        UrlRule::Custom(Arc::new(f))
    }

    /// The unexpanded URL this rule produces for `page`.
    pub fn apply(&self, page: &Page) -> String {
        match self {
            UrlRule::Default => default_url(page),
            UrlRule::Pretty => "$year/$month/$day/$slug/".to_string(),
            UrlRule::Template(t) | UrlRule::Literal(t) => t.clone(),
            UrlRule::Custom(f) => f(page),
        }
    }
}

impl fmt::Debug for UrlRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlRule::Default => f.write_str("Default"),
            UrlRule::Pretty => f.write_str("Pretty"),
            UrlRule::Template(t) => f.debug_tuple("Template").field(t).finish(),
            UrlRule::Literal(t) => f.debug_tuple("Literal").field(t).finish(),
            UrlRule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

struct PatternRules {
    source: String,
    pattern: Pattern,
    rules: HashMap<String, UrlRule>,
}

/// Ordered glob pattern → named rule table.
///
/// Built once per build, read-only afterwards.
#[derive(Default)]
pub struct UrlRegistry {
    patterns: Vec<PatternRules>,
}

impl UrlRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The catch-all `default` and `pretty` rules.
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        let catch_all = Pattern::new(CATCH_ALL).expect("catch-all is a valid glob");
        registry.insert(catch_all.clone(), "default", UrlRule::Default);
        registry.insert(catch_all, "pretty", UrlRule::Pretty);
        registry
    }

    /// Register `rule` as `name` for pages whose relative path matches `pattern`.
    ///
    /// A pattern keeps the position of its first registration; registering the
    /// same name again replaces the rule.
    pub fn register(
        &mut self,
        pattern: &str,
        name: &str,
        rule: UrlRule,
    ) -> Result<&mut Self, InvalidPatternError> {
        let compiled = Pattern::new(pattern).map_err(|source| InvalidPatternError {
            pattern: pattern.to_string(),
            source,
        })?;
        self.insert(compiled, name, rule);
        Ok(self)
    }

    fn insert(&mut self, pattern: Pattern, name: &str, rule: UrlRule) {
        let entry = match self
            .patterns
            .iter()
            .position(|p| p.source == pattern.as_str())
        {
            Some(idx) => &mut self.patterns[idx],
            None => {
                self.patterns.push(PatternRules {
                    source: pattern.as_str().to_string(),
                    pattern,
                    rules: HashMap::new(),
                });
                self.patterns.last_mut().expect("just pushed")
            }
        };
        entry.rules.insert(name.to_string(), rule);
    }

    /// Pick the rule for a page at `relative_path` declaring `intent`.
    pub fn resolve(&self, relative_path: &str, intent: &str) -> Option<UrlRule> {
        for entry in self.patterns.iter().rev() {
            if !entry.pattern.matches(relative_path) {
                continue;
            }
            if let Some(rule) = entry.rules.get(intent) {
                return Some(rule.clone());
            }
            if entry.source == CATCH_ALL && intent != DEFAULT_URL_RULE {
                return Some(UrlRule::Literal(intent.to_string()));
            }
            if let Some(rule) = entry.rules.get(DEFAULT_URL_RULE) {
                return Some(rule.clone());
            }
        }
        None
    }

    /// Resolve, apply and expand the URL for `page`.
    pub fn url_for(&self, page: &Page) -> Result<String, UrlResolutionError> {
        let intent = page.url_intent();
        let rule = self
            .resolve(&page.relative_path, intent)
            .ok_or_else(|| UrlResolutionError::NoRule {
                path: page.relative_path.clone(),
                intent: intent.to_string(),
            })?;
        let url = expand(&rule.apply(page), page);
        if url.split('/').any(|segment| segment == "..") {
            return Err(UrlResolutionError::EscapesOutput(url));
        }
        Ok(url)
    }
}

/// The `default` rule: swap the source extension for the output one, and
/// link to directories rather than their `index.html`.
pub fn default_url(page: &Page) -> String {
    let path = page.relative_path.as_str();
    let (head, tail) = match path.rfind('/') {
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => ("", path),
    };
    let stem = match tail.rfind('.') {
        Some(idx) if idx > 0 => &tail[..idx],
        _ => tail,
    };
    let filename = format!("{stem}.{}", page.output_ext);

    if filename == "index.html" {
        format!("{head}/")
    } else if head.is_empty() {
        filename
    } else {
        format!("{head}/{filename}")
    }
}

/// Substitute page variables into a URL template.
pub fn expand(template: &str, page: &Page) -> String {
    let date = page.date();
    let vars: HashMap<&str, String> = HashMap::from([
        ("year", date.format("%Y").to_string()),
        ("month", date.format("%m").to_string()),
        ("day", date.format("%d").to_string()),
        ("slug", page.slug().to_string()),
        ("ext", page.output_ext.clone()),
    ]);
    substitute(template, &vars)
}

/// `$name` / `${name}` substitution that leaves unknown names untouched.
pub fn substitute(template: &str, vars: &HashMap<&str, String>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            if caps.name("escaped").is_some() {
                return "$".to_string();
            }
            let name = caps
                .name("named")
                .or_else(|| caps.name("braced"))
                .map(|m| m.as_str())
                .unwrap_or_default();
            match vars.get(name) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Where a page with `url` is written below `output_root`.
///
/// Leading separators are ignored, so absolute URLs stay inside the output
/// root. URLs naming a directory get `index.html`.
pub fn output_path(output_root: &Path, url: &str) -> PathBuf {
    let relative = url.trim_start_matches('/');
    let mut path = output_root.to_path_buf();
    path.extend(relative.split('/').filter(|s| !s.is_empty() && *s != "."));
    if relative.is_empty() || relative.ends_with('/') {
        path.push("index.html");
    }
    path
}
