//! CLI output formatting.
//!
//! Output leads with what a page *is* (position, title, URL) and shows the
//! source file as indented context, so the listing reads as a site
//! inventory first and a file list second.
//!
//! ## Check
//!
//! ```text
//! Pages
//! 001 Hello → hello.html
//!     Source: blog/hello.md
//!     Date: 2020-01-01
//! 002 About → about/
//!     Source: about/index.md
//!     Date: 2019-11-02 (hidden)
//!
//! 2 pages ready, 1 skipped, 0 withheld
//! ```
//!
//! ## Build
//!
//! ```text
//! Pages: 2 written, 1 skipped, 0 withheld
//! Static files: 3 copied, 0 unchanged
//! OK (2 pages; 0.01 seconds)
//! ```
//!
//! ## Init
//!
//! ```text
//! Created _lib/config.toml
//! Kept    index.md (already exists)
//! ```
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::metadata::Status;
use crate::scaffold::{FileOutcome, ScaffoldReport};
use crate::site::{BuildReport, PageSet};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Format the page inventory printed by `check`.
pub fn format_page_list(set: &PageSet) -> Vec<String> {
    let mut lines = vec!["Pages".to_string()];
    for (i, page) in set.pages.iter().enumerate() {
        let url = page.url.as_deref().unwrap_or("?");
        lines.push(format!("{} {} → {}", format_index(i + 1), page.title(), url));
        lines.push(format!("{}Source: {}", indent(1), page.relative_path));
        let date = page.date().format("%Y-%m-%d");
        match page.status() {
            Status::Live => lines.push(format!("{}Date: {}", indent(1), date)),
            status => lines.push(format!("{}Date: {} ({})", indent(1), date, status)),
        }
    }
    lines.push(String::new());
    lines.push(format!(
        "{} ready, {} skipped, {} withheld",
        plural(set.pages.len(), "page"),
        set.skipped,
        set.withheld
    ));
    lines
}

/// Print the page inventory to stdout.
pub fn print_page_list(set: &PageSet) {
    for line in format_page_list(set) {
        println!("{}", line);
    }
}

/// Format the summary printed after `build`.
pub fn format_build_report(report: &BuildReport) -> Vec<String> {
    let mut statics = format!(
        "Static files: {} copied, {} unchanged",
        report.statics_copied, report.statics_unchanged
    );
    if report.statics_failed > 0 {
        statics.push_str(&format!(", {} failed", report.statics_failed));
    }
    vec![
        format!(
            "Pages: {} written, {} skipped, {} withheld",
            report.pages_written, report.pages_skipped, report.pages_withheld
        ),
        statics,
        format!(
            "OK ({}; {:.2} seconds)",
            plural(report.pages_written, "page"),
            report.elapsed.as_secs_f64()
        ),
    ]
}

/// Print the build summary to stdout.
pub fn print_build_report(report: &BuildReport) {
    for line in format_build_report(report) {
        println!("{}", line);
    }
}

/// Format the file list printed after `init`.
pub fn format_scaffold_report(report: &ScaffoldReport) -> Vec<String> {
    report
        .files
        .iter()
        .map(|(path, outcome)| match outcome {
            FileOutcome::Created => format!("Created {}", path.display()),
            FileOutcome::Kept => format!("Kept    {} (already exists)", path.display()),
        })
        .collect()
}

/// Print the `init` file list to stdout.
pub fn print_scaffold_report(report: &ScaffoldReport) {
    for line in format_scaffold_report(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MetaValue;
    use crate::page::Page;
    use crate::test_helpers::day;
    use std::path::Path;
    use std::time::Duration;

    fn page(rel: &str, title: &str, url: &str) -> Page {
        let mut page = Page::new(&Path::new("/site").join(rel), Path::new("/site"), vec![]);
        page.metadata.insert("title".into(), title.into());
        page.metadata.insert("date".into(), MetaValue::Date(day(2020, 1, 2)));
        page.url = Some(url.into());
        page
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(0, "page"), "0 pages");
        assert_eq!(plural(1, "page"), "1 page");
        assert_eq!(plural(2, "page"), "2 pages");
    }

    #[test]
    fn page_list_shows_title_url_and_source() {
        let set = PageSet {
            pages: vec![page("blog/hello.md", "Hello", "blog/hello.html")],
            skipped: 1,
            withheld: 2,
        };
        let lines = format_page_list(&set);
        assert_eq!(lines[0], "Pages");
        assert_eq!(lines[1], "001 Hello → blog/hello.html");
        assert_eq!(lines[2], "    Source: blog/hello.md");
        assert_eq!(lines[3], "    Date: 2020-01-02");
        assert_eq!(lines.last().unwrap(), "1 page ready, 1 skipped, 2 withheld");
    }

    #[test]
    fn page_list_marks_hidden_pages() {
        let mut hidden = page("about.md", "About", "about.html");
        hidden
            .metadata
            .insert("status".into(), MetaValue::Status(Status::Hidden));
        let set = PageSet {
            pages: vec![hidden],
            ..PageSet::default()
        };
        let lines = format_page_list(&set);
        assert_eq!(lines[3], "    Date: 2020-01-02 (hidden)");
    }

    #[test]
    fn empty_page_list() {
        let lines = format_page_list(&PageSet::default());
        assert_eq!(lines, vec!["Pages", "", "0 pages ready, 0 skipped, 0 withheld"]);
    }

    #[test]
    fn build_report_summary() {
        let report = BuildReport {
            pages_written: 3,
            pages_skipped: 1,
            pages_withheld: 0,
            statics_copied: 4,
            statics_unchanged: 2,
            statics_failed: 0,
            elapsed: Duration::from_millis(1500),
        };
        let lines = format_build_report(&report);
        assert_eq!(lines[0], "Pages: 3 written, 1 skipped, 0 withheld");
        assert_eq!(lines[1], "Static files: 4 copied, 2 unchanged");
        assert_eq!(lines[2], "OK (3 pages; 1.50 seconds)");
    }

    #[test]
    fn build_report_single_page_and_failures() {
        let report = BuildReport {
            pages_written: 1,
            statics_failed: 2,
            ..BuildReport::default()
        };
        let lines = format_build_report(&report);
        assert!(lines[1].ends_with(", 2 failed"));
        assert_eq!(lines[2], "OK (1 page; 0.00 seconds)");
    }

    #[test]
    fn scaffold_report_lines() {
        let report = ScaffoldReport {
            files: vec![
                ("_lib/config.toml".into(), FileOutcome::Created),
                ("index.md".into(), FileOutcome::Kept),
            ],
        };
        assert_eq!(
            format_scaffold_report(&report),
            vec!["Created _lib/config.toml", "Kept    index.md (already exists)"]
        );
    }
}
