//! Build progress reporting.
//!
//! The site writer reports progress through an explicit [`BuildLogger`]
//! collaborator injected into the build entry point, rather than printing
//! directly — library callers and tests pass [`NoopLogger`] and stay
//! silent, the CLI passes [`ConsoleLogger`].
//!
//! Formatting is split from printing: `format_*` functions are pure and
//! unit-testable, [`ConsoleLogger`] just forwards them to stdout.
//!
//! ```text
//! Parsed bookmarks/dev.xbel
//! Parsed bookmarks/reading.xbel
//! My Bookmarks → index.html
//! Dev Links → dev-links.html
//! Tools → tools.html
//! Generated 3 pages → dist
//! ```

use std::path::Path;

/// Progress callbacks for a site build. All methods default to no-ops, so
/// implementors override only what they care about.
pub trait BuildLogger {
    /// An input file was parsed successfully.
    fn input_parsed(&self, path: &Path) {
        let _ = path;
    }

    /// A folder page was written under `slug`.
    fn page_written(&self, slug: &str, title: &str) {
        let _ = (slug, title);
    }

    /// The whole build finished; `page_count` pages landed in `output_dir`.
    fn build_finished(&self, page_count: usize, output_dir: &Path) {
        let _ = (page_count, output_dir);
    }
}

/// Silent logger for library callers and tests.
pub struct NoopLogger;

impl BuildLogger for NoopLogger {}

/// Logger that prints one line per event to stdout.
pub struct ConsoleLogger;

impl BuildLogger for ConsoleLogger {
    fn input_parsed(&self, path: &Path) {
        println!("{}", format_input_line(path));
    }

    fn page_written(&self, slug: &str, title: &str) {
        println!("{}", format_page_line(slug, title));
    }

    fn build_finished(&self, page_count: usize, output_dir: &Path) {
        println!("{}", format_summary(page_count, output_dir));
    }
}

pub fn format_input_line(path: &Path) -> String {
    format!("Parsed {}", path.display())
}

pub fn format_page_line(slug: &str, title: &str) -> String {
    format!("{title} → {slug}")
}

pub fn format_summary(page_count: usize, output_dir: &Path) -> String {
    let pages = if page_count == 1 { "page" } else { "pages" };
    format!(
        "Generated {} {} → {}",
        page_count,
        pages,
        output_dir.display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_line_shows_title_and_slug() {
        assert_eq!(format_page_line("work.html", "Work"), "Work → work.html");
    }

    #[test]
    fn summary_pluralizes() {
        assert_eq!(
            format_summary(1, Path::new("dist")),
            "Generated 1 page → dist"
        );
        assert_eq!(
            format_summary(3, Path::new("out")),
            "Generated 3 pages → out"
        );
    }

    #[test]
    fn noop_logger_accepts_all_events() {
        let logger = NoopLogger;
        logger.input_parsed(Path::new("a.xbel"));
        logger.page_written("index.html", "Root");
        logger.build_finished(1, Path::new("dist"));
    }
}
