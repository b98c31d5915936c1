//! Per-folder page rendering.
//!
//! A pure function from `(folder, site title, parent link, theme list)` to
//! a complete HTML document. No file I/O; the site writer decides where
//! the markup lands.
//!
//! ## Page anatomy
//!
//! - Header: folder title, generation timestamp, back link to the parent
//!   page (absent on the root), theme switcher.
//! - Two sections, bookmarks then subfolders, each preserving source
//!   order. Mixed interleaving in the source does not survive — the two
//!   kinds always render separately. Empty sections show placeholder text
//!   so an empty folder doesn't look like a rendering bug.
//! - Inline script (embedded at compile time) that persists the theme
//!   choice and tile order in `localStorage`.
//!
//! ## Escaping
//!
//! Titles, descriptions, and hrefs all originate from bookmark-file
//! content — an injection surface. Everything flows through maud's
//! auto-escaping interpolation; `PreEscaped` appears exactly once, for
//! our own embedded script.

use crate::themes::{BASE_STYLESHEET, Theme};
use crate::tree::{Bookmark, Folder};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    /// A folder reached the renderer without an assigned slug. This is a
    /// traversal-ordering defect in the caller, not a content problem.
    #[error("folder '{0}' has no slug assigned; slug assignment must run before rendering")]
    SlugUnassigned(String),
}

const JS: &str = include_str!("../static/app.js");

/// Render one folder as a self-contained HTML document.
///
/// `parent_link` is the slug of the folder's parent page, or `None` for
/// the root. An empty `themes` list falls back to a single synthetic
/// default entry; the first entry is always the initially selected theme.
pub fn render_page(
    folder: &Folder,
    page_title: &str,
    parent_link: Option<&str>,
    themes: &[Theme],
) -> Result<Markup, RenderError> {
    let own_slug = folder
        .slug
        .as_deref()
        .ok_or_else(|| RenderError::SlugUnassigned(folder.title.clone()))?;

    // Resolve child slugs up front so the markup construction below is
    // infallible.
    let mut subfolder_links: Vec<(&str, &str)> = Vec::new();
    for sub in folder.subfolders() {
        let slug = sub
            .slug
            .as_deref()
            .ok_or_else(|| RenderError::SlugUnassigned(sub.title.clone()))?;
        subfolder_links.push((sub.title.as_str(), slug));
    }

    let fallback = [Theme::fallback()];
    let themes = if themes.is_empty() { &fallback[..] } else { themes };
    let active = &themes[0];

    let doc_title = format!("{} – {}", folder.title, page_title);
    let generated = Utc::now().format("%Y-%m-%d %H:%M UTC").to_string();

    let content = html! {
        header.site-header {
            div.heading {
                h1 { (folder.title) }
                p.updated { "Updated " (generated) }
            }
            nav.site-tools {
                @if let Some(parent) = parent_link {
                    a.parent href=(parent) { "↩ Back" }
                }
                select id="theme-picker" aria-label="Theme" {
                    @for theme in themes {
                        option value=(theme.file) selected[theme.file == active.file] {
                            (theme.label)
                        }
                    }
                }
            }
        }
        main {
            section {
                h2 { "Bookmarks" }
                @if folder.bookmarks().next().is_some() {
                    ul.tiles.bookmarks data-reorder-key={ (own_slug) ":bookmarks" } {
                        @for bookmark in folder.bookmarks() {
                            (bookmark_tile(bookmark))
                        }
                    }
                } @else {
                    p.muted { "No bookmarks." }
                }
            }
            section {
                h2 { "Folders" }
                @if !subfolder_links.is_empty() {
                    ul.tiles.subfolders data-reorder-key={ (own_slug) ":folders" } {
                        @for (title, slug) in &subfolder_links {
                            li.tile.folder draggable="true" data-key=(slug) {
                                a href=(slug) { (title) }
                            }
                        }
                    }
                } @else {
                    p.muted { "No subfolders." }
                }
            }
        }
    };

    Ok(base_document(&doc_title, &active.file, content))
}

/// The shared document shell: head with stylesheets, body, inline script.
fn base_document(title: &str, active_theme: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href=(BASE_STYLESHEET);
                link id="theme-style" rel="stylesheet" href=(active_theme);
            }
            body {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// One bookmark tile: title link, optional description, metadata line.
fn bookmark_tile(bookmark: &Bookmark) -> Markup {
    html! {
        li.tile.bookmark draggable="true" data-key=(bookmark.href) {
            a href=(bookmark.href) target="_blank" rel="noreferrer noopener" {
                (bookmark.title)
            }
            @if let Some(desc) = &bookmark.description {
                div.desc { (desc) }
            }
            @if let Some(meta) = metadata_line(bookmark) {
                div.meta { (meta) }
            }
        }
    }
}

/// "added 2023-04-01 · updated 2024-01-02" from whichever timestamps are
/// present, or `None` when the bookmark has neither.
fn metadata_line(bookmark: &Bookmark) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(added) = &bookmark.added {
        parts.push(format!("added {}", display_date(added)));
    }
    if let Some(modified) = &bookmark.modified {
        parts.push(format!("updated {}", display_date(modified)));
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" · "))
    }
}

/// Reduce a raw timestamp to its date for display.
///
/// XBEL timestamps are typically ISO-8601, but nothing validated them at
/// parse time. Accepts RFC 3339 (the trailing `Z` included), naive
/// datetimes, and bare dates; anything else passes through unchanged
/// rather than erroring or disappearing.
fn display_date(raw: &str) -> String {
    let value = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.date().format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return dt.date().format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return dt.date().format("%Y-%m-%d").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;

    fn slugged(title: &str, slug: &str) -> Folder {
        Folder {
            title: title.to_string(),
            children: Vec::new(),
            slug: Some(slug.to_string()),
        }
    }

    fn bookmark(title: &str, href: &str) -> Bookmark {
        Bookmark {
            title: title.to_string(),
            href: href.to_string(),
            description: None,
            added: None,
            modified: None,
        }
    }

    fn no_themes() -> Vec<Theme> {
        Vec::new()
    }

    #[test]
    fn empty_folder_renders_both_placeholders() {
        let folder = slugged("Empty", "empty.html");
        let html = render_page(&folder, "Site", None, &no_themes())
            .unwrap()
            .into_string();
        assert!(html.contains("No bookmarks."));
        assert!(html.contains("No subfolders."));
    }

    #[test]
    fn bookmark_and_folder_sections_are_separate() {
        let mut folder = slugged("Mixed", "mixed.html");
        folder.children = vec![
            Node::Folder(slugged("Sub", "sub.html")),
            Node::Bookmark(bookmark("Docs", "https://example.org")),
        ];
        let html = render_page(&folder, "Site", None, &no_themes())
            .unwrap()
            .into_string();
        assert!(html.contains(r#"class="tiles bookmarks""#));
        assert!(html.contains(r#"class="tiles subfolders""#));
        assert!(html.contains(r#"href="sub.html""#));
        assert!(html.contains("Docs"));
    }

    #[test]
    fn parent_link_rendered_only_when_present() {
        let folder = slugged("Child", "child.html");
        let with = render_page(&folder, "Site", Some("index.html"), &no_themes())
            .unwrap()
            .into_string();
        let without = render_page(&folder, "Site", None, &no_themes())
            .unwrap()
            .into_string();
        assert!(with.contains(r#"class="parent" href="index.html""#));
        assert!(!without.contains(r#"class="parent""#));
    }

    #[test]
    fn hostile_titles_and_hrefs_are_escaped() {
        let mut folder = slugged("Attack", "attack.html");
        folder.children = vec![Node::Bookmark(Bookmark {
            title: "<script>alert(1)</script>".to_string(),
            href: "javascript:alert(1)&\"".to_string(),
            description: Some("<img src=x onerror=alert(2)>".to_string()),
            added: None,
            modified: None,
        })];
        let html = render_page(&folder, "Site", None, &no_themes())
            .unwrap()
            .into_string();

        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("javascript:alert(1)&amp;&quot;"));
        assert!(!html.contains("<img src=x"));
    }

    #[test]
    fn missing_own_slug_is_an_error() {
        let folder = Folder::new("Unslugged");
        let err = render_page(&folder, "Site", None, &no_themes()).unwrap_err();
        assert!(matches!(err, RenderError::SlugUnassigned(title) if title == "Unslugged"));
    }

    #[test]
    fn missing_child_slug_is_an_error() {
        let mut folder = slugged("Parent", "parent.html");
        folder.children = vec![Node::Folder(Folder::new("Orphan"))];
        let err = render_page(&folder, "Site", None, &no_themes()).unwrap_err();
        assert!(matches!(err, RenderError::SlugUnassigned(title) if title == "Orphan"));
    }

    #[test]
    fn empty_theme_list_falls_back_to_default() {
        let folder = slugged("Any", "any.html");
        let html = render_page(&folder, "Site", None, &no_themes())
            .unwrap()
            .into_string();
        assert!(html.contains(r#"href="default.css""#));
        assert!(html.contains("Default"));
    }

    #[test]
    fn first_theme_is_selected_and_linked() {
        let themes = vec![
            Theme {
                file: "midnight.css".to_string(),
                label: "Midnight".to_string(),
            },
            Theme {
                file: "paper.css".to_string(),
                label: "Paper".to_string(),
            },
        ];
        let folder = slugged("Any", "any.html");
        let html = render_page(&folder, "Site", None, &themes)
            .unwrap()
            .into_string();
        assert!(html.contains(r#"value="midnight.css" selected"#));
        assert!(!html.contains(r#"value="paper.css" selected"#));
        assert!(html.contains(r#"id="theme-style" rel="stylesheet" href="midnight.css""#));
    }

    #[test]
    fn base_stylesheet_always_linked() {
        let folder = slugged("Any", "any.html");
        let html = render_page(&folder, "Site", None, &no_themes())
            .unwrap()
            .into_string();
        assert!(html.contains(r#"href="base.css""#));
    }

    #[test]
    fn doc_title_combines_folder_and_site() {
        let folder = slugged("Work", "work.html");
        let html = render_page(&folder, "My Bookmarks", None, &no_themes())
            .unwrap()
            .into_string();
        assert!(html.contains("<title>Work – My Bookmarks</title>"));
    }

    #[test]
    fn metadata_line_from_both_timestamps() {
        let mut b = bookmark("x", "https://a.example");
        b.added = Some("2023-04-01T10:00:00Z".to_string());
        b.modified = Some("2024-01-02".to_string());
        assert_eq!(
            metadata_line(&b).unwrap(),
            "added 2023-04-01 · updated 2024-01-02"
        );
    }

    #[test]
    fn metadata_line_absent_without_timestamps() {
        let b = bookmark("x", "https://a.example");
        assert_eq!(metadata_line(&b), None);
    }

    #[test]
    fn malformed_timestamp_passes_through() {
        let mut b = bookmark("x", "https://a.example");
        b.added = Some("sometime last week".to_string());
        assert_eq!(metadata_line(&b).unwrap(), "added sometime last week");
    }

    #[test]
    fn display_date_accepts_common_iso_shapes() {
        assert_eq!(display_date("2023-04-01T10:00:00Z"), "2023-04-01");
        assert_eq!(display_date("2023-04-01T10:00:00+02:00"), "2023-04-01");
        assert_eq!(display_date("2023-04-01T10:00:00.123"), "2023-04-01");
        assert_eq!(display_date("2023-04-01T10:00"), "2023-04-01");
        assert_eq!(display_date("2023-04-01 10:00:00"), "2023-04-01");
        assert_eq!(display_date("2023-04-01"), "2023-04-01");
    }

    #[test]
    fn tiles_carry_reorder_metadata() {
        let mut folder = slugged("Work", "work.html");
        folder.children = vec![Node::Bookmark(bookmark("Docs", "https://example.org"))];
        let html = render_page(&folder, "Site", None, &no_themes())
            .unwrap()
            .into_string();
        assert!(html.contains(r#"data-reorder-key="work.html:bookmarks""#));
        assert!(html.contains(r#"draggable="true""#));
        assert!(html.contains(r#"data-key="https://example.org""#));
    }
}
