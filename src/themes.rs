//! Theme discovery.
//!
//! Themes are plain CSS files dropped into a directory. Each file becomes
//! one entry in the page's theme switcher; the file name is the identity
//! and the display label is derived from the stem (`midnight-blue.css` →
//! "Midnight Blue"). The structural base stylesheet lives in the same
//! directory under a reserved name and is never offered as a theme.

use std::fs;
use std::io;
use std::path::Path;

/// File name of the structural stylesheet every page links first.
/// Excluded from theme listings.
pub const BASE_STYLESHEET: &str = "base.css";

/// A selectable stylesheet variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Stylesheet file name, relative to the output directory.
    pub file: String,
    /// Human-readable label shown in the theme switcher.
    pub label: String,
}

impl Theme {
    /// The synthetic entry used when no theme directory is available.
    pub fn fallback() -> Theme {
        Theme {
            file: "default.css".to_string(),
            label: "Default".to_string(),
        }
    }
}

/// List the stylesheet variants in a theme directory.
///
/// Returns `(file name, label)` pairs for every `.css` file except the
/// reserved [`BASE_STYLESHEET`], sorted by label ascending. A missing
/// directory yields an empty list — the renderer substitutes a synthetic
/// default in that case.
pub fn discover_themes(dir: &Path) -> io::Result<Vec<Theme>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut themes = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name == BASE_STYLESHEET {
            continue;
        }
        let Some(stem) = name.strip_suffix(".css") else {
            continue;
        };
        themes.push(Theme {
            file: name.to_string(),
            label: label_from_stem(stem),
        });
    }

    themes.sort_by(|a, b| a.label.cmp(&b.label));
    Ok(themes)
}

/// Display label for a stylesheet stem: dashes and underscores become
/// spaces, each word is capitalized.
fn label_from_stem(stem: &str) -> String {
    stem.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
