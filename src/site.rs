//! Site writing: the build entry point and recursive page emission.
//!
//! [`build_site`] runs the whole pipeline strictly in sequence:
//!
//! ```text
//! parse each input → assemble under one root → assign slugs
//!     → discover themes → write stylesheets → write one page per folder
//! ```
//!
//! Every invocation is a full rebuild: the output directory is created if
//! absent and every target file is overwritten unconditionally. There is
//! no partial or incremental mode, and no locking — concurrent builds
//! into the same directory are the caller's problem (last writer wins).
//!
//! A failure at any stage (unreadable input, malformed document, write
//! error) aborts the remaining traversal and propagates. Already-written
//! files are left in place; a retry overwrites them.

use crate::output::BuildLogger;
use crate::parse::{self, ParseError};
use crate::render::{self, RenderError};
use crate::slug;
use crate::themes::{self, BASE_STYLESHEET, Theme};
use crate::tree::{self, Folder};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Render(#[from] RenderError),
}

const BASE_CSS: &str = include_str!("../static/base.css");
const DEFAULT_THEME_CSS: &str = include_str!("../static/default.css");

/// Build the complete site from a set of XBEL files.
///
/// `theme_dir` is an optional directory of theme stylesheets; without one
/// (or with an empty one) the embedded default theme is used. `logger`
/// receives progress callbacks — pass [`crate::output::NoopLogger`] when
/// nothing should be printed.
///
/// Returns the path of the written root page (`index.html`).
pub fn build_site(
    inputs: &[PathBuf],
    output_dir: &Path,
    page_title: &str,
    theme_dir: Option<&Path>,
    logger: &dyn BuildLogger,
) -> Result<PathBuf, BuildError> {
    let mut folders = Vec::with_capacity(inputs.len());
    for path in inputs {
        folders.push(parse::parse_xbel_file(path)?);
        logger.input_parsed(path);
    }

    let mut root = tree::assemble(folders, page_title);
    slug::assign_slugs(&mut root);

    let themes = match theme_dir {
        Some(dir) => themes::discover_themes(dir)?,
        None => Vec::new(),
    };

    fs::create_dir_all(output_dir)?;
    write_stylesheets(output_dir, theme_dir, &themes)?;
    write_folder_pages(&root, output_dir, page_title, None, &themes, logger)?;

    logger.build_finished(root.folder_count(), output_dir);
    Ok(output_dir.join(slug::INDEX_SLUG))
}

/// Render and write this folder's page, then recurse into subfolders with
/// this folder's slug as their parent link.
pub fn write_folder_pages(
    folder: &Folder,
    output_dir: &Path,
    page_title: &str,
    parent_link: Option<&str>,
    themes: &[Theme],
    logger: &dyn BuildLogger,
) -> Result<(), BuildError> {
    let file_name = folder
        .slug
        .as_deref()
        .ok_or_else(|| RenderError::SlugUnassigned(folder.title.clone()))?;

    let html = render::render_page(folder, page_title, parent_link, themes)?;
    fs::write(output_dir.join(file_name), html.into_string())?;
    logger.page_written(file_name, &folder.title);

    for sub in folder.subfolders() {
        write_folder_pages(sub, output_dir, page_title, Some(file_name), themes, logger)?;
    }
    Ok(())
}

/// Write the base stylesheet and the theme files the pages link to.
///
/// The embedded base stylesheet is always written. Discovered themes are
/// copied from the theme directory; with none available, the embedded
/// default theme backs the renderer's synthetic fallback entry.
fn write_stylesheets(
    output_dir: &Path,
    theme_dir: Option<&Path>,
    themes: &[Theme],
) -> io::Result<()> {
    fs::write(output_dir.join(BASE_STYLESHEET), BASE_CSS)?;

    match theme_dir {
        Some(dir) if !themes.is_empty() => {
            for theme in themes {
                fs::copy(dir.join(&theme.file), output_dir.join(&theme.file))?;
            }
        }
        _ => {
            fs::write(
                output_dir.join(Theme::fallback().file),
                DEFAULT_THEME_CSS,
            )?;
        }
    }
    Ok(())
}
