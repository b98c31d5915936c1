//! Slug assignment: stable, collision-free output file names.
//!
//! All pages land flat in one output directory, so slugs must be unique
//! across the entire tree — siblings and cousins alike. One used-name set
//! is threaded through a pre-order walk, seeded with the root's reserved
//! `index.html` so user folders can never claim it.
//!
//! ## Slugification
//!
//! Titles become file names by ASCII-lowercasing and collapsing every run
//! of non-alphanumeric characters to a single hyphen:
//! - `"Work Projects"` → `work-projects`
//! - `"C++ / Rust!"` → `c-rust`
//! - `"...."` → `folder` (empty result falls back)
//!
//! Collisions append a counter: `work.html`, `work-2.html`, `work-3.html`.
//! The walk order is fixed (pre-order, children in source order), so
//! re-running assignment on an unchanged tree yields identical names.

use crate::tree::{Folder, Node};
use std::collections::HashSet;

/// The root folder's fixed slug. Reserved before any other name is assigned.
pub const INDEX_SLUG: &str = "index.html";

/// Reduce a folder title to a URL- and filesystem-safe base name.
///
/// Lowercases, collapses runs of non-alphanumerics to single hyphens, and
/// trims leading/trailing hyphens. An empty result (title was all
/// punctuation, or empty) becomes the literal `folder`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for ch in title.chars() {
        let c = ch.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c);
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        "folder".to_string()
    } else {
        slug
    }
}

/// First unused `<base>.html` / `<base>-N.html` name, recorded in `used`.
fn unique_name(base: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = format!("{base}.html");
    let mut counter = 2;
    while used.contains(&candidate) {
        candidate = format!("{base}-{counter}.html");
        counter += 1;
    }
    used.insert(candidate.clone());
    candidate
}

/// Assign a slug to the root and every descendant folder, in place.
///
/// The root always gets [`INDEX_SLUG`]; descendants get slugified titles
/// with global collision resolution. Bookmarks never receive slugs.
/// Deterministic for a structurally identical tree; cannot fail.
pub fn assign_slugs(root: &mut Folder) {
    let mut used = HashSet::new();
    root.slug = Some(INDEX_SLUG.to_string());
    used.insert(INDEX_SLUG.to_string());
    assign_children(root, &mut used);
}

fn assign_children(folder: &mut Folder, used: &mut HashSet<String>) {
    for child in &mut folder.children {
        if let Node::Folder(sub) = child {
            sub.slug = Some(unique_name(&slugify(&sub.title), used));
            assign_children(sub, used);
        }
    }
}
