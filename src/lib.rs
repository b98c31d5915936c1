//! # Bookstand
//!
//! A minimal static site generator for XBEL bookmark collections. One or
//! more XBEL files go in; a directory of cross-linked HTML pages comes
//! out — one page per folder, with parent/child navigation, a client-side
//! theme switcher, and drag-and-drop tile reordering persisted in the
//! browser.
//!
//! # Architecture: One Pass, Five Stages
//!
//! Every invocation runs the full pipeline over a single in-memory tree:
//!
//! ```text
//! 1. Parse     *.xbel     →  Folder tree per file   (quick-xml)
//! 2. Assemble  trees      →  one synthetic root
//! 3. Slug      tree       →  unique page name per folder
//! 4. Render    folder     →  HTML document           (maud)
//! 5. Write     documents  →  dist/                   (flat, full rewrite)
//! ```
//!
//! There is deliberately no incremental mode and no state between runs:
//! bookmark collections are small, a full rebuild is instant, and
//! idempotent rewrites make failure recovery trivial (just run it again).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`parse`] | Stage 1 — XBEL document → `Folder` tree, tolerant of malformed individual bookmarks |
//! | [`tree`] | Shared tree types (`Folder`, `Bookmark`, `Node`) and the assembly step |
//! | [`slug`] | Stage 3 — stable, globally unique, URL-safe page names |
//! | [`render`] | Stage 4 — pure per-folder page rendering with Maud |
//! | [`site`] | Stage 5 — build entry point, recursive page emission, stylesheet output |
//! | [`themes`] | Stylesheet variant discovery for the theme switcher |
//! | [`output`] | CLI progress reporting via the injected `BuildLogger` |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Bookmark titles, descriptions, and URLs are
//! attacker-supplied content (a browser export can contain anything), and
//! Maud's auto-escaped interpolation makes injection-by-title a
//! non-concern rather than a discipline.
//!
//! ## Flat Output, Global Slugs
//!
//! Every page lands directly in the output directory, so slug uniqueness
//! is enforced globally across the whole tree, not per folder. The root
//! reserves `index.html` before any other name is assigned; duplicate
//! titles get counter suffixes (`work.html`, `work-2.html`). Assignment
//! is a deterministic pre-order walk — same tree, same names, every run.
//!
//! ## Client State Stays in the Client
//!
//! The theme choice and tile order are browser concerns, persisted in
//! `localStorage` by a small inline script. The generator never sees
//! them; regeneration can't lose them.

pub mod output;
pub mod parse;
pub mod render;
pub mod site;
pub mod slug;
pub mod themes;
pub mod tree;
