//! Shared tree types for the bookmark pipeline.
//!
//! Every stage operates on the same in-memory tree: a [`Folder`] whose
//! children are an ordered sequence of [`Node`]s, each either a nested
//! folder or a bookmark leaf. Child order is document order from the
//! source XBEL file and is significant — it is the default render order.
//!
//! The tree is built once per invocation (parse + [`assemble`]), slugged
//! once ([`crate::slug::assign_slugs`]), consumed once by the site writer,
//! then discarded. `Folder::slug` is the only field mutated after
//! construction: absent → assigned once → never touched again.

/// A bookmark leaf.
///
/// Optional fields hold `None` rather than empty strings — the parser
/// normalizes blanks away so render code never has to re-check.
#[derive(Debug, Clone, PartialEq)]
pub struct Bookmark {
    /// Display title. Falls back to the href when the source has no
    /// (or a blank) `<title>` element.
    pub title: String,
    /// Link target. Always non-empty: bookmarks without an href are
    /// dropped at parse time.
    pub href: String,
    /// Description from the `<desc>` element.
    pub description: Option<String>,
    /// Raw `added` attribute value, as provided by the source.
    pub added: Option<String>,
    /// Raw `modified` attribute value, as provided by the source.
    pub modified: Option<String>,
}

/// An internal folder node. Each folder becomes exactly one output page.
#[derive(Debug, Clone, PartialEq)]
pub struct Folder {
    pub title: String,
    /// Children in source document order.
    pub children: Vec<Node>,
    /// Output file name (`*.html`), unset until slug assignment runs.
    pub slug: Option<String>,
}

/// A child of a folder: either a nested folder or a bookmark.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Folder(Folder),
    Bookmark(Bookmark),
}

impl Folder {
    /// A folder with the given title and no children yet.
    pub fn new(title: impl Into<String>) -> Self {
        Folder {
            title: title.into(),
            children: Vec::new(),
            slug: None,
        }
    }

    /// Direct bookmark children, in source order.
    pub fn bookmarks(&self) -> impl Iterator<Item = &Bookmark> {
        self.children.iter().filter_map(|child| match child {
            Node::Bookmark(b) => Some(b),
            Node::Folder(_) => None,
        })
    }

    /// Direct subfolder children, in source order.
    pub fn subfolders(&self) -> impl Iterator<Item = &Folder> {
        self.children.iter().filter_map(|child| match child {
            Node::Folder(f) => Some(f),
            Node::Bookmark(_) => None,
        })
    }

    /// Number of folders in this subtree, this folder included.
    ///
    /// After writing, this equals the number of emitted HTML pages.
    pub fn folder_count(&self) -> usize {
        1 + self.subfolders().map(Folder::folder_count).sum::<usize>()
    }
}

/// Wrap parsed per-file folders under one synthetic root.
///
/// The root carries the overall site title; its children are exactly the
/// parsed folders in input order. No deduplication, no merging of folders
/// with identical titles — two files both titled "Work" stay two folders.
pub fn assemble(folders: Vec<Folder>, page_title: &str) -> Folder {
    Folder {
        title: page_title.to_string(),
        children: folders.into_iter().map(Node::Folder).collect(),
        slug: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bookmark(title: &str) -> Node {
        Node::Bookmark(Bookmark {
            title: title.to_string(),
            href: format!("https://example.org/{title}"),
            description: None,
            added: None,
            modified: None,
        })
    }

    #[test]
    fn assemble_preserves_input_order() {
        let root = assemble(
            vec![Folder::new("Second"), Folder::new("First")],
            "My Bookmarks",
        );
        assert_eq!(root.title, "My Bookmarks");
        let titles: Vec<&str> = root.subfolders().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, ["Second", "First"]);
    }

    #[test]
    fn assemble_keeps_duplicate_titles_separate() {
        let root = assemble(vec![Folder::new("Work"), Folder::new("Work")], "Site");
        assert_eq!(root.subfolders().count(), 2);
    }

    #[test]
    fn partition_preserves_order_within_each_group() {
        let mut folder = Folder::new("Mixed");
        folder.children = vec![
            bookmark("a"),
            Node::Folder(Folder::new("one")),
            bookmark("b"),
            Node::Folder(Folder::new("two")),
        ];

        let bookmarks: Vec<&str> = folder.bookmarks().map(|b| b.title.as_str()).collect();
        let folders: Vec<&str> = folder.subfolders().map(|f| f.title.as_str()).collect();
        assert_eq!(bookmarks, ["a", "b"]);
        assert_eq!(folders, ["one", "two"]);
    }

    #[test]
    fn folder_count_includes_self_and_all_descendants() {
        let mut inner = Folder::new("Inner");
        inner.children = vec![Node::Folder(Folder::new("Deep"))];
        let mut outer = Folder::new("Outer");
        outer.children = vec![Node::Folder(inner), bookmark("x")];
        let root = assemble(vec![outer], "Site");

        assert_eq!(root.folder_count(), 4);
    }

    #[test]
    fn empty_root_counts_one_page() {
        let root = assemble(vec![], "Site");
        assert_eq!(root.folder_count(), 1);
    }
}
