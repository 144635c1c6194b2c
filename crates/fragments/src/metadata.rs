//! Page metadata lookup.

use dom::{DomTree, query};

/// Value of the `<meta name="...">` tag with the given name, if present in
/// the page head. Used for per-page overrides such as the header fragment
/// path.
pub fn page_metadata(tree: &DomTree, name: &str) -> Option<String> {
    let meta = query::find(tree, tree.document(), |t, node| {
        t.tag_name(node) == Some("meta") && t.attr(node, "name") == Some(name)
    })?;
    tree.attr(meta, "content").map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::parse_document;

    #[test]
    fn reads_meta_content_by_name() {
        let tree = parse_document(
            "<html><head><meta name=\"header\" content=\"/custom/nav\"></head><body></body></html>",
        );
        assert_eq!(page_metadata(&tree, "header"), Some("/custom/nav".to_string()));
        assert_eq!(page_metadata(&tree, "footer"), None);
    }
}
