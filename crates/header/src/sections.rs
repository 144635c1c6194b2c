//! Section role classification.
//!
//! Header fragments are authored as an ordered run of sections, historically
//! consumed by position (0 = brand, 1 = navigation, 2 = actions). Position is
//! treated here as the last resort: an authored `data-role` marker wins, then
//! structural content, and only content that defeats both falls back to the
//! ordinal slot. Sections beyond the recognized roles are skipped without
//! error.

use dom::{DomTree, NodeId, query};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionRole {
    Brand,
    Navigation,
    Actions,
}

impl SectionRole {
    fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "brand" => Some(Self::Brand),
            "nav" | "navigation" => Some(Self::Navigation),
            "actions" => Some(Self::Actions),
            _ => None,
        }
    }
}

/// Substrings marking a link as an action control rather than navigation.
const ACTION_HREF_MARKERS: [&str; 3] = ["search", "contact", "/tools/widgets/"];

/// Assign a role to each recognizable section. At most one section per role;
/// the first match wins.
pub fn classify(tree: &DomTree, sections: &[NodeId]) -> Vec<(SectionRole, NodeId)> {
    let mut assigned: Vec<(SectionRole, NodeId)> = Vec::new();
    let mut unassigned: Vec<NodeId> = Vec::new();

    // Pass 1: explicit markers, then structure.
    for &section in sections {
        let role = marker_role(tree, section).or_else(|| structural_role(tree, section));
        match role {
            Some(role) if !taken(&assigned, role) => assigned.push((role, section)),
            _ => unassigned.push(section),
        }
    }

    // Pass 2: ordinal fallback for whatever is left, in authored order.
    let remaining: Vec<SectionRole> = [
        SectionRole::Brand,
        SectionRole::Navigation,
        SectionRole::Actions,
    ]
    .into_iter()
    .filter(|role| !taken(&assigned, *role))
    .collect();
    let mut fallback = remaining.into_iter();
    for section in unassigned {
        let Some(role) = fallback.next() else {
            break;
        };
        assigned.push((role, section));
    }

    assigned
}

fn taken(assigned: &[(SectionRole, NodeId)], role: SectionRole) -> bool {
    assigned.iter().any(|(existing, _)| *existing == role)
}

pub fn role_of(
    assigned: &[(SectionRole, NodeId)],
    role: SectionRole,
) -> Option<NodeId> {
    assigned
        .iter()
        .find(|(existing, _)| *existing == role)
        .map(|(_, section)| *section)
}

fn marker_role(tree: &DomTree, section: NodeId) -> Option<SectionRole> {
    tree.attr(section, "data-role")
        .and_then(SectionRole::from_marker)
}

fn structural_role(tree: &DomTree, section: NodeId) -> Option<SectionRole> {
    let links = query::find_all_by_tag(tree, section, "a");

    // A top-level item list is the strongest navigation signal.
    let has_item_list = query::find(tree, section, |t, node| {
        t.tag_name(node) == Some("ul")
            && query::find_by_tag(t, node, "a").is_some()
    })
    .is_some();
    if has_item_list {
        return Some(SectionRole::Navigation);
    }

    // All-action links mark the actions section.
    if !links.is_empty()
        && links.iter().all(|link| {
            tree.attr(*link, "href").is_some_and(|href| {
                ACTION_HREF_MARKERS
                    .iter()
                    .any(|marker| href.contains(marker))
            })
        })
    {
        return Some(SectionRole::Actions);
    }

    // A single link with no list reads as the brand.
    if links.len() == 1 {
        return Some(SectionRole::Brand);
    }

    None
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, reason = "test assertions")]

    use super::*;
    use dom::parse_document;

    fn sections_of(tree: &DomTree) -> Vec<NodeId> {
        let body = query::body(tree).expect("body");
        query::find_all_by_class(tree, body, "section")
    }

    #[test]
    fn structural_classification_survives_reordering() {
        // Actions first, navigation second, brand last: position would
        // misassign all three.
        let tree = parse_document(
            "<div class=\"section\"><p>\
               <a href=\"/search\">Search</a>\
               <a href=\"/contact\">Contact</a></p></div>\
             <div class=\"section\"><ul><li><p><a href=\"/products\">Products</a></p></li></ul></div>\
             <div class=\"section\"><p><a href=\"/\">Home</a></p></div>",
        );
        let sections = sections_of(&tree);
        let assigned = classify(&tree, &sections);

        assert_eq!(role_of(&assigned, SectionRole::Actions), Some(sections[0]));
        assert_eq!(role_of(&assigned, SectionRole::Navigation), Some(sections[1]));
        assert_eq!(role_of(&assigned, SectionRole::Brand), Some(sections[2]));
    }

    #[test]
    fn data_role_marker_wins() {
        let tree = parse_document(
            "<div class=\"section\" data-role=\"actions\"><p><a href=\"/odd\">Odd</a></p></div>",
        );
        let sections = sections_of(&tree);
        let assigned = classify(&tree, &sections);
        assert_eq!(role_of(&assigned, SectionRole::Actions), Some(sections[0]));
    }

    #[test]
    fn unclassifiable_sections_fall_back_to_position() {
        let tree = parse_document(
            "<div class=\"section\"><p>just text</p></div>\
             <div class=\"section\"><p>more text</p></div>",
        );
        let sections = sections_of(&tree);
        let assigned = classify(&tree, &sections);
        assert_eq!(role_of(&assigned, SectionRole::Brand), Some(sections[0]));
        assert_eq!(role_of(&assigned, SectionRole::Navigation), Some(sections[1]));
        assert_eq!(role_of(&assigned, SectionRole::Actions), None);
    }

    #[test]
    fn extra_sections_are_skipped() {
        let tree = parse_document(
            "<div class=\"section\"><p>a</p></div>\
             <div class=\"section\"><p>b</p></div>\
             <div class=\"section\"><p>c</p></div>\
             <div class=\"section\"><p>d</p></div>",
        );
        let sections = sections_of(&tree);
        let assigned = classify(&tree, &sections);
        assert_eq!(assigned.len(), 3);
    }
}
