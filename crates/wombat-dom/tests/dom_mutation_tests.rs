//! Tests for DOM tree mutation and traversal.

use wombat_dom::{Attributes, DomTree, NodeId, NodeType};

/// Helper to create an element node and return its NodeId.
fn element(tree: &mut DomTree, tag: &str) -> NodeId {
    tree.alloc_element(tag, Attributes::new())
}

/// Helper to build `<html><head/><body/></html>` under the document.
fn shell(tree: &mut DomTree) -> (NodeId, NodeId, NodeId) {
    let html = element(tree, "html");
    let head = element(tree, "head");
    let body = element(tree, "body");
    tree.append_child(NodeId::ROOT, html);
    tree.append_child(html, head);
    tree.append_child(html, body);
    (html, head, body)
}

// ========== remove_child ==========

#[test]
fn test_remove_child_middle_relinks_siblings() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, "ul");
    tree.append_child(NodeId::ROOT, parent);

    let first = element(&mut tree, "li");
    let middle = element(&mut tree, "li");
    let last = element(&mut tree, "li");
    tree.append_child(parent, first);
    tree.append_child(parent, middle);
    tree.append_child(parent, last);

    tree.remove_child(parent, middle);

    assert_eq!(tree.children(parent), &[first, last]);
    assert_eq!(tree.next_sibling(first), Some(last));
    assert_eq!(tree.prev_sibling(last), Some(first));
    assert_eq!(tree.parent(middle), None);
    assert_eq!(tree.next_sibling(middle), None);
}

#[test]
fn test_remove_child_of_other_parent_is_ignored() {
    let mut tree = DomTree::new();
    let (_, head, body) = shell(&mut tree);
    let p = element(&mut tree, "p");
    tree.append_child(body, p);

    tree.remove_child(head, p);

    assert_eq!(tree.parent(p), Some(body));
    assert_eq!(tree.children(body), &[p]);
}

// ========== append_child / insert_before ==========

#[test]
fn test_append_child_reparents_attached_node() {
    let mut tree = DomTree::new();
    let (_, head, body) = shell(&mut tree);
    let title = element(&mut tree, "title");
    tree.append_child(body, title);

    tree.append_child(head, title);

    assert!(tree.children(body).is_empty());
    assert_eq!(tree.children(head), &[title]);
    assert_eq!(tree.parent(title), Some(head));
}

#[test]
fn test_insert_before_links_both_sides() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, "table");
    tree.append_child(NodeId::ROOT, parent);

    let a = element(&mut tree, "caption");
    let c = element(&mut tree, "tbody");
    tree.append_child(parent, a);
    tree.append_child(parent, c);

    let b = element(&mut tree, "colgroup");
    tree.insert_before(parent, b, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
    assert_eq!(tree.next_sibling(a), Some(b));
    assert_eq!(tree.prev_sibling(b), Some(a));
    assert_eq!(tree.next_sibling(b), Some(c));
    assert_eq!(tree.prev_sibling(c), Some(b));
}

#[test]
fn test_insert_before_first_child() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);
    let existing = element(&mut tree, "span");
    tree.append_child(parent, existing);

    let new_child = element(&mut tree, "em");
    tree.insert_before(parent, new_child, existing);

    assert_eq!(tree.children(parent), &[new_child, existing]);
    assert_eq!(tree.prev_sibling(new_child), None);
    assert_eq!(tree.first_child(parent), Some(new_child));
}

#[test]
fn test_insert_before_unknown_reference_appends() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, "div");
    let stranger = element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, parent);

    let child = element(&mut tree, "b");
    tree.insert_before(parent, child, stranger);

    assert_eq!(tree.children(parent), &[child]);
}

#[test]
fn test_insert_before_reference_under_other_parent_appends() {
    let mut tree = DomTree::new();
    let (_, head, body) = shell(&mut tree);
    let meta = element(&mut tree, "meta");
    tree.append_child(head, meta);
    let p = element(&mut tree, "p");
    tree.append_child(body, p);

    let span = element(&mut tree, "span");
    tree.insert_before(body, span, meta);

    assert_eq!(tree.children(body), &[p, span]);
    assert_eq!(tree.children(head), &[meta]);
    assert_eq!(tree.next_sibling(p), Some(span));
    assert_eq!(tree.prev_sibling(span), Some(p));
    assert_eq!(tree.prev_sibling(meta), None);
}

// ========== move_children ==========

#[test]
fn test_move_children_appends_to_existing() {
    let mut tree = DomTree::new();
    let from = element(&mut tree, "b");
    let to = element(&mut tree, "b");
    tree.append_child(NodeId::ROOT, from);
    tree.append_child(NodeId::ROOT, to);

    let existing = element(&mut tree, "i");
    tree.append_child(to, existing);
    let moved_a = tree.alloc(NodeType::Text("one".to_string()));
    let moved_b = element(&mut tree, "u");
    tree.append_child(from, moved_a);
    tree.append_child(from, moved_b);

    tree.move_children(from, to);

    assert!(tree.children(from).is_empty());
    assert_eq!(tree.children(to), &[existing, moved_a, moved_b]);
    assert_eq!(tree.next_sibling(existing), Some(moved_a));
    assert_eq!(tree.prev_sibling(moved_b), Some(moved_a));
    assert_eq!(tree.parent(moved_b), Some(to));
}

// ========== traversal ==========

#[test]
fn test_descendants_in_tree_order() {
    let mut tree = DomTree::new();
    let (html, head, body) = shell(&mut tree);
    let p = element(&mut tree, "p");
    let text = tree.alloc(NodeType::Text("hi".to_string()));
    tree.append_child(body, p);
    tree.append_child(p, text);

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![NodeId::ROOT, html, head, body, p, text]);
}

#[test]
fn test_ancestors_and_descendant_check() {
    let mut tree = DomTree::new();
    let (html, _, body) = shell(&mut tree);
    let p = element(&mut tree, "p");
    tree.append_child(body, p);

    let ancestors: Vec<NodeId> = tree.ancestors(p).collect();
    assert_eq!(ancestors, vec![body, html, NodeId::ROOT]);
    assert!(tree.is_descendant_of(p, html));
    assert!(!tree.is_descendant_of(html, p));
}

#[test]
fn test_text_content_concatenates() {
    let mut tree = DomTree::new();
    let (_, _, body) = shell(&mut tree);
    let b = element(&mut tree, "b");
    let one = tree.alloc(NodeType::Text("one ".to_string()));
    let two = tree.alloc(NodeType::Text("two".to_string()));
    let comment = tree.alloc(NodeType::Comment("skip".to_string()));
    tree.append_child(body, one);
    tree.append_child(body, comment);
    tree.append_child(body, b);
    tree.append_child(b, two);

    assert_eq!(tree.text_content(body), "one two");
}

#[test]
fn test_head_and_body_lookup() {
    let mut tree = DomTree::new();
    assert_eq!(tree.body(), None);

    let (html, head, body) = shell(&mut tree);
    assert_eq!(tree.document_element(), Some(html));
    assert_eq!(tree.head(), Some(head));
    assert_eq!(tree.body(), Some(body));
}

#[test]
fn test_tree_serializes_to_json() {
    let mut tree = DomTree::new();
    let div = tree.alloc_element("div", [("id", "main")].into_iter().collect());
    tree.append_child(NodeId::ROOT, div);

    let json = serde_json::to_value(&tree).expect("tree should serialize");
    let nodes = json["nodes"].as_array().expect("nodes array");
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[1]["node_type"]["type"], "Element");
    assert_eq!(nodes[1]["node_type"]["data"]["tag_name"], "div");
    assert_eq!(nodes[1]["node_type"]["data"]["attrs"][0]["name"], "id");
    assert_eq!(nodes[1]["parent"], 0);
}
