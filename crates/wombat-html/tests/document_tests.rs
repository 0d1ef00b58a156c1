//! Integration tests for the document facade.

use wombat_html::{parse, parse_body_fragment};

#[test]
fn test_title() {
    let doc = parse("<title>  My \n Page </title><p>x");
    assert_eq!(doc.title(), "My Page");
    assert_eq!(parse("<p>no title").title(), "");
}

#[test]
fn test_get_element_by_id() {
    let doc = parse(r#"<div id="a"><p id="b" class="c">hi</p></div>"#);
    let p = doc.get_element_by_id("b").map(|p| (p.tag_name(), p.attr("class")));
    assert_eq!(p, Some((Some("p"), Some("c"))));
    assert!(doc.get_element_by_id("missing").is_none());
}

#[test]
fn test_get_elements_by_tag_is_case_insensitive() {
    let doc = parse("<P>1</P><p>2<SPAN>3</span>");
    assert_eq!(doc.get_elements_by_tag("P").len(), 2);
    assert_eq!(doc.get_elements_by_tag("span").len(), 1);
}

#[test]
fn test_attributes() {
    let doc = parse(r#"<a HREF="/x" data-Empty>link</a>"#);
    let a = doc.get_elements_by_tag("a")[0];
    assert_eq!(a.attr("href"), Some("/x"));
    assert!(a.has_attr("data-empty"));
    assert_eq!(a.attr("data-empty"), Some(""));
    assert!(!a.has_attr("title"));
}

#[test]
fn test_navigation() {
    let doc = parse("<ul><li>a</li><li>b</li></ul>");
    let ul = doc.get_elements_by_tag("ul")[0];
    let items: Vec<_> = ul.children().map(|li| li.text()).collect();
    assert_eq!(items, ["a", "b"]);

    let parent = ul.parent().and_then(|p| p.tag_name());
    assert_eq!(parent, Some("body"));
    assert!(doc.root().parent().is_none());
    assert_eq!(doc.node(ul.id()).map(|n| n.id()), Some(ul.id()));
}

#[test]
fn test_document_text() {
    let doc = parse("<title>T</title><p>Hello <b>World</b></p><p>Again</p>");
    assert_eq!(doc.body().text(), "Hello World Again");
    assert_eq!(doc.text(), "T Hello World Again");
}

#[test]
fn test_text_of_text_and_comment_nodes() {
    let doc = parse("<p>a<!--note--></p>");
    let p = doc.get_elements_by_tag("p")[0];
    let data: Vec<_> = p.children().map(|c| c.data()).collect();
    assert_eq!(data, [Some("a"), Some("note")]);
    assert_eq!(p.text(), "a");
}

#[test]
fn test_body_of_frameset_document() {
    let doc = parse("<frameset><frame></frameset>");
    assert_eq!(doc.body().tag_name(), Some("frameset"));
}

#[test]
fn test_body_fragment_document_has_shell() {
    let doc = parse_body_fragment("<td>cell</td>text");
    assert!(doc.document_element().is_some());
    assert!(doc.head().is_some());
    assert_eq!(doc.body().text(), "celltext");
}

#[test]
fn test_tree_serializes_to_json() {
    let doc = parse(r#"<p id="x">hi</p>"#);
    let json = serde_json::to_value(doc.tree()).expect("tree serializes");

    let nodes = json["nodes"].as_array().expect("nodes array");
    assert_eq!(nodes[0]["node_type"]["type"], "Document");

    let p = nodes
        .iter()
        .find(|n| n["node_type"]["data"]["tag_name"] == "p")
        .expect("p element");
    assert_eq!(p["node_type"]["data"]["attrs"][0]["name"], "id");
    assert_eq!(p["node_type"]["data"]["attrs"][0]["value"], "x");
}
