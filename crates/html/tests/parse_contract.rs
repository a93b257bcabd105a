use html::{Element, Node, is_void_element, parse_document, parse_fragment};

fn element(node: &Node) -> &Element {
    node.as_element()
        .unwrap_or_else(|| panic!("expected element, got {node:?}"))
}

#[test]
fn fragment_builds_expected_tree() {
    let doc = parse_fragment("<p>Hello <b>world</b></p>");
    let expected = Element::new("p")
        .with_text("Hello ")
        .with_child(Element::new("b").with_text("world"));
    assert_eq!(doc.children, vec![Node::Element(expected)]);
}

#[test]
fn tag_names_are_lowercase_everywhere() {
    let doc = parse_fragment("<DIV><SPAN>a</SPAN><My-Widget>b</MY-WIDGET></DIV>");
    let div = element(&doc.children[0]);
    assert_eq!(div.tag_name, "div");
    assert_eq!(element(&div.children[0]).tag_name, "span");
    assert_eq!(element(&div.children[1]).tag_name, "my-widget");
}

#[test]
fn entities_decode_in_text_and_attributes() {
    let doc = parse_fragment(r#"<a title="Tom &amp; Jerry">&lt;3 &mdash; &#x263A;</a>"#);
    let a = element(&doc.children[0]);
    assert_eq!(a.attr("title"), Some("Tom & Jerry"));
    assert_eq!(a.children, vec![Node::text("<3 \u{2014} \u{263A}")]);
}

#[test]
fn comments_are_kept_as_nodes() {
    let doc = parse_fragment("a<!--hidden-->b");
    assert_eq!(
        doc.children,
        vec![
            Node::text("a"),
            Node::Comment("hidden".into()),
            Node::text("b")
        ]
    );
}

#[test]
fn script_and_style_never_reach_the_tree() {
    let doc = parse_document(
        "<html><head><style>b{}</style></head>\
         <body><script>alert(1)</script><p>ok</p></body></html>",
    );
    let mut found = Vec::new();
    html::traverse::walk(&doc.children, &mut |node, _| {
        if let Node::Element(el) = node {
            found.push(el.tag_name.clone());
        }
    });
    assert_eq!(found, ["html", "head", "body", "p"]);
}

#[test]
fn unclosed_elements_close_at_end_of_input() {
    let doc = parse_fragment("<ul><li>one<li>two");
    let ul = element(&doc.children[0]);
    assert_eq!(ul.child_elements("li").count(), 2);
}

#[test]
fn definition_terms_and_descriptions_close_each_other() {
    let doc = parse_fragment("<dl><dt>a<dd>1<dt>b<dd>2</dl>");
    let dl = element(&doc.children[0]);
    let tags: Vec<&str> = dl
        .children
        .iter()
        .filter_map(Node::as_element)
        .map(|el| el.tag_name.as_str())
        .collect();
    assert_eq!(tags, ["dt", "dd", "dt", "dd"]);
}

#[test]
fn void_elements_never_take_children() {
    for tag in ["br", "hr", "img", "input", "wbr"] {
        assert!(is_void_element(tag), "{tag} should be void");
        let doc = parse_fragment(&format!("<{tag}>after"));
        assert_eq!(doc.children.len(), 2, "{tag}");
        assert!(element(&doc.children[0]).children.is_empty());
    }
    assert!(!is_void_element("p"));
}
