use super::*;
use crate::link::LinkTarget;
use crate::plan::{Grid, Script};
use crate::registry::Component;
use html::{parse_document, parse_fragment};
use style::{Color, Edges, FontRole, ListNumberFormat, defaults};

fn plan(markup: &str) -> Vec<PlanNode> {
    plan_with(markup, &OverrideRegistry::new())
}

fn plan_with(markup: &str, registry: &OverrideRegistry) -> Vec<PlanNode> {
    let doc = parse_fragment(markup);
    compile(&doc.children, &StyleConfiguration::default(), registry)
}

fn text(node: &PlanNode) -> &TextBlock {
    node.as_text()
        .unwrap_or_else(|| panic!("expected text block, got {node:?}"))
}

fn block(node: &PlanNode) -> &Block {
    node.as_block()
        .unwrap_or_else(|| panic!("expected block, got {node:?}"))
}

fn grid(node: &PlanNode) -> &Grid {
    match node {
        PlanNode::Grid(grid) => grid,
        other => panic!("expected grid, got {other:?}"),
    }
}

fn markers(list: &Block) -> Vec<String> {
    list.children
        .iter()
        .map(|row| match &block(row).kind {
            BlockKind::ListItem { marker } => marker.clone(),
            other => panic!("expected list item, got {other:?}"),
        })
        .collect()
}

fn items(count: usize) -> String {
    (0..count).map(|i| format!("<li>{i}</li>")).collect()
}

#[test]
fn paragraph_with_inline_markup_is_one_text_block() {
    let nodes = plan("<p>Hello <b>world</b></p>");
    assert_eq!(nodes.len(), 1);
    let p = text(&nodes[0]);
    assert_eq!(p.role, TextRole::Paragraph);
    let fragments = &p.run.fragments;
    assert_eq!(fragments.len(), 2);
    assert_eq!(fragments[0].text, "Hello ");
    assert!(fragments[0].style.is_plain());
    assert_eq!(fragments[1].text, "world");
    assert!(fragments[1].style.bold);
}

#[test]
fn container_keeps_paragraphs_in_order() {
    let nodes = plan("<div><p>A</p><p>B</p></div>");
    assert_eq!(nodes.len(), 1);
    let div = block(&nodes[0]);
    assert_eq!(div.kind, BlockKind::Container);
    assert_eq!(div.style.spacing, Some(defaults::BLOCK_SPACING));
    let texts: Vec<String> = div
        .children
        .iter()
        .map(|child| {
            let t = text(child);
            assert_eq!(t.run.len(), 1);
            t.run.text()
        })
        .collect();
    assert_eq!(texts, ["A", "B"]);
}

#[test]
fn formatting_whitespace_between_blocks_is_dropped() {
    let nodes = plan("\n<div>\n  <p>A</p>\n  <!-- c -->\n  <p>B</p>\n</div>\n");
    assert_eq!(nodes.len(), 1);
    assert_eq!(block(&nodes[0]).children.len(), 2);
}

#[test]
fn block_link_override_splits_paragraph() {
    let registry = OverrideRegistry::new().with(Component::link(|_, href, _, _| {
        Payload::new(href.map(str::to_string))
    }));
    let nodes = plan_with(r#"<p>See <a href="x">here</a></p>"#, &registry);
    assert_eq!(nodes.len(), 1);
    let p = block(&nodes[0]);
    assert_eq!(p.kind, BlockKind::Paragraph);
    assert_eq!(p.children.len(), 2);
    assert_eq!(text(&p.children[0]).run.text(), "See ");
    let custom = p.children[1].as_custom().unwrap();
    assert_eq!(custom.slot, Slot::Construct(Construct::Link));
    assert_eq!(
        custom.payload.downcast_ref::<Option<String>>(),
        Some(&Some("x".to_string()))
    );
}

#[test]
fn unknown_wrapper_without_handler_is_invisible() {
    assert_eq!(plan("<callout>Note</callout>"), plan("Note"));
    let nodes = plan("<callout>Note</callout>");
    assert_eq!(text(&nodes[0]).run.text(), "Note");
}

#[test]
fn unknown_element_handler_gets_the_raw_element() {
    let registry = OverrideRegistry::new().with(Component::unknown_element(|_, el| {
        Payload::new(format!("{}:{}", el.tag_name, el.attr("kind").unwrap_or("")))
    }));
    let nodes = plan_with("<callout kind=warn>x</callout>", &registry);
    let custom = nodes[0].as_custom().unwrap();
    assert_eq!(custom.slot, Slot::UnknownElement);
    assert_eq!(custom.tag, "callout");
    assert_eq!(
        custom.payload.downcast_ref::<String>().map(String::as_str),
        Some("callout:warn")
    );
}

#[test]
fn document_skeleton_is_transparent_and_head_is_silent() {
    let doc = parse_document(
        "<!doctype html><html><head><title>T</title><meta charset=utf-8></head>\
         <body><p>x</p></body></html>",
    );
    let registry = OverrideRegistry::new().with(Component::unknown_element(|_, el| {
        Payload::new(el.tag_name.clone())
    }));
    let nodes = compile_document(&doc, &StyleConfiguration::default(), &registry);
    assert_eq!(nodes.len(), 1);
    assert_eq!(text(&nodes[0]).run.text(), "x");
}

#[test]
fn headings_use_level_fonts() {
    let nodes = plan("<h1>Big</h1><h6>Small</h6>");
    let h1 = text(&nodes[0]);
    assert_eq!(h1.role, TextRole::Heading(1));
    assert_eq!(h1.style.font.map(|f| f.role), Some(FontRole::LargeTitle));
    assert_eq!(
        text(&nodes[1]).style.font.map(|f| f.role),
        Some(FontRole::Subheadline)
    );
}

#[test]
fn heading_with_block_content_becomes_a_block() {
    let nodes = plan("<h2>Title<div>extra</div></h2>");
    let h2 = block(&nodes[0]);
    assert_eq!(h2.kind, BlockKind::Heading(2));
    assert_eq!(h2.children.len(), 2);
}

#[test]
fn ordered_lists_number_items() {
    let nodes = plan(&format!("<ol>{}</ol>", items(3)));
    let list = block(&nodes[0]);
    assert_eq!(list.kind, BlockKind::List { ordered: true });
    assert_eq!(list.style.spacing, Some(defaults::LIST_SPACING));
    assert_eq!(markers(list), ["1.", "2.", "3."]);
}

#[test]
fn lower_alpha_rolls_over_on_27th_item() {
    let style = StyleConfiguration {
        list_number_format: Some(ListNumberFormat::LowerAlpha),
        ..StyleConfiguration::default()
    };
    let doc = parse_fragment(&format!("<ol>{}</ol>", items(27)));
    let nodes = compile(&doc.children, &style, &OverrideRegistry::new());
    let markers = markers(block(&nodes[0]));
    assert_eq!(markers[0], "a.");
    assert_eq!(markers[25], "z.");
    assert_eq!(markers[26], "aa.");
}

#[test]
fn ordered_list_honors_start() {
    let nodes = plan(&format!("<ol start=3>{}</ol>", items(2)));
    assert_eq!(markers(block(&nodes[0])), ["3.", "4."]);
    let nodes = plan(&format!("<ol start=nope>{}</ol>", items(1)));
    assert_eq!(markers(block(&nodes[0])), ["1."]);
}

#[test]
fn unordered_list_uses_configured_bullet() {
    let nodes = plan(&format!("<ul>{}</ul>", items(2)));
    assert_eq!(markers(block(&nodes[0])), ["\u{2022}", "\u{2022}"]);

    let style = StyleConfiguration {
        bullet: Some("-".into()),
        ..StyleConfiguration::default()
    };
    let doc = parse_fragment(&format!("<ul>{}</ul>", items(1)));
    let nodes = compile(&doc.children, &style, &OverrideRegistry::new());
    assert_eq!(markers(block(&nodes[0])), ["-"]);
}

#[test]
fn only_direct_list_items_become_rows() {
    let list = Element::new("ul")
        .with_text("stray")
        .with_child(Element::new("li").with_text("a"))
        .with_child(Element::new("div").with_child(Element::new("li").with_text("nested")))
        .with_child(Element::new("li").with_text("b"));
    let nodes = compile(
        &[Node::Element(list)],
        &StyleConfiguration::default(),
        &OverrideRegistry::new(),
    );
    let list = block(&nodes[0]);
    assert_eq!(list.children.len(), 2);
    let contents: Vec<String> = list
        .children
        .iter()
        .map(|row| text(&block(row).children[0]).run.text())
        .collect();
    assert_eq!(contents, ["a", "b"]);
}

#[test]
fn list_item_content_follows_override_priority() {
    let markup = "<ul><li>a</li></ul>";

    let by_tag = OverrideRegistry::new().with(Component::tag("li", |_, _, _, _| Payload::new(())));
    let row = plan_with(markup, &by_tag);
    let content = &block(&block(&row[0]).children[0]).children[0];
    assert_eq!(content.as_custom().unwrap().slot, Slot::Tag("li".into()));

    let both = by_tag.with(Component::list_item(|_, _, _| Payload::new(())));
    let row = plan_with(markup, &both);
    let content = &block(&block(&row[0]).children[0]).children[0];
    assert_eq!(
        content.as_custom().unwrap().slot,
        Slot::Construct(Construct::ListItem)
    );
}

#[test]
fn list_item_with_block_content_falls_back_to_blocks() {
    let nodes = plan("<ul><li>lead<p>para</p></li></ul>");
    let row = block(&block(&nodes[0]).children[0]);
    let content = block(&row.children[0]);
    assert_eq!(content.kind, BlockKind::Container);
    assert_eq!(content.children.len(), 2);
}

#[test]
fn table_rows_come_from_table_and_sections_only() {
    let nested_row = Element::new("tr").with_child(Element::new("td").with_text("hidden"));
    let table = Element::new("table")
        .with_child(Element::new("tr").with_child(Element::new("th").with_text("H")))
        .with_child(
            Element::new("tbody")
                .with_child(Element::new("tr").with_child(Element::new("td").with_text("a")))
                .with_child(Element::new("td").with_child(nested_row)),
        );
    let nodes = compile(
        &[Node::Element(table)],
        &StyleConfiguration::default(),
        &OverrideRegistry::new(),
    );
    let grid = grid(&nodes[0]);
    assert_eq!(grid.rows.len(), 2);

    let header = &grid.rows[0].cells[0];
    assert!(header.header);
    let header_text = text(&header.content[0]);
    assert_eq!(header_text.role, TextRole::TableHeader);
    assert!(header_text.style.font.is_some_and(|f| f.bold));

    let cell = &grid.rows[1].cells[0];
    assert!(!cell.header);
    assert_eq!(text(&cell.content[0]).run.text(), "a");
}

#[test]
fn parsed_table_with_sections() {
    let nodes = plan(
        "<table><thead><tr><th>k<th>v</thead><tbody><tr><td>1<td>2<tr><td>3<td>4</tbody></table>",
    );
    let grid = grid(&nodes[0]);
    let shape: Vec<usize> = grid.rows.iter().map(|row| row.cells.len()).collect();
    assert_eq!(shape, [2, 2, 2]);
}

#[test]
fn blockquote_gets_leading_rule() {
    let nodes = plan("<blockquote><p>q</p></blockquote>");
    let quote = block(&nodes[0]);
    assert_eq!(quote.kind, BlockKind::Blockquote);
    assert_eq!(quote.style.padding, Edges::leading(16.0));
    let border = quote.style.border.unwrap();
    assert_eq!(border.color, defaults::ACCENT_COLOR);
    assert_eq!(border.width, 3.0);
}

#[test]
fn blockquote_border_prefers_configured_colors() {
    let style = StyleConfiguration {
        blockquote: style::ElementStyle::UNSET.with_foreground(Color::ORANGE),
        ..StyleConfiguration::default()
    };
    let doc = parse_fragment("<blockquote>q</blockquote>");
    let nodes = compile(&doc.children, &style, &OverrideRegistry::new());
    assert_eq!(block(&nodes[0]).style.border.unwrap().color, Color::ORANGE);
}

#[test]
fn preformatted_keeps_whitespace() {
    let nodes = plan("<pre>  a\n  <b>b</b>\n</pre>");
    let pre = block(&nodes[0]);
    assert_eq!(pre.kind, BlockKind::Preformatted);
    assert!(pre.style.font.is_some_and(|f| f.monospaced));
    assert_eq!(pre.style.corner_radius, 8.0);
    assert_eq!(pre.style.padding, Edges::all(8.0));
    assert_eq!(pre.children.len(), 1);
    assert_eq!(text(&pre.children[0]).run.text(), "  a\n  b\n");
}

#[test]
fn rule_is_a_divider() {
    assert_eq!(plan("<hr>"), [PlanNode::Divider]);
}

#[test]
fn definition_lists() {
    let nodes = plan("<dl><dt>Term</dt><dd>Meaning</dd></dl>");
    let dl = block(&nodes[0]);
    assert_eq!(dl.kind, BlockKind::DefinitionList);
    let dt = text(&dl.children[0]);
    assert_eq!(dt.role, TextRole::DefinitionTerm);
    assert!(dt.style.font.is_some_and(|f| f.bold));
    let dd = text(&dl.children[1]);
    assert_eq!(dd.role, TextRole::DefinitionDescription);
    assert_eq!(dd.style.padding.leading, 16.0);
}

#[test]
fn figure_caption_is_secondary_text() {
    let nodes = plan("<figure><img src=a.png><figcaption>Cap</figcaption></figure>");
    let figure = block(&nodes[0]);
    let caption = text(figure.children.last().unwrap());
    assert_eq!(caption.role, TextRole::Caption);
    assert_eq!(caption.style.foreground, Some(defaults::SECONDARY_COLOR));
}

#[test]
fn anchors_inline_and_as_blocks() {
    let nodes = plan(r#"<a href="https://example.com/">inline</a>"#);
    let fragment = &text(&nodes[0]).run.fragments[0];
    assert!(fragment.link.is_some());

    let nodes = plan(r#"<a href="https://example.com/"><div>block</div></a>"#);
    match &block(&nodes[0]).kind {
        BlockKind::Link { target } => {
            assert_eq!(target.as_ref().map(LinkTarget::as_str), Some("https://example.com/"))
        }
        other => panic!("expected link block, got {other:?}"),
    }

    let nodes = plan("<a><div>no target</div></a>");
    assert_eq!(block(&nodes[0]).kind, BlockKind::Link { target: None });
}

#[test]
fn base_url_resolves_relative_links() {
    let doc = parse_fragment(r#"<a href="../faq"><p>x</p></a>"#);
    let style = StyleConfiguration::default();
    let registry = OverrideRegistry::new();
    let compiler = Compiler::new(&style, &registry).with_options(CompileOptions {
        base_url: Url::parse("https://example.com/docs/guide/").ok(),
        ..CompileOptions::default()
    });
    let nodes = compiler.compile(&doc.children);
    match &block(&nodes[0]).kind {
        BlockKind::Link {
            target: Some(LinkTarget::Absolute(url)),
        } => assert_eq!(url.as_str(), "https://example.com/docs/faq"),
        other => panic!("expected absolute link, got {other:?}"),
    }
}

#[test]
fn named_override_outranks_tag_override() {
    let registry = OverrideRegistry::new()
        .with(Component::tag("h2", |_, _, _, _| Payload::new(0u8)))
        .with(Component::heading(|_, level, _, _| Payload::new(level)));
    let nodes = plan_with("<h2>x</h2>", &registry);
    let custom = nodes[0].as_custom().unwrap();
    assert_eq!(custom.slot, Slot::Construct(Construct::Heading));
    assert_eq!(custom.payload.downcast_ref::<u8>(), Some(&2));
}

#[test]
fn tag_override_outranks_built_in() {
    let registry = OverrideRegistry::new().with(Component::tag("blockquote", |_, name, _, _| {
        Payload::new(name.to_string())
    }));
    let nodes = plan_with("<blockquote>q</blockquote>", &registry);
    let custom = nodes[0].as_custom().unwrap();
    assert_eq!(custom.slot, Slot::Tag("blockquote".into()));
    assert_eq!(custom.payload.downcast_ref::<String>().map(String::as_str), Some("blockquote"));
}

#[test]
fn list_override_receives_ordered_flag() {
    let registry =
        OverrideRegistry::new().with(Component::list(|_, ordered, _, _| Payload::new(ordered)));
    let nodes = plan_with("<ul><li>a</li></ul><ol><li>b</li></ol>", &registry);
    let flags: Vec<bool> = nodes
        .iter()
        .map(|n| *n.as_custom().unwrap().payload.downcast_ref::<bool>().unwrap())
        .collect();
    assert_eq!(flags, [false, true]);
}

#[test]
fn inline_override_at_top_level_wraps_run() {
    let registry = OverrideRegistry::new().with(Component::tag_inline("badge", |run, _| {
        run.restyle(|s| s.background = Some(Color::ORANGE))
    }));
    let nodes = plan_with("<badge>new</badge>", &registry);
    let t = text(&nodes[0]);
    assert_eq!(t.role, TextRole::Plain);
    assert_eq!(t.run.fragments[0].style.background, Some(Color::ORANGE));

    let nodes = plan_with("<div><badge>new</badge> and <b>bold</b></div>", &registry);
    let div = block(&nodes[0]);
    assert_eq!(div.children.len(), 1);
    assert_eq!(text(&div.children[0]).run.text(), "new and bold");
}

#[test]
fn inline_override_with_block_content_renders_children() {
    let registry = OverrideRegistry::new().with(Component::tag_inline("badge", |run, _| run));
    let nodes = plan_with("<badge><div>x</div></badge>", &registry);
    assert_eq!(block(&nodes[0]).kind, BlockKind::Container);
}

#[test]
fn scope_compiles_nested_content() {
    let registry = OverrideRegistry::new().with(Component::blockquote(|scope, children, _| {
        Payload::new((scope.compile(children).len(), scope.compose(children).text()))
    }));
    let nodes = plan_with("<blockquote><p>a</p><p>b</p></blockquote>", &registry);
    let payload = nodes[0].as_custom().unwrap().payload.clone();
    assert_eq!(
        payload.downcast_ref::<(usize, String)>(),
        Some(&(2, "ab".to_string()))
    );
}

#[test]
fn inline_runs_between_blocks() {
    let nodes = plan("lead <i>in</i><p>para</p>tail<br>");
    assert_eq!(nodes.len(), 3);
    assert_eq!(text(&nodes[0]).run.text(), "lead in");
    assert_eq!(text(&nodes[1]).role, TextRole::Paragraph);
    assert_eq!(text(&nodes[2]).run.text(), "tail\n");
}

#[test]
fn sub_and_sup_survive_compilation() {
    let nodes = plan("<p>H<sub>2</sub>O</p>");
    assert_eq!(text(&nodes[0]).run.fragments[1].style.script, Script::Sub);
}

#[test]
fn depth_limit_truncates_deep_subtrees() {
    let doc = parse_fragment("<div><div><div><p>deep</p></div></div></div><p>top</p>");
    let style = StyleConfiguration::default();
    let registry = OverrideRegistry::new();
    let compiler = Compiler::new(&style, &registry).with_options(CompileOptions {
        max_depth: 2,
        ..CompileOptions::default()
    });
    let nodes = compiler.compile(&doc.children);
    assert_eq!(nodes.len(), 2);
    let outer = block(&nodes[0]);
    let inner = block(&outer.children[0]);
    assert!(inner.children.is_empty());
    assert_eq!(text(&nodes[1]).run.text(), "top");
}

#[test]
fn compile_element_splices_transparent_wrappers() {
    let style = StyleConfiguration::default();
    let registry = OverrideRegistry::new();
    let compiler = Compiler::new(&style, &registry);
    let body = Element::new("body")
        .with_child(Element::new("p").with_text("a"))
        .with_child(Element::new("hr"));
    assert_eq!(compiler.compile_element(&body).len(), 2);
    assert!(compiler.compile_element(&Element::new("script")).is_empty());
}

#[test]
fn phrasing_wrapper_styles_its_block_content() {
    let nodes = plan("<b><div>x</div></b><em><p>y</p></em><code><div>z</div></code>");
    assert_eq!(nodes.len(), 3);

    let bold = block(&nodes[0]);
    assert_eq!(bold.kind, BlockKind::Container);
    assert!(text(&bold.children[0]).run.fragments[0].style.bold);

    let italic = text(&nodes[1]);
    assert_eq!(italic.role, TextRole::Paragraph);
    assert!(italic.run.fragments[0].style.italic);

    let mono = block(&nodes[2]);
    assert!(text(&mono.children[0]).run.fragments[0].style.monospaced);
}

#[test]
fn wrapper_style_nests_and_stays_inside_the_wrapper() {
    let nodes = plan("<b><div><i>x</i> y</div></b><p>z</p>");
    let div = block(&nodes[0]);
    let fragments = &text(&div.children[0]).run.fragments;
    assert!(fragments[0].style.bold && fragments[0].style.italic);
    assert!(fragments[1].style.bold && !fragments[1].style.italic);
    assert!(text(&nodes[1]).run.fragments[0].style.is_plain());
}
