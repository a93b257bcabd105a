use super::{Compiler, Whitespace};
use crate::link::resolve_link;
use crate::plan::{
    Block, BlockKind, BlockStyle, Border, Grid, GridCell, GridRow, PlanNode, TextRole,
};
use crate::registry::{Construct, Slot};
use html::{Element, Node, traverse};
use style::{Edges, defaults};

const CONTAINER_TAGS: &[&str] = &[
    "div", "article", "section", "main", "header", "footer", "nav", "aside", "figure",
];
const TABLE_SECTIONS: &[&str] = &["thead", "tbody", "tfoot"];

impl Compiler<'_> {
    /// Built-in rendering; `None` for tags without one.
    pub(super) fn builtin(&self, el: &Element, depth: usize) -> Option<Vec<PlanNode>> {
        let tag = el.tag_name.as_str();
        if traverse::is_non_rendering_element(tag) {
            return Some(Vec::new());
        }
        if let Some(level) = el.heading_level() {
            return Some(vec![self.heading(el, level, depth)]);
        }
        let node = match tag {
            "p" => self.text_or_block(
                &el.children,
                depth,
                TextRole::Paragraph,
                BlockKind::Paragraph,
                BlockStyle::from_entry(&self.style.paragraph),
            ),
            "blockquote" => self.blockquote(el, depth),
            "pre" => self.preformatted(el, depth),
            "hr" => PlanNode::Divider,
            "figcaption" => self.text_or_block(
                &el.children,
                depth,
                TextRole::Caption,
                BlockKind::Caption,
                BlockStyle {
                    font: Some(defaults::CAPTION_FONT),
                    foreground: Some(defaults::SECONDARY_COLOR),
                    ..BlockStyle::default()
                },
            ),
            "ul" | "ol" => self.list(el, depth),
            "table" => self.table(el, depth),
            "dl" => self.container(el, depth, BlockKind::DefinitionList),
            "dt" => self.text_or_block(
                &el.children,
                depth,
                TextRole::DefinitionTerm,
                BlockKind::DefinitionTerm,
                BlockStyle::default().with_font(defaults::BODY_FONT.bold()),
            ),
            "dd" => self.text_or_block(
                &el.children,
                depth,
                TextRole::DefinitionDescription,
                BlockKind::DefinitionDescription,
                BlockStyle {
                    padding: Edges::leading(defaults::DEFINITION_INDENT),
                    ..BlockStyle::default()
                },
            ),
            "a" => self.link(el, depth),
            _ if CONTAINER_TAGS.contains(&tag) => self.container(el, depth, BlockKind::Container),
            // Document skeleton, stray table parts and list items outside a
            // list: children only.
            "html" | "body" | "li" | "thead" | "tbody" | "tfoot" | "tr" | "td" | "th" => {
                return Some(self.flow(&el.children, depth + 1, Whitespace::Collapse));
            }
            _ if crate::collapse::is_phrasing(tag) => {
                let inherited = self.composer().wrapper_style(el, &self.inherited);
                let nested = self.restyled(inherited);
                return Some(nested.flow(&el.children, depth + 1, Whitespace::Collapse));
            }
            _ => return None,
        };
        Some(vec![node])
    }

    fn heading(&self, el: &Element, level: u8, depth: usize) -> PlanNode {
        let entry = self.style.heading(level);
        let font = entry.font.unwrap_or_else(|| defaults::heading_font(level));
        self.text_or_block(
            &el.children,
            depth,
            TextRole::Heading(level),
            BlockKind::Heading(level),
            BlockStyle::from_entry(entry).with_font(font),
        )
    }

    fn container(&self, el: &Element, depth: usize, kind: BlockKind) -> PlanNode {
        PlanNode::Block(Block {
            kind,
            style: BlockStyle::default().with_spacing(self.style.block_spacing()),
            children: self.flow(&el.children, depth + 1, Whitespace::Collapse),
        })
    }

    fn blockquote(&self, el: &Element, depth: usize) -> PlanNode {
        let entry = &self.style.blockquote;
        let mut style = BlockStyle::from_entry(entry).with_spacing(self.style.block_spacing());
        style.padding = entry
            .padding
            .unwrap_or(Edges::leading(defaults::BLOCKQUOTE_INDENT));
        style.border = Some(Border {
            color: entry
                .border_color
                .or(entry.foreground_color)
                .unwrap_or(defaults::ACCENT_COLOR),
            width: entry
                .border_width
                .unwrap_or(defaults::BLOCKQUOTE_BORDER_WIDTH),
        });
        PlanNode::Block(Block {
            kind: BlockKind::Blockquote,
            style,
            children: self.flow(&el.children, depth + 1, Whitespace::Collapse),
        })
    }

    fn preformatted(&self, el: &Element, depth: usize) -> PlanNode {
        let entry = &self.style.preformatted;
        let background = entry
            .background_color
            .unwrap_or_else(defaults::code_block_background);
        let style = BlockStyle {
            font: Some(entry.font.unwrap_or(defaults::BODY_FONT.monospaced())),
            background: Some(background),
            padding: entry.padding.unwrap_or_else(defaults::code_block_padding),
            corner_radius: entry
                .corner_radius
                .unwrap_or(defaults::CODE_BLOCK_CORNER_RADIUS),
            ..BlockStyle::from_entry(entry)
        };
        PlanNode::Block(Block {
            kind: BlockKind::Preformatted,
            style,
            children: self.flow(&el.children, depth + 1, Whitespace::Preserve),
        })
    }

    fn link(&self, el: &Element, depth: usize) -> PlanNode {
        let target = resolve_link(el.attr("href"), self.options.base_url.as_ref());
        let entry = &self.style.link;
        let style = BlockStyle {
            foreground: Some(entry.foreground_color.unwrap_or(defaults::LINK_COLOR)),
            ..BlockStyle::from_entry(entry)
        };
        PlanNode::Block(Block {
            kind: BlockKind::Link { target },
            style,
            children: self.flow(&el.children, depth + 1, Whitespace::Collapse),
        })
    }

    fn list(&self, el: &Element, depth: usize) -> PlanNode {
        let ordered = el.is("ol");
        let first = if ordered { start_index(el) } else { 0 };
        let rows = el
            .child_elements("li")
            .enumerate()
            .map(|(i, item)| {
                let marker = if ordered {
                    self.style.number_format().format(first + i)
                } else {
                    self.style.bullet().to_string()
                };
                PlanNode::Block(Block {
                    kind: BlockKind::ListItem { marker },
                    style: BlockStyle::default().with_spacing(self.style.list_marker_spacing()),
                    children: self.list_item_content(item, depth + 1),
                })
            })
            .collect();
        PlanNode::Block(Block {
            kind: BlockKind::List { ordered },
            style: BlockStyle::default().with_spacing(self.style.list_spacing()),
            children: rows,
        })
    }

    /// List-item override, then an `li` tag override, then text or blocks.
    fn list_item_content(&self, item: &Element, depth: usize) -> Vec<PlanNode> {
        if let Some(render) = self.registry.block(Construct::ListItem) {
            let payload = render(&self.scope(depth + 1), &item.children, &item.attributes);
            return vec![super::custom(Slot::Construct(Construct::ListItem), item, payload)];
        }
        if let Some(render) = self.registry.tag("li") {
            let payload = render(&self.scope(depth + 1), "li", &item.children, &item.attributes);
            return vec![super::custom(Slot::Tag("li".into()), item, payload)];
        }
        vec![self.text_or_block(
            &item.children,
            depth,
            TextRole::ListItem,
            BlockKind::Container,
            BlockStyle::from_entry(&self.style.list_item),
        )]
    }

    fn table(&self, el: &Element, depth: usize) -> PlanNode {
        let header_entry = &self.style.table_header;
        let header_style = BlockStyle::from_entry(header_entry)
            .with_font(header_entry.font.unwrap_or(defaults::BODY_FONT).bold());
        let cell_style = BlockStyle::from_entry(&self.style.table_cell);

        let rows = table_rows(el)
            .map(|row| GridRow {
                cells: row
                    .children
                    .iter()
                    .filter_map(Node::as_element)
                    .filter(|cell| cell.is("td") || cell.is("th"))
                    .map(|cell| {
                        let header = cell.is("th");
                        let (role, style) = if header {
                            (TextRole::TableHeader, header_style)
                        } else {
                            (TextRole::TableCell, cell_style)
                        };
                        // Counted as if the row sat inside a section.
                        let content = self.text_or_block(
                            &cell.children,
                            depth + 3,
                            role,
                            BlockKind::TableCell { header },
                            style,
                        );
                        GridCell {
                            header,
                            content: vec![content],
                        }
                    })
                    .collect(),
            })
            .collect();
        PlanNode::Grid(Grid { rows })
    }
}

/// Zero-based index of the first item of an ordered list.
fn start_index(el: &Element) -> usize {
    el.attr("start")
        .and_then(|s| s.trim().parse::<i64>().ok())
        .map_or(0, |start| usize::try_from(start.max(1) - 1).unwrap_or(0))
}

/// Rows directly under the table or directly under one of its sections.
fn table_rows(table: &Element) -> impl Iterator<Item = &Element> {
    table
        .children
        .iter()
        .filter_map(Node::as_element)
        .flat_map(|child| {
            let rows: Vec<&Element> = if child.is("tr") {
                vec![child]
            } else if TABLE_SECTIONS.contains(&child.tag_name.as_str()) {
                child.child_elements("tr").collect()
            } else {
                Vec::new()
            };
            rows
        })
}
