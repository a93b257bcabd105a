//! Line-oriented dump of a render plan for snapshot comparisons.
//!
//! One line per plan node, children indented by two spaces. Text blocks list
//! their fragments inline; fragment styling is shown in braces and omitted for
//! plain fragments. Block decoration is not part of the dump.

use crate::{push_quoted, quoted};
use render_plan::{
    Block, BlockKind, CustomBlock, Fragment, Grid, PlanNode, Script, TextBlock, TextRole,
};
use std::fmt::Write;

const INDENT_STEP: &str = "  ";

pub fn format_plan(nodes: &[PlanNode]) -> Vec<String> {
    let mut out = Vec::new();
    let mut indent = String::new();
    for node in nodes {
        format_node(node, &mut indent, &mut out);
    }
    out
}

fn format_node(node: &PlanNode, indent: &mut String, out: &mut Vec<String>) {
    match node {
        PlanNode::Text(text) => out.push(format!("{indent}{}", text_line(text))),
        PlanNode::Divider => out.push(format!("{indent}divider")),
        PlanNode::Block(block) => {
            out.push(format!("{indent}{}", block_label(block)));
            nested(&block.children, indent, out);
        }
        PlanNode::Grid(grid) => format_grid(grid, indent, out),
        PlanNode::Custom(CustomBlock { slot, tag, .. }) => {
            out.push(format!("{indent}custom {slot} <{tag}>"));
        }
    }
}

fn nested(children: &[PlanNode], indent: &mut String, out: &mut Vec<String>) {
    indent.push_str(INDENT_STEP);
    for child in children {
        format_node(child, indent, out);
    }
    indent.truncate(indent.len() - INDENT_STEP.len());
}

fn format_grid(grid: &Grid, indent: &mut String, out: &mut Vec<String>) {
    out.push(format!("{indent}grid"));
    indent.push_str(INDENT_STEP);
    for row in &grid.rows {
        out.push(format!("{indent}row"));
        indent.push_str(INDENT_STEP);
        for cell in &row.cells {
            let label = if cell.header { "header-cell" } else { "cell" };
            out.push(format!("{indent}{label}"));
            nested(&cell.content, indent, out);
        }
        indent.truncate(indent.len() - INDENT_STEP.len());
    }
    indent.truncate(indent.len() - INDENT_STEP.len());
}

fn text_line(text: &TextBlock) -> String {
    let mut line = format!("text({})", role_name(text.role));
    for fragment in &text.run.fragments {
        line.push(' ');
        push_fragment(&mut line, fragment);
    }
    line
}

fn role_name(role: TextRole) -> String {
    match role {
        TextRole::Plain => "plain".into(),
        TextRole::Heading(level) => format!("h{level}"),
        TextRole::Paragraph => "p".into(),
        TextRole::ListItem => "li".into(),
        TextRole::TableHeader => "th".into(),
        TextRole::TableCell => "td".into(),
        TextRole::DefinitionTerm => "dt".into(),
        TextRole::DefinitionDescription => "dd".into(),
        TextRole::Caption => "caption".into(),
    }
}

fn push_fragment(line: &mut String, fragment: &Fragment) {
    push_quoted(line, &fragment.text);
    let style = &fragment.style;
    let mut flags = Vec::new();
    for (on, name) in [
        (style.bold, "bold"),
        (style.italic, "italic"),
        (style.underline, "underline"),
        (style.strikethrough, "strike"),
        (style.monospaced, "mono"),
    ] {
        if on {
            flags.push(name.to_string());
        }
    }
    match style.script {
        Script::Normal => {}
        Script::Sub => flags.push("sub".into()),
        Script::Super => flags.push("super".into()),
    }
    if let Some(font) = style.font {
        flags.push(format!("font={}", font.as_str()));
    }
    if let Some(color) = style.foreground {
        flags.push(format!("fg={color}"));
    }
    if let Some(color) = style.background {
        flags.push(format!("bg={color}"));
    }
    if let Some(link) = &fragment.link {
        flags.push(format!("link={link}"));
    }
    if !flags.is_empty() {
        let _ = write!(line, "{{{}}}", flags.join(","));
    }
}

fn block_label(block: &Block) -> String {
    match &block.kind {
        BlockKind::Container => "container".into(),
        BlockKind::Heading(level) => format!("h{level}"),
        BlockKind::Paragraph => "p".into(),
        BlockKind::Blockquote => "blockquote".into(),
        BlockKind::Preformatted => "pre".into(),
        BlockKind::Caption => "caption".into(),
        BlockKind::List { ordered: true } => "ol".into(),
        BlockKind::List { ordered: false } => "ul".into(),
        BlockKind::ListItem { marker } => format!("item {}", quoted(marker)),
        BlockKind::DefinitionList => "dl".into(),
        BlockKind::DefinitionTerm => "dt".into(),
        BlockKind::DefinitionDescription => "dd".into(),
        BlockKind::TableCell { header: true } => "th".into(),
        BlockKind::TableCell { header: false } => "td".into(),
        BlockKind::Link { target: Some(target) } => format!("link {target}"),
        BlockKind::Link { target: None } => "link".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use render_plan::{BlockStyle, Fragment, GridCell, GridRow, TextRun, TextStyle};

    #[test]
    fn nested_blocks_and_styled_fragments() {
        let mut run = TextRun::plain("Hello ");
        run.push(
            "world",
            TextStyle {
                bold: true,
                script: Script::Super,
                ..TextStyle::default()
            },
            None,
        );
        let plan = vec![PlanNode::Block(Block {
            kind: BlockKind::ListItem { marker: "1.".into() },
            style: BlockStyle::default(),
            children: vec![
                PlanNode::Text(TextBlock {
                    role: TextRole::ListItem,
                    style: BlockStyle::default(),
                    run,
                }),
                PlanNode::Divider,
            ],
        })];
        assert_eq!(
            format_plan(&plan),
            [
                "item \"1.\"",
                "  text(li) \"Hello \" \"world\"{bold,super}",
                "  divider",
            ]
        );
    }

    #[test]
    fn grid_rows_and_cells_are_indented() {
        let plan = vec![PlanNode::Grid(Grid {
            rows: vec![GridRow {
                cells: vec![GridCell {
                    header: true,
                    content: vec![PlanNode::Text(TextBlock {
                        role: TextRole::TableHeader,
                        style: BlockStyle::default(),
                        run: TextRun {
                            fragments: vec![Fragment {
                                text: "k".into(),
                                style: TextStyle::default(),
                                link: None,
                            }],
                        },
                    })],
                }],
            }],
        })];
        assert_eq!(
            format_plan(&plan),
            ["grid", "  row", "    header-cell", "      text(th) \"k\""]
        );
    }
}
