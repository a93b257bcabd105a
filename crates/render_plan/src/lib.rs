//! Compiles a parsed document into a render plan: a toolkit-independent tree
//! of styled text runs, typed blocks, grids, dividers and caller-rendered
//! custom blocks.
//!
//! Per subtree the compiler decides whether the content can be flattened into
//! one styled run ([`can_collapse`]) or has to stay a nested block layout, and
//! lets callers replace the rendering of individual constructs or tags through
//! an [`OverrideRegistry`].

pub mod collapse;
pub mod compose;
pub mod link;
pub mod plan;
pub mod registry;

mod compile;

pub use crate::collapse::{PHRASING_TAGS, can_collapse, is_phrasing};
pub use crate::compile::{
    CompileOptions, Compiler, DEFAULT_MAX_DEPTH, Scope, compile, compile_document,
};
pub use crate::compose::{InlineStyle, compose};
pub use crate::link::{LinkTarget, resolve_link};
pub use crate::plan::{
    Block, BlockKind, BlockStyle, Border, CustomBlock, Fragment, Grid, GridCell, GridRow, Payload,
    PlanNode, Script, TextBlock, TextRole, TextRun, TextStyle,
};
pub use crate::registry::{Component, Construct, OverrideRegistry, Slot};
