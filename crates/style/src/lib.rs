//! Style configuration consumed by the render-plan compiler.
//!
//! A [`StyleConfiguration`] is a plain value: it can be built in code, loaded
//! from TOML, or layered with [`StyleConfiguration::overlay`].

pub mod defaults;

mod config;
mod load;
mod numbering;
mod values;

pub use crate::config::{ElementStyle, StyleConfiguration};
pub use crate::load::ConfigError;
pub use crate::numbering::{ListNumberFormat, MarkerFn, UnknownNumberFormat};
pub use crate::values::{Color, Edges, Font, FontRole, parse_color};
