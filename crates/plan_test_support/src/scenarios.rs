//! Scenario files: TOML lists of markup inputs with their expected plan dump.
//!
//! ```toml
//! [[case]]
//! name = "paragraph"
//! input = "<p>Hello <b>world</b></p>"
//! expected = """
//! text(p) "Hello " "world"{bold}
//! """
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub name: String,
    pub input: String,
    /// Parse as a whole document instead of a body fragment.
    #[serde(default)]
    pub document: bool,
    /// Style configuration in its TOML form; the default configuration when absent.
    #[serde(default)]
    pub style: Option<String>,
    pub expected: String,
}

impl Scenario {
    pub fn expected_lines(&self) -> Vec<String> {
        self.expected
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    #[serde(default)]
    case: Vec<Scenario>,
}

pub fn parse_scenarios(content: &str, origin: &str) -> Vec<Scenario> {
    let file: ScenarioFile = toml::from_str(content)
        .unwrap_or_else(|err| panic!("invalid scenario file {origin}: {err}"));
    let mut seen = std::collections::HashSet::new();
    for case in &file.case {
        assert!(
            seen.insert(case.name.as_str()),
            "duplicate scenario '{}' in {origin}",
            case.name
        );
    }
    file.case
}

pub fn load_scenarios(path: &Path) -> Vec<Scenario> {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read scenario file {path:?}: {err}"));
    let cases = parse_scenarios(&content, &path.display().to_string());
    assert!(!cases.is_empty(), "scenario file {path:?} has no cases");
    cases
}
