use std::fmt;
use url::{ParseError, Url};

/// Destination of a hyperlink.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LinkTarget {
    Absolute(Url),
    /// A well-formed reference left for the host to resolve.
    Relative(String),
}

impl LinkTarget {
    pub fn as_str(&self) -> &str {
        match self {
            LinkTarget::Absolute(url) => url.as_str(),
            LinkTarget::Relative(href) => href,
        }
    }

    pub fn url(&self) -> Option<&Url> {
        match self {
            LinkTarget::Absolute(url) => Some(url),
            LinkTarget::Relative(_) => None,
        }
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const PROBE_BASE: &str = "http://probe.invalid/";

/// Turns an `href` value into a target. Missing, blank and malformed values
/// yield `None`.
pub fn resolve_link(href: Option<&str>, base: Option<&Url>) -> Option<LinkTarget> {
    let href = href?.trim();
    if href.is_empty() {
        return None;
    }
    match Url::parse(href) {
        Ok(url) => Some(LinkTarget::Absolute(url)),
        Err(ParseError::RelativeUrlWithoutBase) => match base {
            Some(base) => base.join(href).ok().map(LinkTarget::Absolute),
            None => {
                let probe = Url::parse(PROBE_BASE).ok()?;
                probe.join(href).ok()?;
                Some(LinkTarget::Relative(href.to_string()))
            }
        },
        Err(err) => {
            log::debug!(target: "render_plan.compile", "unusable href {href:?}: {err}");
            None
        }
    }
}
