use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub type MarkerFn = dyn Fn(usize) -> String + Send + Sync;

/// How ordered-list markers are spelled. `format` takes a zero-based index.
#[derive(Clone, Default)]
pub enum ListNumberFormat {
    /// `1.`, `2.`, `3.`
    #[default]
    Decimal,
    /// `a.`, `b.`, ... `z.`, `aa.`
    LowerAlpha,
    UpperAlpha,
    /// `i.`, `ii.`; falls back to decimal outside 1..=3999.
    LowerRoman,
    UpperRoman,
    /// Caller-supplied; the returned string is used verbatim.
    Custom(Arc<MarkerFn>),
}

impl ListNumberFormat {
    pub fn custom(f: impl Fn(usize) -> String + Send + Sync + 'static) -> Self {
        ListNumberFormat::Custom(Arc::new(f))
    }

    pub fn format(&self, index: usize) -> String {
        let n = index.saturating_add(1);
        match self {
            ListNumberFormat::Decimal => format!("{n}."),
            ListNumberFormat::LowerAlpha => format!("{}.", alpha(n)),
            ListNumberFormat::UpperAlpha => format!("{}.", alpha(n).to_ascii_uppercase()),
            ListNumberFormat::LowerRoman => match roman(n) {
                Some(r) => format!("{r}."),
                None => format!("{n}."),
            },
            ListNumberFormat::UpperRoman => match roman(n) {
                Some(r) => format!("{}.", r.to_ascii_uppercase()),
                None => format!("{n}."),
            },
            ListNumberFormat::Custom(f) => f(index),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ListNumberFormat::Decimal => "decimal",
            ListNumberFormat::LowerAlpha => "lower-alpha",
            ListNumberFormat::UpperAlpha => "upper-alpha",
            ListNumberFormat::LowerRoman => "lower-roman",
            ListNumberFormat::UpperRoman => "upper-roman",
            ListNumberFormat::Custom(_) => "custom",
        }
    }
}

/// Bijective base-26: 1 -> a, 26 -> z, 27 -> aa.
fn alpha(mut n: usize) -> String {
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(b'a' + (n % 26) as u8);
        n /= 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

fn roman(mut n: usize) -> Option<String> {
    const TABLE: [(usize, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    if n == 0 || n > 3999 {
        return None;
    }
    let mut out = String::new();
    for (value, digits) in TABLE {
        while n >= value {
            out.push_str(digits);
            n -= value;
        }
    }
    Some(out)
}

impl fmt::Debug for ListNumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl PartialEq for ListNumberFormat {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ListNumberFormat::Custom(a), ListNumberFormat::Custom(b)) => Arc::ptr_eq(a, b),
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownNumberFormat(pub String);

impl fmt::Display for UnknownNumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown list number format `{}` (expected decimal, lower-alpha, \
             upper-alpha, lower-roman or upper-roman)",
            self.0
        )
    }
}

impl std::error::Error for UnknownNumberFormat {}

impl FromStr for ListNumberFormat {
    type Err = UnknownNumberFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "decimal" => Ok(ListNumberFormat::Decimal),
            "lower-alpha" => Ok(ListNumberFormat::LowerAlpha),
            "upper-alpha" => Ok(ListNumberFormat::UpperAlpha),
            "lower-roman" => Ok(ListNumberFormat::LowerRoman),
            "upper-roman" => Ok(ListNumberFormat::UpperRoman),
            _ => Err(UnknownNumberFormat(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for ListNumberFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
