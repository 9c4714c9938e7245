//! Version constraints and the version ordering used to evaluate them.
//!
//! Ordering follows Maven conventions:
//! - tokens are split on `.` and `-`
//! - numeric tokens compare as numbers, and trailing zeros are insignificant
//! - well-known qualifiers order as
//!   `alpha` < `beta` < `milestone` < `rc` < `snapshot` < release < `sp`
//! - unknown words sort below a release and compare case-insensitively

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// The version part of a module selector.
///
/// At most one of `strictly`, `require` and `prefer` decides which versions
/// are acceptable, in that order of precedence. `reject` always applies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionConstraint {
    #[serde(default)]
    pub require: Option<String>,
    #[serde(default)]
    pub prefer: Option<String>,
    #[serde(default)]
    pub strictly: Option<String>,
    #[serde(default)]
    pub reject: Vec<String>,
    #[serde(default)]
    pub branch: Option<String>,
}

impl VersionConstraint {
    pub fn require(version: impl Into<String>) -> Self {
        Self {
            require: Some(version.into()),
            ..Self::default()
        }
    }

    pub fn prefer(version: impl Into<String>) -> Self {
        Self {
            prefer: Some(version.into()),
            ..Self::default()
        }
    }

    pub fn strictly(version: impl Into<String>) -> Self {
        Self {
            strictly: Some(version.into()),
            ..Self::default()
        }
    }

    pub fn with_reject(mut self, version: impl Into<String>) -> Self {
        self.reject.push(version.into());
        self
    }

    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }

    /// The selector that decides acceptance, if any.
    pub fn effective(&self) -> Option<&str> {
        self.strictly
            .as_deref()
            .or(self.require.as_deref())
            .or(self.prefer.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.effective().is_none() && self.reject.is_empty() && self.branch.is_none()
    }

    /// Whether `candidate` satisfies this constraint.
    pub fn accepts(&self, candidate: &str) -> bool {
        if self
            .reject
            .iter()
            .any(|r| VersionSelector::parse(r).accepts(candidate))
        {
            return false;
        }
        match self.effective() {
            Some(selector) => VersionSelector::parse(selector).accepts(candidate),
            None => true,
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref v) = self.strictly {
            write!(f, "{{strictly {v}}}")?;
        } else if let Some(ref v) = self.require {
            f.write_str(v)?;
        } else if let Some(ref v) = self.prefer {
            write!(f, "{{prefer {v}}}")?;
        }
        if !self.reject.is_empty() {
            if self.effective().is_some() {
                f.write_str(" ")?;
            }
            write!(f, "{{reject {}}}", self.reject.join(" | "))?;
        }
        Ok(())
    }
}

/// One parsed version selector string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    /// `+`, `latest.release`, or empty.
    Any,
    /// `1.+` style prefix match.
    Prefix(String),
    Range(VersionRange),
    Exact(String),
}

impl VersionSelector {
    pub fn parse(selector: &str) -> Self {
        let s = selector.trim();
        if s.is_empty() || s == "+" || s.starts_with("latest.") {
            return Self::Any;
        }
        if let Some(prefix) = s.strip_suffix('+') {
            return Self::Prefix(prefix.to_string());
        }
        match VersionRange::parse(s) {
            Some(range) => Self::Range(range),
            None => Self::Exact(s.to_string()),
        }
    }

    pub fn accepts(&self, candidate: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Prefix(prefix) => candidate.starts_with(prefix.as_str()),
            Self::Range(range) => range.contains(candidate),
            Self::Exact(version) => compare_versions(version, candidate) == Ordering::Equal,
        }
    }
}

/// A Maven range such as `[1.0,2.0)`, `(,2.0]` or `[1.5]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    pub lower: Option<RangeBound>,
    pub upper: Option<RangeBound>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeBound {
    pub version: String,
    pub inclusive: bool,
}

impl VersionRange {
    /// Returns `None` for anything that is not bracketed.
    pub fn parse(spec: &str) -> Option<Self> {
        let s = spec.trim();
        let lower_inclusive = match s.chars().next()? {
            '[' => true,
            '(' => false,
            _ => return None,
        };
        let upper_inclusive = match s.chars().last()? {
            ']' => true,
            ')' => false,
            _ => return None,
        };
        if s.len() < 2 {
            return None;
        }
        let inner = &s[1..s.len() - 1];
        let bound = |text: &str, inclusive: bool| {
            let text = text.trim();
            (!text.is_empty()).then(|| RangeBound {
                version: text.to_string(),
                inclusive,
            })
        };

        match inner.split_once(',') {
            Some((lo, hi)) => Some(Self {
                lower: bound(lo, lower_inclusive),
                upper: bound(hi, upper_inclusive),
            }),
            None => {
                let exact = bound(inner, true)?;
                Some(Self {
                    lower: Some(exact.clone()),
                    upper: Some(exact),
                })
            }
        }
    }

    pub fn contains(&self, candidate: &str) -> bool {
        let above_lower = self.lower.as_ref().map_or(true, |b| {
            match compare_versions(candidate, &b.version) {
                Ordering::Greater => true,
                Ordering::Equal => b.inclusive,
                Ordering::Less => false,
            }
        });
        let below_upper = self.upper.as_ref().map_or(true, |b| {
            match compare_versions(candidate, &b.version) {
                Ordering::Less => true,
                Ordering::Equal => b.inclusive,
                Ordering::Greater => false,
            }
        });
        above_lower && below_upper
    }
}

const RELEASE_RANK: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(u64),
    Qualifier(u8),
    Word(String),
}

impl Token {
    fn classify(text: &str) -> Self {
        if let Ok(n) = text.parse::<u64>() {
            return Self::Number(n);
        }
        let rank = match text.to_ascii_lowercase().as_str() {
            "alpha" | "a" => 0,
            "beta" | "b" => 1,
            "milestone" | "m" => 2,
            "rc" | "cr" => 3,
            "snapshot" => 4,
            "ga" | "final" | "release" => RELEASE_RANK,
            "sp" => 6,
            _ => return Self::Word(text.to_string()),
        };
        Self::Qualifier(rank)
    }

    /// Ordering against a token that is absent on the other side.
    fn cmp_missing(&self) -> Ordering {
        match self {
            Self::Number(n) => n.cmp(&0),
            Self::Qualifier(rank) => rank.cmp(&RELEASE_RANK),
            Self::Word(_) => Ordering::Less,
        }
    }

    fn cmp_token(&self, other: &Self) -> Ordering {
        use Token::*;
        match (self, other) {
            (Number(a), Number(b)) => a.cmp(b),
            (Number(_), _) => Ordering::Greater,
            (_, Number(_)) => Ordering::Less,
            (Qualifier(a), Qualifier(b)) => a.cmp(b),
            (Word(a), Word(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Qualifier(rank), Word(_)) if *rank >= RELEASE_RANK => Ordering::Greater,
            (Qualifier(_), Word(_)) => Ordering::Less,
            (Word(_), Qualifier(rank)) if *rank >= RELEASE_RANK => Ordering::Less,
            (Word(_), Qualifier(_)) => Ordering::Greater,
        }
    }
}

fn tokenize(version: &str) -> Vec<Token> {
    version
        .split(['.', '-'])
        .filter(|t| !t.is_empty())
        .map(Token::classify)
        .collect()
}

/// Compare two version strings using Maven ordering.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = tokenize(a);
    let right = tokenize(b);
    for i in 0..left.len().max(right.len()) {
        let ord = match (left.get(i), right.get(i)) {
            (Some(x), Some(y)) => x.cmp_token(y),
            (Some(x), None) => x.cmp_missing(),
            (None, Some(y)) => y.cmp_missing().reverse(),
            (None, None) => Ordering::Equal,
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
