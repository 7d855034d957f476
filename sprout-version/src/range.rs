use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

use crate::{InvalidVersionError, Version, VersionParser};

/// A range of [`Version`]s.
///
/// A square bracket denotes an inclusive end and a round bracket an exclusive
/// end, e.g. `[1.2.0,1.3.0)` contains `1.2.0` and everything after it up to,
/// but not including, `1.3.0`. A range given as a bare version, e.g. `1.4.5`,
/// is unbounded above and means "this version and later".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct VersionRange {
    lower: Version,
    lower_inclusive: bool,
    upper: Option<Version>,
    upper_inclusive: bool,
}

impl VersionRange {
    pub fn new(
        lower: Version,
        lower_inclusive: bool,
        upper: Option<Version>,
        upper_inclusive: bool,
    ) -> Self {
        Self {
            lower,
            lower_inclusive,
            upper,
            upper_inclusive,
        }
    }

    /// The unbounded range starting at `lower`, inclusive.
    pub fn unbounded(lower: Version) -> Self {
        Self::new(lower, true, None, false)
    }

    pub fn lower(&self) -> &Version {
        &self.lower
    }

    pub fn lower_inclusive(&self) -> bool {
        self.lower_inclusive
    }

    pub fn upper(&self) -> Option<&Version> {
        self.upper.as_ref()
    }

    pub fn upper_inclusive(&self) -> bool {
        self.upper_inclusive
    }

    /// Whether `version` is contained in this range.
    pub fn matches(&self, version: &Version) -> bool {
        match self.lower.cmp(version) {
            Ordering::Greater => return false,
            Ordering::Equal if !self.lower_inclusive => return false,
            _ => {}
        }
        if let Some(upper) = &self.upper {
            match upper.cmp(version) {
                Ordering::Less => return false,
                Ordering::Equal if !self.upper_inclusive => return false,
                _ => {}
            }
        }
        true
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lower_op = if self.lower_inclusive { ">=" } else { ">" };
        write!(f, "{lower_op}{}", self.lower)?;
        if let Some(upper) = &self.upper {
            let upper_op = if self.upper_inclusive { "<=" } else { "<" };
            write!(f, " and {upper_op}{upper}")?;
        }
        Ok(())
    }
}

impl FromStr for VersionRange {
    type Err = InvalidVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionParser::default().parse_range(s)
    }
}

impl TryFrom<String> for VersionRange {
    type Error = InvalidVersionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for VersionRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(text: &str) -> Version {
        text.parse().unwrap()
    }

    fn range(text: &str) -> VersionRange {
        text.parse().unwrap()
    }

    #[test]
    fn test_half_open_range() {
        let range = range("[1.0.0,1.1.0)");
        assert!(range.matches(&version("1.0.0")));
        assert!(range.matches(&version("1.0.5")));
        assert!(!range.matches(&version("1.1.0")));
        assert!(!range.matches(&version("0.9.9")));
    }

    #[test]
    fn test_exclusive_lower_inclusive_upper() {
        let range = range("(2.0.0,3.2.0]");
        assert!(!range.matches(&version("2.0.0")));
        assert!(range.matches(&version("2.0.1")));
        assert!(range.matches(&version("3.2.0")));
        assert!(!range.matches(&version("3.2.1")));
    }

    #[test]
    fn test_unbounded_range() {
        let range = range("1.4.5");
        assert!(range.matches(&version("1.4.5")));
        assert!(range.matches(&version("99.0.0")));
        assert!(!range.matches(&version("1.4.4")));
    }

    #[test]
    fn test_qualifiers_respected_at_boundaries() {
        let range = range("[1.2.0.RC1,2.0.0)");
        assert!(range.matches(&version("1.2.0.RC1")));
        assert!(range.matches(&version("1.2.0")));
        assert!(!range.matches(&version("1.2.0.M9")));
        assert!(!range.matches(&version("2.0.0")));
        // The exclusive upper bound still rejects pre-releases of itself only
        // when they sort at or above it; RC sorts below the bare version.
        assert!(range.matches(&version("2.0.0.RC1")));
    }

    #[test]
    fn test_display() {
        assert_eq!(range("[1.0.0,2.0.0)").to_string(), ">=1.0.0 and <2.0.0");
        assert_eq!(range("(1.0.0,2.0.0]").to_string(), ">1.0.0 and <=2.0.0");
        assert_eq!(range("1.4.5").to_string(), ">=1.4.5");
    }
}
