use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

use crate::{InvalidVersionError, VersionParser};

/// Qualifier tags with a fixed position in the ordering, lowest first. An
/// absent qualifier counts as `RELEASE`; tags outside this table order
/// lexicographically among themselves and below every known tag.
const KNOWN_QUALIFIERS: [&str; 4] = ["M", "RC", "BUILD-SNAPSHOT", "RELEASE"];

/// The pre/post-release tag of a [`Version`], e.g. the `RC1` in `2.0.0.RC1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Qualifier {
    id: String,
    number: Option<u32>,
}

impl Qualifier {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            number: None,
        }
    }

    pub fn with_number(id: impl Into<String>, number: u32) -> Self {
        Self {
            id: id.into(),
            number: Some(number),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The numeric suffix, e.g. `4` for `M4`.
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    fn index(&self) -> Option<usize> {
        KNOWN_QUALIFIERS.iter().position(|known| *known == self.id)
    }

    fn compare(&self, other: &Qualifier) -> Ordering {
        let by_tag = match (self.index(), other.index()) {
            (None, None) => self.id.cmp(&other.id),
            (first, second) => {
                let first = first.map_or(-1, |index| index as i64);
                let second = second.map_or(-1, |index| index as i64);
                first.cmp(&second)
            }
        };
        by_tag.then_with(|| self.number.unwrap_or(0).cmp(&other.number.unwrap_or(0)))
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)?;
        if let Some(number) = self.number {
            write!(f, "{number}")?;
        }
        Ok(())
    }
}

/// A platform version, written `MAJOR.MINOR.PATCH[.QUALIFIER[NUM]]`.
///
/// Versions are immutable and totally ordered: numeric fields compare first,
/// then the qualifier (`M < RC < BUILD-SNAPSHOT < RELEASE`, absent counting
/// as `RELEASE`), with the qualifier's numeric suffix as the final tiebreak.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Version {
    major: u32,
    minor: u32,
    patch: u32,
    qualifier: Option<Qualifier>,
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            qualifier: None,
        }
    }

    pub fn with_qualifier(major: u32, minor: u32, patch: u32, qualifier: Qualifier) -> Self {
        Self {
            major,
            minor,
            patch,
            qualifier: Some(qualifier),
        }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }

    pub fn qualifier(&self) -> Option<&Qualifier> {
        self.qualifier.as_ref()
    }

    /// Whether this version carries no qualifier or the final `RELEASE` tag.
    pub fn is_release(&self) -> bool {
        self.qualifier
            .as_ref()
            .is_none_or(|qualifier| qualifier.id() == "RELEASE")
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| compare_qualifiers(self.qualifier.as_ref(), other.qualifier.as_ref()))
    }
}

/// An absent qualifier compares as `RELEASE`.
fn compare_qualifiers(first: Option<&Qualifier>, second: Option<&Qualifier>) -> Ordering {
    let release = Qualifier::new("RELEASE");
    first
        .unwrap_or(&release)
        .compare(second.unwrap_or(&release))
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, ".{qualifier}")?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = InvalidVersionError;

    /// Parse without a version pool; `x` wildcards fall back to `999`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VersionParser::default().parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = InvalidVersionError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for Version {
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

    #[test]
    fn test_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(
            Version::with_qualifier(1, 2, 3, Qualifier::with_number("RC", 2)).to_string(),
            "1.2.3.RC2"
        );
        assert_eq!(
            Version::with_qualifier(2, 0, 0, Qualifier::new("BUILD-SNAPSHOT")).to_string(),
            "2.0.0.BUILD-SNAPSHOT"
        );
    }

    #[test]
    fn test_round_trip() {
        for text in ["1.2.3", "0.0.1", "2.0.0.RC1", "1.5.0.M4", "3.1.2.BUILD-SNAPSHOT"] {
            assert_eq!(version(text).to_string(), text);
        }
    }

    #[test]
    fn test_numeric_ordering() {
        assert!(version("1.2.3") < version("1.2.4"));
        assert!(version("1.2.3") < version("1.3.0"));
        assert!(version("1.9.9") < version("2.0.0"));
        assert_eq!(version("1.2.3"), version("1.2.3"));
    }

    #[test]
    fn test_qualifier_ordering_is_total() {
        let milestone = version("1.2.0.M1");
        let rc = version("1.2.0.RC1");
        let snapshot = version("1.2.0.BUILD-SNAPSHOT");
        let release = version("1.2.0.RELEASE");
        assert!(milestone < rc);
        assert!(rc < snapshot);
        assert!(snapshot < release);
        assert!(milestone < snapshot);
        assert!(milestone < release);
    }

    #[test]
    fn test_absent_qualifier_counts_as_release() {
        assert_eq!(
            version("1.2.0").cmp(&version("1.2.0.RELEASE")),
            Ordering::Equal
        );
        assert!(version("1.2.0.RC1") < version("1.2.0"));
    }

    #[test]
    fn test_qualifier_number_breaks_ties() {
        assert!(version("1.2.0.M1") < version("1.2.0.M2"));
        assert!(version("1.2.0.RC1") < version("1.2.0.RC10"));
        // Absent suffix counts as zero.
        assert!(version("1.2.0.RC") < version("1.2.0.RC1"));
    }

    #[test]
    fn test_unknown_qualifiers_sort_below_known_tags() {
        assert!(version("1.2.0.ALPHA") < version("1.2.0.M1"));
        assert!(version("1.2.0.ALPHA") < version("1.2.0.RELEASE"));
        // Among themselves, unknown tags order lexicographically.
        assert!(version("1.2.0.ALPHA") < version("1.2.0.BETA"));
    }

    #[test]
    fn test_is_release() {
        assert!(version("1.2.0").is_release());
        assert!(version("1.2.0.RELEASE").is_release());
        assert!(!version("1.2.0.RC1").is_release());
        assert!(!version("1.2.0.BUILD-SNAPSHOT").is_release());
    }

    #[test]
    fn test_serde_round_trip() {
        #[derive(Debug, Serialize, Deserialize)]
        struct Document {
            version: Version,
        }
        let document: Document = toml::from_str(r#"version = "2.1.0.RC1""#).unwrap();
        assert_eq!(document.version, version("2.1.0.RC1"));
        assert_eq!(
            toml::to_string(&document).unwrap().trim(),
            r#"version = "2.1.0.RC1""#
        );
    }
}
