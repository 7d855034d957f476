use std::sync::LazyLock;

use regex::Regex;

use crate::{InvalidVersionError, Qualifier, Version, VersionRange};

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.(\d+|x)\.(\d+|x)(?:\.([^0-9]+)(\d+)?)?$").unwrap());

static RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\(|\[)(.*),(.*)(\)|\])$").unwrap());

/// Minor/patch value adopted when an `x` wildcard cannot be resolved against
/// the pool; it keeps unresolved wildcards sorting as "latest" in their line.
const UNRESOLVED_WILDCARD: u32 = 999;

/// Parser for [`Version`] and [`VersionRange`] text.
///
/// The parser carries a pool of known latest versions used to resolve the `x`
/// wildcard in the minor or patch position. A parser whose pool contains
/// `1.3.7.RELEASE` parses `1.3.x.RELEASE` to `1.3.7.RELEASE`; when the pool
/// yields no candidate or more than one, each wildcard field falls back to
/// `999` so the result still sorts after every real version of its line. The
/// qualifier narrows the search: `1.3.x.BUILD-SNAPSHOT` only matches pool
/// entries with that exact qualifier.
#[derive(Debug, Clone, Default)]
pub struct VersionParser {
    latest_versions: Vec<Version>,
}

impl VersionParser {
    pub fn new(latest_versions: Vec<Version>) -> Self {
        Self { latest_versions }
    }

    /// Parse a version, resolving wildcards against the pool.
    pub fn parse(&self, text: &str) -> Result<Version, InvalidVersionError> {
        let text = text.trim();
        let captures = VERSION_REGEX
            .captures(text)
            .ok_or_else(|| InvalidVersionError::new(text))?;
        let number =
            |digits: &str| digits.parse::<u32>().map_err(|_| InvalidVersionError::new(text));
        let major = number(&captures[1])?;
        let minor = &captures[2];
        let patch = &captures[3];
        let qualifier = match captures.get(4) {
            Some(id) => Some(match captures.get(5) {
                Some(suffix) => Qualifier::with_number(id.as_str(), number(suffix.as_str())?),
                None => Qualifier::new(id.as_str()),
            }),
            None => None,
        };

        if minor != "x" && patch != "x" {
            return Ok(make_version(major, number(minor)?, number(patch)?, qualifier));
        }

        let fixed_minor = if minor == "x" { None } else { Some(number(minor)?) };
        if let Some(latest) = self.find_latest(major, fixed_minor, qualifier.as_ref()) {
            return Ok(latest.clone());
        }
        let minor = fixed_minor.unwrap_or(UNRESOLVED_WILDCARD);
        let patch = if patch == "x" {
            UNRESOLVED_WILDCARD
        } else {
            number(patch)?
        };
        Ok(make_version(major, minor, patch, qualifier))
    }

    /// Parse a version, returning `None` on malformed text.
    pub fn safe_parse(&self, text: &str) -> Option<Version> {
        self.parse(text).ok()
    }

    /// Parse a range in bracket notation, e.g. `[1.0.0,2.0.0)`. A bare
    /// version is accepted as the unbounded range "this and later".
    pub fn parse_range(&self, text: &str) -> Result<VersionRange, InvalidVersionError> {
        let text = text.trim();
        let Some(captures) = RANGE_REGEX.captures(text) else {
            return Ok(VersionRange::unbounded(self.parse(text)?));
        };
        let lower_inclusive = &captures[1] == "[";
        let lower = self.parse(&captures[2])?;
        let upper = self.parse(&captures[3])?;
        let upper_inclusive = &captures[4] == "]";
        Ok(VersionRange::new(
            lower,
            lower_inclusive,
            Some(upper),
            upper_inclusive,
        ))
    }

    /// The single pool entry matching the fixed fields, or `None` when zero
    /// or several entries match.
    fn find_latest(
        &self,
        major: u32,
        minor: Option<u32>,
        qualifier: Option<&Qualifier>,
    ) -> Option<&Version> {
        let mut matches = self.latest_versions.iter().filter(|candidate| {
            candidate.major() == major
                && minor.is_none_or(|minor| candidate.minor() == minor)
                && qualifier.is_none_or(|qualifier| candidate.qualifier() == Some(qualifier))
        });
        let first = matches.next()?;
        matches.next().is_none().then_some(first)
    }
}

fn make_version(major: u32, minor: u32, patch: u32, qualifier: Option<Qualifier>) -> Version {
    match qualifier {
        Some(qualifier) => Version::with_qualifier(major, minor, patch, qualifier),
        None => Version::new(major, minor, patch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(texts: &[&str]) -> VersionParser {
        VersionParser::new(
            texts
                .iter()
                .map(|text| text.parse().unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_parse_plain_version() {
        let version = VersionParser::default().parse("1.2.3").unwrap();
        assert_eq!(version, Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_qualified_version() {
        let version = VersionParser::default().parse("2.0.0.RC2").unwrap();
        assert_eq!(version.qualifier(), Some(&Qualifier::with_number("RC", 2)));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let version = VersionParser::default().parse("  1.2.3 ").unwrap();
        assert_eq!(version, Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_invalid() {
        let parser = VersionParser::default();
        for text in ["1.2", "1.2.3.4.5", "a.b.c", "1.x.3x", "", "1.2.3-RC1"] {
            let error = parser.parse(text).unwrap_err();
            assert_eq!(error.text, text.trim());
        }
        assert!(parser.safe_parse("nope").is_none());
    }

    #[test]
    fn test_wildcard_resolves_against_unique_pool_entry() {
        let parser = pool(&["1.3.7.RELEASE", "1.4.2.RELEASE"]);
        let version = parser.parse("1.3.x.RELEASE").unwrap();
        assert_eq!(version.to_string(), "1.3.7.RELEASE");
    }

    #[test]
    fn test_wildcard_minor_and_patch() {
        let parser = pool(&["2.1.4"]);
        assert_eq!(parser.parse("2.x.x").unwrap().to_string(), "2.1.4");
    }

    #[test]
    fn test_wildcard_qualifier_narrows_candidates() {
        let parser = pool(&["1.3.7.RELEASE", "1.3.8.BUILD-SNAPSHOT"]);
        assert_eq!(
            parser.parse("1.3.x.BUILD-SNAPSHOT").unwrap().to_string(),
            "1.3.8.BUILD-SNAPSHOT"
        );
    }

    #[test]
    fn test_ambiguous_wildcard_falls_back_to_999() {
        // Two candidates in the 1.x line: ambiguity resolves to the guess.
        let parser = pool(&["1.3.7.RELEASE", "1.4.2.RELEASE"]);
        assert_eq!(
            parser.parse("1.x.x.RELEASE").unwrap().to_string(),
            "1.999.999.RELEASE"
        );
    }

    #[test]
    fn test_empty_pool_falls_back_to_999() {
        let parser = VersionParser::default();
        assert_eq!(parser.parse("1.3.x").unwrap().to_string(), "1.3.999");
        assert_eq!(
            parser.parse("1.x.x.BUILD-SNAPSHOT").unwrap().to_string(),
            "1.999.999.BUILD-SNAPSHOT"
        );
    }

    #[test]
    fn test_parse_range_brackets() {
        let parser = VersionParser::default();
        let range = parser.parse_range("[1.2.0.RELEASE,1.3.0.RELEASE)").unwrap();
        assert!(range.lower_inclusive());
        assert!(!range.upper_inclusive());
        assert_eq!(range.lower().to_string(), "1.2.0.RELEASE");
        assert_eq!(range.upper().unwrap().to_string(), "1.3.0.RELEASE");
    }

    #[test]
    fn test_parse_range_bare_version() {
        let range = VersionParser::default().parse_range("1.4.5.RELEASE").unwrap();
        assert!(range.lower_inclusive());
        assert!(range.upper().is_none());
    }

    #[test]
    fn test_parse_range_invalid() {
        assert!(VersionParser::default().parse_range("[1.2,2.0)").is_err());
    }
}
