use indexmap::IndexMap;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use sprout_build::DependencyScope;
use sprout_version::{Version, VersionParser};
use thiserror::Error;

/// Raised when a catalog document cannot be read.
#[derive(Debug, Error, Diagnostic)]
pub enum CatalogError {
    #[error("failed to parse catalog document")]
    #[diagnostic(code(sprout::catalog_parse_error))]
    Parse {
        #[source]
        source: Box<toml::de::Error>,
    },
}

/// A coordinate mapping applied when the platform version falls in its
/// range; unset fields keep the entry's base value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DependencyMapping {
    pub compatibility_range: String,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub artifact_id: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

/// A selectable dependency in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DependencyEntry {
    pub id: String,
    pub group_id: String,
    pub artifact_id: String,
    /// Explicit version; absent when a BOM manages it.
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub scope: DependencyScope,
    /// Platform versions this dependency is available for; absent means all.
    #[serde(default)]
    pub compatibility_range: Option<String>,
    /// First match wins; evaluated before the base coordinates.
    #[serde(default)]
    pub mappings: Vec<DependencyMapping>,
    /// Id of a BOM in the snapshot's BOM catalog.
    #[serde(default)]
    pub bom: Option<String>,
    /// Id of a repository in the snapshot's repository catalog.
    #[serde(default)]
    pub repository: Option<String>,
    /// Capability tags used to gate customizer activation.
    #[serde(default)]
    pub facets: Vec<String>,
}

/// A version mapping of a BOM catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BomMapping {
    pub compatibility_range: String,
    pub version: String,
    /// Repositories additionally required when this mapping applies.
    #[serde(default)]
    pub repositories: Vec<String>,
}

/// A bill of materials in the catalog, keyed by id in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BomEntry {
    pub group_id: String,
    pub artifact_id: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub repositories: Vec<String>,
    #[serde(default)]
    pub mappings: Vec<BomMapping>,
}

/// An artifact repository in the catalog, keyed by id in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RepositoryEntry {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub snapshots_enabled: bool,
}

/// One immutable unit of catalog data plus the platform version pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MetadataSnapshot {
    /// Known latest platform versions, used to resolve `x` wildcards.
    #[serde(default)]
    pub platform_versions: Vec<Version>,
    #[serde(default)]
    pub dependencies: Vec<DependencyEntry>,
    #[serde(default)]
    pub boms: IndexMap<String, BomEntry>,
    #[serde(default)]
    pub repositories: IndexMap<String, RepositoryEntry>,
}

impl MetadataSnapshot {
    /// Load a snapshot from a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, CatalogError> {
        toml::from_str(text).map_err(|source| CatalogError::Parse {
            source: Box::new(source),
        })
    }

    /// A version parser backed by this snapshot's platform version pool.
    pub fn parser(&self) -> VersionParser {
        VersionParser::new(self.platform_versions.clone())
    }

    pub fn dependency(&self, id: &str) -> Option<&DependencyEntry> {
        self.dependencies.iter().find(|entry| entry.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        platform-versions = ["3.1.5", "3.2.0"]

        [[dependencies]]
        id = "web"
        group-id = "org.example"
        artifact-id = "starter-web"
        facets = ["web"]

        [[dependencies]]
        id = "jpa"
        group-id = "org.example"
        artifact-id = "starter-data-jpa"
        scope = "compile"
        bom = "platform"
        repository = "platform-milestones"
        facets = ["jpa", "sql"]

        [boms.platform]
        group-id = "org.example"
        artifact-id = "platform-bom"
        version = "3.2.0"

        [repositories.platform-milestones]
        name = "Platform Milestones"
        url = "https://repo.example.com/milestone"
    "#;

    #[test]
    fn test_snapshot_from_toml() {
        let snapshot = MetadataSnapshot::from_toml(SAMPLE).unwrap();
        assert_eq!(snapshot.platform_versions.len(), 2);
        assert_eq!(snapshot.dependencies.len(), 2);
        let jpa = snapshot.dependency("jpa").unwrap();
        assert_eq!(jpa.artifact_id, "starter-data-jpa");
        assert_eq!(jpa.bom.as_deref(), Some("platform"));
        assert_eq!(jpa.facets, ["jpa", "sql"]);
        assert!(snapshot.boms.contains_key("platform"));
        assert!(snapshot.repositories.contains_key("platform-milestones"));
    }

    #[test]
    fn test_parser_uses_platform_pool() {
        let snapshot = MetadataSnapshot::from_toml(SAMPLE).unwrap();
        let parser = snapshot.parser();
        assert_eq!(parser.parse("3.1.x").unwrap().to_string(), "3.1.5");
    }

    #[test]
    fn test_invalid_document() {
        assert!(MetadataSnapshot::from_toml("dependencies = 3").is_err());
    }

    #[test]
    fn test_unknown_dependency_lookup() {
        let snapshot = MetadataSnapshot::from_toml(SAMPLE).unwrap();
        assert!(snapshot.dependency("nope").is_none());
    }
}
