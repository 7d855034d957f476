use std::fmt;

use indexmap::IndexMap;
use sprout_build::DependencyScope;
use sprout_version::{InvalidVersionError, Version, VersionParser};
use tracing::debug;

use crate::{BomEntry, DependencyEntry, MetadataSnapshot, RepositoryEntry};

/// A dependency with its coordinates selected for one platform version.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDependency {
    pub id: String,
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: DependencyScope,
    pub bom: Option<String>,
    pub repository: Option<String>,
    pub facets: Vec<String>,
}

/// A bill of materials with its version selected for one platform version.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBom {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub repositories: Vec<String>,
}

/// A reference from a catalog entry to an id the snapshot does not define,
/// or that cannot be resolved for the platform. Skipped during resolution;
/// the caller reports these as diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingReference {
    Bom { referrer: String, bom_id: String },
    Repository { referrer: String, repository_id: String },
}

impl fmt::Display for MissingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bom { referrer, bom_id } => {
                write!(f, "dependency '{referrer}' references unknown bom '{bom_id}'")
            }
            Self::Repository {
                referrer,
                repository_id,
            } => {
                write!(f, "'{referrer}' references unknown repository '{repository_id}'")
            }
        }
    }
}

/// The read-only result of evaluating a snapshot against one platform
/// version. All collections are keyed by id, deduplicated, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCatalog {
    pub platform_version: Version,
    pub dependencies: IndexMap<String, ResolvedDependency>,
    pub boms: IndexMap<String, ResolvedBom>,
    pub repositories: IndexMap<String, RepositoryEntry>,
    pub missing_references: Vec<MissingReference>,
}

impl ResolvedCatalog {
    pub fn dependency(&self, id: &str) -> Option<&ResolvedDependency> {
        self.dependencies.get(id)
    }
}

/// Select the dependencies, BOMs, and repositories applicable to
/// `platform_version`.
///
/// A dependency outside its compatibility range is left out; a dependency
/// whose mappings all miss keeps its base coordinates, and a BOM behaves the
/// same. Malformed range text in the catalog is a fatal error.
pub fn resolve(
    snapshot: &MetadataSnapshot,
    platform_version: &Version,
) -> Result<ResolvedCatalog, InvalidVersionError> {
    let parser = snapshot.parser();
    let mut dependencies = IndexMap::new();
    let mut boms = IndexMap::new();
    let mut repositories = IndexMap::new();
    let mut missing_references = Vec::new();

    for entry in &snapshot.dependencies {
        if let Some(range) = &entry.compatibility_range
            && !parser.parse_range(range)?.matches(platform_version)
        {
            debug!(dependency = %entry.id, range = %range, "outside compatibility range");
            continue;
        }
        let resolved = resolve_dependency(entry, platform_version, &parser)?;
        if let Some(repository_id) = &resolved.repository {
            collect_repository(
                snapshot,
                &mut repositories,
                &mut missing_references,
                &entry.id,
                repository_id,
            );
        }
        dependencies.insert(entry.id.clone(), resolved);
    }

    for dependency in dependencies.values() {
        let Some(bom_id) = &dependency.bom else {
            continue;
        };
        if boms.contains_key(bom_id) {
            continue;
        }
        let resolved = snapshot
            .boms
            .get(bom_id)
            .map(|entry| resolve_bom(entry, platform_version, &parser))
            .transpose()?
            .flatten();
        match resolved {
            Some(bom) => {
                boms.insert(bom_id.clone(), bom);
            }
            None => missing_references.push(MissingReference::Bom {
                referrer: dependency.id.clone(),
                bom_id: bom_id.clone(),
            }),
        }
    }

    for (bom_id, bom) in &boms {
        for repository_id in &bom.repositories {
            collect_repository(
                snapshot,
                &mut repositories,
                &mut missing_references,
                bom_id,
                repository_id,
            );
        }
    }

    debug!(
        dependencies = dependencies.len(),
        boms = boms.len(),
        repositories = repositories.len(),
        platform = %platform_version,
        "catalog resolved"
    );
    Ok(ResolvedCatalog {
        platform_version: platform_version.clone(),
        dependencies,
        boms,
        repositories,
        missing_references,
    })
}

/// The first matching coordinate mapping wins; its unset fields keep the
/// entry's base values. No match keeps the base coordinates entirely.
fn resolve_dependency(
    entry: &DependencyEntry,
    platform_version: &Version,
    parser: &VersionParser,
) -> Result<ResolvedDependency, InvalidVersionError> {
    let mut group_id = entry.group_id.clone();
    let mut artifact_id = entry.artifact_id.clone();
    let mut version = entry.version.clone();
    for mapping in &entry.mappings {
        if parser
            .parse_range(&mapping.compatibility_range)?
            .matches(platform_version)
        {
            if let Some(mapped) = &mapping.group_id {
                group_id = mapped.clone();
            }
            if let Some(mapped) = &mapping.artifact_id {
                artifact_id = mapped.clone();
            }
            if let Some(mapped) = &mapping.version {
                version = Some(mapped.clone());
            }
            break;
        }
    }
    Ok(ResolvedDependency {
        id: entry.id.clone(),
        group_id,
        artifact_id,
        version,
        scope: entry.scope,
        bom: entry.bom.clone(),
        repository: entry.repository.clone(),
        facets: entry.facets.clone(),
    })
}

/// The first matching mapping supplies the version; its repository list
/// replaces the base one when non-empty. `None` when no version can be
/// determined at all.
fn resolve_bom(
    entry: &BomEntry,
    platform_version: &Version,
    parser: &VersionParser,
) -> Result<Option<ResolvedBom>, InvalidVersionError> {
    let mut version = entry.version.clone();
    let mut repositories = entry.repositories.clone();
    for mapping in &entry.mappings {
        if parser
            .parse_range(&mapping.compatibility_range)?
            .matches(platform_version)
        {
            version = Some(mapping.version.clone());
            if !mapping.repositories.is_empty() {
                repositories = mapping.repositories.clone();
            }
            break;
        }
    }
    Ok(version.map(|version| ResolvedBom {
        group_id: entry.group_id.clone(),
        artifact_id: entry.artifact_id.clone(),
        version,
        repositories,
    }))
}

fn collect_repository(
    snapshot: &MetadataSnapshot,
    repositories: &mut IndexMap<String, RepositoryEntry>,
    missing_references: &mut Vec<MissingReference>,
    referrer: &str,
    repository_id: &str,
) {
    if repositories.contains_key(repository_id) {
        return;
    }
    match snapshot.repositories.get(repository_id) {
        Some(entry) => {
            repositories.insert(repository_id.to_string(), entry.clone());
        }
        None => missing_references.push(MissingReference::Repository {
            referrer: referrer.to_string(),
            repository_id: repository_id.to_string(),
        }),
    }
}
