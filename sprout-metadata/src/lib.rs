//! Catalogs and platform resolution for the Sprout project generator.
//!
//! A [`MetadataSnapshot`] is the immutable unit of catalog data: the
//! dependency catalog, the BOM catalog, the repository catalog, and the pool
//! of known platform versions. Snapshots are loaded from TOML, shared
//! read-only across concurrent generation requests, and swapped wholesale by
//! whatever refreshes them; nothing in this crate mutates one after loading.
//!
//! The [`resolve`] function evaluates a snapshot against one target platform
//! version, selecting the applicable dependencies and the coordinates, BOMs,
//! and repositories they need.

mod catalog;
mod resolver;

pub use catalog::{
    BomEntry, BomMapping, CatalogError, DependencyEntry, DependencyMapping, MetadataSnapshot,
    RepositoryEntry,
};
pub use resolver::{
    MissingReference, ResolvedBom, ResolvedCatalog, ResolvedDependency, resolve,
};
