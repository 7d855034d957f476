//! Mutable build-descriptor model for the Sprout project generator.
//!
//! A [`Build`] is the tree customizer steps mutate: dependencies, imported
//! BOMs, plugins, repositories, and properties, each held in a keyed
//! container where re-adding a key updates the existing entry in place. The
//! per-tool descriptors ([`MavenBuild`], [`GradleBuild`]) wrap the shared
//! tree and a writer turns each into its build file(s).

mod build;
pub mod gradle;
pub mod maven;

pub use build::{
    BillOfMaterials, Build, BuildDependency, ConfigurationValue, DependencyScope, KeyedContainer,
    Plugin, Repository,
};
pub use gradle::{GradleBuild, GradleBuildWriter, GradleDialect};
pub use maven::{MavenBuild, MavenBuildWriter};

/// The build descriptor of one generation request, tagged by build tool.
#[derive(Debug, Clone)]
pub enum BuildDescriptor {
    Maven(MavenBuild),
    Gradle(GradleBuild),
}

impl BuildDescriptor {
    /// The shared descriptor tree, independent of the build tool.
    pub fn build(&self) -> &Build {
        match self {
            Self::Maven(maven) => maven.build(),
            Self::Gradle(gradle) => gradle.build(),
        }
    }

    pub fn build_mut(&mut self) -> &mut Build {
        match self {
            Self::Maven(maven) => maven.build_mut(),
            Self::Gradle(gradle) => gradle.build_mut(),
        }
    }
}
