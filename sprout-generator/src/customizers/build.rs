//! Build-phase steps: descriptor wiring from the resolved catalog, build
//! plugins per build tool, and version-gated repositories.

use eyre::Result;
use sprout_build::{
    BillOfMaterials, Build, BuildDependency, BuildDescriptor, Plugin, Repository,
};
use sprout_metadata::ResolvedCatalog;

use crate::{BuildCustomizer, GenerationContext};

/// Kotlin toolchain version wired into generated builds.
const DEFAULT_KOTLIN_VERSION: &str = "2.0.21";

/// Adds the selected dependencies with their BOMs and repositories to the
/// descriptor, in request order, deduplicated by id.
pub struct PlatformCatalogCustomizer;

impl BuildCustomizer for PlatformCatalogCustomizer {
    fn customize(
        &self,
        context: &mut GenerationContext,
        descriptor: &mut BuildDescriptor,
    ) -> Result<()> {
        let build = descriptor.build_mut();
        for dependency in context.selected_dependencies() {
            let mut entry =
                BuildDependency::new(dependency.group_id.as_str(), dependency.artifact_id.as_str())
                    .scope(dependency.scope);
            if let Some(version) = &dependency.version {
                entry = entry.version(version.as_str());
            }
            build.dependencies_mut().add(dependency.id.as_str(), entry);

            if let Some(repository_id) = &dependency.repository {
                add_repository(build, context.resolved(), repository_id);
            }
            if let Some(bom_id) = &dependency.bom
                && let Some(bom) = context.resolved().boms.get(bom_id)
            {
                build.boms_mut().add(
                    bom_id.as_str(),
                    BillOfMaterials::new(
                        bom.group_id.as_str(),
                        bom.artifact_id.as_str(),
                        bom.version.as_str(),
                    ),
                );
                for repository_id in &bom.repositories {
                    add_repository(build, context.resolved(), repository_id);
                }
            }
        }
        Ok(())
    }
}

/// Unknown ids were already reported when the catalog was resolved.
fn add_repository(build: &mut Build, resolved: &ResolvedCatalog, repository_id: &str) {
    if let Some(entry) = resolved.repositories.get(repository_id) {
        build.repositories_mut().add(
            repository_id,
            Repository::new(entry.name.as_str(), entry.url.as_str())
                .snapshots(entry.snapshots_enabled),
        );
    }
}

/// Records the JVM release the build targets.
pub struct JvmVersionCustomizer;

impl BuildCustomizer for JvmVersionCustomizer {
    fn customize(
        &self,
        context: &mut GenerationContext,
        descriptor: &mut BuildDescriptor,
    ) -> Result<()> {
        let jvm_version = context.request().jvm_version.clone();
        descriptor.build_mut().set_property("java.version", jvm_version);
        Ok(())
    }
}

/// The platform's Maven build plugin.
pub struct MavenPlatformPluginCustomizer;

impl BuildCustomizer for MavenPlatformPluginCustomizer {
    fn customize(
        &self,
        _context: &mut GenerationContext,
        descriptor: &mut BuildDescriptor,
    ) -> Result<()> {
        descriptor.build_mut().plugins_mut().add(
            "org.example:platform-maven-plugin",
            Plugin::new("org.example:platform-maven-plugin"),
        );
        Ok(())
    }
}

/// The `java` plugin and the platform's Gradle plugin, versioned to the
/// resolved platform version.
pub struct GradlePlatformPluginsCustomizer;

impl BuildCustomizer for GradlePlatformPluginsCustomizer {
    fn customize(
        &self,
        context: &mut GenerationContext,
        descriptor: &mut BuildDescriptor,
    ) -> Result<()> {
        let platform_version = context.platform_version().to_string();
        let plugins = descriptor.build_mut().plugins_mut();
        plugins.add("java", Plugin::new("java"));
        plugins.add(
            "org.example.platform",
            Plugin::new("org.example.platform").version(platform_version),
        );
        Ok(())
    }
}

/// Switches the descriptor to war packaging.
pub struct WarPackagingCustomizer;

impl BuildCustomizer for WarPackagingCustomizer {
    fn customize(
        &self,
        _context: &mut GenerationContext,
        descriptor: &mut BuildDescriptor,
    ) -> Result<()> {
        match descriptor {
            BuildDescriptor::Maven(maven) => maven.set_packaging("war"),
            BuildDescriptor::Gradle(gradle) => {
                gradle.build_mut().plugins_mut().add("war", Plugin::new("war"));
            }
        }
        Ok(())
    }
}

/// Kotlin compiler wiring for Maven builds.
pub struct KotlinMavenCustomizer {
    kotlin_version: String,
}

impl Default for KotlinMavenCustomizer {
    fn default() -> Self {
        Self {
            kotlin_version: DEFAULT_KOTLIN_VERSION.to_string(),
        }
    }
}

impl BuildCustomizer for KotlinMavenCustomizer {
    fn customize(
        &self,
        _context: &mut GenerationContext,
        descriptor: &mut BuildDescriptor,
    ) -> Result<()> {
        let build = descriptor.build_mut();
        build.set_property("kotlin.version", self.kotlin_version.as_str());
        build.plugins_mut().add(
            "org.jetbrains.kotlin:kotlin-maven-plugin",
            Plugin::new("org.jetbrains.kotlin:kotlin-maven-plugin")
                .version("${kotlin.version}"),
        );
        Ok(())
    }
}

/// Kotlin compiler wiring for Gradle builds.
pub struct KotlinGradleCustomizer {
    kotlin_version: String,
}

impl Default for KotlinGradleCustomizer {
    fn default() -> Self {
        Self {
            kotlin_version: DEFAULT_KOTLIN_VERSION.to_string(),
        }
    }
}

impl BuildCustomizer for KotlinGradleCustomizer {
    fn customize(
        &self,
        _context: &mut GenerationContext,
        descriptor: &mut BuildDescriptor,
    ) -> Result<()> {
        descriptor.build_mut().plugins_mut().add(
            "org.jetbrains.kotlin.jvm",
            Plugin::new("org.jetbrains.kotlin.jvm").version(self.kotlin_version.as_str()),
        );
        Ok(())
    }
}

/// The Kotlin JPA compiler plugin, wanted only when a selected dependency
/// carries the `jpa` facet.
pub struct KotlinJpaPluginCustomizer {
    kotlin_version: String,
}

impl Default for KotlinJpaPluginCustomizer {
    fn default() -> Self {
        Self {
            kotlin_version: DEFAULT_KOTLIN_VERSION.to_string(),
        }
    }
}

impl BuildCustomizer for KotlinJpaPluginCustomizer {
    fn customize(
        &self,
        _context: &mut GenerationContext,
        descriptor: &mut BuildDescriptor,
    ) -> Result<()> {
        descriptor.build_mut().plugins_mut().add(
            "org.jetbrains.kotlin.plugin.jpa",
            Plugin::new("org.jetbrains.kotlin.plugin.jpa").version(self.kotlin_version.as_str()),
        );
        Ok(())
    }
}

/// Milestone and snapshot repositories for pre-release platform versions.
pub struct PrereleaseRepositoriesCustomizer;

impl BuildCustomizer for PrereleaseRepositoriesCustomizer {
    fn customize(
        &self,
        context: &mut GenerationContext,
        descriptor: &mut BuildDescriptor,
    ) -> Result<()> {
        let version = context.platform_version();
        if version.is_release() {
            return Ok(());
        }
        let snapshot = version
            .qualifier()
            .is_some_and(|qualifier| qualifier.id() == "BUILD-SNAPSHOT");
        let build = descriptor.build_mut();
        build.repositories_mut().add(
            "platform-milestones",
            Repository::new("Platform Milestones", "https://repo.example.com/milestone"),
        );
        if snapshot {
            build.repositories_mut().add(
                "platform-snapshots",
                Repository::new("Platform Snapshots", "https://repo.example.com/snapshot")
                    .snapshots(true),
            );
        }
        Ok(())
    }
}
