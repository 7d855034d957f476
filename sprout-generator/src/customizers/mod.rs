//! Built-in customizer steps, registered through the same public registry
//! user steps go through.

mod build;
mod source;

pub use build::{
    GradlePlatformPluginsCustomizer, JvmVersionCustomizer, KotlinGradleCustomizer,
    KotlinJpaPluginCustomizer, KotlinMavenCustomizer, MavenPlatformPluginCustomizer,
    PlatformCatalogCustomizer, PrereleaseRepositoriesCustomizer, WarPackagingCustomizer,
};
pub use source::{
    ApplicationEntryPointCustomizer, ApplicationTestsCustomizer, ServletInitializerCustomizer,
};

use crate::{Activation, BuildSystemId, CustomizerRegistry, Language, Packaging, Registration};

/// Register every built-in step. Build phase first by convention; ordering
/// within a phase is the precedence given here.
pub(crate) fn register_defaults(registry: &mut CustomizerRegistry) {
    registry.register(Registration::build(
        "platform-catalog",
        0,
        Activation::always(),
        || PlatformCatalogCustomizer,
    ));
    registry.register(Registration::build(
        "jvm-version",
        5,
        Activation::always(),
        || JvmVersionCustomizer,
    ));
    registry.register(Registration::build(
        "maven-platform-plugin",
        10,
        Activation::always().build_system(BuildSystemId::Maven),
        || MavenPlatformPluginCustomizer,
    ));
    registry.register(Registration::build(
        "gradle-platform-plugins",
        10,
        Activation::always().build_system(BuildSystemId::Gradle),
        || GradlePlatformPluginsCustomizer,
    ));
    registry.register(Registration::build(
        "war-packaging",
        20,
        Activation::always().packaging(Packaging::War),
        || WarPackagingCustomizer,
    ));
    registry.register(Registration::build(
        "kotlin-maven",
        30,
        Activation::always()
            .language(Language::Kotlin)
            .build_system(BuildSystemId::Maven),
        KotlinMavenCustomizer::default,
    ));
    registry.register(Registration::build(
        "kotlin-gradle",
        30,
        Activation::always()
            .language(Language::Kotlin)
            .build_system(BuildSystemId::Gradle),
        KotlinGradleCustomizer::default,
    ));
    registry.register(Registration::build(
        "kotlin-jpa-plugin",
        35,
        Activation::always()
            .language(Language::Kotlin)
            .build_system(BuildSystemId::Gradle)
            .facet("jpa"),
        KotlinJpaPluginCustomizer::default,
    ));
    registry.register(Registration::build(
        "prerelease-repositories",
        40,
        Activation::always(),
        || PrereleaseRepositoriesCustomizer,
    ));

    registry.register(Registration::source(
        "application-entry-point",
        0,
        Activation::always(),
        || ApplicationEntryPointCustomizer,
    ));
    registry.register(Registration::source(
        "application-tests",
        10,
        Activation::always(),
        || ApplicationTestsCustomizer,
    ));
    registry.register(Registration::source(
        "servlet-initializer",
        20,
        Activation::always().packaging(Packaging::War),
        || ServletInitializerCustomizer,
    ));
}
