//! Gradle descriptor and build-script writers for both DSL dialects.

use sprout_language::io::IndentingWriter;

use crate::{Build, BuildDependency, DependencyScope};

/// The Gradle configuration language of the generated scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradleDialect {
    Groovy,
    Kotlin,
}

impl GradleDialect {
    pub fn build_file_name(&self) -> &'static str {
        match self {
            Self::Groovy => "build.gradle",
            Self::Kotlin => "build.gradle.kts",
        }
    }

    pub fn settings_file_name(&self) -> &'static str {
        match self {
            Self::Groovy => "settings.gradle",
            Self::Kotlin => "settings.gradle.kts",
        }
    }
}

/// A Gradle project descriptor.
#[derive(Debug, Clone)]
pub struct GradleBuild {
    build: Build,
    dialect: GradleDialect,
}

impl GradleBuild {
    pub fn new(build: Build, dialect: GradleDialect) -> Self {
        Self { build, dialect }
    }

    pub fn build(&self) -> &Build {
        &self.build
    }

    pub fn build_mut(&mut self) -> &mut Build {
        &mut self.build
    }

    pub fn dialect(&self) -> GradleDialect {
        self.dialect
    }
}

/// Renders a [`GradleBuild`] as `build.gradle`/`build.gradle.kts` plus the
/// matching settings file.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradleBuildWriter;

impl GradleBuildWriter {
    pub fn render(&self, gradle: &GradleBuild) -> String {
        let build = gradle.build();
        let dialect = gradle.dialect();
        let mut writer = IndentingWriter::new();

        writer.println("plugins {");
        writer.indented(|writer| {
            for (id, plugin) in build.plugins().items() {
                writer.println(&plugin_line(dialect, id, plugin.version_value()));
            }
        });
        writer.println("}");
        writer.newline();

        writer.println(&format!("group = {}", quoted(dialect, build.group_id())));
        writer.println(&format!("version = {}", quoted(dialect, build.version())));
        writer.newline();

        if let Some(java_version) = build.property("java.version") {
            writer.println("java {");
            writer.indented(|writer| {
                writer.println("toolchain {");
                writer.indented(|writer| {
                    writer.println(&format!(
                        "languageVersion = JavaLanguageVersion.of({java_version})"
                    ));
                });
                writer.println("}");
            });
            writer.println("}");
            writer.newline();
        }

        let extra_properties: Vec<(&str, &str)> = build
            .properties()
            .filter(|(key, _)| *key != "java.version")
            .collect();
        if !extra_properties.is_empty() {
            match dialect {
                GradleDialect::Groovy => {
                    writer.println("ext {");
                    writer.indented(|writer| {
                        for (key, value) in &extra_properties {
                            writer.println(&format!("set('{key}', '{value}')"));
                        }
                    });
                    writer.println("}");
                }
                GradleDialect::Kotlin => {
                    for (key, value) in &extra_properties {
                        writer.println(&format!("extra[\"{key}\"] = \"{value}\""));
                    }
                }
            }
            writer.newline();
        }

        writer.println("repositories {");
        writer.indented(|writer| {
            writer.println("mavenCentral()");
            for repository in build.repositories().values() {
                match dialect {
                    GradleDialect::Groovy => {
                        writer.println(&format!("maven {{ url '{}' }}", repository.url()));
                    }
                    GradleDialect::Kotlin => {
                        writer.println(&format!("maven {{ url = uri(\"{}\") }}", repository.url()));
                    }
                }
            }
        });
        writer.println("}");
        writer.newline();

        writer.println("dependencies {");
        writer.indented(|writer| {
            for bom in build.boms().values() {
                let coordinates =
                    format!("{}:{}:{}", bom.group_id(), bom.artifact_id(), bom.version());
                match dialect {
                    GradleDialect::Groovy => {
                        writer.println(&format!("implementation platform('{coordinates}')"));
                    }
                    GradleDialect::Kotlin => {
                        writer.println(&format!("implementation(platform(\"{coordinates}\"))"));
                    }
                }
            }
            for dependency in build.dependencies().values() {
                writer.println(&dependency_line(dialect, dependency));
            }
        });
        writer.println("}");
        writer.newline();

        match dialect {
            GradleDialect::Groovy => {
                writer.println("tasks.named('test') {");
                writer.indented(|writer| writer.println("useJUnitPlatform()"));
                writer.println("}");
            }
            GradleDialect::Kotlin => {
                writer.println("tasks.withType<Test> {");
                writer.indented(|writer| writer.println("useJUnitPlatform()"));
                writer.println("}");
            }
        }
        writer.finish()
    }

    pub fn render_settings(&self, gradle: &GradleBuild) -> String {
        let name = gradle.build().artifact_id();
        match gradle.dialect() {
            GradleDialect::Groovy => format!("rootProject.name = '{name}'\n"),
            GradleDialect::Kotlin => format!("rootProject.name = \"{name}\"\n"),
        }
    }
}

fn quoted(dialect: GradleDialect, value: &str) -> String {
    match dialect {
        GradleDialect::Groovy => format!("'{value}'"),
        GradleDialect::Kotlin => format!("\"{value}\""),
    }
}

fn plugin_line(dialect: GradleDialect, id: &str, version: Option<&str>) -> String {
    match (dialect, version) {
        (GradleDialect::Groovy, Some(version)) => format!("id '{id}' version '{version}'"),
        (GradleDialect::Groovy, None) => format!("id '{id}'"),
        (GradleDialect::Kotlin, Some(version)) => format!("id(\"{id}\") version \"{version}\""),
        (GradleDialect::Kotlin, None) => format!("id(\"{id}\")"),
    }
}

fn dependency_line(dialect: GradleDialect, dependency: &BuildDependency) -> String {
    let configuration = match dependency.declared_scope() {
        DependencyScope::Compile => "implementation",
        DependencyScope::CompileOnly => "compileOnly",
        DependencyScope::Runtime => "runtimeOnly",
        DependencyScope::Provided => "providedRuntime",
        DependencyScope::Test => "testImplementation",
        DependencyScope::AnnotationProcessor => "annotationProcessor",
    };
    let mut coordinates = format!("{}:{}", dependency.group_id(), dependency.artifact_id());
    if let Some(version) = dependency.version_value() {
        coordinates.push(':');
        coordinates.push_str(version);
    }
    match dialect {
        GradleDialect::Groovy => format!("{configuration} '{coordinates}'"),
        GradleDialect::Kotlin => format!("{configuration}(\"{coordinates}\")"),
    }
}

#[cfg(test)]
mod tests {
    use crate::{BillOfMaterials, Plugin, Repository};

    use super::*;

    fn sample_build() -> Build {
        let mut build = Build::new("com.example", "demo");
        build.plugins_mut().add("java", Plugin::new("java"));
        build.plugins_mut().add(
            "org.example.platform",
            Plugin::new("org.example.platform").version("3.2.0"),
        );
        build.set_property("java.version", "17");
        build.boms_mut().add(
            "platform",
            BillOfMaterials::new("org.example", "platform-bom", "3.2.0"),
        );
        build
            .dependencies_mut()
            .add("web", BuildDependency::new("org.example", "starter-web"));
        build.dependencies_mut().add(
            "test",
            BuildDependency::new("org.example", "starter-test").scope(DependencyScope::Test),
        );
        build
    }

    #[test]
    fn test_groovy_dialect() {
        let gradle = GradleBuild::new(sample_build(), GradleDialect::Groovy);
        let rendered = GradleBuildWriter.render(&gradle);
        assert!(rendered.starts_with(
            "plugins {\n    id 'java'\n    id 'org.example.platform' version '3.2.0'\n}\n\n"
        ));
        assert!(rendered.contains("group = 'com.example'\n"));
        assert!(rendered.contains("languageVersion = JavaLanguageVersion.of(17)"));
        assert!(rendered.contains("implementation platform('org.example:platform-bom:3.2.0')\n"));
        assert!(rendered.contains("    implementation 'org.example:starter-web'\n"));
        assert!(rendered.contains("    testImplementation 'org.example:starter-test'\n"));
        assert!(rendered.ends_with("tasks.named('test') {\n    useJUnitPlatform()\n}\n"));
    }

    #[test]
    fn test_kotlin_dialect() {
        let gradle = GradleBuild::new(sample_build(), GradleDialect::Kotlin);
        let rendered = GradleBuildWriter.render(&gradle);
        assert!(rendered.contains("id(\"org.example.platform\") version \"3.2.0\"\n"));
        assert!(rendered.contains("group = \"com.example\"\n"));
        assert!(rendered.contains("implementation(platform(\"org.example:platform-bom:3.2.0\"))\n"));
        assert!(rendered.contains("testImplementation(\"org.example:starter-test\")\n"));
        assert!(rendered.ends_with("tasks.withType<Test> {\n    useJUnitPlatform()\n}\n"));
    }

    #[test]
    fn test_custom_repositories_follow_maven_central() {
        let mut build = sample_build();
        build.repositories_mut().add(
            "platform-milestones",
            Repository::new("Platform Milestones", "https://repo.example.com/milestone"),
        );
        let gradle = GradleBuild::new(build, GradleDialect::Groovy);
        let rendered = GradleBuildWriter.render(&gradle);
        let central = rendered.find("mavenCentral()").unwrap();
        let custom = rendered
            .find("maven { url 'https://repo.example.com/milestone' }")
            .unwrap();
        assert!(central < custom);
    }

    #[test]
    fn test_extra_properties() {
        let mut build = sample_build();
        build.set_property("platform.version", "3.2.0");
        let groovy = GradleBuildWriter.render(&GradleBuild::new(build.clone(), GradleDialect::Groovy));
        assert!(groovy.contains("ext {\n    set('platform.version', '3.2.0')\n}\n"));
        let kotlin = GradleBuildWriter.render(&GradleBuild::new(build, GradleDialect::Kotlin));
        assert!(kotlin.contains("extra[\"platform.version\"] = \"3.2.0\"\n"));
    }

    #[test]
    fn test_settings_file() {
        let gradle = GradleBuild::new(sample_build(), GradleDialect::Groovy);
        assert_eq!(
            GradleBuildWriter.render_settings(&gradle),
            "rootProject.name = 'demo'\n"
        );
        let gradle = GradleBuild::new(sample_build(), GradleDialect::Kotlin);
        assert_eq!(
            GradleBuildWriter.render_settings(&gradle),
            "rootProject.name = \"demo\"\n"
        );
    }
}
