//! Maven descriptor and `pom.xml` writer.

use sprout_language::io::IndentingWriter;

use crate::{Build, ConfigurationValue, DependencyScope};

/// A Maven project descriptor.
#[derive(Debug, Clone)]
pub struct MavenBuild {
    build: Build,
    packaging: String,
}

impl MavenBuild {
    pub fn new(build: Build) -> Self {
        Self {
            build,
            packaging: "jar".to_string(),
        }
    }

    pub fn build(&self) -> &Build {
        &self.build
    }

    pub fn build_mut(&mut self) -> &mut Build {
        &mut self.build
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }

    pub fn set_packaging(&mut self, packaging: impl Into<String>) {
        self.packaging = packaging.into();
    }
}

/// Renders a [`MavenBuild`] as a `pom.xml` document.
#[derive(Debug, Clone, Copy, Default)]
pub struct MavenBuildWriter;

impl MavenBuildWriter {
    pub fn file_name(&self) -> &'static str {
        "pom.xml"
    }

    pub fn render(&self, maven: &MavenBuild) -> String {
        let build = maven.build();
        let mut writer = IndentingWriter::new();
        writer.println(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        writer.println(
            r#"<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 https://maven.apache.org/xsd/maven-4.0.0.xsd">"#,
        );
        writer.indented(|writer| {
            writer.println("<modelVersion>4.0.0</modelVersion>");
            writer.println(&format!("<groupId>{}</groupId>", build.group_id()));
            writer.println(&format!("<artifactId>{}</artifactId>", build.artifact_id()));
            writer.println(&format!("<version>{}</version>", build.version()));
            if maven.packaging() != "jar" {
                writer.println(&format!("<packaging>{}</packaging>", maven.packaging()));
            }
            if let Some(name) = build.name() {
                writer.println(&format!("<name>{name}</name>"));
            }
            if let Some(description) = build.description() {
                writer.println(&format!("<description>{description}</description>"));
            }
            write_properties(writer, build);
            write_dependencies(writer, build);
            write_dependency_management(writer, build);
            write_plugins(writer, build);
            write_repositories(writer, build);
        });
        writer.println("</project>");
        writer.finish()
    }
}

fn write_properties(writer: &mut IndentingWriter, build: &Build) {
    if build.properties().next().is_none() {
        return;
    }
    writer.println("<properties>");
    writer.indented(|writer| {
        for (key, value) in build.properties() {
            writer.println(&format!("<{key}>{value}</{key}>"));
        }
    });
    writer.println("</properties>");
}

fn write_dependencies(writer: &mut IndentingWriter, build: &Build) {
    if build.dependencies().is_empty() {
        return;
    }
    writer.println("<dependencies>");
    writer.indented(|writer| {
        for dependency in build.dependencies().values() {
            writer.println("<dependency>");
            writer.indented(|writer| {
                writer.println(&format!("<groupId>{}</groupId>", dependency.group_id()));
                writer.println(&format!(
                    "<artifactId>{}</artifactId>",
                    dependency.artifact_id()
                ));
                if let Some(version) = dependency.version_value() {
                    writer.println(&format!("<version>{version}</version>"));
                }
                match dependency.declared_scope() {
                    DependencyScope::Compile => {}
                    DependencyScope::Runtime => writer.println("<scope>runtime</scope>"),
                    DependencyScope::Test => writer.println("<scope>test</scope>"),
                    DependencyScope::Provided | DependencyScope::CompileOnly => {
                        writer.println("<scope>provided</scope>");
                    }
                    DependencyScope::AnnotationProcessor => {
                        writer.println("<optional>true</optional>");
                    }
                }
            });
            writer.println("</dependency>");
        }
    });
    writer.println("</dependencies>");
}

fn write_dependency_management(writer: &mut IndentingWriter, build: &Build) {
    if build.boms().is_empty() {
        return;
    }
    writer.println("<dependencyManagement>");
    writer.indented(|writer| {
        writer.println("<dependencies>");
        writer.indented(|writer| {
            for bom in build.boms().values() {
                writer.println("<dependency>");
                writer.indented(|writer| {
                    writer.println(&format!("<groupId>{}</groupId>", bom.group_id()));
                    writer.println(&format!("<artifactId>{}</artifactId>", bom.artifact_id()));
                    writer.println(&format!("<version>{}</version>", bom.version()));
                    writer.println("<type>pom</type>");
                    writer.println("<scope>import</scope>");
                });
                writer.println("</dependency>");
            }
        });
        writer.println("</dependencies>");
    });
    writer.println("</dependencyManagement>");
}

fn write_plugins(writer: &mut IndentingWriter, build: &Build) {
    if build.plugins().is_empty() {
        return;
    }
    writer.println("<build>");
    writer.indented(|writer| {
        writer.println("<plugins>");
        writer.indented(|writer| {
            for plugin in build.plugins().values() {
                writer.println("<plugin>");
                writer.indented(|writer| {
                    let (group_id, artifact_id) = split_plugin_id(plugin.id());
                    writer.println(&format!("<groupId>{group_id}</groupId>"));
                    writer.println(&format!("<artifactId>{artifact_id}</artifactId>"));
                    if let Some(version) = plugin.version_value() {
                        writer.println(&format!("<version>{version}</version>"));
                    }
                    if !plugin.configuration().is_empty() {
                        writer.println("<configuration>");
                        writer.indented(|writer| {
                            for (key, value) in plugin.configuration() {
                                write_configuration(writer, key, value);
                            }
                        });
                        writer.println("</configuration>");
                    }
                });
                writer.println("</plugin>");
            }
        });
        writer.println("</plugins>");
    });
    writer.println("</build>");
}

fn write_configuration(writer: &mut IndentingWriter, key: &str, value: &ConfigurationValue) {
    match value {
        ConfigurationValue::Value(text) => writer.println(&format!("<{key}>{text}</{key}>")),
        ConfigurationValue::Children(children) => {
            writer.println(&format!("<{key}>"));
            writer.indented(|writer| {
                for (child_key, child_value) in children {
                    write_configuration(writer, child_key, child_value);
                }
            });
            writer.println(&format!("</{key}>"));
        }
    }
}

fn write_repositories(writer: &mut IndentingWriter, build: &Build) {
    if build.repositories().is_empty() {
        return;
    }
    writer.println("<repositories>");
    writer.indented(|writer| {
        for (id, repository) in build.repositories().items() {
            writer.println("<repository>");
            writer.indented(|writer| {
                writer.println(&format!("<id>{id}</id>"));
                writer.println(&format!("<name>{}</name>", repository.name()));
                writer.println(&format!("<url>{}</url>", repository.url()));
                if !repository.snapshots_enabled() {
                    writer.println("<snapshots>");
                    writer.indented(|writer| writer.println("<enabled>false</enabled>"));
                    writer.println("</snapshots>");
                }
            });
            writer.println("</repository>");
        }
    });
    writer.println("</repositories>");
}

/// Maven plugin ids are `groupId:artifactId`; a bare id becomes the artifact.
fn split_plugin_id(id: &str) -> (&str, &str) {
    match id.split_once(':') {
        Some((group_id, artifact_id)) => (group_id, artifact_id),
        None => ("", id),
    }
}
