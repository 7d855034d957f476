use eyre::Result;
use indexmap::IndexMap;
use sprout_build::{
    Build, BuildDescriptor, GradleBuild, GradleBuildWriter, MavenBuild, MavenBuildWriter,
};
use sprout_language::{
    SourceWriter, groovy::GroovySourceCodeWriter, java::JavaSourceCodeWriter,
    kotlin::KotlinSourceCodeWriter,
};
use sprout_metadata::MetadataSnapshot;
use tracing::info;

use crate::{
    BuildSystem, CustomizerRegistry, Diagnostic, GenerationContext, ProjectRequest,
    ProjectSources, customizers,
};

/// The content of one generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Bytes(Vec<u8>),
}

impl FileContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Bytes(_) => None,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Bytes(bytes) => bytes,
        }
    }
}

/// The generated project: relative file paths mapped to their content, plus
/// the non-fatal diagnostics collected along the way. Consumed by an
/// archiver or streamed out; nothing here touches the filesystem.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectContribution {
    pub files: IndexMap<String, FileContent>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ProjectContribution {
    pub fn file(&self, path: &str) -> Option<&FileContent> {
        self.files.get(path)
    }

    pub fn text(&self, path: &str) -> Option<&str> {
        self.file(path).and_then(FileContent::as_text)
    }
}

/// Generates projects against one catalog snapshot.
///
/// The registry starts out with the built-in steps; callers may register
/// further steps (or replace built-ins by name) before generating. The
/// generator itself is read-only during generation, so one instance may
/// serve concurrent requests.
pub struct ProjectGenerator<'a> {
    snapshot: &'a MetadataSnapshot,
    registry: CustomizerRegistry,
}

impl<'a> ProjectGenerator<'a> {
    pub fn new(snapshot: &'a MetadataSnapshot) -> Self {
        let mut registry = CustomizerRegistry::new();
        customizers::register_defaults(&mut registry);
        Self { snapshot, registry }
    }

    pub fn registry_mut(&mut self) -> &mut CustomizerRegistry {
        &mut self.registry
    }

    /// Run the pipeline for one request and render the file map.
    ///
    /// Build-phase steps run first against the build descriptor, then
    /// source-phase steps against the code model; within a phase, steps run
    /// in precedence order. Identical request and registrations produce
    /// byte-identical output.
    pub fn generate(&self, request: ProjectRequest) -> Result<ProjectContribution> {
        let mut context = GenerationContext::new(request, self.snapshot)?;
        let mut descriptor = initial_descriptor(&context);
        let mut sources = ProjectSources::for_language(context.request().language);

        let steps = self.registry.active_steps(&context);
        for step in &steps.build {
            step.customize(&mut context, &mut descriptor)?;
        }
        for step in &steps.source {
            step.contribute(&mut context, &mut sources)?;
        }

        let mut files = IndexMap::new();
        render_build_files(&mut files, &descriptor, context.request());
        render_source_files(&mut files, &sources, context.request());
        info!(
            files = files.len(),
            diagnostics = context.diagnostics().len(),
            "project generated"
        );
        Ok(ProjectContribution {
            files,
            diagnostics: context.into_diagnostics(),
        })
    }
}

fn initial_descriptor(context: &GenerationContext) -> BuildDescriptor {
    let request = context.request();
    let mut build = Build::new(request.group_id.as_str(), request.artifact_id.as_str());
    build.set_name(request.resolved_name());
    if let Some(description) = &request.description {
        build.set_description(description.as_str());
    }
    match request.build_system {
        BuildSystem::Maven => BuildDescriptor::Maven(MavenBuild::new(build)),
        BuildSystem::Gradle(dialect) => BuildDescriptor::Gradle(GradleBuild::new(build, dialect)),
    }
}

fn render_build_files(
    files: &mut IndexMap<String, FileContent>,
    descriptor: &BuildDescriptor,
    request: &ProjectRequest,
) {
    match descriptor {
        BuildDescriptor::Maven(maven) => {
            let writer = MavenBuildWriter;
            add_text(files, request, writer.file_name(), writer.render(maven));
        }
        BuildDescriptor::Gradle(gradle) => {
            let writer = GradleBuildWriter;
            let dialect = gradle.dialect();
            add_text(files, request, dialect.build_file_name(), writer.render(gradle));
            add_text(
                files,
                request,
                dialect.settings_file_name(),
                writer.render_settings(gradle),
            );
        }
    }
}

fn render_source_files(
    files: &mut IndexMap<String, FileContent>,
    sources: &ProjectSources,
    request: &ProjectRequest,
) {
    match sources {
        ProjectSources::Java { main, test } => {
            render_units(files, request, &JavaSourceCodeWriter, "java", main, test);
        }
        ProjectSources::Kotlin { main, test } => {
            render_units(files, request, &KotlinSourceCodeWriter, "kotlin", main, test);
        }
        ProjectSources::Groovy { main, test } => {
            render_units(files, request, &GroovySourceCodeWriter, "groovy", main, test);
        }
    }
}

fn render_units<W, U>(
    files: &mut IndexMap<String, FileContent>,
    request: &ProjectRequest,
    writer: &W,
    language_dir: &str,
    main: &[U],
    test: &[U],
) where
    W: SourceWriter<Unit = U>,
    U: UnitPath,
{
    for (tree, units) in [("main", main), ("test", test)] {
        for unit in units {
            let path = format!(
                "src/{tree}/{language_dir}/{}/{}.{}",
                unit.package_name().replace('.', "/"),
                unit.name(),
                writer.extension()
            );
            add_text(files, request, &path, writer.render(unit));
        }
    }
}

/// Package and file name of a compilation unit, for path layout.
trait UnitPath {
    fn package_name(&self) -> &str;
    fn name(&self) -> &str;
}

macro_rules! unit_path {
    ($unit:ty) => {
        impl UnitPath for $unit {
            fn package_name(&self) -> &str {
                self.package_name()
            }

            fn name(&self) -> &str {
                self.name()
            }
        }
    };
}

unit_path!(sprout_language::java::JavaCompilationUnit);
unit_path!(sprout_language::kotlin::KotlinCompilationUnit);
unit_path!(sprout_language::groovy::GroovyCompilationUnit);

fn add_text(
    files: &mut IndexMap<String, FileContent>,
    request: &ProjectRequest,
    path: &str,
    content: String,
) {
    let path = match &request.base_dir {
        Some(base_dir) => format!("{base_dir}/{path}"),
        None => path.to_string(),
    };
    files.insert(path, FileContent::Text(content));
}
