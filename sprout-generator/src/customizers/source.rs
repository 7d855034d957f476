//! Source-phase steps: the application entry point, its test class, and the
//! servlet initializer for war packaging.

use eyre::Result;
use sprout_language::{
    Annotation, ClassName, CodeBlock, Modifiers, Parameter,
    groovy::{GroovyCompilationUnit, GroovyMethodDeclaration, GroovyTypeDeclaration},
    java::{JavaCompilationUnit, JavaMethodDeclaration, JavaTypeDeclaration},
    kotlin::{KotlinCompilationUnit, KotlinFunctionDeclaration, KotlinTypeDeclaration},
};

use crate::{GenerationContext, ProjectSources, SourceCustomizer};

const APPLICATION_ANNOTATION: &str = "org.example.platform.PlatformApplication";
const APPLICATION_RUNNER: &str = "org.example.platform.Platform";
const KOTLIN_RUNNER: &str = "org.example.platform.runPlatform";
const TEST_ANNOTATION: &str = "org.example.platform.test.PlatformTest";
const JUNIT_TEST: &str = "org.junit.jupiter.api.Test";
const SERVLET_INITIALIZER_BASE: &str = "org.example.platform.web.PlatformServletInitializer";

/// The annotated application class with its `main` entry point.
pub struct ApplicationEntryPointCustomizer;

impl SourceCustomizer for ApplicationEntryPointCustomizer {
    fn contribute(
        &self,
        context: &mut GenerationContext,
        sources: &mut ProjectSources,
    ) -> Result<()> {
        let package_name = context.request().resolved_package_name();
        let class_name = context.request().application_class_name();
        let annotation = Annotation::of(ClassName::parse(APPLICATION_ANNOTATION)?);
        match sources {
            ProjectSources::Java { main, .. } => {
                let run = CodeBlock::of_statement(
                    "$T.run($L.class, args)",
                    &[APPLICATION_RUNNER.into(), class_name.as_str().into()],
                )?;
                main.push(
                    JavaCompilationUnit::new(package_name, class_name.as_str()).types([
                        JavaTypeDeclaration::new(class_name)
                            .modifiers(Modifiers::PUBLIC)
                            .annotate(annotation)
                            .method(
                                JavaMethodDeclaration::new("main")
                                    .modifiers(Modifiers::PUBLIC | Modifiers::STATIC)
                                    .parameter(Parameter::new("args", "String[]"))
                                    .code(run),
                            ),
                    ]),
                );
            }
            ProjectSources::Kotlin { main, .. } => {
                let run = CodeBlock::of_statement(
                    "$T<$L>(*args)",
                    &[KOTLIN_RUNNER.into(), class_name.as_str().into()],
                )?;
                main.push(
                    KotlinCompilationUnit::new(package_name, class_name.as_str())
                        .types([KotlinTypeDeclaration::new(class_name).annotate(annotation)])
                        .top_level_function(
                            KotlinFunctionDeclaration::new("main")
                                .parameter(Parameter::new("args", "Array<String>"))
                                .code(run),
                        ),
                );
            }
            ProjectSources::Groovy { main, .. } => {
                let run = CodeBlock::of_statement(
                    "$T.run($L, args)",
                    &[APPLICATION_RUNNER.into(), class_name.as_str().into()],
                )?;
                main.push(
                    GroovyCompilationUnit::new(package_name, class_name.as_str()).types([
                        GroovyTypeDeclaration::new(class_name)
                            .annotate(annotation)
                            .method(
                                GroovyMethodDeclaration::new("main")
                                    .modifiers(Modifiers::STATIC)
                                    .parameter(Parameter::new("args", "String[]"))
                                    .code(run),
                            ),
                    ]),
                );
            }
        }
        Ok(())
    }
}

/// A smoke test asserting the application context assembles.
pub struct ApplicationTestsCustomizer;

impl SourceCustomizer for ApplicationTestsCustomizer {
    fn contribute(
        &self,
        context: &mut GenerationContext,
        sources: &mut ProjectSources,
    ) -> Result<()> {
        let package_name = context.request().resolved_package_name();
        let class_name = format!("{}Tests", context.request().application_class_name());
        let test_annotation = Annotation::of(ClassName::parse(TEST_ANNOTATION)?);
        let junit = Annotation::of(ClassName::parse(JUNIT_TEST)?);
        match sources {
            ProjectSources::Java { test, .. } => {
                test.push(
                    JavaCompilationUnit::new(package_name, class_name.as_str()).types([
                        JavaTypeDeclaration::new(class_name)
                            .annotate(test_annotation)
                            .method(JavaMethodDeclaration::new("contextLoads").annotate(junit)),
                    ]),
                );
            }
            ProjectSources::Kotlin { test, .. } => {
                test.push(
                    KotlinCompilationUnit::new(package_name, class_name.as_str()).types([
                        KotlinTypeDeclaration::new(class_name)
                            .annotate(test_annotation)
                            .function(
                                KotlinFunctionDeclaration::new("contextLoads").annotate(junit),
                            ),
                    ]),
                );
            }
            ProjectSources::Groovy { test, .. } => {
                test.push(
                    GroovyCompilationUnit::new(package_name, class_name.as_str()).types([
                        GroovyTypeDeclaration::new(class_name)
                            .annotate(test_annotation)
                            .method(GroovyMethodDeclaration::new("contextLoads").annotate(junit)),
                    ]),
                );
            }
        }
        Ok(())
    }
}

/// Boots the application from a servlet container when packaged as a war.
pub struct ServletInitializerCustomizer;

impl SourceCustomizer for ServletInitializerCustomizer {
    fn contribute(
        &self,
        context: &mut GenerationContext,
        sources: &mut ProjectSources,
    ) -> Result<()> {
        let package_name = context.request().resolved_package_name();
        match sources {
            ProjectSources::Java { main, .. } => {
                main.push(
                    JavaCompilationUnit::new(package_name, "ServletInitializer").types([
                        JavaTypeDeclaration::new("ServletInitializer")
                            .modifiers(Modifiers::PUBLIC)
                            .extends(SERVLET_INITIALIZER_BASE),
                    ]),
                );
            }
            ProjectSources::Kotlin { main, .. } => {
                main.push(
                    KotlinCompilationUnit::new(package_name, "ServletInitializer").types([
                        KotlinTypeDeclaration::new("ServletInitializer")
                            .extends(SERVLET_INITIALIZER_BASE),
                    ]),
                );
            }
            ProjectSources::Groovy { main, .. } => {
                main.push(
                    GroovyCompilationUnit::new(package_name, "ServletInitializer").types([
                        GroovyTypeDeclaration::new("ServletInitializer")
                            .extends(SERVLET_INITIALIZER_BASE),
                    ]),
                );
            }
        }
        Ok(())
    }
}
