//! Generation orchestration for the Sprout project generator.
//!
//! A [`ProjectRequest`] describes the project to scaffold: output language,
//! build tool, platform version, coordinates, packaging, and dependency
//! selection. [`ProjectGenerator::generate`] resolves the request against a
//! catalog snapshot, runs the customizer pipeline over a fresh build
//! descriptor and code model, and renders everything into an in-memory map
//! of relative paths to file content.
//!
//! The pipeline is an explicit [`CustomizerRegistry`] of named steps, each
//! with an activation predicate and a precedence. Built-in steps cover the
//! catalog wiring, build plugins, packaging, Kotlin toolchain, pre-release
//! repositories, and the generated application, test, and servlet
//! initializer sources; callers can add steps or replace built-ins by name.
//!
//! Generation is synchronous and request-local: the only shared state is
//! the read-only snapshot, so one generator may serve concurrent requests.

mod context;
mod customizers;
mod generator;
mod registry;
mod request;
mod sources;

pub use context::{Diagnostic, GenerationContext, Severity};
pub use generator::{FileContent, ProjectContribution, ProjectGenerator};
pub use registry::{
    Activation, BuildCustomizer, CustomizerConstructor, CustomizerRegistry, Registration,
    SourceCustomizer,
};
pub use request::{BuildSystem, BuildSystemId, Language, Packaging, ProjectRequest};
pub use sources::ProjectSources;
