//! Source-code model and writers for the Sprout project generator.
//!
//! The model is language-agnostic at its core ([`ClassName`], [`Annotation`],
//! [`CodeBlock`]) with one declaration family per output language. Three
//! writers render the model to Java, Kotlin, and Groovy text, each computing
//! the compilation unit's import list and applying the language's own
//! formatting rules (statement separators, modifier keywords, annotation
//! value syntax).
//!
//! # Module Organization
//!
//! - [`io`] - Indentation-aware text writer shared by all backends
//! - [`code`] - `CodeBlock` format strings with typed placeholders
//! - [`java`] / [`kotlin`] / [`groovy`] - Per-language declarations + writer

mod annotation;
mod class_name;
pub mod code;
pub mod groovy;
pub mod io;
pub mod java;
pub mod kotlin;
mod modifiers;
mod parameter;

pub use annotation::{Annotation, AnnotationAttribute, AttributeKind};
pub use class_name::{ClassName, InvalidClassNameError};
pub use code::{CodeArg, CodeBlock, CodeBlockError, FormattingOptions};
pub use modifiers::Modifiers;
pub use parameter::Parameter;

/// Renders one language's compilation units to text.
///
/// A writer never fails on a valid code model; everything fallible happens
/// earlier, when the model is assembled.
pub trait SourceWriter {
    type Unit;

    /// File extension of the rendered sources, without the dot.
    fn extension(&self) -> &'static str;

    /// Render a single compilation unit to a complete source file.
    fn render(&self, unit: &Self::Unit) -> String;
}

/// Strip the package part from a qualified name, leaving the simple name.
pub(crate) fn unqualified(name: &str) -> &str {
    match name.rfind('.') {
        Some(index) => &name[index + 1..],
        None => name,
    }
}

/// `com.example.Color.RED` renders as `Color.RED`.
pub(crate) fn format_enum_value(value: &str) -> String {
    match value.rfind('.') {
        Some(index) => format!("{}.{}", unqualified(&value[..index]), &value[index + 1..]),
        None => value.to_string(),
    }
}

/// Whether `name` must appear in the import list of a unit living in
/// `package_name`. Names without a package and names from the language's
/// implicit root namespace (`java.lang`) never need importing.
pub(crate) fn requires_import(name: &str, package_name: &str) -> bool {
    let Some(index) = name.rfind('.') else {
        return false;
    };
    let package = &name[..index];
    package != "java.lang" && package != package_name
}
