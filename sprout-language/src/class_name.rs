use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Raised when a qualified class name does not follow identifier rules.
#[derive(Debug, Clone, Error, Diagnostic)]
#[error("invalid class name '{name}'")]
#[diagnostic(
    code(sprout::invalid_class_name),
    help("expected dot-separated identifiers, with '$' separating nested type names")
)]
pub struct InvalidClassNameError {
    pub name: String,
}

/// Reference to a class that is not on any classpath, decomposed into
/// package, simple name, and optional enclosing type.
///
/// Nested types are written with a `$` separator on input
/// (`com.example.Outer$Inner`) and render with a dot in the canonical form
/// (`com.example.Outer.Inner`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassName {
    package_name: String,
    simple_name: String,
    enclosing_type: Option<Box<ClassName>>,
}

impl ClassName {
    /// Parse a fully qualified name, with nested types separated by `$`.
    pub fn parse(fq_name: &str) -> Result<Self, InvalidClassNameError> {
        if !is_valid_class_name(fq_name) {
            return Err(InvalidClassNameError {
                name: fq_name.to_string(),
            });
        }
        let mut elements = fq_name.split('$');
        let mut class_name = Self::top_level(elements.next().unwrap_or_default());
        for element in elements {
            class_name = Self {
                package_name: class_name.package_name.clone(),
                simple_name: element.to_string(),
                enclosing_type: Some(Box::new(class_name)),
            };
        }
        Ok(class_name)
    }

    fn top_level(name: &str) -> Self {
        match name.rfind('.') {
            Some(index) => Self {
                package_name: name[..index].to_string(),
                simple_name: name[index + 1..].to_string(),
                enclosing_type: None,
            },
            None => Self {
                package_name: String::new(),
                simple_name: name.to_string(),
                enclosing_type: None,
            },
        }
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    pub fn enclosing_type(&self) -> Option<&ClassName> {
        self.enclosing_type.as_deref()
    }

    /// The canonical dotted name, e.g. `com.example.Outer.Inner`.
    pub fn canonical_name(&self) -> String {
        let mut names = vec![self.simple_name.as_str()];
        let mut enclosing = self.enclosing_type.as_deref();
        while let Some(outer) = enclosing {
            names.push(outer.simple_name.as_str());
            enclosing = outer.enclosing_type.as_deref();
        }
        names.reverse();
        let nested = names.join(".");
        if self.package_name.is_empty() {
            nested
        } else {
            format!("{}.{nested}", self.package_name)
        }
    }

    /// The reflection-style name with `$` between nested type names.
    pub fn name(&self) -> String {
        match &self.enclosing_type {
            Some(enclosing) => format!("{}${}", enclosing.name(), self.simple_name),
            None if self.package_name.is_empty() => self.simple_name.clone(),
            None => format!("{}.{}", self.package_name, self.simple_name),
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

fn is_valid_class_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    name.split(['.', '$']).all(|segment| {
        let candidate: String = segment.chars().filter(|c| *c != '[' && *c != ']').collect();
        let mut chars = candidate.chars();
        match chars.next() {
            Some(first) if first.is_alphabetic() || first == '_' => {
                chars.all(|c| c.is_alphanumeric() || c == '_')
            }
            _ => false,
        }
    })
}
