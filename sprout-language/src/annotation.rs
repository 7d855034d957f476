use crate::ClassName;

/// The declared kind of an annotation attribute's values, which drives the
/// per-language value syntax (quoting, `.class`/`::class` suffixes, enum
/// qualification).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// A quoted string value.
    Str,
    /// A class reference, written with the language's class-literal syntax.
    Class,
    /// An enum constant given as its fully qualified name.
    Enum,
    /// A raw value emitted as-is (numbers, booleans, expressions).
    Literal,
}

/// A single named attribute with one or more values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationAttribute {
    name: String,
    kind: AttributeKind,
    values: Vec<String>,
}

impl AnnotationAttribute {
    pub fn new(
        name: impl Into<String>,
        kind: AttributeKind,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// An annotation on a type, member, or parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    class_name: ClassName,
    attributes: Vec<AnnotationAttribute>,
}

impl Annotation {
    pub fn of(class_name: ClassName) -> Self {
        Self {
            class_name,
            attributes: Vec::new(),
        }
    }

    /// Add an attribute, consuming and returning the annotation.
    pub fn attribute(
        mut self,
        name: impl Into<String>,
        kind: AttributeKind,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.attributes.push(AnnotationAttribute::new(name, kind, values));
        self
    }

    pub fn class_name(&self) -> &ClassName {
        &self.class_name
    }

    pub fn attributes(&self) -> &[AnnotationAttribute] {
        &self.attributes
    }

    /// The qualified names this annotation pulls into the import list: its
    /// own class, every `Class`-kind value, and the declaring class of every
    /// `Enum`-kind value.
    pub fn imports(&self) -> Vec<String> {
        let mut imports = vec![self.class_name.canonical_name()];
        for attribute in &self.attributes {
            match attribute.kind {
                AttributeKind::Class => imports.extend(attribute.values.iter().cloned()),
                AttributeKind::Enum => imports.extend(
                    attribute
                        .values
                        .iter()
                        .filter_map(|value| value.rfind('.').map(|index| value[..index].to_string())),
                ),
                AttributeKind::Str | AttributeKind::Literal => {}
            }
        }
        imports
    }
}
