use crate::Annotation;

/// A method or function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    ty: String,
    annotations: Vec<Annotation>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            annotations: Vec::new(),
        }
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }
}
