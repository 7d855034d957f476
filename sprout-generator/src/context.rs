use std::fmt;

use indexmap::IndexSet;
use sprout_metadata::{MetadataSnapshot, ResolvedCatalog, ResolvedDependency, resolve};
use sprout_version::{InvalidVersionError, Version};
use tracing::debug;

use crate::ProjectRequest;

/// Severity of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A non-fatal issue reported alongside the generated result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// The phase that produced this diagnostic.
    pub phase: String,
    pub message: String,
}

impl Diagnostic {
    pub fn error(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            phase: phase.into(),
            message: message.into(),
        }
    }

    pub fn warning(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            phase: phase.into(),
            message: message.into(),
        }
    }

    pub fn info(phase: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            phase: phase.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.severity, self.message, self.phase)
    }
}

/// Request-local state threaded through every customizer step.
///
/// Built once per request from the normalized [`ProjectRequest`] and the
/// shared catalog snapshot: the platform version is resolved against the
/// snapshot's pool, the requested dependency ids are matched against the
/// resolved catalog (unknown ids are dropped with a warning), and the facet
/// set is the union of the selected dependencies' facets. Steps must not
/// retain the context beyond their own invocation.
#[derive(Debug)]
pub struct GenerationContext {
    request: ProjectRequest,
    platform_version: Version,
    resolved: ResolvedCatalog,
    selected: Vec<String>,
    facets: IndexSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl GenerationContext {
    pub fn new(
        request: ProjectRequest,
        snapshot: &MetadataSnapshot,
    ) -> Result<Self, InvalidVersionError> {
        let platform_version = snapshot.parser().parse(&request.platform_version)?;
        let resolved = resolve(snapshot, &platform_version)?;
        let mut diagnostics: Vec<Diagnostic> = resolved
            .missing_references
            .iter()
            .map(|reference| Diagnostic::warning("resolve", reference.to_string()))
            .collect();

        let mut selected = Vec::new();
        let mut facets = IndexSet::new();
        for id in &request.dependencies {
            if selected.contains(id) {
                continue;
            }
            match resolved.dependency(id) {
                Some(dependency) => {
                    facets.extend(dependency.facets.iter().cloned());
                    selected.push(id.clone());
                }
                None => diagnostics.push(Diagnostic::warning(
                    "resolve",
                    format!("unknown dependency '{id}' dropped from the request"),
                )),
            }
        }
        debug!(
            platform = %platform_version,
            selected = selected.len(),
            facets = facets.len(),
            "generation context ready"
        );
        Ok(Self {
            request,
            platform_version,
            resolved,
            selected,
            facets,
            diagnostics,
        })
    }

    pub fn request(&self) -> &ProjectRequest {
        &self.request
    }

    pub fn platform_version(&self) -> &Version {
        &self.platform_version
    }

    pub fn resolved(&self) -> &ResolvedCatalog {
        &self.resolved
    }

    /// The requested dependencies that exist in the catalog, request order.
    pub fn selected_dependencies(&self) -> impl Iterator<Item = &ResolvedDependency> {
        self.selected.iter().filter_map(|id| self.resolved.dependency(id))
    }

    pub fn has_facet(&self, facet: &str) -> bool {
        self.facets.contains(facet)
    }

    pub fn facets(&self) -> impl Iterator<Item = &str> {
        self.facets.iter().map(String::as_str)
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
