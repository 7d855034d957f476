use eyre::Result;
use indexmap::IndexMap;
use sprout_build::{BuildDescriptor, GradleDialect};
use sprout_version::VersionRange;
use tracing::debug;

use crate::{BuildSystemId, GenerationContext, Language, Packaging, ProjectSources};

/// Mutates the build descriptor of a request.
pub trait BuildCustomizer {
    fn customize(
        &self,
        context: &mut GenerationContext,
        descriptor: &mut BuildDescriptor,
    ) -> Result<()>;
}

/// Contributes compilation units to a request.
pub trait SourceCustomizer {
    fn contribute(
        &self,
        context: &mut GenerationContext,
        sources: &mut ProjectSources,
    ) -> Result<()>;
}

/// Conditions under which a registered customizer runs. Every stated
/// condition must hold; an empty activation always runs.
#[derive(Debug, Clone, Default)]
pub struct Activation {
    language: Option<Language>,
    build_system: Option<BuildSystemId>,
    dialect: Option<GradleDialect>,
    platform_range: Option<VersionRange>,
    packaging: Option<Packaging>,
    facets: Vec<String>,
}

impl Activation {
    /// An activation with no conditions.
    pub fn always() -> Self {
        Self::default()
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn build_system(mut self, build_system: BuildSystemId) -> Self {
        self.build_system = Some(build_system);
        self
    }

    pub fn dialect(mut self, dialect: GradleDialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Run only when the resolved platform version falls in `range`.
    pub fn platform_range(mut self, range: VersionRange) -> Self {
        self.platform_range = Some(range);
        self
    }

    pub fn packaging(mut self, packaging: Packaging) -> Self {
        self.packaging = Some(packaging);
        self
    }

    /// Require a dependency facet; may be stated several times.
    pub fn facet(mut self, facet: impl Into<String>) -> Self {
        self.facets.push(facet.into());
        self
    }

    pub fn activates(&self, context: &GenerationContext) -> bool {
        let request = context.request();
        if self.language.is_some_and(|language| language != request.language) {
            return false;
        }
        if self
            .build_system
            .is_some_and(|build_system| build_system != request.build_system.id())
        {
            return false;
        }
        if self
            .dialect
            .is_some_and(|dialect| request.build_system.dialect() != Some(dialect))
        {
            return false;
        }
        if self
            .platform_range
            .as_ref()
            .is_some_and(|range| !range.matches(context.platform_version()))
        {
            return false;
        }
        if self.packaging.is_some_and(|packaging| packaging != request.packaging) {
            return false;
        }
        self.facets.iter().all(|facet| context.has_facet(facet))
    }
}

/// Builds one customizer instance per request. Constructors are shared
/// across requests and threads; the instances they build are request-local.
pub enum CustomizerConstructor {
    Build(Box<dyn Fn() -> Box<dyn BuildCustomizer> + Send + Sync>),
    Source(Box<dyn Fn() -> Box<dyn SourceCustomizer> + Send + Sync>),
}

/// One entry of the registry: a named, phase-tagged contribution with its
/// activation conditions and ordering precedence.
pub struct Registration {
    name: String,
    precedence: i32,
    activation: Activation,
    constructor: CustomizerConstructor,
}

impl Registration {
    pub fn build<C, F>(
        name: impl Into<String>,
        precedence: i32,
        activation: Activation,
        constructor: F,
    ) -> Self
    where
        C: BuildCustomizer + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            precedence,
            activation,
            constructor: CustomizerConstructor::Build(Box::new(move || Box::new(constructor()))),
        }
    }

    pub fn source<C, F>(
        name: impl Into<String>,
        precedence: i32,
        activation: Activation,
        constructor: F,
    ) -> Self
    where
        C: SourceCustomizer + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            precedence,
            activation,
            constructor: CustomizerConstructor::Source(Box::new(move || Box::new(constructor()))),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The steps active for one request, in execution order: the whole build
/// phase, then the whole source phase.
pub(crate) struct ActiveSteps {
    pub build: Vec<Box<dyn BuildCustomizer>>,
    pub source: Vec<Box<dyn SourceCustomizer>>,
}

/// An explicit table of customizer registrations.
///
/// Re-registering a name replaces the entry in place, keeping its original
/// position, so the same logical contribution is never applied twice.
/// Activation predicates are evaluated once per request; the active entries
/// are stable-sorted by precedence (ties keep registration order) and their
/// constructors invoked to build the request's step instances.
#[derive(Default)]
pub struct CustomizerRegistry {
    entries: IndexMap<String, Registration>,
}

impl CustomizerRegistry {
    /// An empty registry, without the built-in steps.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, registration: Registration) {
        self.entries
            .insert(registration.name.clone(), registration);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn active_steps(&self, context: &GenerationContext) -> ActiveSteps {
        let mut active: Vec<&Registration> = self
            .entries
            .values()
            .filter(|registration| registration.activation.activates(context))
            .collect();
        // Stable by construction, so equal precedences keep registration
        // order.
        active.sort_by_key(|registration| registration.precedence);
        let mut build = Vec::new();
        let mut source = Vec::new();
        for registration in active {
            debug!(step = %registration.name, "customizer active");
            match &registration.constructor {
                CustomizerConstructor::Build(constructor) => build.push(constructor()),
                CustomizerConstructor::Source(constructor) => source.push(constructor()),
            }
        }
        ActiveSteps { build, source }
    }
}

#[cfg(test)]
mod tests {
    use sprout_metadata::MetadataSnapshot;
    use sprout_version::Version;

    use crate::{BuildSystem, ProjectRequest};

    use super::*;

    struct PropertyStep {
        key: &'static str,
        value: &'static str,
    }

    impl BuildCustomizer for PropertyStep {
        fn customize(
            &self,
            _context: &mut GenerationContext,
            descriptor: &mut BuildDescriptor,
        ) -> Result<()> {
            descriptor.build_mut().set_property(self.key, self.value);
            Ok(())
        }
    }

    fn context(dependencies: &[&str]) -> GenerationContext {
        let snapshot = MetadataSnapshot::from_toml(
            r#"
            [[dependencies]]
            id = "jpa"
            group-id = "org.example"
            artifact-id = "starter-data-jpa"
            facets = ["jpa"]
            "#,
        )
        .unwrap();
        let request = ProjectRequest::new(
            Language::Kotlin,
            BuildSystem::Gradle(GradleDialect::Kotlin),
            "3.2.0",
            "com.example",
            "demo",
        )
        .dependencies(dependencies.iter().copied());
        GenerationContext::new(request, &snapshot).unwrap()
    }

    #[test]
    fn test_activation_conditions_all_must_hold() {
        let context = context(&["jpa"]);
        assert!(Activation::always().activates(&context));
        assert!(Activation::always().language(Language::Kotlin).activates(&context));
        assert!(!Activation::always().language(Language::Java).activates(&context));
        assert!(
            Activation::always()
                .build_system(BuildSystemId::Gradle)
                .dialect(GradleDialect::Kotlin)
                .activates(&context)
        );
        assert!(
            !Activation::always()
                .build_system(BuildSystemId::Gradle)
                .dialect(GradleDialect::Groovy)
                .activates(&context)
        );
        assert!(!Activation::always().build_system(BuildSystemId::Maven).activates(&context));
        assert!(Activation::always().facet("jpa").activates(&context));
        assert!(!Activation::always().facet("json").activates(&context));
        assert!(!Activation::always().packaging(Packaging::War).activates(&context));
    }

    #[test]
    fn test_platform_range_condition() {
        let context = context(&[]);
        let above_two = VersionRange::unbounded(Version::new(2, 0, 0));
        assert!(Activation::always().platform_range(above_two).activates(&context));
        let above_four = VersionRange::unbounded(Version::new(4, 0, 0));
        assert!(!Activation::always().platform_range(above_four).activates(&context));
    }

    #[test]
    fn test_reregistering_replaces_in_place() {
        let mut registry = CustomizerRegistry::new();
        registry.register(Registration::build("props", 0, Activation::always(), || {
            PropertyStep {
                key: "alpha",
                value: "1",
            }
        }));
        registry.register(Registration::build("other", 0, Activation::always(), || {
            PropertyStep {
                key: "beta",
                value: "2",
            }
        }));
        registry.register(Registration::build("props", 0, Activation::always(), || {
            PropertyStep {
                key: "alpha",
                value: "replaced",
            }
        }));
        assert_eq!(registry.len(), 2);

        let mut context = context(&[]);
        let steps = registry.active_steps(&context);
        let mut descriptor = BuildDescriptor::Gradle(sprout_build::GradleBuild::new(
            sprout_build::Build::new("com.example", "demo"),
            GradleDialect::Kotlin,
        ));
        for step in &steps.build {
            step.customize(&mut context, &mut descriptor).unwrap();
        }
        // The replacement kept the original registration slot.
        let properties: Vec<(&str, &str)> = descriptor.build().properties().collect();
        assert_eq!(properties, [("alpha", "replaced"), ("beta", "2")]);
    }

    #[test]
    fn test_equal_precedence_keeps_registration_order() {
        let mut registry = CustomizerRegistry::new();
        registry.register(Registration::build("late", 10, Activation::always(), || {
            PropertyStep {
                key: "late",
                value: "x",
            }
        }));
        registry.register(Registration::build("first", 0, Activation::always(), || {
            PropertyStep {
                key: "first",
                value: "x",
            }
        }));
        registry.register(Registration::build("second", 0, Activation::always(), || {
            PropertyStep {
                key: "second",
                value: "x",
            }
        }));

        let mut context = context(&[]);
        let steps = registry.active_steps(&context);
        let mut descriptor = BuildDescriptor::Gradle(sprout_build::GradleBuild::new(
            sprout_build::Build::new("com.example", "demo"),
            GradleDialect::Kotlin,
        ));
        for step in &steps.build {
            step.customize(&mut context, &mut descriptor).unwrap();
        }
        // first and second share a precedence and keep their relative order;
        // late runs last despite being registered first.
        let keys: Vec<&str> = descriptor.build().properties().map(|(key, _)| key).collect();
        assert_eq!(keys, ["first", "second", "late"]);
    }
}
