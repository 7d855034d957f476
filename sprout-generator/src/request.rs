use sprout_build::GradleDialect;

/// The output language of the generated sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Java,
    Kotlin,
    Groovy,
}

impl Language {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kotlin",
            Self::Groovy => "groovy",
        }
    }
}

/// The build tool of the generated project, with its dialect where the tool
/// has more than one configuration language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildSystem {
    Maven,
    Gradle(GradleDialect),
}

impl BuildSystem {
    pub fn id(&self) -> BuildSystemId {
        match self {
            Self::Maven => BuildSystemId::Maven,
            Self::Gradle(_) => BuildSystemId::Gradle,
        }
    }

    pub fn dialect(&self) -> Option<GradleDialect> {
        match self {
            Self::Maven => None,
            Self::Gradle(dialect) => Some(*dialect),
        }
    }
}

/// A build tool irrespective of dialect, for activation conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildSystemId {
    Maven,
    Gradle,
}

/// How the project is packaged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Packaging {
    #[default]
    Jar,
    War,
}

impl Packaging {
    pub fn id(&self) -> &'static str {
        match self {
            Self::Jar => "jar",
            Self::War => "war",
        }
    }
}

/// A declarative request for one generated project.
///
/// Name, description, and package name fall back to values derived from the
/// coordinates when not set explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRequest {
    pub language: Language,
    pub build_system: BuildSystem,
    /// Target platform version text, resolved against the snapshot's pool.
    pub platform_version: String,
    pub group_id: String,
    pub artifact_id: String,
    pub packaging: Packaging,
    /// JVM release the build targets.
    pub jvm_version: String,
    /// Selected dependency ids, in order.
    pub dependencies: Vec<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub package_name: Option<String>,
    /// Directory all generated paths are nested under, if any.
    pub base_dir: Option<String>,
}

impl ProjectRequest {
    pub fn new(
        language: Language,
        build_system: BuildSystem,
        platform_version: impl Into<String>,
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
    ) -> Self {
        Self {
            language,
            build_system,
            platform_version: platform_version.into(),
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            packaging: Packaging::default(),
            jvm_version: "17".to_string(),
            dependencies: Vec::new(),
            name: None,
            description: None,
            package_name: None,
            base_dir: None,
        }
    }

    pub fn packaging(mut self, packaging: Packaging) -> Self {
        self.packaging = packaging;
        self
    }

    pub fn jvm_version(mut self, jvm_version: impl Into<String>) -> Self {
        self.jvm_version = jvm_version.into();
        self
    }

    pub fn dependencies(
        mut self,
        dependencies: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.dependencies
            .extend(dependencies.into_iter().map(Into::into));
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    pub fn base_dir(mut self, base_dir: impl Into<String>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// The project name: the explicit one, else the artifact id.
    pub fn resolved_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.artifact_id)
    }

    /// The root package: the explicit one, else derived from the coordinates
    /// with invalid segment characters stripped.
    pub fn resolved_package_name(&self) -> String {
        match &self.package_name {
            Some(package_name) => package_name.clone(),
            None => clean_package_name(&format!("{}.{}", self.group_id, self.artifact_id)),
        }
    }

    /// The simple name of the generated entry-point class, e.g.
    /// `DemoApplication` for artifact `demo`.
    pub fn application_class_name(&self) -> String {
        format!("{}Application", pascal_case(self.resolved_name()))
    }
}

/// Drop characters that cannot appear in a package segment and guard
/// segments that would start with a digit.
fn clean_package_name(candidate: &str) -> String {
    let segments: Vec<String> = candidate
        .split('.')
        .map(|segment| {
            let cleaned: String = segment
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
                .to_ascii_lowercase();
            match cleaned.chars().next() {
                Some(first) if first.is_ascii_digit() => format!("_{cleaned}"),
                _ => cleaned,
            }
        })
        .filter(|segment| !segment.is_empty())
        .collect();
    segments.join(".")
}

fn pascal_case(name: &str) -> String {
    name.split(['-', '_', '.', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
