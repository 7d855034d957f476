use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The scope a dependency is consumed in. Each build tool maps these onto
/// its own vocabulary (Maven scopes, Gradle configurations).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyScope {
    #[default]
    Compile,
    CompileOnly,
    Runtime,
    Provided,
    Test,
    AnnotationProcessor,
}

/// A dependency as it appears in a build descriptor. The version is absent
/// when an imported BOM manages it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDependency {
    group_id: String,
    artifact_id: String,
    version: Option<String>,
    scope: DependencyScope,
}

impl BuildDependency {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: None,
            scope: DependencyScope::Compile,
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn scope(mut self, scope: DependencyScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version_value(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn declared_scope(&self) -> DependencyScope {
        self.scope
    }
}

/// A bill of materials imported into the descriptor to pin transitive
/// versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillOfMaterials {
    group_id: String,
    artifact_id: String,
    version: String,
}

impl BillOfMaterials {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

/// An artifact repository beyond the default one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    name: String,
    url: String,
    snapshots_enabled: bool,
}

impl Repository {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            snapshots_enabled: false,
        }
    }

    pub fn snapshots(mut self, enabled: bool) -> Self {
        self.snapshots_enabled = enabled;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn snapshots_enabled(&self) -> bool {
        self.snapshots_enabled
    }
}

/// One value in a plugin's nested configuration tree. Pairs repeat, so the
/// children are an ordered list rather than a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationValue {
    Value(String),
    Children(Vec<(String, ConfigurationValue)>),
}

impl ConfigurationValue {
    pub fn value(text: impl Into<String>) -> Self {
        Self::Value(text.into())
    }
}

/// A build plugin with optional nested configuration. For Maven the id is
/// the `groupId:artifactId` pair; for Gradle it is the plugin id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    id: String,
    version: Option<String>,
    configuration: Vec<(String, ConfigurationValue)>,
}

impl Plugin {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: None,
            configuration: Vec::new(),
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn configure(mut self, key: impl Into<String>, value: ConfigurationValue) -> Self {
        self.configuration.push((key.into(), value));
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version_value(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn configuration(&self) -> &[(String, ConfigurationValue)] {
        &self.configuration
    }
}

/// An insertion-ordered container keyed by id. Re-adding an existing key
/// replaces the value but keeps the original position, which makes every
/// mutation idempotent and the rendered output deterministic.
#[derive(Debug, Clone)]
pub struct KeyedContainer<T> {
    items: IndexMap<String, T>,
}

impl<T> Default for KeyedContainer<T> {
    fn default() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }
}

impl<T> KeyedContainer<T> {
    pub fn add(&mut self, id: impl Into<String>, item: T) {
        self.items.insert(id.into(), item);
    }

    /// Remove an entry, keeping the order of the remaining ones.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        self.items.shift_remove(id)
    }

    pub fn has(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items.get_mut(id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.items.values()
    }

    pub fn items(&self) -> impl Iterator<Item = (&str, &T)> {
        self.items.iter().map(|(id, item)| (id.as_str(), item))
    }
}

/// The build-tool-independent part of a build descriptor.
#[derive(Debug, Clone)]
pub struct Build {
    group_id: String,
    artifact_id: String,
    version: String,
    name: Option<String>,
    description: Option<String>,
    dependencies: KeyedContainer<BuildDependency>,
    boms: KeyedContainer<BillOfMaterials>,
    repositories: KeyedContainer<Repository>,
    plugins: KeyedContainer<Plugin>,
    properties: IndexMap<String, String>,
}

impl Build {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: "0.0.1-SNAPSHOT".to_string(),
            name: None,
            description: None,
            dependencies: KeyedContainer::default(),
            boms: KeyedContainer::default(),
            repositories: KeyedContainer::default(),
            plugins: KeyedContainer::default(),
            properties: IndexMap::new(),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    pub fn dependencies(&self) -> &KeyedContainer<BuildDependency> {
        &self.dependencies
    }

    pub fn dependencies_mut(&mut self) -> &mut KeyedContainer<BuildDependency> {
        &mut self.dependencies
    }

    pub fn boms(&self) -> &KeyedContainer<BillOfMaterials> {
        &self.boms
    }

    pub fn boms_mut(&mut self) -> &mut KeyedContainer<BillOfMaterials> {
        &mut self.boms
    }

    pub fn repositories(&self) -> &KeyedContainer<Repository> {
        &self.repositories
    }

    pub fn repositories_mut(&mut self) -> &mut KeyedContainer<Repository> {
        &mut self.repositories
    }

    pub fn plugins(&self) -> &KeyedContainer<Plugin> {
        &self.plugins
    }

    pub fn plugins_mut(&mut self) -> &mut KeyedContainer<Plugin> {
        &mut self.plugins
    }

    /// Free-form build properties, insertion-ordered; setting an existing
    /// key overwrites it in place.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readding_a_key_updates_in_place() {
        let mut container = KeyedContainer::default();
        container.add("web", BuildDependency::new("org.example", "starter-web"));
        container.add("data", BuildDependency::new("org.example", "starter-data"));
        container.add(
            "web",
            BuildDependency::new("org.example", "starter-webflux"),
        );

        assert_eq!(container.len(), 2);
        let ids: Vec<&str> = container.ids().collect();
        assert_eq!(ids, ["web", "data"]);
        assert_eq!(container.get("web").unwrap().artifact_id(), "starter-webflux");
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut container = KeyedContainer::default();
        container.add("a", 1);
        container.add("b", 2);
        container.add("c", 3);
        container.remove("b");
        let ids: Vec<&str> = container.ids().collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_property_overwrite_keeps_position() {
        let mut build = Build::new("com.example", "demo");
        build.set_property("java.version", "17");
        build.set_property("kotlin.version", "2.0.0");
        build.set_property("java.version", "21");
        let properties: Vec<(&str, &str)> = build.properties().collect();
        assert_eq!(
            properties,
            [("java.version", "21"), ("kotlin.version", "2.0.0")]
        );
    }

    #[test]
    fn test_build_defaults() {
        let build = Build::new("com.example", "demo");
        assert_eq!(build.version(), "0.0.1-SNAPSHOT");
        assert!(build.dependencies().is_empty());
        assert!(build.name().is_none());
    }

}
