//! Name to component lookup used when resolving manifests.

use std::collections::HashMap;

use super::ManifestError;

/// Maps the component names used in manifests to runtime components.
#[derive(Debug, Clone)]
pub struct ComponentRegistry<C> {
    components: HashMap<String, C>,
}

impl<C> ComponentRegistry<C> {
    pub fn new() -> Self {
        Self {
            components: HashMap::new(),
        }
    }

    pub fn register(mut self, name: impl Into<String>, component: C) -> Self {
        self.insert(name, component);
        self
    }

    /// Register `component` under `name`, returning the one it replaces.
    pub fn insert(&mut self, name: impl Into<String>, component: C) -> Option<C> {
        self.components.insert(name.into(), component)
    }

    pub fn get(&self, name: &str) -> Option<&C> {
        self.components.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.components.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl<C: Clone> ComponentRegistry<C> {
    /// Look up `name`, failing with the list of known names as a hint.
    pub fn resolve(&self, name: &str) -> Result<C, ManifestError> {
        self.get(name).cloned().ok_or_else(|| {
            let known = self.names();
            let err = ManifestError::UnknownComponent {
                name: name.to_string(),
                hint: None,
            };
            if known.is_empty() {
                err.with_hint("The component registry is empty")
            } else {
                err.with_hint(format!("Registered components: {}", known.join(", ")))
            }
        })
    }
}

impl<C> Default for ComponentRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, S: Into<String>> FromIterator<(S, C)> for ComponentRegistry<C> {
    fn from_iter<T: IntoIterator<Item = (S, C)>>(iter: T) -> Self {
        Self {
            components: iter.into_iter().map(|(n, c)| (n.into(), c)).collect(),
        }
    }
}
