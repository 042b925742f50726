//! Declarative provider stacks loaded from YAML or JSON.
//!
//! # Manifest Format
//!
//! ```yaml
//! name: app
//! description: Providers shared by every page
//! providers:
//!   - [Theme, { mode: dark }]     # wrapping, with props
//!   - Counter                     # wrapping, bare name
//!   - [Session]                   # wrapping, single-element list
//!   - component: Router           # wrapping, object form
//!     props: { base: "/" }
//!   - standalone: Banner          # standalone sibling
//!     props: { label: n }
//!     key: banner
//! ```
//!
//! Entries mirror the typed surface forms of [`Provider`]. The standalone
//! kind is only ever chosen by the explicit `standalone:` field. Entries that
//! match none of the shapes are rejected with their index instead of being
//! skipped.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`StackManifest`] | Parsed manifest with raw entries |
//! | [`ComponentRegistry`] | Name to component lookup for [`StackManifest::resolve`] |
//! | [`StackLoader`] | File / env-var based loader with an LRU cache |
//! | [`ManifestError`] | Load, parse and resolution failures |

mod error;
pub mod loader;
pub mod registry;

pub use error::ManifestError;
pub use loader::{StackLoader, STACK_DIR_ENV};
pub use registry::ComponentRegistry;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::descriptor::{Props, Provider};
use crate::error::{Error, ErrorContext};
use crate::stack::ProviderStack;

static COMPONENT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_.:-]*$").expect("component name pattern is valid")
});

const SHAPE_HINT: &str = "Use `Name`, `[Name]`, `[Name, {props}]`, `{component: Name, props: {..}}` or `{standalone: Name, props: {..}, key: ..}`";

/// A provider stack as written in a manifest file.
///
/// Entries are kept as raw values so that a malformed one can be reported by
/// position; [`descriptors`](StackManifest::descriptors) does the
/// normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackManifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub providers: Vec<Value>,
}

/// `providers: ~` and `"providers": null` read as an empty stack.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl StackManifest {
    pub fn from_yaml_str(content: &str) -> Result<Self, ManifestError> {
        serde_yaml::from_str(content).map_err(|e| ManifestError::YamlError(e.to_string()))
    }

    pub fn from_json_str(content: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(content).map_err(|e| ManifestError::JsonError(e.to_string()))
    }

    /// Normalize every entry into a provider keyed by component name.
    pub fn descriptors(&self) -> Result<Vec<Provider<String>>, ManifestError> {
        self.providers
            .iter()
            .enumerate()
            .map(|(index, entry)| parse_entry(index, entry))
            .collect()
    }

    /// Normalize and resolve every component name against `registry`.
    pub fn resolve<C: Clone>(&self, registry: &ComponentRegistry<C>) -> crate::Result<ProviderStack<C>> {
        let mut resolved = Vec::with_capacity(self.providers.len());
        for (index, provider) in self.descriptors()?.into_iter().enumerate() {
            let provider = provider
                .try_map_component(|name| registry.resolve(&name))
                .map_err(|e| {
                    Error::validation_with_context(
                        e.to_string(),
                        ErrorContext::new()
                            .with_field_path(format!("providers[{}]", index))
                            .with_source("component_registry"),
                    )
                })?;
            resolved.push(provider);
        }
        let stack = ProviderStack::from(resolved);
        Ok(match &self.name {
            Some(name) => stack.with_name(name.clone()),
            None => stack,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryShape {
    Bare(String),
    Single((String,)),
    Pair((String, Props)),
    Standalone(StandaloneEntry),
    Component(ComponentEntry),
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StandaloneEntry {
    standalone: String,
    #[serde(default)]
    props: Props,
    #[serde(default)]
    key: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ComponentEntry {
    component: String,
    #[serde(default)]
    props: Props,
}

fn parse_entry(index: usize, entry: &Value) -> Result<Provider<String>, ManifestError> {
    let shape = EntryShape::deserialize(entry).map_err(|_| {
        ManifestError::MalformedDescriptor {
            index,
            reason: format!("unrecognized shape ({})", describe(entry)),
            hint: None,
        }
        .with_hint(SHAPE_HINT)
    })?;

    let provider = match shape {
        EntryShape::Bare(name) | EntryShape::Single((name,)) => Provider::wrapping(name),
        EntryShape::Pair((name, props)) | EntryShape::Component(ComponentEntry { component: name, props }) => {
            Provider::wrapping_with(name, props)
        }
        EntryShape::Standalone(StandaloneEntry { standalone, props, key }) => {
            let provider = Provider::standalone_with(standalone, props);
            match key {
                Some(key) => provider.with_key(key),
                None => provider,
            }
        }
    };

    if !COMPONENT_NAME.is_match(provider.component()) {
        return Err(ManifestError::InvalidComponentName {
            name: provider.component().clone(),
            index,
        });
    }
    Ok(provider)
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "found null".to_string(),
        Value::Bool(_) => "found a boolean".to_string(),
        Value::Number(_) => "found a number".to_string(),
        Value::String(_) => "found a string".to_string(),
        Value::Array(items) => format!("found a list of {} element(s)", items.len()),
        Value::Object(map) => {
            let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
            keys.sort_unstable();
            format!("found an object with fields [{}]", keys.join(", "))
        }
    }
}
