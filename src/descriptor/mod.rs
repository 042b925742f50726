//! Provider descriptors: the flat, ordered input of the composer.
//!
//! # Descriptor Model
//!
//! A [`Provider`] pairs an opaque component reference `C` with a [`Props`]
//! mapping and a [`ProviderKind`] tag:
//!
//! | Kind | Behavior at its position |
//! |------|--------------------------|
//! | [`ProviderKind::Wrapping`] | wraps everything declared after it (plus the content) as its only child |
//! | [`ProviderKind::Standalone`] | renders as a childless sibling in front of everything declared after it |
//!
//! Wrapping providers accept three equivalent surface forms, all normalized
//! through `From` into the same record:
//!
//! ```rust
//! use provider_stack::{Props, Provider};
//!
//! let bare: Provider<&str> = "Theme".into();
//! let single: Provider<&str> = ("Theme",).into();
//! let pair: Provider<&str> = ("Theme", Props::new()).into();
//!
//! assert_eq!(bare, single);
//! assert_eq!(single, pair);
//! ```
//!
//! Standalone providers are never inferred from shape; they are marked
//! explicitly with [`standalone`] or [`standalone_with`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Property mapping handed unmodified to an instantiated component.
pub type Props = Map<String, Value>;

/// Discriminates how a provider participates in the composed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Wrapping,
    Standalone,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Wrapping => "wrapping",
            ProviderKind::Standalone => "standalone",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity attached to standalone siblings so a host runtime can tell them
/// apart across re-renders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementKey {
    /// Derived from the provider's position in the composed list.
    Index(usize),
    /// Supplied by the caller through [`Provider::with_key`].
    Named(String),
}

impl fmt::Display for ElementKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKey::Index(i) => write!(f, "{}", i),
            ElementKey::Named(name) => f.write_str(name),
        }
    }
}

/// One entry of a provider list.
///
/// Descriptors are immutable once built: every accessor borrows, and the
/// composer only ever reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Provider<C> {
    component: C,
    props: Props,
    kind: ProviderKind,
    key: Option<String>,
}

impl<C> Provider<C> {
    /// Wrapping provider with empty props.
    pub fn wrapping(component: C) -> Self {
        Self::wrapping_with(component, Props::new())
    }

    /// Wrapping provider with the given props.
    pub fn wrapping_with(component: C, props: Props) -> Self {
        Self {
            component,
            props,
            kind: ProviderKind::Wrapping,
            key: None,
        }
    }

    /// Standalone provider with empty props.
    pub fn standalone(component: C) -> Self {
        Self::standalone_with(component, Props::new())
    }

    /// Standalone provider with the given props.
    pub fn standalone_with(component: C, props: Props) -> Self {
        Self {
            component,
            props,
            kind: ProviderKind::Standalone,
            key: None,
        }
    }

    /// Attach a stable identity key to a standalone provider.
    ///
    /// Without one, the composer keys the sibling by its position. Wrapping
    /// providers are never keyed, so the key is ignored for them.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn component(&self) -> &C {
        &self.component
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn is_standalone(&self) -> bool {
        self.kind == ProviderKind::Standalone
    }

    /// Key the composer assigns to this provider's sibling when it sits at
    /// `index`. `None` for wrapping providers.
    pub fn element_key(&self, index: usize) -> Option<ElementKey> {
        match self.kind {
            ProviderKind::Wrapping => None,
            ProviderKind::Standalone => Some(
                self.key
                    .clone()
                    .map(ElementKey::Named)
                    .unwrap_or(ElementKey::Index(index)),
            ),
        }
    }

    /// Swap the component reference while keeping props, kind and key.
    pub fn map_component<D>(self, f: impl FnOnce(C) -> D) -> Provider<D> {
        Provider {
            component: f(self.component),
            props: self.props,
            kind: self.kind,
            key: self.key,
        }
    }

    /// Fallible [`Provider::map_component`], used when resolving component
    /// names against a registry.
    pub fn try_map_component<D, E>(
        self,
        f: impl FnOnce(C) -> Result<D, E>,
    ) -> Result<Provider<D>, E> {
        Ok(Provider {
            component: f(self.component)?,
            props: self.props,
            kind: self.kind,
            key: self.key,
        })
    }
}

impl<C> From<C> for Provider<C> {
    fn from(component: C) -> Self {
        Provider::wrapping(component)
    }
}

impl<C> From<(C,)> for Provider<C> {
    fn from((component,): (C,)) -> Self {
        Provider::wrapping(component)
    }
}

impl<C> From<(C, Props)> for Provider<C> {
    fn from((component, props): (C, Props)) -> Self {
        Provider::wrapping_with(component, props)
    }
}

/// Mark a component as a standalone provider with empty props.
pub fn standalone<C>(component: C) -> Provider<C> {
    Provider::standalone(component)
}

/// Mark a component as a standalone provider with the given props.
pub fn standalone_with<C>(component: C, props: Props) -> Provider<C> {
    Provider::standalone_with(component, props)
}

/// Build a `Vec<Provider<_>>` from mixed surface forms.
///
/// Every entry goes through `Provider::from`, so annotate the element type
/// when the entries alone do not pin it down.
///
/// ```rust
/// use provider_stack::{props, providers, standalone, Provider};
///
/// let list: Vec<Provider<&str>> = providers![
///     ("Theme", props! { "mode" => "dark" }),
///     "Counter",
///     standalone("Banner"),
/// ];
/// assert_eq!(list.len(), 3);
/// assert!(list[2].is_standalone());
/// ```
#[macro_export]
macro_rules! providers {
    () => {
        ::std::vec::Vec::<$crate::Provider<_>>::new()
    };
    ($($entry:expr),+ $(,)?) => {
        ::std::vec![$($crate::Provider::from($entry)),+]
    };
}

/// Build a [`Props`] mapping from `key => value` pairs.
///
/// Values go through `serde_json::json!`, so any serializable literal works.
#[macro_export]
macro_rules! props {
    () => {
        $crate::Props::new()
    };
    ($($key:expr => $value:tt),+ $(,)?) => {{
        let mut props = $crate::Props::new();
        $(props.insert(::std::string::String::from($key), $crate::__private::json!($value));)+
        props
    }};
}
