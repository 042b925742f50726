//! # provider-stack
//!
//! Compose UI context providers from a flat, ordered list instead of
//! hand-written nested markup.
//!
//! ## Overview
//!
//! Given an ordered list of provider descriptors and a content node, the
//! composer produces one element tree in which
//!
//! - every **wrapping** provider wraps everything declared after it, the first
//!   one outermost and the content innermost, and
//! - every **standalone** provider is rendered as a childless sibling exactly
//!   at its declared position, in front of everything nested deeper.
//!
//! The crate never renders anything itself. A host UI runtime plugs in
//! through the [`Renderer`] trait, which exposes the only two primitives the
//! composer needs: element creation and transparent grouping.
//!
//! ## Quick Start
//!
//! ```rust
//! use provider_stack::{compose, props, providers, standalone, Node, Provider, TreeRenderer};
//!
//! let list: Vec<Provider<&str>> = providers![
//!     ("Theme", props! { "mode" => "dark" }),
//!     "Counter",
//!     standalone("Banner"),
//! ];
//!
//! let tree = compose(&TreeRenderer, &list, Some(Node::leaf("App")));
//! assert_eq!(tree.element_names(), vec!["Theme", "Counter", "Banner", "App"]);
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`descriptor`] | Provider descriptors, props and the standalone marker |
//! | [`compose`] | The right-to-left fold building the tree |
//! | [`render`] | Rendering runtime seam and the in-memory [`TreeRenderer`] |
//! | [`stack`] | Reusable presets and list concatenation |
//! | [`manifest`] | YAML / JSON stack manifests, component registry and loader |

pub mod compose;
pub mod descriptor;
pub mod manifest;
pub mod render;
pub mod stack;

pub use compose::compose;
pub use descriptor::{standalone, standalone_with, ElementKey, Props, Provider, ProviderKind};
pub use manifest::{ComponentRegistry, ManifestError, StackLoader, StackManifest};
pub use render::{Node, Renderer, TreeRenderer};
pub use stack::{merge_providers, ProviderStack};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};

#[doc(hidden)]
pub mod __private {
    pub use serde_json::json;
}
