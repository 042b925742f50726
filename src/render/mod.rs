//! Rendering runtime seam.
//!
//! The composer depends on exactly two primitives of the host UI runtime:
//!
//! | Primitive | Description |
//! |-----------|-------------|
//! | [`Renderer::element`] | instantiate a component with props, an optional key and an optional single child |
//! | [`Renderer::fragment`] | group nodes with no rendering footprint of its own |
//!
//! Everything else (rendering, diffing, host mutation, error boundaries) stays
//! with the runtime. [`tree`] contains an in-memory runtime that records the
//! produced structure; the CLI outline and the tests render through it.

pub mod tree;

use crate::descriptor::{ElementKey, Props};

pub use tree::{Node, TreeRenderer};

/// Node-construction primitives supplied by a rendering runtime.
///
/// `C` is the runtime's component reference; the composer never looks inside
/// it. Errors raised while a runtime builds its own nodes are the runtime's
/// concern and pass through untouched.
pub trait Renderer<C> {
    /// The runtime's element / node type.
    type Node;

    /// Instantiate `component` with `props`.
    ///
    /// `key` is identity metadata, separate from `props`;
    /// implementations must not fold it into the caller's mapping. `child` is
    /// the single content slot (`None` for standalone siblings, or when the
    /// composed content itself is absent).
    fn element(
        &self,
        component: &C,
        props: &Props,
        key: Option<&ElementKey>,
        child: Option<Self::Node>,
    ) -> Self::Node;

    /// Group `children` in order without adding a rendered node.
    fn fragment(&self, children: Vec<Self::Node>) -> Self::Node;
}
