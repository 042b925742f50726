//! Composer: folds a flat provider list into one nested element tree.
//!
//! # Fold
//!
//! The list is processed right to left with an accumulator that starts as the
//! content node:
//!
//! ```text
//! [Theme, Counter, standalone(Banner)] + App
//!
//!   i = 2  Banner (standalone)  acc = <>[Banner#2, App]
//!   i = 1  Counter (wrapping)   acc = Counter(<>[Banner#2, App])
//!   i = 0  Theme (wrapping)     acc = Theme(Counter(<>[Banner#2, App]))
//! ```
//!
//! A wrapping provider becomes the parent of the accumulator. A standalone
//! provider becomes a childless sibling placed in front of the accumulator,
//! both grouped by a fragment. The first provider therefore ends up outermost
//! and the content innermost.


use tracing::{debug, trace};

use crate::descriptor::{Provider, ProviderKind};
use crate::render::Renderer;

/// Compose `providers` around `content`.
///
/// An empty list yields `content` alone inside a fragment. `content` may be
/// absent; wrapping providers then receive no child and standalone siblings
/// are grouped on their own.
///
/// The function is total and stateless: it reads `providers` without
/// modifying them and calls only [`Renderer::element`] and
/// [`Renderer::fragment`].
pub fn compose<C, R>(renderer: &R, providers: &[Provider<C>], content: Option<R::Node>) -> R::Node
where
    R: Renderer<C>,
{
    if providers.is_empty() {
        trace!("compose: no providers, grouping content only");
        return renderer.fragment(content.into_iter().collect());
    }

    let composed = providers
        .iter()
        .enumerate()
        .rev()
        .fold(content, |acc, (index, provider)| {
            trace!(index, kind = %provider.kind(), "compose: folding provider");
            Some(fold_step(renderer, index, provider, acc))
        });

    debug!(
        providers = providers.len(),
        standalone = providers.iter().filter(|p| p.is_standalone()).count(),
        "compose: provider tree built"
    );

    // At least one fold step ran, so the accumulator is always present.
    composed.unwrap_or_else(|| renderer.fragment(Vec::new()))
}

fn fold_step<C, R>(renderer: &R, index: usize, provider: &Provider<C>, acc: Option<R::Node>) -> R::Node
where
    R: Renderer<C>,
{
    match provider.kind() {
        ProviderKind::Wrapping => renderer.element(provider.component(), provider.props(), None, acc),
        ProviderKind::Standalone => {
            let key = provider.element_key(index);
            let sibling = renderer.element(provider.component(), provider.props(), key.as_ref(), None);
            let mut children = Vec::with_capacity(2);
            children.push(sibling);
            children.extend(acc);
            renderer.fragment(children)
        }
    }
}
