//! Named presets and list concatenation over the composer.

use std::sync::Arc;

use crate::compose::compose;
use crate::descriptor::Provider;
use crate::render::Renderer;

/// A fixed, reusable provider list.
///
/// Cloning is cheap (the list is shared), and a stack is `Send + Sync`
/// whenever its component type is, so one preset can be rendered from many
/// call sites. Every [`render`](ProviderStack::render) redelegates to
/// [`compose`]; nothing is cached between renders.
#[derive(Debug)]
pub struct ProviderStack<C> {
    name: Option<String>,
    providers: Arc<[Provider<C>]>,
}

impl<C> Clone for ProviderStack<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            providers: Arc::clone(&self.providers),
        }
    }
}

impl<C> ProviderStack<C> {
    pub fn new<I, P>(providers: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Provider<C>>,
    {
        Self {
            name: None,
            providers: providers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn providers(&self) -> &[Provider<C>] {
        &self.providers
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Compose this preset around `content`.
    pub fn render<R>(&self, renderer: &R, content: Option<R::Node>) -> R::Node
    where
        R: Renderer<C>,
    {
        compose(renderer, &self.providers, content)
    }
}

impl<C: Clone> ProviderStack<C> {
    /// A new stack with `other`'s providers appended after this one's.
    pub fn then(&self, other: &ProviderStack<C>) -> ProviderStack<C> {
        ProviderStack {
            name: self.name.clone(),
            providers: merge_providers([self.providers(), other.providers()])
                .into_iter()
                .collect(),
        }
    }
}

impl<C> From<Vec<Provider<C>>> for ProviderStack<C> {
    fn from(providers: Vec<Provider<C>>) -> Self {
        Self {
            name: None,
            providers: providers.into(),
        }
    }
}

impl<C> FromIterator<Provider<C>> for ProviderStack<C> {
    fn from_iter<T: IntoIterator<Item = Provider<C>>>(iter: T) -> Self {
        Self {
            name: None,
            providers: iter.into_iter().collect(),
        }
    }
}

/// Flatten several provider lists into one, preserving order.
///
/// Composing the result is identical to composing the concatenated list
/// written out by hand. The inputs are cloned, never modified.
pub fn merge_providers<C, I, L>(lists: I) -> Vec<Provider<C>>
where
    C: Clone,
    I: IntoIterator<Item = L>,
    L: AsRef<[Provider<C>]>,
{
    let mut merged = Vec::new();
    for list in lists {
        merged.extend_from_slice(list.as_ref());
    }
    merged
}
