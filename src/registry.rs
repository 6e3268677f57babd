// src/registry.rs
//! Ordered selector to collector table, built once at startup.

use std::io::Write;

use crate::error::DiagError;

/// A unit of work that renders one diagnostic domain.
///
/// Implementations write their block to `out` and finish it with a divider
/// rule. They fail only when their underlying source cannot be queried.
pub trait Collector {
    fn collect(&self, out: &mut dyn Write) -> Result<(), DiagError>;
}

/// Read-only association of selectors to collectors, iterated in insertion order.
#[derive(Default)]
pub struct Registry {
    entries: Vec<(String, Box<dyn Collector>)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a collector under `selector`. Registering a selector twice is a
    /// configuration error and must abort startup.
    pub fn register(
        &mut self,
        selector: impl Into<String>,
        collector: impl Collector + 'static,
    ) -> Result<(), DiagError> {
        let selector = selector.into();
        if self.lookup(&selector).is_some() {
            return Err(DiagError::DuplicateSelector(selector));
        }
        self.entries.push((selector, Box::new(collector)));
        Ok(())
    }

    /// Builder-style variant of [`Registry::register`].
    pub fn with(
        mut self,
        selector: impl Into<String>,
        collector: impl Collector + 'static,
    ) -> Result<Self, DiagError> {
        self.register(selector, collector)?;
        Ok(self)
    }

    pub fn lookup(&self, selector: &str) -> Option<&dyn Collector> {
        self.entries
            .iter()
            .find(|(name, _)| name == selector)
            .map(|(_, collector)| collector.as_ref())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &dyn Collector)> {
        self.entries
            .iter()
            .map(|(name, collector)| (name.as_str(), collector.as_ref()))
    }

    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
