//! An ordered collection of declared properties.

use std::fmt;
use std::rc::Rc;

use crate::case::Case;
use crate::error::TrialResult;
use crate::property::{Check, Generators, Property};

/// Properties in the order they were declared.
///
/// The caller owns the registry and hands it to
/// [`Runner::run_all`](crate::runner::Runner::run_all); starting over is a
/// matter of building a new one.
///
/// ```
/// use quickprop_core::*;
///
/// let mut registry = Registry::new();
/// registry.declare("reverse twice", (vec_of(int()),), |c, (values,)| {
///     let mut twice = values.clone();
///     twice.reverse();
///     twice.reverse();
///     c.assert(&twice == values)
/// });
/// assert_eq!(registry.names(), vec!["reverse twice"]);
/// ```
#[derive(Default)]
pub struct Registry {
    properties: Vec<Rc<dyn Check>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a property and append it to the registry. The returned handle
    /// can also be run on its own.
    pub fn declare<G, F>(
        &mut self,
        name: impl Into<String>,
        generators: G,
        body: F,
    ) -> Rc<Property<G>>
    where
        G: Generators + 'static,
        F: Fn(&mut Case, &G::Args) -> TrialResult + 'static,
    {
        let property = Rc::new(Property::new(name, generators, body));
        self.properties.push(property.clone());
        property
    }

    /// Append an already built property.
    pub fn register<G>(&mut self, property: Property<G>) -> Rc<Property<G>>
    where
        G: Generators + 'static,
    {
        let property = Rc::new(property);
        self.properties.push(property.clone());
        property
    }

    /// Forget every declared property.
    pub fn reset(&mut self) {
        self.properties.clear();
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Property names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.properties.iter().map(|property| property.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Check> {
        self.properties.iter().map(|property| property.as_ref())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("properties", &self.names())
            .finish()
    }
}
