//! # Response Factory
//!
//! The factory is a registry of named **blueprints**. A blueprint is a block
//! that fills in default attributes on a freshly seeded [`Widget`]; the
//! factory runs it again for every build, so two builds never share state.
//!
//! ## Build Pipeline
//!
//! ```text
//! build("user", overrides)
//!   │  unknown name ──▶ Err(UnknownFactory)
//!   ▼
//! SEEDED             Widget { class = "Widget::User" }
//!   ▼
//! BLUEPRINT-APPLIED  block(&mut widget, &factory)
//!   │                  └─ may call factory.parent(...) any number of times
//!   ▼
//! OVERRIDES-APPLIED  widget.set(k, v) for each override, in order
//!   ▼
//! returned           caller owns the widget outright
//! ```
//!
//! ## Composition
//!
//! Inside a block, [`ResponseFactory::parent`] replaces the widget's whole
//! attribute set with a copy of another blueprint's build (or of an existing
//! widget). It is an overwrite, not a merge, and it is order sensitive:
//!
//! ```text
//! factory.define("admin", |w, f| {
//!     w.set("dropped", true);      // discarded by parent()
//!     f.parent(w, "user")?;        // w is now a copy of build("user")
//!     w.set("role", "admin");      // wins over anything from "user"
//!     Ok(())
//! });
//! ```
//!
//! A blueprint that composes itself, directly or through other blueprints,
//! fails with [`ParrotError::CyclicBlueprint`].
//!
//! ## Isolation
//!
//! The registry is an explicit value rather than process-wide state. Tests
//! that share one must call [`ResponseFactory::clear`] between runs; tests
//! that each own a factory need nothing.

use crate::attributes::{AttrValue, Attributes};
use crate::config::ParrotConfig;
use crate::error::{ParrotError, Result};
use crate::inflect::camelize;
use crate::widget::Widget;
use rand::seq::SliceRandom;
use rand::Rng;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;

/// A blueprint body: fills defaults into a freshly seeded widget.
pub type Blueprint = Box<dyn Fn(&mut Widget, &ResponseFactory) -> Result<()>>;

/// Attribute assignments applied after the blueprint, in insertion order.
///
/// Duplicate names are kept; the last assignment wins when applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pairs: Vec<(String, AttrValue)>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an assignment, returning the updated overrides for chaining.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.pairs.push((name.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Sets every assignment on `widget`. Values are cloned, so the same
    /// overrides can be applied to any number of widgets.
    pub fn apply_to(&self, widget: &mut Widget) {
        for (name, value) in &self.pairs {
            tracing::trace!(attribute = %name, "applying override");
            widget.set(name.as_str(), value.clone());
        }
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl From<Attributes> for Overrides {
    fn from(attributes: Attributes) -> Self {
        attributes.into_iter().collect()
    }
}

/// Where a widget inherits its defaults from.
#[derive(Debug, Clone, PartialEq)]
pub enum Parent {
    /// Build the named blueprint, with its own overrides.
    Blueprint { name: String, overrides: Overrides },

    /// Copy an already built widget.
    Instance(Widget),
}

impl Parent {
    pub fn blueprint(name: impl Into<String>) -> Self {
        Self::blueprint_with(name, Overrides::new())
    }

    pub fn blueprint_with(name: impl Into<String>, overrides: Overrides) -> Self {
        Parent::Blueprint {
            name: name.into(),
            overrides,
        }
    }
}

impl From<&str> for Parent {
    fn from(name: &str) -> Self {
        Parent::blueprint(name)
    }
}

impl From<String> for Parent {
    fn from(name: String) -> Self {
        Parent::blueprint(name)
    }
}

impl From<Widget> for Parent {
    fn from(widget: Widget) -> Self {
        Parent::Instance(widget)
    }
}

impl From<&Widget> for Parent {
    fn from(widget: &Widget) -> Self {
        Parent::Instance(widget.clone())
    }
}

/// Registry of named blueprints.
///
/// Not thread safe: the factory tracks in-progress builds to detect cyclic
/// composition, so it is `!Sync`. Serialize access if it must be shared.
pub struct ResponseFactory {
    namespace: String,
    blueprints: BTreeMap<String, Blueprint>,
    in_progress: RefCell<Vec<String>>,
}

impl Default for ResponseFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResponseFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseFactory")
            .field("namespace", &self.namespace)
            .field("blueprints", &self.names())
            .finish()
    }
}

impl ResponseFactory {
    /// Creates an empty factory using the default `Widget` namespace.
    pub fn new() -> Self {
        Self::with_config(&ParrotConfig::default())
    }

    pub fn with_config(config: &ParrotConfig) -> Self {
        Self::with_namespace(config.namespace.clone())
    }

    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            blueprints: BTreeMap::new(),
            in_progress: RefCell::new(Vec::new()),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The `class` seeded into widgets built from `name`.
    pub fn class_name(&self, name: &str) -> String {
        format!("{}::{}", self.namespace, camelize(name))
    }

    /// Registers a blueprint, replacing any previous one with the same name.
    ///
    /// The block runs once per build, never at definition time.
    pub fn define<F>(&mut self, name: impl Into<String>, block: F) -> &mut Self
    where
        F: Fn(&mut Widget, &ResponseFactory) -> Result<()> + 'static,
    {
        let name = name.into();
        let replaced = self.blueprints.insert(name.clone(), Box::new(block)).is_some();
        tracing::debug!(blueprint = %name, replaced, "defined blueprint");
        self
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.blueprints.contains_key(name)
    }

    /// Registered blueprint names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.blueprints.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }

    /// Forgets every blueprint. Calling it on an empty factory is a no-op.
    pub fn clear(&mut self) {
        let cleared = self.blueprints.len();
        self.blueprints.clear();
        tracing::debug!(cleared, "cleared blueprints");
    }

    pub fn build(&self, name: &str) -> Result<Widget> {
        self.build_with(name, &Overrides::new())
    }

    /// Builds a fresh widget from `name` and applies `overrides` on top.
    pub fn build_with(&self, name: &str, overrides: &Overrides) -> Result<Widget> {
        let blueprint = self
            .blueprints
            .get(name)
            .ok_or_else(|| self.unknown_factory(name))?;

        let _in_progress = self.enter(name)?;
        self.assemble(name, blueprint, overrides)
    }

    /// Builds `count` independent widgets with the same overrides.
    pub fn collection_of(
        &self,
        name: &str,
        count: usize,
        overrides: &Overrides,
    ) -> Result<Vec<Widget>> {
        (0..count).map(|_| self.build_with(name, overrides)).collect()
    }

    /// Replaces `widget`'s attributes with a copy of `parent`'s.
    ///
    /// Meant to be called from inside a blueprint block.
    pub fn parent(&self, widget: &mut Widget, parent: impl Into<Parent>) -> Result<()> {
        match parent.into() {
            Parent::Blueprint { name, overrides } => {
                *widget = self.build_with(&name, &overrides)?;
                tracing::trace!(parent = %name, stage = "parent-applied");
            }
            Parent::Instance(source) => {
                widget.inherit(&source);
                tracing::trace!(parent = ?source.class(), stage = "parent-applied");
            }
        }
        Ok(())
    }

    /// Picks a uniformly random element using the thread-local RNG.
    pub fn one_of<T>(choices: &[T]) -> Result<&T> {
        Self::one_of_with(choices, &mut rand::thread_rng())
    }

    /// Picks a uniformly random element using `rng`; pass a seeded RNG for
    /// reproducible fixtures.
    pub fn one_of_with<'a, T, R>(choices: &'a [T], rng: &mut R) -> Result<&'a T>
    where
        R: Rng + ?Sized,
    {
        choices.choose(rng).ok_or(ParrotError::EmptyChoiceSet)
    }

    fn assemble(&self, name: &str, blueprint: &Blueprint, overrides: &Overrides) -> Result<Widget> {
        let mut widget = Widget::with_class(self.class_name(name));
        tracing::trace!(blueprint = name, stage = "seeded");

        blueprint(&mut widget, self)?;
        tracing::trace!(blueprint = name, stage = "blueprint-applied");

        overrides.apply_to(&mut widget);
        tracing::trace!(blueprint = name, overrides = overrides.len(), stage = "overrides-applied");

        tracing::debug!(blueprint = name, attributes = widget.len(), "built widget");
        Ok(widget)
    }

    fn enter(&self, name: &str) -> Result<InProgress<'_>> {
        let mut stack = self.in_progress.borrow_mut();
        if let Some(start) = stack.iter().position(|n| n == name) {
            let mut chain = stack[start..].to_vec();
            chain.push(name.to_string());
            return Err(ParrotError::CyclicBlueprint { chain });
        }
        stack.push(name.to_string());
        Ok(InProgress {
            stack: &self.in_progress,
        })
    }

    fn unknown_factory(&self, name: &str) -> ParrotError {
        ParrotError::UnknownFactory {
            name: name.to_string(),
            known: self.names().into_iter().map(String::from).collect(),
        }
    }
}

/// Marks a blueprint as being built; leaving scope (even by unwinding)
/// takes it off the stack.
struct InProgress<'a> {
    stack: &'a RefCell<Vec<String>>,
}

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        self.stack.borrow_mut().pop();
    }
}
