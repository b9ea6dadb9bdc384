//! # Widgets
//!
//! A [`Widget`] is the attribute bag every blueprint produces: an ordered
//! mapping from attribute name to [`AttrValue`] plus two renderers.
//!
//! ## Attribute Access
//!
//! Access is total. Reading an attribute that was never set is not an error:
//! [`Widget::get`] returns `None` and [`Widget::attr`] returns
//! `&AttrValue::Nil`. Any name may be written at any time.
//!
//! Two attribute names carry meaning:
//! - `class`: the display name seeded by the factory (`Widget::User`)
//! - `template_file`: a template path; when present, [`Widget::render`]
//!   evaluates that template instead of printing the inspect string
//!
//! ## Rendering
//!
//! ```text
//! template_file set?  ──yes──▶ load <templates root>/<template_file>
//!        │                       evaluate with every attribute in scope
//!        no
//!        ▼
//!  #<Widget class=Widget::User name=Ada>
//! ```
//!
//! [`Widget::to_wire_response`] wraps the rendered body into the
//! `(status, headers, body)` triple consumed by fake HTTP servers.

use crate::attributes::{AttrValue, Attributes};
use crate::error::{ParrotError, Result};
use crate::inflect::pluralize;
use crate::response::WireResponse;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use stencil::Stencil;

pub const CLASS_ATTR: &str = "class";
pub const TEMPLATE_FILE_ATTR: &str = "template_file";

/// Templates bundled with the crate, used by [`Widget::render`].
pub static TEMPLATES_ROOT: Lazy<PathBuf> =
    Lazy::new(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("templates"));

static NIL: AttrValue = AttrValue::Nil;

/// Opens a template environment rooted at `root`.
pub fn load_templates(root: &Path) -> Result<Stencil> {
    Stencil::new(root)
        .map_err(|e| ParrotError::from_template(e, &root.display().to_string(), Some(root)))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Widget {
    attributes: Attributes,
}

impl Widget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a widget whose only attribute is `class`.
    pub fn with_class(class: impl Into<String>) -> Self {
        let mut widget = Self::new();
        widget.set(CLASS_ATTR, AttrValue::Str(class.into()));
        widget
    }

    pub fn from_attributes(attributes: Attributes) -> Self {
        Self { attributes }
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Like [`Widget::get`], but unset attributes read as `Nil`.
    pub fn attr(&self, name: &str) -> &AttrValue {
        self.attributes.get(name).unwrap_or(&NIL)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut AttrValue> {
        self.attributes.get_mut(name)
    }

    /// Sets an attribute. Overwriting keeps the attribute's original position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        self.attributes.shift_remove(name)
    }

    pub fn class(&self) -> Option<&str> {
        self.attr(CLASS_ATTR).as_str()
    }

    /// The template path, if one is set. Non-string values are used in
    /// their printed form; `Nil` counts as unset.
    pub fn template_file(&self) -> Option<String> {
        match self.attr(TEMPLATE_FILE_ATTR) {
            AttrValue::Nil => None,
            AttrValue::Str(path) => Some(path.clone()),
            other => Some(other.to_string()),
        }
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn into_attributes(self) -> Attributes {
        self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Initializes the plural of `relation` to an empty list.
    ///
    /// `declare_collection("comment")` sets `comments = []`.
    pub fn declare_collection(&mut self, relation: &str) -> &mut Self {
        self.declare_collection_with(relation, false, &Attributes::new())
    }

    /// [`Widget::declare_collection`] with the seed and option arguments of
    /// richer relation builders.
    ///
    /// `singular_seed` and `options` are accepted but currently have no
    /// effect; only the empty collection is created.
    pub fn declare_collection_with(
        &mut self,
        relation: &str,
        singular_seed: bool,
        options: &Attributes,
    ) -> &mut Self {
        let plural = pluralize(relation);
        if singular_seed || !options.is_empty() {
            tracing::trace!(
                relation,
                singular_seed,
                options = options.len(),
                "collection seed and options are ignored"
            );
        }
        self.set(plural, AttrValue::List(Vec::new()))
    }

    /// Replaces every attribute with a copy of `parent`'s.
    ///
    /// This is whole-object inheritance: attributes set before the call are
    /// dropped, not merged.
    pub fn inherit(&mut self, parent: &Widget) {
        self.attributes = parent.attributes.clone();
    }

    /// Renders with the bundled templates root.
    pub fn render(&self) -> Result<String> {
        let Some(name) = self.template_file() else {
            return Ok(self.inspect());
        };
        let templates = load_templates(TEMPLATES_ROOT.as_path())?;
        self.render_template(&templates, &name)
    }

    /// Renders with a caller-supplied template environment.
    pub fn render_with(&self, templates: &Stencil) -> Result<String> {
        match self.template_file() {
            Some(name) => self.render_template(templates, &name),
            None => Ok(self.inspect()),
        }
    }

    fn render_template(&self, templates: &Stencil, name: &str) -> Result<String> {
        tracing::debug!(template = name, class = ?self.class(), "rendering widget template");
        templates
            .render(name, &self.attributes)
            .map_err(|e| ParrotError::from_template(e, name, templates.root()))
    }

    /// Debug form listing every attribute in insertion order.
    pub fn inspect(&self) -> String {
        self.to_string()
    }

    /// Renders the widget into a `(status, headers, body)` triple.
    pub fn to_wire_response(&self, status: u16) -> Result<WireResponse> {
        Ok(WireResponse::new(status, self.render()?))
    }

    pub fn to_wire_response_with(&self, status: u16, templates: &Stencil) -> Result<WireResponse> {
        Ok(WireResponse::new(status, self.render_with(templates)?))
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#<Widget")?;
        for (name, value) in &self.attributes {
            write!(f, " {}={}", name, value)?;
        }
        f.write_str(">")
    }
}

impl From<Widget> for AttrValue {
    fn from(widget: Widget) -> Self {
        AttrValue::Map(widget.into_attributes())
    }
}

impl From<&Widget> for AttrValue {
    fn from(widget: &Widget) -> Self {
        AttrValue::Map(widget.attributes.clone())
    }
}

impl<K: Into<String>, V: Into<AttrValue>> FromIterator<(K, V)> for Widget {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
