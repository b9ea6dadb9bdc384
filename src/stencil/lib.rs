//! # Stencil - ERB-Delimited Template Rendering
//!
//! A thin layer over [minijinja](https://docs.rs/minijinja) that speaks the
//! `<% %>` tag convention used by fixture templates.
//!
//! ## The Problem
//!
//! Fixture templates for fake HTTP bodies are traditionally written with
//! embedded-Ruby style tags. Jinja's `{{ }}` delimiters collide with JSON
//! bodies, which are the most common thing these templates produce:
//!
//! ```text
//! {"user": {"name": "<%= name %>"}}
//! ```
//!
//! ## The Solution
//!
//! Stencil configures a minijinja environment with:
//! - **ERB delimiters**: `<% stmt %>`, `<%= expr %>` and `<%# comment %>`
//! - **Trim mode**: a line that starts with `<%` and ends with `%>` drops its
//!   newline, whatever the tag kind. Indented tag lines are left alone.
//! - **A rooted loader**: template names resolve relative to one directory
//!
//! Expressions inside the tags are plain Jinja expressions, so filters, loops
//! and conditionals all work as documented by minijinja.
//!
//! ## Quick Example
//!
//! ```rust
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User {
//!     name: String,
//!     roles: Vec<String>,
//! }
//!
//! let template = "<%= name %>:\n<% for role in roles %>\n- <%= role %>\n<% endfor %>\n";
//! let user = User {
//!     name: "Ada".into(),
//!     roles: vec!["admin".into(), "ops".into()],
//! };
//!
//! let output = stencil::render_str(template, &user).unwrap();
//! assert_eq!(output, "Ada:\n- admin\n- ops\n");
//! ```
//!
//! ## Templates on Disk
//!
//! Use [`Stencil`] to render files below a root directory:
//!
//! ```rust,no_run
//! use stencil::Stencil;
//! # use serde::Serialize;
//! # #[derive(Serialize)]
//! # struct Data { status: String }
//!
//! let stencil = Stencil::new("templates").unwrap();
//! let body = stencil.render("users/show.json.erb", &Data { status: "ok".into() }).unwrap();
//! ```
//!
//! Missing files surface as [`ErrorKind::TemplateNotFound`], malformed tags as
//! [`ErrorKind::SyntaxError`].

use minijinja::syntax::SyntaxConfig;
use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub use minijinja::{Error, ErrorKind};

/// Opening and closing delimiters for statement tags.
pub const BLOCK_DELIMITERS: (&str, &str) = ("<%", "%>");

/// Opening and closing delimiters for expression tags.
pub const VARIABLE_DELIMITERS: (&str, &str) = ("<%=", "%>");

/// Opening and closing delimiters for comment tags.
pub const COMMENT_DELIMITERS: (&str, &str) = ("<%#", "%>");

const INLINE_TEMPLATE: &str = "_inline";

/// Builds the ERB-style syntax configuration.
pub fn erb_syntax() -> Result<SyntaxConfig, Error> {
    SyntaxConfig::builder()
        .block_delimiters(BLOCK_DELIMITERS.0, BLOCK_DELIMITERS.1)
        .variable_delimiters(VARIABLE_DELIMITERS.0, VARIABLE_DELIMITERS.1)
        .comment_delimiters(COMMENT_DELIMITERS.0, COMMENT_DELIMITERS.1)
        .build()
}

/// Renders a one-off template string.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
///
/// let mut ctx = BTreeMap::new();
/// ctx.insert("status", 404);
///
/// let output = stencil::render_str("status=<%= status %>", &ctx).unwrap();
/// assert_eq!(output, "status=404");
/// ```
pub fn render_str<T: Serialize>(source: &str, data: &T) -> Result<String, Error> {
    let mut env = environment()?;
    env.add_template_owned(INLINE_TEMPLATE.to_string(), trim_tag_lines(source))?;
    env.get_template(INLINE_TEMPLATE)?.render(data)
}

/// A template environment with an optional on-disk root.
///
/// Templates registered with [`Stencil::add_template`] take precedence over
/// files of the same name below the root.
pub struct Stencil {
    env: Environment<'static>,
    root: Option<PathBuf>,
}

impl Stencil {
    /// Creates an environment that loads templates relative to `root`.
    ///
    /// The directory is not touched until a template is requested, so a
    /// missing root only shows up as `TemplateNotFound` at render time.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self, Error> {
        let root = root.as_ref().to_path_buf();
        let mut env = environment()?;
        let load = minijinja::path_loader(root.clone());
        env.set_loader(move |name| Ok(load(name)?.map(|source| trim_tag_lines(&source))));
        Ok(Self {
            env,
            root: Some(root),
        })
    }

    /// Creates an environment with no filesystem access.
    pub fn in_memory() -> Result<Self, Error> {
        Ok(Self {
            env: environment()?,
            root: None,
        })
    }

    /// The directory templates are loaded from, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Registers a named template.
    ///
    /// The template is compiled immediately; errors are returned if syntax is invalid.
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<(), Error> {
        self.env
            .add_template_owned(name.to_string(), trim_tag_lines(source))
    }

    /// Renders a template by name with the given data.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be found, fails to parse, or
    /// fails during evaluation.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, Error> {
        let tmpl = self.env.get_template(name)?;
        tmpl.render(data)
    }
}

/// Applies ERB's `<>` trim mode to a template source.
///
/// A line that begins with `<%` and ends with `%>` loses its newline. Any other
/// line, including one whose tag is indented, is kept as written.
///
/// ```rust
/// assert_eq!(stencil::trim_tag_lines("<%= a %>\n<%= b %>\n"), "<%= a %><%= b %>");
/// assert_eq!(stencil::trim_tag_lines("  <% if t %>\nx\n"), "  <% if t %>\nx\n");
/// ```
pub fn trim_tag_lines(source: &str) -> String {
    let mut trimmed = String::with_capacity(source.len());
    for line in source.split_inclusive('\n') {
        match line.strip_suffix('\n') {
            Some(content) if is_tag_line(content) => trimmed.push_str(content),
            _ => trimmed.push_str(line),
        }
    }
    trimmed
}

fn is_tag_line(line: &str) -> bool {
    line.starts_with(BLOCK_DELIMITERS.0) && line.ends_with(BLOCK_DELIMITERS.1)
}

fn environment() -> Result<Environment<'static>, Error> {
    let mut env = Environment::new();
    env.set_syntax(erb_syntax()?);
    // trimming happens on the source, see trim_tag_lines
    env.set_keep_trailing_newline(true);
    // ERB never escapes output, whatever the file extension
    env.set_auto_escape_callback(|_| AutoEscape::None);
    Ok(env)
}
