use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParrotError {
    #[error("Unknown factory type: {name} in known factories: [{}]", .known.join(", "))]
    UnknownFactory { name: String, known: Vec<String> },

    #[error("Cannot choose from an empty set of choices")]
    EmptyChoiceSet,

    #[error("Blueprint composes itself: {}", .chain.join(" -> "))]
    CyclicBlueprint { chain: Vec<String> },

    #[error("Template not found: {name} (templates root: {})", .root.display())]
    TemplateNotFound { name: String, root: PathBuf },

    #[error("Template syntax error in {name}: {message}")]
    TemplateSyntaxError { name: String, message: String },

    #[error("Template render error in {name}: {message}")]
    TemplateRender { name: String, message: String },

    #[error("Invalid assignment '{0}': expected KEY=VALUE")]
    InvalidAssignment(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ParrotError {
    /// Maps a template engine failure for `name` onto the render taxonomy.
    pub(crate) fn from_template(
        err: stencil::Error,
        name: &str,
        root: Option<&std::path::Path>,
    ) -> Self {
        let name = name.to_string();
        match err.kind() {
            stencil::ErrorKind::TemplateNotFound => ParrotError::TemplateNotFound {
                name,
                root: root.map(PathBuf::from).unwrap_or_default(),
            },
            stencil::ErrorKind::SyntaxError => ParrotError::TemplateSyntaxError {
                name,
                message: err.to_string(),
            },
            _ => ParrotError::TemplateRender {
                name,
                message: err.to_string(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, ParrotError>;
