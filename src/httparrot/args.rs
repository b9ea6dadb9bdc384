use clap::{Parser, Subcommand};
use httparrot::error::{ParrotError, Result};
use httparrot::{AttrValue, Overrides};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "parrot")]
#[command(version, about = "Preview fake HTTP responses built from fixture templates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding config.json
    #[arg(long, global = true, default_value = ".httparrot")]
    pub config_dir: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a widget and print its wire response
    #[command(alias = "r")]
    Render {
        /// Blueprint name, used for the seeded class
        #[arg(short, long, default_value = "response")]
        blueprint: String,

        /// Template path, relative to the templates directory
        #[arg(short, long)]
        template: Option<String>,

        /// Templates directory (overrides the configured one)
        #[arg(long)]
        templates_dir: Option<PathBuf>,

        /// Attribute assignment; VALUE is parsed as JSON, else taken as text
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        sets: Vec<String>,

        /// Status code (defaults to the configured one)
        #[arg(long)]
        status: Option<u16>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

/// Parses `KEY=VALUE` pairs into overrides, preserving their order.
pub fn parse_assignments<I: AsRef<str>>(inputs: &[I]) -> Result<Overrides> {
    let mut overrides = Overrides::new();
    for input in inputs {
        let (key, value) = parse_assignment(input.as_ref())?;
        overrides.push(key, value);
    }
    Ok(overrides)
}

fn parse_assignment(input: &str) -> Result<(String, AttrValue)> {
    let (key, raw) = input
        .split_once('=')
        .ok_or_else(|| ParrotError::InvalidAssignment(input.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParrotError::InvalidAssignment(input.to_string()));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| AttrValue::from(raw));
    Ok((key.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_values() {
        let (key, value) = parse_assignment("age=36").unwrap();
        assert_eq!(key, "age");
        assert_eq!(value, AttrValue::Int(36));

        let (_, value) = parse_assignment(r#"tags=["a","b"]"#).unwrap();
        assert_eq!(value, AttrValue::from(vec!["a", "b"]));
    }

    #[test]
    fn falls_back_to_text() {
        let (_, value) = parse_assignment("name=Ada Lovelace").unwrap();
        assert_eq!(value, AttrValue::from("Ada Lovelace"));
    }

    #[test]
    fn keeps_equals_in_value() {
        let (_, value) = parse_assignment("query=a=b").unwrap();
        assert_eq!(value, AttrValue::from("a=b"));
    }

    #[test]
    fn rejects_missing_key() {
        assert!(matches!(
            parse_assignment("=x"),
            Err(ParrotError::InvalidAssignment(_))
        ));
        assert!(matches!(
            parse_assignment("novalue"),
            Err(ParrotError::InvalidAssignment(_))
        ));
    }

    #[test]
    fn preserves_order() {
        let overrides = parse_assignments(&["b=1", "a=2", "b=3"]).unwrap();
        let pairs: Vec<(&str, &AttrValue)> = overrides.iter().collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[2], ("b", &AttrValue::Int(3)));
    }

    #[test]
    fn cli_parses_render() {
        let cli = Cli::parse_from([
            "parrot", "render", "-b", "user", "--set", "name=Ada", "-s", "age=3", "--status", "201",
        ]);
        match cli.command {
            Commands::Render {
                blueprint,
                sets,
                status,
                json,
                ..
            } => {
                assert_eq!(blueprint, "user");
                assert_eq!(sets, vec!["name=Ada", "age=3"]);
                assert_eq!(status, Some(201));
                assert!(!json);
            }
            other => panic!("Expected Render, got {:?}", other),
        }
    }
}
