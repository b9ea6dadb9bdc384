use clap::Parser;
use console::style;
use httparrot::config::ParrotConfig;
use httparrot::error::Result;
use httparrot::widget::{load_templates, TEMPLATE_FILE_ATTR};
use httparrot::{ResponseFactory, WireResponse};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod args;
use args::{parse_assignments, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "httparrot=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<()> {
    let config = ParrotConfig::load(&cli.config_dir)?;

    match cli.command {
        Commands::Render {
            blueprint,
            template,
            templates_dir,
            sets,
            status,
            json,
        } => handle_render(
            &config,
            RenderRequest {
                blueprint,
                template,
                templates_dir,
                sets,
                status,
                json,
            },
        ),
        Commands::Config => handle_config(&config),
    }
}

struct RenderRequest {
    blueprint: String,
    template: Option<String>,
    templates_dir: Option<PathBuf>,
    sets: Vec<String>,
    status: Option<u16>,
    json: bool,
}

fn handle_render(config: &ParrotConfig, request: RenderRequest) -> Result<()> {
    let overrides = parse_assignments(&request.sets)?;

    let mut factory = ResponseFactory::with_config(config);
    let template = request.template.clone();
    factory.define(request.blueprint.as_str(), move |w, _| {
        if let Some(path) = &template {
            w.set(TEMPLATE_FILE_ATTR, path.as_str());
        }
        Ok(())
    });
    let widget = factory.build_with(&request.blueprint, &overrides)?;

    let root = request
        .templates_dir
        .unwrap_or_else(|| config.templates_root());
    let templates = load_templates(&root)?;
    let status = request.status.unwrap_or(config.default_status);
    let response = widget.to_wire_response_with(status, &templates)?;

    if request.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&response);
    }
    Ok(())
}

fn handle_config(config: &ParrotConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn print_response(response: &WireResponse) {
    let status_line = format!("HTTP {}", response.status);
    let status_line = match response.status {
        200..=299 => style(status_line).green().bold(),
        300..=399 => style(status_line).yellow().bold(),
        _ => style(status_line).red().bold(),
    };
    println!("{}", status_line);

    for (name, value) in &response.headers {
        println!("{}: {}", style(name).cyan(), value);
    }
    println!();

    let body = response.body_text();
    if body.ends_with('\n') {
        print!("{}", body);
    } else {
        println!("{}", body);
    }
}
