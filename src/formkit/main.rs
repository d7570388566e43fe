use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use formkit::attrs::HtmlAttrs;
use formkit::config::RenderConfig;
use formkit::error::{FormError, Result};
use formkit::field::{FieldOptions, FieldRenderer, InputKind};
use formkit::form::Form;
use formkit::meta;
use formkit::model::{MetaKind, Node};
use formkit::path::normalize;
use formkit::resolve;
use formkit::rules::Rule;
use formkit::theme;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {}", "Error:".red(), e);
        std::process::exit(1);
    }
}

struct FieldArgs {
    kind: Option<InputKind>,
    form: Option<String>,
    errors: Vec<String>,
    required: bool,
    max_length: Option<usize>,
    attrs: Vec<String>,
    input_only: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Normalize { path } => handle_normalize(&path),
        Commands::Value { model, path } => handle_value(&model, &path),
        Commands::Meta { model, path, kind } => handle_meta(&model, &path, kind),
        Commands::Field {
            model,
            path,
            kind,
            form,
            errors,
            required,
            max_length,
            attrs,
            input_only,
        } => {
            let config = RenderConfig::load(config_dir(cli.config_dir)?)?;
            let args = FieldArgs {
                kind,
                form,
                errors,
                required,
                max_length,
                attrs,
                input_only,
            };
            handle_field(&config, &model, &path, args)
        }
        Commands::Config { key, value } => handle_config(config_dir(cli.config_dir)?, key, value),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("FORMKIT_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn config_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    ProjectDirs::from("com", "formkit", "formkit")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FormError::Config("Could not determine config dir".into()))
}

fn load_model(path: &Path) -> Result<Node> {
    let content = fs::read_to_string(path)?;
    let json: serde_json::Value = serde_json::from_str(&content)?;
    Node::from_json(json)
}

fn handle_normalize(raw: &str) -> Result<()> {
    for segment in normalize(raw)?.segments() {
        println!("{}", segment);
    }
    Ok(())
}

fn handle_value(model: &Path, raw: &str) -> Result<()> {
    let root = load_model(model)?;
    let node = resolve::read_str(&root, raw)?;
    println!("{}", serde_json::to_string_pretty(node)?);
    Ok(())
}

fn handle_meta(model: &Path, raw: &str, kind: MetaKind) -> Result<()> {
    let root = load_model(model)?;
    let path = normalize(raw)?;
    let text = match kind {
        MetaKind::Label => meta::label(&root, &path),
        MetaKind::Hint => meta::hint(&root, &path),
        MetaKind::Placeholder => meta::placeholder(&root, &path),
    };
    println!("{}", text);
    Ok(())
}

fn handle_field(config: &RenderConfig, model: &Path, raw: &str, args: FieldArgs) -> Result<()> {
    let root = load_model(model)?;
    let path = normalize(raw)?;
    let form_name = args.form.unwrap_or_else(|| match &root {
        Node::Record(record) => record.type_name().to_string(),
        _ => String::new(),
    });

    let mut form = Form::new(&form_name, root);
    for message in &args.errors {
        form.add_error(raw, message)?;
    }

    let mut rules = Vec::new();
    if args.required {
        rules.push(Rule::Required);
    }
    if args.max_length.is_some() {
        rules.push(Rule::Length {
            min: None,
            max: args.max_length,
        });
    }
    form.add_rules(raw, rules)?;

    let kind = args
        .kind
        .unwrap_or_else(|| InputKind::from_rules(form.rules_for(&path)));
    let mut options = FieldOptions::new(kind);
    options.attrs = HtmlAttrs::from_pairs(&args.attrs);
    options.show_hint = config.show_hints;

    let renderer = FieldRenderer::new(theme::configured(config))?;
    let html = if args.input_only {
        renderer.render_input(&form, raw, &options)?
    } else {
        renderer.render_field(&form, raw, &options)?
    };
    println!("{}", html);
    Ok(())
}

fn handle_config(dir: PathBuf, key: Option<String>, value: Option<String>) -> Result<()> {
    let mut config = RenderConfig::load(&dir)?;

    match (key, value) {
        (None, _) => println!("{}", serde_json::to_string_pretty(&config)?),
        (Some(key), None) => println!("{}", config.get(&key)?),
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save(&dir)?;
            println!("{} {} = {}", "Set".green(), key, value);
        }
    }
    Ok(())
}
