use clap::{Parser, Subcommand, ValueEnum};
use medtree::catalog::ActionSet;
use medtree::document::{self, export_file_name};
use medtree::prelude::*;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Inspect, validate and normalize medical decision-tree algorithm documents
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print an algorithm document as an indented outline
    Inspect {
        /// Path to the algorithm JSON document
        path: PathBuf,
    },
    /// Check an algorithm document against the tree rules
    Validate {
        /// Path to the algorithm JSON document
        path: PathBuf,

        /// Operator profile to check against
        #[arg(short, long, value_enum)]
        profile: Option<ProfileCli>,

        /// Engine config JSON supplying the profile when --profile is not given
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Rewrite a (possibly legacy) document in the canonical export format
    Normalize {
        /// Path to the algorithm JSON document
        path: PathBuf,

        /// Output path; defaults to the file name derived from the algorithm name
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the parameters and actions a template makes available
    Catalog {
        /// JSON array of templates
        #[arg(long)]
        templates: PathBuf,

        /// JSON array of global parameters
        #[arg(long)]
        globals: PathBuf,

        /// Template code to resolve against
        #[arg(long)]
        template: Option<String>,
    },
}

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ProfileCli {
    Full,
    Persisted,
}

impl From<ProfileCli> for OperatorProfile {
    fn from(profile: ProfileCli) -> Self {
        match profile {
            ProfileCli::Full => OperatorProfile::Full,
            ProfileCli::Persisted => OperatorProfile::Persisted,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Inspect { path } => run_inspect(path),
        Command::Validate {
            path,
            profile,
            config,
        } => run_validate(path, profile, config),
        Command::Normalize { path, output } => run_normalize(path, output),
        Command::Catalog {
            templates,
            globals,
            template,
        } => run_catalog(templates, globals, template),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_algorithm(path: &PathBuf) -> Algorithm {
    document::from_file(path).unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

fn run_inspect(path: PathBuf) {
    let algorithm = load_algorithm(&path);

    println!("Algorithm: {}", algorithm.name);
    println!("Template:  {}", algorithm.template);
    println!("Version:   {}", algorithm.version);
    if !algorithm.description.is_empty() {
        println!("About:     {}", algorithm.description);
    }
    println!(
        "Nodes:     {} in {} root(s), depth {}",
        algorithm.tree.node_count(),
        algorithm.tree.roots().len(),
        algorithm.tree.depth()
    );
    println!();
    println!("{}", OutlineFormatter::format_forest(&algorithm.tree));
}

fn run_validate(path: PathBuf, profile: Option<ProfileCli>, config: Option<PathBuf>) {
    let profile = match (profile, config) {
        (Some(profile), _) => OperatorProfile::from(profile),
        (None, Some(config_path)) => {
            EngineConfig::from_file(&config_path)
                .unwrap_or_else(|e| exit_with_error(&e.to_string()))
                .operator_profile
        }
        (None, None) => OperatorProfile::default(),
    };

    // Import already rejects structural violations; the profile check comes on top.
    let algorithm = load_algorithm(&path);
    let violations = validate_forest(&algorithm.tree, profile);

    if violations.is_empty() {
        println!(
            "'{}' is valid under the '{}' profile ({} nodes).",
            algorithm.name,
            profile,
            algorithm.tree.node_count()
        );
        return;
    }

    for violation in &violations {
        println!("  - {}", violation);
    }
    exit_with_error(&format!(
        "{} violation(s) found under the '{}' profile",
        violations.len(),
        profile
    ));
}

fn run_normalize(path: PathBuf, output: Option<PathBuf>) {
    let algorithm = load_algorithm(&path);
    let output = output.unwrap_or_else(|| PathBuf::from(export_file_name(&algorithm.name)));

    document::save_to_file(&algorithm, &output)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    println!("Wrote {}", output.display());
}

fn run_catalog(templates_path: PathBuf, globals_path: PathBuf, template: Option<String>) {
    let templates: Vec<Template> = read_json_array(&templates_path);
    let globals: Vec<GlobalParameter> = read_json_array(&globals_path);
    let catalog = Catalog::new(templates, globals);

    if let Some(code) = template.as_deref() {
        match catalog.find_template(code) {
            Some(found) => println!("Template: {} ({})", found.name, found.code),
            None => println!("Template '{}' not found; showing global parameters only.", code),
        }
    }

    println!("\nParameters:");
    for option in catalog.parameters(template.as_deref()) {
        println!("  {:<24} {}", option.value, option.label);
    }

    let actions = catalog.actions(template.as_deref());
    print_actions("Process actions", &actions.process);
    print_actions("Result actions", &actions.result);
}

fn print_actions(title: &str, actions: &ActionSet) {
    let marker = if actions.is_placeholder {
        " (placeholder)"
    } else {
        ""
    };
    println!("\n{}{}:", title, marker);
    for name in &actions.names {
        println!("  {}", name);
    }
}

fn read_json_array<T: DeserializeOwned>(path: &PathBuf) -> Vec<T> {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read '{}': {}", path.display(), e))
    });
    serde_json::from_str(&content).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to parse '{}': {}", path.display(), e))
    })
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
