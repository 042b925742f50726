//! provider-stack CLI: validate stack manifests and print composed outlines
//!
//! Usage:
//!   provider-stack validate [--dir <path>]       Validate every manifest in a directory
//!   provider-stack outline <manifest> [--json]   Print the composed provider tree
//!   provider-stack version                       Show version information

use std::path::{Path, PathBuf};

use provider_stack::{compose, Error, ErrorContext, Node, StackLoader, TreeRenderer};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "validate" => cmd_validate(&args[2..]),
        "outline" => cmd_outline(&args[2..]),
        "version" | "--version" | "-V" => {
            println!("provider-stack {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"provider-stack: provider stack manifest tool

USAGE:
    provider-stack <COMMAND> [OPTIONS]

COMMANDS:
    validate [--dir <path>]       Validate every .yaml/.yml/.json manifest in a directory
    outline <manifest> [--json]   Compose a manifest around <Content> and print the tree
    version                       Show version information
    help                          Show this help message

ENVIRONMENT:
    PROVIDER_STACK_DIR            Default manifest directory for `validate`
    RUST_LOG                      Log filter (default: warn)"#
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn manifest_dir(args: &[String]) -> provider_stack::Result<PathBuf> {
    if let Some(dir) = flag_value(args, "--dir") {
        return Ok(PathBuf::from(dir));
    }
    match std::env::var(provider_stack::manifest::STACK_DIR_ENV) {
        Ok(dir) if !dir.trim().is_empty() => Ok(PathBuf::from(dir.trim())),
        _ => Err(Error::configuration_with_context(
            "no manifest directory given",
            ErrorContext::new()
                .with_details("pass --dir <path> or set PROVIDER_STACK_DIR")
                .with_source("provider-stack validate"),
        )),
    }
}

fn manifest_files(dir: &Path) -> provider_stack::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| matches!(ext, "yaml" | "yml" | "json"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn cmd_validate(args: &[String]) -> anyhow::Result<()> {
    let dir = manifest_dir(args)?;
    println!("Using manifest directory: {}", dir.display());

    let loader = StackLoader::new();
    let mut errors = Vec::new();
    let files = manifest_files(&dir)?;

    for file in &files {
        let name = file.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        print!("Validating {}... ", name);
        let checked = loader
            .load_path(file)
            .and_then(|m| m.descriptors().map(|d| d.len()));
        match checked {
            Ok(count) => println!("✅ ({} providers)", count),
            Err(e) => {
                println!("❌");
                errors.push(format!("  {}: {}", name, e));
            }
        }
    }

    println!("\n=== Summary ===");
    if errors.is_empty() {
        println!("✅ All {} manifest(s) are valid!", files.len());
        Ok(())
    } else {
        println!("❌ Found {} invalid manifest(s):\n", errors.len());
        for err in &errors {
            println!("{}", err);
        }
        std::process::exit(1);
    }
}

fn cmd_outline(args: &[String]) -> anyhow::Result<()> {
    let Some(path) = args.iter().find(|a| !a.starts_with("--")) else {
        eprintln!("Usage: provider-stack outline <manifest> [--json]");
        std::process::exit(1);
    };
    let as_json = args.iter().any(|a| a == "--json");

    let manifest = StackLoader::new().load_path(path)?;
    let providers = manifest.descriptors()?;
    let tree = compose(&TreeRenderer, &providers, Some(Node::leaf("Content")));

    if as_json {
        println!("{}", render_json(&tree)?);
    } else {
        if let Some(name) = &manifest.name {
            println!("# {}", name);
        }
        print!("{}", tree.outline());
    }
    Ok(())
}

fn render_json(tree: &Node) -> provider_stack::Result<String> {
    Ok(serde_json::to_string_pretty(tree)?)
}
