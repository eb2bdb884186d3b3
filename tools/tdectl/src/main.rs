// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::Config;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tde::catalog::{TypeCatalog, YamlCatalogLoader};
use tde::context::{ComponentRegistry, Components};
use tde::model::{Attribute, Element};
use tde::{AppContext, AttributeState, BuiltinComponents, Document};

#[derive(Parser)]
#[command(name = "tdectl")]
#[command(about = "Create, inspect and check XML test data files for Java class shapes")]
#[command(version)]
struct Cli {
    /// YAML type catalog (repeatable)
    #[arg(long = "catalog", value_name = "YAML", global = true)]
    catalogs: Vec<PathBuf>,

    /// Configuration file
    #[arg(long, value_name = "YAML", global = true)]
    config: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a data file holding a fresh element of TYPE
    New {
        /// Fully-qualified type name
        #[arg(value_name = "TYPE")]
        type_name: String,

        /// Output file (stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print a data file as a tree
    Show {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Decode and re-encode a data file, reporting differences
    Check {
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Print the category of each TYPE
    Classify {
        #[arg(value_name = "TYPE", required = true)]
        types: Vec<String>,
    },
}

/// Aliases from the configuration file.
struct ConfigAliases(Vec<(String, String)>);

impl ComponentRegistry for ConfigAliases {
    fn aliases(&self) -> Vec<(String, String)> {
        self.0.clone()
    }
}

fn main() {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("[ERROR] {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Arc::new(build_context(&cli)?);
    match cli.command {
        Commands::New { type_name, output } => cmd_new(ctx, &type_name, output.as_deref()),
        Commands::Show { input } => cmd_show(ctx, &input),
        Commands::Check { input } => cmd_check(ctx, &input),
        Commands::Classify { types } => cmd_classify(&ctx, &types),
    }
}

fn build_context(cli: &Cli) -> anyhow::Result<AppContext> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let mut catalog = TypeCatalog::with_jdk();
    for path in config.catalogs.iter().chain(&cli.catalogs) {
        let count = YamlCatalogLoader::load_into(path, &mut catalog)
            .with_context(|| format!("cannot load catalog {}", path.display()))?;
        log::debug!("[tdectl] {} types from {}", count, path.display());
    }

    let aliases = config.aliases.into_iter().collect();
    let components = Components::new()
        .with(BuiltinComponents)
        .with(ConfigAliases(aliases));
    Ok(AppContext::initialize(Arc::new(catalog), &components)
        .with_writer_options(config.output.writer_options()))
}

fn cmd_new(ctx: Arc<AppContext>, type_name: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let mut doc = Document::create(ctx, type_name)
        .with_context(|| format!("cannot create {}", type_name))?;
    match output {
        Some(path) => {
            doc.save(path)
                .with_context(|| format!("cannot write {}", path.display()))?;
            println!("[OK] {} written to {}", type_name, path.display());
        }
        None => print!("{}", doc.to_xml()?),
    }
    Ok(())
}

fn cmd_show(ctx: Arc<AppContext>, input: &Path) -> anyhow::Result<()> {
    let doc = Document::open(ctx.clone(), input)
        .with_context(|| format!("cannot read {}", input.display()))?;
    let root = doc.root();
    println!("{}", root.ty());
    print_children(&ctx, root, 1);
    Ok(())
}

fn print_children(ctx: &AppContext, element: &Element, depth: usize) {
    for attr in element.children() {
        if let Some(key) = attr.key() {
            print_attribute(ctx, key, depth, "key");
            print_attribute(ctx, attr, depth, "value");
        } else {
            print_attribute(ctx, attr, depth, &attr.name());
        }
    }
}

fn print_attribute(ctx: &AppContext, attr: &Attribute, depth: usize, name: &str) {
    let marker = if attr.state() == AttributeState::Added {
        " [ADDED]"
    } else {
        ""
    };
    let indent = "  ".repeat(depth);
    let value = match attr.value() {
        Some(Element::Value(leaf)) => ctx.codecs().render(leaf),
        Some(other) => other.ty().to_string(),
        None => "null".to_string(),
    };
    println!("{}{} : {} = {}{}", indent, name, attr.lower_bound(), value, marker);
    if let Some(nested) = attr.value() {
        print_children(ctx, nested, depth + 1);
    }
}

fn cmd_check(ctx: Arc<AppContext>, input: &Path) -> anyhow::Result<()> {
    let original = std::fs::read_to_string(input)
        .with_context(|| format!("cannot read {}", input.display()))?;
    let root = ctx
        .marshaller()
        .from_xml(&original)
        .with_context(|| format!("cannot decode {}", input.display()))?;
    let doc = Document::new(ctx, root);
    let encoded = doc.to_xml()?;

    let added = doc.attributes_in_state(AttributeState::Added);
    for path in &added {
        if let Some(attr) = doc.attribute(path) {
            println!("[ADDED] {} ({})", path, attr.name());
        }
    }

    let before = content_lines(&original);
    let after = content_lines(&encoded);
    match before.iter().zip(&after).position(|(a, b)| a != b) {
        None if before.len() == after.len() => {
            println!(
                "[OK] {} round-trips ({} added attributes)",
                input.display(),
                added.len()
            );
            Ok(())
        }
        Some(line) => anyhow::bail!(
            "{} differs after re-encoding at line {}",
            input.display(),
            line + 1
        ),
        None => anyhow::bail!(
            "{} has {} lines, re-encoded {}",
            input.display(),
            before.len(),
            after.len()
        ),
    }
}

/// Lines without the XML declaration and trailing whitespace.
fn content_lines(xml: &str) -> Vec<&str> {
    xml.lines()
        .map(str::trim_end)
        .filter(|l| !l.starts_with("<?xml"))
        .collect()
}

fn cmd_classify(ctx: &AppContext, types: &[String]) -> anyhow::Result<()> {
    let manager = ctx.manager();
    for name in types {
        let ty = manager.resolve(name)?;
        let category = manager.get_type_category(&ty)?;
        let dedicated = if manager.has_dedicated_factory(&ty) {
            "dedicated factory"
        } else {
            "inherited factory"
        };
        let alias = ctx
            .aliases()
            .alias_of(name)
            .map(|a| format!(", tag <{}>", a))
            .unwrap_or_default();
        println!("{} : {} ({}{})", name, category, dedicated, alias);
    }
    Ok(())
}
