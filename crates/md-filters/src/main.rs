/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Pandoc JSON filter entry point.
 */

use anyhow::{Context, Result};
use clap::Parser;
use md_filters::config::{ConfigOverrides, FilterConfig};
use md_filters::filter_context::FilterContext;
use md_filters::tools::RendererTools;
use md_filters::transform::TransformPipeline;
use md_filters::transforms::AVAILABLE_FILTERS;
use md_filters::utils::diagnostic_collector::{Diagnostic, DiagnosticCollector};
use md_filters::{readers, writers};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "md-filters")]
#[command(version)]
#[command(about = "Pandoc JSON filter: header rules, blockquote divs, diagrams, operator code")]
struct Args {
    /// Target format, as passed by Pandoc
    #[arg(default_value = "html")]
    format: String,

    /// Filter to run; repeat to build a chain (overrides document metadata)
    #[arg(short = 'F', long = "filter")]
    filters: Vec<String>,

    /// Directory under which diagram image directories are created
    #[arg(long, env = "MD_FILTERS_IMAGE_ROOT")]
    image_root: Option<PathBuf>,

    /// Inline style for level-1 headers
    #[arg(long)]
    header_style: Option<String>,

    /// Read the document from FILE instead of stdin
    #[arg(short = 'i', long, default_value = "-")]
    input: String,

    /// Write the document to FILE instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Log each transform as it runs
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Report warnings as JSON lines
    #[arg(long)]
    json_errors: bool,

    /// Print the available filter names and exit
    #[arg(long)]
    list_filters: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose, args.json_errors);

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Log records go to stderr. With `--json-errors` stderr is read by tools,
/// so colour codes are turned off.
fn init_tracing(verbose: bool, plain: bool) {
    let default_directive = if verbose {
        "md_filters=debug"
    } else {
        "md_filters=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_directive.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(!plain),
        )
        .init();
}

fn run(args: &Args) -> Result<()> {
    if args.list_filters {
        for name in AVAILABLE_FILTERS {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut diagnostics = DiagnosticCollector::new();
    let mut doc = if args.input == "-" {
        readers::json::read(&mut io::stdin().lock(), &mut diagnostics)
            .context("Failed to read document from stdin")?
    } else {
        let mut file = std::fs::File::open(&args.input)
            .with_context(|| format!("Failed to open input file '{}'", args.input))?;
        readers::json::read(&mut file, &mut diagnostics)
            .with_context(|| format!("Failed to read document from '{}'", args.input))?
    };

    let overrides = ConfigOverrides {
        filters: (!args.filters.is_empty()).then(|| args.filters.clone()),
        image_root: args.image_root.clone(),
        header_style: args.header_style.clone(),
    };
    let config = FilterConfig::resolve(&doc.meta, &overrides, &mut diagnostics);
    config.validate()?;
    let pipeline = TransformPipeline::from_names(config.filters.as_slice())?;
    tracing::debug!(
        filters = ?pipeline.transform_names(),
        format = %args.format,
        "Running filters"
    );

    let tools = RendererTools::discover(&mut diagnostics);
    let mut ctx = FilterContext::new(&args.format)
        .with_config(config)
        .with_tools(tools);
    ctx.diagnostics = diagnostics;

    let result = pipeline.execute(&mut doc, &mut ctx);
    report(ctx.diagnostics(), args.json_errors);
    result?;

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file '{}'", path.display()))?;
            writers::json::write(&doc, &mut BufWriter::new(file))?;
        }
        None => writers::json::write(&doc, &mut BufWriter::new(io::stdout().lock()))?,
    }
    Ok(())
}

fn report(diagnostics: &[Diagnostic], json: bool) {
    for diagnostic in diagnostics {
        if json {
            eprintln!("{}", diagnostic.to_json());
        } else {
            eprintln!("{}", diagnostic);
        }
    }
}
