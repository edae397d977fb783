use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use rspecgen::portal::Context;
use rspecgen::profile;

/// Profile utility that emits GENI request RSpecs for POWDER testbed experiments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind a profile parameter, as NAME=VALUE (may be repeated)
    #[arg(short, long = "param", value_name = "NAME=VALUE")]
    param: Vec<String>,

    /// Physical node type for all nodes (shorthand for --param phystype=TYPE)
    #[arg(long, value_name = "TYPE")]
    phystype: Option<String>,

    /// Write the RSpec document to a file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn parse_binding(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| eyre!("invalid parameter binding '{raw}': expected NAME=VALUE"))?;
    Ok((name.to_string(), value.to_string()))
}

fn collect_bindings(args: &Args) -> Result<BTreeMap<String, String>> {
    let mut bindings = BTreeMap::new();
    for raw in &args.param {
        let (name, value) = parse_binding(raw)?;
        bindings.insert(name, value);
    }
    if let Some(phystype) = &args.phystype {
        bindings.insert("phystype".to_string(), phystype.clone());
    }
    Ok(bindings)
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting rspecgen profile generator");

    // Define the profile's parameters and bind the supplied values.
    let bindings = collect_bindings(&args)?;
    let mut context = Context::new();
    profile::define_parameters(&mut context)?;
    let params = context.bind_parameters(&bindings);
    context.verify_parameters()?;

    // Build the in-memory request model.
    let request = profile::build_request(&params)
        .wrap_err("Failed to assemble the request topology")?;
    info!(
        "Assembled request with {} nodes and {} links",
        request.nodes().len(),
        request.links().len()
    );

    // Serialize and emit the document.
    let xml = request
        .to_xml()
        .wrap_err("Failed to serialize the RSpec document")?;

    match &args.output {
        Some(path) => {
            fs::write(path, &xml)
                .wrap_err_with(|| format!("Failed to write RSpec to '{}'", path.display()))?;
            info!("Wrote RSpec document to {:?}", path);
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(xml.as_bytes())
                .wrap_err("Failed to write RSpec to standard output")?;
        }
    }

    info!("RSpec generation completed successfully");
    Ok(())
}
