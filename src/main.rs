//! Command-line interface for xsd2avro

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use xsd2avro::loaders::{Loader, Source};
#[cfg(feature = "cli")]
use xsd2avro::schema::{SchemaGraph, TypeDef};
#[cfg(feature = "cli")]
use xsd2avro::{service, ConvertOptions, Converter, Error};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xsd2avro")]
#[command(author, version, about = "Convert XML Schema documents to Avro schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert an XSD schema to Avro schema JSON
    Convert {
        /// Path to the XSD file, `-` or nothing for standard input
        #[arg(value_name = "FILE")]
        file: Option<String>,

        /// Pretty print the output
        #[arg(short, long)]
        pretty: bool,

        /// Namespace of the root record
        #[arg(short, long, value_name = "NS")]
        namespace: Option<String>,

        /// Top-level element to convert (defaults to the first one)
        #[arg(short, long, value_name = "NAME")]
        root: Option<String>,

        /// Omit the Kafka Connect `connect.*` properties
        #[arg(long)]
        no_connect_metadata: bool,

        /// Emit xs:documentation as `doc` properties
        #[arg(long)]
        docs: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect an XSD schema and list its top-level components
    Inspect {
        /// Path to the XSD file
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Print the service greeting
    Hello,
}

#[cfg(feature = "cli")]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            file,
            pretty,
            namespace,
            root,
            no_connect_metadata,
            docs,
            output,
        } => {
            let mut options = ConvertOptions::new()
                .with_pretty(pretty)
                .with_connect_metadata(!no_connect_metadata)
                .with_include_docs(docs);
            if let Some(namespace) = namespace {
                options = options.with_namespace(namespace);
            }
            if let Some(root) = root {
                options = options.with_root_element(root);
            }
            cmd_convert(file.as_deref(), options, output)
        }
        Commands::Inspect { schema, json } => cmd_inspect(schema, json),
        Commands::Hello => {
            println!("{}", service::greeting().body);
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::debug!(error = %e, "command failed");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn cmd_convert(
    file: Option<&str>,
    options: ConvertOptions,
    output: Option<PathBuf>,
) -> Result<(), Error> {
    let source = file.map_or(Source::Stdin, Source::from_arg);
    let loader = Loader::new().with_limits(options.limits().clone());
    let input = loader.load_bytes(&source)?;

    let json = Converter::new(options).convert(&input)?;

    match output {
        Some(path) => {
            fs::write(&path, format!("{}\n", json))?;
            tracing::info!(path = %path.display(), "wrote schema");
        }
        None => println!("{}", json),
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_inspect(schema_path: PathBuf, json_output: bool) -> Result<(), Error> {
    let input = Loader::new().load_bytes(&Source::Path(schema_path))?;
    let graph = SchemaGraph::from_bytes(&input)?;

    if json_output {
        print_graph_json(&graph)
    } else {
        print_graph_summary(&graph);
        Ok(())
    }
}

#[cfg(feature = "cli")]
fn print_graph_summary(graph: &SchemaGraph) {
    println!("xsd2avro v{}", xsd2avro::VERSION);
    println!();
    match &graph.target_namespace {
        Some(ns) => println!("Target Namespace: {}", ns),
        None => println!("Target Namespace: (none)"),
    }

    println!("\n=== Global Elements ===");
    for decl in graph.elements() {
        println!("  {} : {}", decl.name, decl.type_ref);
    }

    println!("\n=== Global Types ===");
    for (name, def) in graph.types() {
        println!("  {} ({})", name, def.kind());
    }
}

#[cfg(feature = "cli")]
fn print_graph_json(graph: &SchemaGraph) -> Result<(), Error> {
    use serde_json::json;

    let elements: Vec<_> = graph
        .elements()
        .map(|decl| {
            json!({
                "name": decl.name,
                "type": decl.type_ref.to_string(),
            })
        })
        .collect();

    let types: Vec<_> = graph
        .types()
        .map(|(name, def)| {
            let fields = match def {
                TypeDef::Complex(ct) => ct.particles.len() + ct.attributes.len(),
                TypeDef::Simple(_) => 0,
            };
            json!({
                "name": name,
                "kind": def.kind(),
                "fields": fields,
            })
        })
        .collect();

    let output = json!({
        "targetNamespace": graph.target_namespace,
        "elements": elements,
        "types": types,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
