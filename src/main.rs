//! GraphLib command-line tool
//!
//! Builds the sample graph, or inspects and dumps saved graph documents.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use graphlib::graph::{property_map, EntityId, GraphStore, Node, Relation};
use graphlib::persistence::{CodecConfig, XmlCodec};
use graphlib::traversal::{NodeTraversal, Traversal};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "graphlib", version, about = "In-memory property graph tool")]
struct Cli {
    /// YAML file with writer settings
    #[arg(long, global = true, env = "GRAPHLIB_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the two-person sample graph and run the sample queries
    Demo {
        /// Save the sample graph to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Load a graph file and print its size
    Inspect {
        file: PathBuf,
    },
    /// Load a graph file and print its nodes and relations as JSON
    Dump {
        file: PathBuf,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let codec = XmlCodec::new(load_config(cli.config.as_deref())?);

    match cli.command {
        Commands::Demo { out } => run_demo(&codec, out.as_deref()),
        Commands::Inspect { file } => run_inspect(&codec, &file),
        Commands::Dump { file } => run_dump(&codec, &file),
    }
}

fn load_config(path: Option<&Path>) -> Result<CodecConfig> {
    let Some(path) = path else {
        return Ok(CodecConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    info!(path = %path.display(), "loaded writer config");
    Ok(config)
}

fn run_demo(codec: &XmlCodec, out: Option<&Path>) -> Result<()> {
    let mut store = GraphStore::new();
    let bob_id = EntityId::new_v4();

    let bob = store.add_node(Node::new_with_properties(
        bob_id,
        property_map([("Name", "Bob"), ("Hobby", "Sportsball")]),
        ["Person"],
    ));
    let alice = store.add_node(Node::new_with_properties(
        EntityId::new_v4(),
        property_map([("Name", "Alice"), ("Hobby", "trains"), ("Bloodtype", "A+")]),
        ["Person"],
    ));
    store.add_relationship(Relation::new("test", bob, alice))?;
    println!("✓ Bob -[test]-> Alice");

    let friends: Vec<String> = store.all_nodes().has_id(bob_id).out_v().values(["Name"]).collect();
    println!("Bob's relations lead to: {:?}", friends);
    println!("People: {}", store.all_nodes().has_label(["Person"]).count());
    println!("With a blood type: {}", store.all_nodes().has_key(["Bloodtype"]).count());
    println!("Trains: {}", store.all_nodes().has_label(["Train"]).count());

    if let Some(path) = out {
        codec
            .save(&store, path)
            .with_context(|| format!("saving {}", path.display()))?;
        println!("✓ Saved to {}", path.display());
    }
    Ok(())
}

fn run_inspect(codec: &XmlCodec, file: &Path) -> Result<()> {
    let store = codec
        .load(file)
        .with_context(|| format!("loading {}", file.display()))?;
    println!("Nodes: {}", store.node_count());
    println!("Relations: {}", store.relation_count());
    Ok(())
}

fn run_dump(codec: &XmlCodec, file: &Path) -> Result<()> {
    let store = codec
        .load(file)
        .with_context(|| format!("loading {}", file.display()))?;

    let nodes = store
        .all_nodes()
        .map(|n| serde_json::to_value(n.node()))
        .collect::<Result<Vec<_>, _>>()?;
    let relations: Vec<serde_json::Value> = store
        .all_relations()
        .map(|r| {
            serde_json::json!({
                "id": r.id.to_string(),
                "type": r.relation_type().as_str(),
                "source": r.source().id.to_string(),
                "target": r.target().id.to_string(),
                "properties": &r.properties,
            })
        })
        .collect();

    let dump = serde_json::json!({ "nodes": nodes, "relations": relations });
    println!("{}", serde_json::to_string_pretty(&dump)?);
    Ok(())
}
