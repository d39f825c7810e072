use clap::Parser;
use pixhom::io::load_gray_grid;
use pixhom::{compute_diagram, compute_forest, Diagram, Forest, MergeTreeConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "PixHom CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
enum OutputKind {
    #[default]
    Diagram,
    Forest,
    Both,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    image_path: String,
    output_path: Option<String>,
    output: OutputKind,
    parallel: bool,
}

#[derive(Debug, Serialize)]
struct ForestRecord {
    rows: usize,
    cols: usize,
    parent: Vec<usize>,
    weight: Vec<f64>,
}

impl ForestRecord {
    fn new(forest: Forest, rows: usize, cols: usize) -> Self {
        let (parent, weight) = forest.into_parts();
        Self {
            rows,
            cols,
            parent,
            weight,
        }
    }
}

fn diagram_record(diagram: &Diagram) -> Vec<[f64; 2]> {
    diagram
        .pairs()
        .iter()
        .map(|pair| [pair.death, pair.birth])
        .collect()
}

#[derive(Debug, Serialize)]
struct Output {
    #[serde(skip_serializing_if = "Option::is_none")]
    diagram: Option<Vec<[f64; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    forest: Option<ForestRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("pixhom=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() {
        return Err("image_path must be set in the config".into());
    }

    let grid = load_gray_grid(&config.image_path)?;
    let view = grid.view();
    let cfg = MergeTreeConfig {
        parallel: config.parallel,
    };

    let diagram = match config.output {
        OutputKind::Diagram | OutputKind::Both => Some(diagram_record(&compute_diagram(view, &cfg)?)),
        OutputKind::Forest => None,
    };
    let forest = match config.output {
        OutputKind::Forest | OutputKind::Both => Some(ForestRecord::new(
            compute_forest(view, &cfg)?,
            grid.rows(),
            grid.cols(),
        )),
        OutputKind::Diagram => None,
    };

    let output = Output { diagram, forest };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
