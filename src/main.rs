//! Ortho Route CLI
//!
//! Usage:
//!   ortho-route [OPTIONS] [FILE]
//!
//! Options:
//!   --grid <SIZE>  Override the scene's grid size
//!   -v, --verbose  Log routing diagnostics to stderr
//!   -h, --help     Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;

use ortho_route::{RoutedConnection, Scene};

#[derive(Parser)]
#[command(name = "ortho-route")]
#[command(about = "Route orthogonal connections between diagram nodes")]
struct Cli {
    /// Scene file in TOML format (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Grid size used by the router, overriding the scene
    #[arg(long)]
    grid: Option<f64>,

    /// Log routing diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        init_logging();
    }

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut scene = match Scene::from_str(&source) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(grid) = cli.grid {
        scene = scene.with_grid_size(grid);
    }

    match scene.route_all() {
        Ok(routed) => {
            for connection in &routed {
                println!("{}", format_line(connection));
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn format_line(connection: &RoutedConnection) -> String {
    let desc = &connection.descriptor;
    let status = if desc.status.is_fallback() {
        "fallback"
    } else {
        "found"
    };
    format!(
        "{} {} d=\"{}\" tangent=({:.2},{:.2}) mid=({:.2},{:.2})",
        connection.id,
        status,
        desc.d,
        desc.end_tangent.0,
        desc.end_tangent.1,
        desc.midpoint.x,
        desc.midpoint.y
    )
}

#[cfg(feature = "tracing")]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ortho_route=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(not(feature = "tracing"))]
fn init_logging() {
    eprintln!("Verbose output requires the 'tracing' feature");
}
