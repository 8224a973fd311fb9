//! # Afiche CLI
//!
//! Command-line driver for design-export translation.
//!
//! ## Usage
//!
//! ```bash
//! # Translate a design export, downloading its assets
//! afiche translate design.json
//!
//! # Choose the output file and resources directory
//! afiche translate design.json -o out/protocol.json --resources out/resources
//!
//! # Name the rendered artifact in the output descriptor
//! afiche translate design.json --filename spring_poster.png
//!
//! # Skip downloads (assets already on disk, or dry run)
//! afiche translate design.json --offline
//!
//! # Treat only the first image as a background layer
//! afiche translate design.json --backgrounds 1
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use afiche::{
    AficheError, TranslateOptions, Translator,
    design::{DesignDocument, classify},
    protocol::LayerPolicy,
    resolve::{AssetResolver, HttpAssetResolver, OfflineAssetResolver, resolve_images},
};

/// Afiche - design export to render protocol translator
#[derive(Parser, Debug)]
#[command(name = "afiche")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a design export into a render protocol document
    Translate {
        /// Path to the design JSON export
        input: PathBuf,

        /// Output protocol file
        #[arg(short, long, default_value = "protocol.json")]
        output: PathBuf,

        /// Directory for downloaded assets
        #[arg(long, default_value = "resources")]
        resources: PathBuf,

        /// Rendered image filename for the output descriptor
        /// (defaults to the input stem + "_poster.png")
        #[arg(long)]
        filename: Option<String>,

        /// Skip asset downloads; map sources to local paths by name
        #[arg(long)]
        offline: bool,

        /// Number of leading images treated as background layers
        #[arg(long, default_value = "3")]
        backgrounds: usize,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AficheError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Translate {
            input,
            output,
            resources,
            filename,
            offline,
            backgrounds,
        } => {
            let json = std::fs::read_to_string(&input)?;
            let design = DesignDocument::from_json(&json)?;
            let mut classified = classify(&design);

            let resolver: Box<dyn AssetResolver> = if offline {
                Box::new(OfflineAssetResolver::new(&resources))
            } else {
                Box::new(HttpAssetResolver::new(&resources)?)
            };
            let total = classified.images.len();
            let (images, paths) = resolve_images(resolver.as_ref(), &classified.images).await;
            if images.len() < total {
                eprintln!("Warning: {} asset(s) failed to resolve", total - images.len());
            }
            classified.images = images;

            let filename = filename.unwrap_or_else(|| default_artifact_name(&input));
            let translator = Translator::with_options(TranslateOptions {
                layers: LayerPolicy {
                    background_count: backgrounds,
                },
                ..Default::default()
            });
            let protocol = translator.translate(&classified, &paths, &filename);
            protocol.write_atomic(&output)?;

            println!("Protocol written to {}", output.display());
            println!(
                "  canvas: {} x {} ({})",
                protocol.canvas.width, protocol.canvas.height, protocol.canvas.background
            );
            println!("  images: {}", protocol.images.len());
            println!("  texts:  {}", protocol.texts.len());
        }
    }

    Ok(())
}

/// `design.json` → `design_poster.png`.
fn default_artifact_name(input: &std::path::Path) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "design".to_string());
    format!("{}_poster.png", stem)
}
