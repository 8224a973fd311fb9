//! # Afiche - Design Export to Render Protocol Translator
//!
//! Afiche turns the flat, loosely-typed object list a graphic design tool
//! exports into the JSON protocol a separate rasterizing renderer
//! consumes. It provides:
//!
//! - **Object classification**: workspace rect / image / text partitioning
//! - **Shadow pairing**: rediscovering shadow/main text relationships from
//!   geometric proximity and color
//! - **Line re-flow**: fixed-width wrapping and vertical character
//!   stacking for narrow text blocks
//! - **Layer identity**: positional `background_N`/`decor_N` ids for
//!   image layers
//!
//! ## Quick Start
//!
//! ```no_run
//! use afiche::design::{DesignDocument, classify};
//! use afiche::protocol::Translator;
//! use afiche::resolve::{HttpAssetResolver, resolve_images};
//!
//! # async fn translate() -> Result<(), afiche::AficheError> {
//! let json = std::fs::read_to_string("design.json")?;
//! let design = DesignDocument::from_json(&json)?;
//!
//! // Partition the object list
//! let mut classified = classify(&design);
//!
//! // Resolve remote assets to local paths (failures drop the image)
//! let resolver = HttpAssetResolver::new("resources")?;
//! let (images, paths) = resolve_images(&resolver, &classified.images).await;
//! classified.images = images;
//!
//! // Assemble the protocol document
//! let protocol = Translator::new().translate(&classified, &paths, "poster.png");
//! protocol.write_atomic(std::path::Path::new("protocol.json"))?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`design`] | Input schema and object classification |
//! | [`layout`] | Shadow pairing and line re-flow heuristics |
//! | [`protocol`] | Output model, layer identity, assembly |
//! | [`color`] | Color expression normalization |
//! | [`resolve`] | Asset download collaborator |
//! | [`error`] | Error types |
//!
//! The translation core (`design` → `protocol`) is a pure, synchronous
//! function: no I/O, no logging, no hidden state. Re-running it on the
//! same input produces byte-identical output. Asset retrieval and file
//! writes live at the edges (`resolve`, the CLI).

pub mod color;
pub mod design;
pub mod error;
pub mod layout;
pub mod protocol;
pub mod resolve;

// Re-exports for convenience
pub use design::DesignDocument;
pub use error::AficheError;
pub use protocol::{ProtocolDocument, TranslateOptions, Translator};
