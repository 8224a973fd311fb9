//! # Design Document Model
//!
//! Input side of the translator: schema types for the tool-exported JSON
//! ([`schema`]) and the classifier that partitions the flat object list
//! into typed collections ([`classify`]).

pub mod classify;
pub mod schema;

pub use classify::{Classified, WORKSPACE_ID, classify};
pub use schema::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DesignDocument, DesignObject, ObjectKind,
};
