//! Core building blocks shared by the store, serializer and renderers
//!
//! Errors, logging setup, the edge model and label text helpers.

mod error;
pub mod logging;
mod text;
mod types;

pub use error::*;
pub use logging::*;
pub use text::*;
pub use types::*;
