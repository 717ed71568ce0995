//! Diagram store, serializer and session

mod defaults;
pub mod serializer;
mod session;
mod store;

pub use serializer::{export, export_pretty, import, DEFAULT_EXPORT_FILENAME};
pub use session::*;
pub use store::*;
