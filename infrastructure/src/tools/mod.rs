//! Tool description and discovery adapters

pub mod discovery;
pub mod schema;

pub use discovery::{DetectedTool, KNOWN_TOOLS, discover_known_tools, discover_tools};
pub use schema::JsonSchemaToolConverter;
