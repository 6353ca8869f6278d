//! Tool schema conversion port.
//!
//! Separates "what a tool accepts" (the domain capability model) from "how
//! to describe it to a caller" (JSON Schema, built in infrastructure).

use askcli_domain::{CapabilityModel, ToolCatalog};

/// Port for converting capability models to a protocol schema.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single model to a JSON Schema tool description.
    fn tool_to_schema(&self, model: &CapabilityModel) -> serde_json::Value;

    /// Convert every registered tool (sorted by tool name).
    fn all_tools_schema(&self, catalog: &ToolCatalog) -> Vec<serde_json::Value> {
        catalog.all().map(|m| self.tool_to_schema(m)).collect()
    }
}
