//! Registry of capability models keyed by tool name

use super::entities::CapabilityModel;
use std::collections::BTreeMap;

/// Registered tools, iterated in tool-name order.
///
/// Passed explicitly to whoever needs it; there is no process-wide registry.
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: BTreeMap<String, CapabilityModel>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model (builder pattern)
    pub fn register(mut self, model: CapabilityModel) -> Self {
        self.insert(model);
        self
    }

    /// Insert or replace a model, returning the one it replaced
    pub fn insert(&mut self, model: CapabilityModel) -> Option<CapabilityModel> {
        self.tools.insert(model.tool_name.clone(), model)
    }

    pub fn get(&self, tool_name: &str) -> Option<&CapabilityModel> {
        self.tools.get(tool_name)
    }

    pub fn get_by_command(&self, command: &str) -> Option<&CapabilityModel> {
        self.tools.values().find(|m| m.command == command)
    }

    /// Look up by tool name first, then by command
    pub fn resolve(&self, name: &str) -> Option<&CapabilityModel> {
        self.get(name).or_else(|| self.get_by_command(name))
    }

    pub fn all(&self) -> impl Iterator<Item = &CapabilityModel> {
        self.tools.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
