//! Meta-tool registration and dispatch.

use serde_json::{json, Map, Value};

use crate::directory::NodeDirectory;
use crate::types::{McpResult, ToolCallResult, ToolDefinition};

use super::{call_node_tool, list_node_tools, list_nodes};

/// The fixed catalog of meta-tools, built once at startup.
pub struct ToolRegistry {
    tools: Vec<ToolDefinition>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: vec![
                list_nodes::definition(),
                list_node_tools::definition(),
                call_node_tool::definition(),
            ],
        }
    }

    pub fn list_tools(&self) -> &[ToolDefinition] {
        &self.tools
    }

    /// Run a meta-tool. Validation problems come back as `isError` content; only
    /// upstream transport failures are errors.
    pub async fn call(
        &self,
        name: &str,
        arguments: Option<Value>,
        directory: &NodeDirectory,
    ) -> McpResult<ToolCallResult> {
        let args = match arguments {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(v) => v,
        };

        match name {
            "list_nodes" => list_nodes::execute(args, directory).await,
            "list_node_tools" => list_node_tools::execute(args, directory).await,
            "call_node_tool" => call_node_tool::execute(args, directory).await,
            _ => {
                tracing::debug!(tool = name, "Unknown meta-tool");
                Ok(ToolCallResult::error(
                    json!({ "error": "unknown tool", "tool": name }),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog() {
        let registry = ToolRegistry::new();
        let names: Vec<&str> = registry.list_tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["list_nodes", "list_node_tools", "call_node_tool"]);
    }

    #[test]
    fn test_required_fields_declared() {
        let registry = ToolRegistry::new();
        let call = &registry.list_tools()[2];
        assert_eq!(call.input_schema["required"], json!(["node_id", "tool_name"]));
        let list = &registry.list_tools()[1];
        assert_eq!(list.input_schema["required"], json!(["node_id"]));
    }
}
