//! Registry of formatting tools and file classification.

use super::{ClangFormat, FormatTool, GnFormat, GoFormat, Yapf};
use crate::config::ToolCommands;
use crate::error::{FormatError, FormatResult};
use std::collections::HashMap;
use std::path::Path;

/// The set of tools a run may use, in classification order.
///
/// Built once at startup and handed to the [`CodeFormatter`](crate::formatter::CodeFormatter).
/// No two tools share a name or an extension.
pub struct ToolRegistry {
    tools: Vec<Box<dyn FormatTool>>,
}

impl ToolRegistry {
    /// Create a registry, rejecting duplicate names and overlapping extensions.
    pub fn new(tools: Vec<Box<dyn FormatTool>>) -> FormatResult<Self> {
        let mut names: Vec<&str> = Vec::with_capacity(tools.len());
        let mut owners: HashMap<&str, &str> = HashMap::new();

        for tool in &tools {
            if names.contains(&tool.name()) {
                return Err(FormatError::DuplicateTool(tool.name().to_string()));
            }
            names.push(tool.name());

            for extension in tool.extensions() {
                if let Some(first) = owners.insert(*extension, tool.name()) {
                    return Err(FormatError::DuplicateExtension {
                        extension: (*extension).to_string(),
                        first: first.to_string(),
                        second: tool.name().to_string(),
                    });
                }
            }
        }

        Ok(Self { tools })
    }

    /// The four built-in tools, started with the given commands.
    pub fn builtin(commands: &ToolCommands) -> Self {
        Self {
            tools: vec![
                Box::new(ClangFormat::new(commands.clang_format.clone())),
                Box::new(GnFormat::new(commands.gn.clone())),
                Box::new(GoFormat::new(commands.gofmt.clone())),
                Box::new(Yapf::new(commands.yapf.clone())),
            ],
        }
    }

    /// The tool responsible for `path`, if any. First match in registry order wins.
    pub fn classify(&self, path: &Path) -> Option<&dyn FormatTool> {
        self.tools.iter().find(|tool| tool.handles(path)).map(AsRef::as_ref)
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&dyn FormatTool> {
        self.tools.iter().find(|tool| tool.name() == name).map(AsRef::as_ref)
    }

    pub fn tools(&self) -> impl Iterator<Item = &dyn FormatTool> {
        self.tools.iter().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::builtin(&ToolCommands::default())
    }
}
