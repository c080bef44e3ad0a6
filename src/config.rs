// Copyright (c) 2025 - Cowboy AI, Inc.
//! Rendering configuration

/// Environment variable holding the indentation width
pub const INDENT_VAR: &str = "CFN_TEMPLATE_INDENT";
/// Environment variable selecting single-line output (`1`/`true`)
pub const COMPACT_VAR: &str = "CFN_TEMPLATE_COMPACT";

/// How a template is rendered to JSON text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Spaces per nesting level in pretty output
    pub indent: usize,
    /// Emit the whole document on one line
    pub compact: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            compact: false,
        }
    }
}

impl RenderConfig {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Load from environment variables, falling back to defaults for
    /// anything unset or unparsable
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let indent = std::env::var(INDENT_VAR)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.indent);

        let compact = std::env::var(COMPACT_VAR)
            .ok()
            .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.compact);

        Self { indent, compact }
    }
}
