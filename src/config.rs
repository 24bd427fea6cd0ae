//! Configuration for directive building and rendering.
//!
//! # Examples
//!
//! ```rust
//! use grep_directive::{BuildConfig, RenderConfig};
//!
//! let build = BuildConfig::new("flow_app");
//! assert_eq!(build.id_prefix, "flow_app");
//!
//! let render = RenderConfig::default().with_indent(4);
//! assert_eq!(render.indent, 4);
//! ```

/// Default identifier prefix used when the caller supplies none.
pub const DEFAULT_ID_PREFIX: &str = "default";

/// Default number of spaces per nesting level in rendered output.
pub const DEFAULT_INDENT: usize = 2;

/// Settings for turning a [`GrepConfig`](crate::GrepConfig) into a directive tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Prefix of the root directive's `@id`; the plugin name is appended
    /// after an underscore.
    pub id_prefix: String,
}

impl BuildConfig {
    pub fn new(id_prefix: impl Into<String>) -> Self {
        Self {
            id_prefix: id_prefix.into(),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ID_PREFIX)
    }
}

/// Settings for rendering a directive tree as Fluentd configuration text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Spaces per nesting level.
    pub indent: usize,
}

impl RenderConfig {
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(BuildConfig::default().id_prefix, DEFAULT_ID_PREFIX);
        assert_eq!(RenderConfig::default().indent, 2);
    }

    #[test]
    fn test_with_indent() {
        let config = RenderConfig::default().with_indent(0);
        assert_eq!(config.indent, 0);
    }
}
