//! Directive tree produced by the builder.
//!
//! A [`Directive`] corresponds to one block in the Fluentd configuration
//! language. Each node owns its children, so a tree is always built bottom-up
//! from leaf rules to the root filter.

use crate::error::Result;
use crate::model::Param;
use crate::secret::SecretLoader;
use std::collections::BTreeMap;

/// Block label and plugin metadata of a directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginMeta {
    pub directive: String,
    pub plugin_type: Option<String>,
    pub tag: Option<String>,
    pub id: Option<String>,
}

impl PluginMeta {
    pub fn new(directive: impl Into<String>) -> Self {
        Self {
            directive: directive.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, plugin_type: impl Into<String>) -> Self {
        self.plugin_type = Some(plugin_type.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub meta: PluginMeta,
    /// Flat attributes, kept sorted so rendering is deterministic.
    pub params: BTreeMap<String, String>,
    pub children: Vec<Directive>,
}

impl Directive {
    pub fn new(meta: PluginMeta) -> Self {
        Self {
            meta,
            params: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Build a childless directive from named parameters.
    ///
    /// Secret-backed parameters are resolved through `loader`. The first
    /// resolution failure is returned as-is.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use grep_directive::directive::{Directive, PluginMeta};
    /// use grep_directive::model::Param;
    /// use grep_directive::secret::NoSecretLoader;
    ///
    /// let key = Param::plain("status");
    /// let pattern = Param::plain("/^5/");
    /// let leaf = Directive::flat(
    ///     PluginMeta::new("regexp"),
    ///     [("key", &key), ("pattern", &pattern)],
    ///     &NoSecretLoader,
    /// )?;
    ///
    /// assert!(leaf.is_leaf());
    /// assert_eq!(leaf.param("pattern"), Some("/^5/"));
    /// # Ok::<(), grep_directive::GrepError>(())
    /// ```
    pub fn flat<'a, I, L>(meta: PluginMeta, params: I, loader: &L) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a Param)>,
        L: SecretLoader + ?Sized,
    {
        let mut directive = Self::new(meta);
        for (name, param) in params {
            let value = param.resolve(loader)?;
            directive.params.insert(name.to_string(), value);
        }
        Ok(directive)
    }

    pub fn with_child(mut self, child: Directive) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_child(&mut self, child: Directive) {
        self.children.push(child);
    }

    pub fn label(&self) -> &str {
        &self.meta.directive
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Labels of the direct children, in order.
    pub fn child_labels(&self) -> Vec<&str> {
        self.children.iter().map(Directive::label).collect()
    }

    /// Nesting depth; a leaf has depth 1.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Directive::depth).max().unwrap_or(0)
    }

    /// Number of nodes in the tree, this one included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Directive::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GrepError;
    use crate::secret::{MapSecretLoader, NoSecretLoader};

    #[test]
    fn test_plugin_meta_builders() {
        let meta = PluginMeta::new("filter")
            .with_type("grep")
            .with_tag("**")
            .with_id("test_grep");

        assert_eq!(meta.directive, "filter");
        assert_eq!(meta.plugin_type.as_deref(), Some("grep"));
        assert_eq!(meta.tag.as_deref(), Some("**"));
        assert_eq!(meta.id.as_deref(), Some("test_grep"));

        let bare = PluginMeta::new("or");
        assert!(bare.plugin_type.is_none());
        assert!(bare.tag.is_none());
        assert!(bare.id.is_none());
    }

    #[test]
    fn test_flat_directive_resolves_secrets() {
        let loader = MapSecretLoader::new().with_secret("patterns", "css", r"/\.css$/");
        let key = Param::plain("path");
        let pattern = Param::secret("patterns", "css");

        let leaf = Directive::flat(
            PluginMeta::new("exclude"),
            [("key", &key), ("pattern", &pattern)],
            &loader,
        )
        .unwrap();

        assert_eq!(leaf.label(), "exclude");
        assert_eq!(leaf.param("key"), Some("path"));
        assert_eq!(leaf.param("pattern"), Some(r"/\.css$/"));
        assert!(leaf.is_leaf());
    }

    #[test]
    fn test_flat_directive_propagates_loader_error() {
        let key = Param::plain("path");
        let pattern = Param::secret("patterns", "css");

        let err = Directive::flat(
            PluginMeta::new("regexp"),
            [("key", &key), ("pattern", &pattern)],
            &NoSecretLoader,
        )
        .unwrap_err();

        assert_eq!(err, GrepError::SecretNotFound("patterns".to_string()));
    }

    #[test]
    fn test_tree_queries() {
        let leaf = || Directive::new(PluginMeta::new("regexp"));
        let group = Directive::new(PluginMeta::new("and"))
            .with_child(leaf())
            .with_child(Directive::new(PluginMeta::new("exclude")));

        let mut root = Directive::new(PluginMeta::new("filter")).with_child(leaf());
        root.push_child(group);

        assert_eq!(root.child_labels(), vec!["regexp", "and"]);
        assert_eq!(root.depth(), 3);
        assert_eq!(root.count(), 5);
        assert_eq!(leaf().depth(), 1);
        assert!(!root.is_leaf());
    }
}
