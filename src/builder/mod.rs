//! Grep filter directive builder.
//!
//! This module turns a [`GrepConfig`] into the [`Directive`] tree that the
//! renderer writes out as Fluentd configuration.
//!
//! The builder is organized into:
//! - [`sections`] - conversion of individual leaf, group and root sections
//! - [`DirectiveBuilder`] - a reusable builder holding a secret loader and
//!   identifier settings
//!
//! # Examples
//!
//! ```rust
//! use grep_directive::{DirectiveBuilder, GrepConfig};
//! use grep_directive::secret::NoSecretLoader;
//!
//! let config = GrepConfig::from_yaml(r#"
//! regexp:
//!   - key: status
//!     pattern: /^5\d\d$/
//! "#)?;
//!
//! let builder = DirectiveBuilder::new(NoSecretLoader);
//! let root = builder.build_with_id(&config, "test")?;
//!
//! assert_eq!(root.meta.id.as_deref(), Some("test_grep"));
//! assert_eq!(root.child_labels(), vec!["regexp"]);
//! # Ok::<(), grep_directive::GrepError>(())
//! ```

pub mod sections;

pub use sections::{
    build_group, build_leaf, build_root, build_section, root_id, GroupKind, LeafKind,
    FILTER_DIRECTIVE, MATCH_ALL_TAG, PLUGIN_TYPE,
};

use crate::config::BuildConfig;
use crate::directive::Directive;
use crate::error::Result;
use crate::model::{AndSection, ExcludeSection, GrepConfig, OrSection, RegexpSection, Section};
use crate::secret::SecretLoader;

/// Conversion of a configuration section into a directive.
///
/// `id` only matters for the root [`GrepConfig`]; nested sections ignore it.
pub trait ToDirective {
    fn to_directive<L: SecretLoader + ?Sized>(&self, loader: &L, id: &str) -> Result<Directive>;
}

impl ToDirective for RegexpSection {
    fn to_directive<L: SecretLoader + ?Sized>(&self, loader: &L, _id: &str) -> Result<Directive> {
        build_leaf(self, LeafKind::Regexp, loader)
    }
}

impl ToDirective for ExcludeSection {
    fn to_directive<L: SecretLoader + ?Sized>(&self, loader: &L, _id: &str) -> Result<Directive> {
        build_leaf(self, LeafKind::Exclude, loader)
    }
}

impl ToDirective for OrSection {
    fn to_directive<L: SecretLoader + ?Sized>(&self, loader: &L, _id: &str) -> Result<Directive> {
        build_group(self, GroupKind::Or, loader)
    }
}

impl ToDirective for AndSection {
    fn to_directive<L: SecretLoader + ?Sized>(&self, loader: &L, _id: &str) -> Result<Directive> {
        build_group(self, GroupKind::And, loader)
    }
}

impl ToDirective for Section<'_> {
    fn to_directive<L: SecretLoader + ?Sized>(&self, loader: &L, _id: &str) -> Result<Directive> {
        build_section(*self, loader)
    }
}

impl ToDirective for GrepConfig {
    fn to_directive<L: SecretLoader + ?Sized>(&self, loader: &L, id: &str) -> Result<Directive> {
        build_root(self, id, loader)
    }
}

/// Reusable grep directive builder.
///
/// Holds the secret loader and the identifier prefix so callers converting
/// several configurations do not have to thread them through every call.
#[derive(Debug, Clone)]
pub struct DirectiveBuilder<L> {
    loader: L,
    config: BuildConfig,
}

impl<L: SecretLoader> DirectiveBuilder<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            config: BuildConfig::default(),
        }
    }

    pub fn with_config(loader: L, config: BuildConfig) -> Self {
        Self { loader, config }
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut BuildConfig {
        &mut self.config
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Build using the configured identifier prefix.
    pub fn build(&self, grep: &GrepConfig) -> Result<Directive> {
        build_root(grep, &self.config.id_prefix, &self.loader)
    }

    /// Build with an explicit identifier prefix.
    pub fn build_with_id(&self, grep: &GrepConfig, id_prefix: &str) -> Result<Directive> {
        build_root(grep, id_prefix, &self.loader)
    }
}
