//! Per-section conversion into directives.
//!
//! Leaves (`regexp`, `exclude`) become flat directives, groups (`or`, `and`)
//! wrap their converted leaves, and the root `filter` wraps everything in
//! category order. Every step stops at the first failure.

use crate::directive::{Directive, PluginMeta};
use crate::error::Result;
use crate::model::{GrepConfig, Group, Rule, Section};
use crate::secret::SecretLoader;
use tracing::{debug, warn};

/// Fluentd plugin name of the grep filter.
pub const PLUGIN_TYPE: &str = "grep";

/// Root directive label.
pub const FILTER_DIRECTIVE: &str = "filter";

/// Tag pattern matching every record.
pub const MATCH_ALL_TAG: &str = "**";

/// Label of a leaf rule directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Regexp,
    Exclude,
}

impl LeafKind {
    pub fn label(self) -> &'static str {
        match self {
            LeafKind::Regexp => "regexp",
            LeafKind::Exclude => "exclude",
        }
    }
}

/// Label of a composite group directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Or,
    And,
}

impl GroupKind {
    pub fn label(self) -> &'static str {
        match self {
            GroupKind::Or => "or",
            GroupKind::And => "and",
        }
    }
}

/// Root directive identifier: `<prefix>_grep`.
pub fn root_id(id_prefix: &str) -> String {
    format!("{}_{}", id_prefix, PLUGIN_TYPE)
}

/// Convert one rule into a childless directive carrying `key` and `pattern`.
pub fn build_leaf<R, L>(rule: &R, kind: LeafKind, loader: &L) -> Result<Directive>
where
    R: Rule + ?Sized,
    L: SecretLoader + ?Sized,
{
    Directive::flat(
        PluginMeta::new(kind.label()),
        [("key", rule.key()), ("pattern", rule.pattern())],
        loader,
    )
}

/// Convert a group: its regexp leaves first, then its exclude leaves.
pub fn build_group<G, L>(group: &G, kind: GroupKind, loader: &L) -> Result<Directive>
where
    G: Group + ?Sized,
    L: SecretLoader + ?Sized,
{
    let mut directive = Directive::new(PluginMeta::new(kind.label()));
    directive.children.reserve(group.rule_count());

    for rule in group.regexp() {
        directive.push_child(build_leaf(rule, LeafKind::Regexp, loader)?);
    }
    for rule in group.exclude() {
        directive.push_child(build_leaf(rule, LeafKind::Exclude, loader)?);
    }

    Ok(directive)
}

/// Convert a single root-level section.
pub fn build_section<L>(section: Section<'_>, loader: &L) -> Result<Directive>
where
    L: SecretLoader + ?Sized,
{
    match section {
        Section::Regexp(rule) => build_leaf(rule, LeafKind::Regexp, loader),
        Section::Exclude(rule) => build_leaf(rule, LeafKind::Exclude, loader),
        Section::Or(group) => build_group(group, GroupKind::Or, loader),
        Section::And(group) => build_group(group, GroupKind::And, loader),
    }
}

/// Convert a whole configuration into the root `filter` directive.
pub fn build_root<L>(config: &GrepConfig, id_prefix: &str, loader: &L) -> Result<Directive>
where
    L: SecretLoader + ?Sized,
{
    let id = root_id(id_prefix);
    debug!(id = %id, rules = config.rule_count(), "building grep filter directive");

    let mut root = Directive::new(
        PluginMeta::new(FILTER_DIRECTIVE)
            .with_type(PLUGIN_TYPE)
            .with_tag(MATCH_ALL_TAG)
            .with_id(id),
    );

    for (index, section) in config.sections().enumerate() {
        match build_section(section, loader) {
            Ok(child) => {
                debug!(index, section = section.label(), "converted grep section");
                root.push_child(child);
            }
            Err(err) => {
                warn!(index, section = section.label(), error = %err, "grep section conversion failed");
                return Err(err);
            }
        }
    }

    debug!(children = root.children.len(), "grep filter directive built");
    Ok(root)
}
