//! Grep filter configuration shapes.
//!
//! These are the declarative sections accepted by the grep filter plugin. They
//! deserialize from the same YAML/JSON layout used in pipeline manifests:
//!
//! ```yaml
//! regexp:
//!   - key: elso
//!     pattern: /^5\d\d$/
//! and:
//!   - regexp:
//!       - key: elso
//!         pattern: /^5\d\d$/
//!     exclude:
//!       - key: masodik
//!         pattern: /\.css$/
//! ```
//!
//! Any `key` or `pattern` may reference a secret instead of holding a literal:
//!
//! ```yaml
//! regexp:
//!   - key: status
//!     pattern:
//!       valueFrom:
//!         secretKeyRef:
//!           name: grep-patterns
//!           key: server-errors
//! ```

use crate::error::{GrepError, Result};
use crate::secret::{SecretLoader, SecretRef};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// A rule parameter: either a literal string or a reference to a secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Param {
    Plain(String),
    Secret(SecretParam),
}

/// Mapping form of a parameter: `valueFrom: { secretKeyRef: { name, key } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SecretParam {
    #[serde(rename = "valueFrom")]
    pub value_from: ValueFrom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ValueFrom {
    pub secret_key_ref: SecretRef,
}

impl Param {
    pub fn plain(value: impl Into<String>) -> Self {
        Param::Plain(value.into())
    }

    pub fn secret(name: impl Into<String>, key: impl Into<String>) -> Self {
        Param::Secret(SecretParam {
            value_from: ValueFrom {
                secret_key_ref: SecretRef::new(name, key),
            },
        })
    }

    /// Produce the concrete value. Plain values never touch the loader.
    pub fn resolve<L: SecretLoader + ?Sized>(&self, loader: &L) -> Result<String> {
        match self {
            Param::Plain(value) => Ok(value.clone()),
            Param::Secret(secret) => loader.load(secret.secret_ref()),
        }
    }

    pub fn as_plain(&self) -> Option<&str> {
        match self {
            Param::Plain(value) => Some(value),
            Param::Secret(_) => None,
        }
    }
}

impl SecretParam {
    pub fn secret_ref(&self) -> &SecretRef {
        &self.value_from.secret_key_ref
    }
}

// Strings become `Plain`; mappings must be a complete secret reference, so
// errors inside the reference surface as-is instead of a generic mismatch.
impl<'de> Deserialize<'de> for Param {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ParamVisitor;

        impl<'de> Visitor<'de> for ParamVisitor {
            type Value = Param;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or a valueFrom.secretKeyRef reference")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Param, E> {
                Ok(Param::Plain(value.to_string()))
            }

            fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<Param, E> {
                Ok(Param::Plain(value))
            }

            fn visit_map<A>(self, map: A) -> std::result::Result<Param, A::Error>
            where
                A: MapAccess<'de>,
            {
                SecretParam::deserialize(de::value::MapAccessDeserializer::new(map))
                    .map(Param::Secret)
            }
        }

        deserializer.deserialize_any(ParamVisitor)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Plain(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Plain(value)
    }
}

/// Keep records whose `key` field matches `pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegexpSection {
    /// Field name in the record to inspect.
    pub key: Param,
    /// Pattern expression to evaluate.
    pub pattern: Param,
}

/// Drop records whose `key` field matches `pattern`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcludeSection {
    /// Field name in the record to inspect.
    pub key: Param,
    /// Pattern expression to evaluate.
    pub pattern: Param,
}

impl RegexpSection {
    pub fn new(key: impl Into<Param>, pattern: impl Into<Param>) -> Self {
        Self {
            key: key.into(),
            pattern: pattern.into(),
        }
    }
}

impl ExcludeSection {
    pub fn new(key: impl Into<Param>, pattern: impl Into<Param>) -> Self {
        Self {
            key: key.into(),
            pattern: pattern.into(),
        }
    }
}

/// Shared view over the two leaf rule shapes.
pub trait Rule {
    fn key(&self) -> &Param;
    fn pattern(&self) -> &Param;
}

impl Rule for RegexpSection {
    fn key(&self) -> &Param {
        &self.key
    }

    fn pattern(&self) -> &Param {
        &self.pattern
    }
}

impl Rule for ExcludeSection {
    fn key(&self) -> &Param {
        &self.key
    }

    fn pattern(&self) -> &Param {
        &self.pattern
    }
}

/// Records pass when any nested rule passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrSection {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regexp: Vec<RegexpSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<ExcludeSection>,
}

/// Records pass when every nested rule passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AndSection {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regexp: Vec<RegexpSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<ExcludeSection>,
}

/// Shared view over the two composite group shapes.
pub trait Group {
    fn regexp(&self) -> &[RegexpSection];
    fn exclude(&self) -> &[ExcludeSection];

    fn rule_count(&self) -> usize {
        self.regexp().len() + self.exclude().len()
    }
}

impl Group for OrSection {
    fn regexp(&self) -> &[RegexpSection] {
        &self.regexp
    }

    fn exclude(&self) -> &[ExcludeSection] {
        &self.exclude
    }
}

impl Group for AndSection {
    fn regexp(&self) -> &[RegexpSection] {
        &self.regexp
    }

    fn exclude(&self) -> &[ExcludeSection] {
        &self.exclude
    }
}

/// Root of a grep filter configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrepConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regexp: Vec<RegexpSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<ExcludeSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub or: Vec<OrSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub and: Vec<AndSection>,
}

/// One root-level section, borrowed from a [`GrepConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section<'a> {
    Regexp(&'a RegexpSection),
    Exclude(&'a ExcludeSection),
    Or(&'a OrSection),
    And(&'a AndSection),
}

impl Section<'_> {
    /// Directive label this section renders as.
    pub fn label(&self) -> &'static str {
        match self {
            Section::Regexp(_) => "regexp",
            Section::Exclude(_) => "exclude",
            Section::Or(_) => "or",
            Section::And(_) => "and",
        }
    }
}

impl GrepConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from YAML.
    ///
    /// An empty document or an explicit null (`~`, `null`) loads as an empty
    /// configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use grep_directive::GrepConfig;
    ///
    /// let config = GrepConfig::from_yaml(r#"
    /// exclude:
    ///   - key: path
    ///     pattern: /\.css$/
    /// "#)?;
    /// assert_eq!(config.exclude.len(), 1);
    /// # Ok::<(), grep_directive::GrepError>(())
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if serde_yaml::from_str::<serde_yaml::Value>(yaml)?.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a configuration from JSON. A top-level `null` loads as an empty
    /// configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str::<Option<Self>>(json)?.unwrap_or_default())
    }

    /// Load a configuration file. Files ending in `.json` are parsed as JSON,
    /// everything else as YAML.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| GrepError::IoError(format!("{}: {}", path.display(), e)))?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.regexp.is_empty() && self.exclude.is_empty() && self.or.is_empty() && self.and.is_empty()
    }

    /// Total number of leaf rules, nested group rules included.
    pub fn rule_count(&self) -> usize {
        self.regexp.len()
            + self.exclude.len()
            + self.or.iter().map(Group::rule_count).sum::<usize>()
            + self.and.iter().map(Group::rule_count).sum::<usize>()
    }

    /// Root-level sections in directive order: regexp rules, exclude rules,
    /// or-groups, and-groups.
    pub fn sections(&self) -> impl Iterator<Item = Section<'_>> {
        self.regexp
            .iter()
            .map(Section::Regexp)
            .chain(self.exclude.iter().map(Section::Exclude))
            .chain(self.or.iter().map(Section::Or))
            .chain(self.and.iter().map(Section::And))
    }
}
