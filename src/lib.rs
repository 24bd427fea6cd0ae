//! # Grep Filter Directives
//!
//! Translates a declarative [grep filter](https://docs.fluentd.org/filter/grep)
//! configuration into the directive tree of a Fluentd configuration, and renders
//! that tree as text.
//!
//! The crate only shapes configuration. Patterns are never evaluated here; the
//! filtering itself happens inside Fluentd.
//!
//! ## Quick Start
//!
//! ```rust
//! use grep_directive::{render, DirectiveBuilder, GrepConfig};
//! use grep_directive::secret::NoSecretLoader;
//!
//! let config = GrepConfig::from_yaml(r#"
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
//! "#)?;
//!
//! let builder = DirectiveBuilder::new(NoSecretLoader);
//! let root = builder.build_with_id(&config, "test")?;
//! assert_eq!(root.child_labels(), vec!["regexp", "and"]);
//!
//! let text = render(&root)?;
//! assert!(text.starts_with("<filter **>\n  @type grep\n  @id test_grep\n"));
//! # Ok::<(), grep_directive::GrepError>(())
//! ```
//!
//! ### Secret-backed parameters
//!
//! ```rust
//! use grep_directive::{DirectiveBuilder, GrepConfig};
//! use grep_directive::secret::MapSecretLoader;
//!
//! let config = GrepConfig::from_yaml(r#"
//! exclude:
//!   - key: path
//!     pattern:
//!       valueFrom:
//!         secretKeyRef:
//!           name: grep-patterns
//!           key: static-assets
//! "#)?;
//!
//! let loader = MapSecretLoader::new().with_secret("grep-patterns", "static-assets", r"/\.css$/");
//! let root = DirectiveBuilder::new(loader).build(&config)?;
//! assert_eq!(root.children[0].param("pattern"), Some(r"/\.css$/"));
//! # Ok::<(), grep_directive::GrepError>(())
//! ```

pub mod builder;
pub mod config;
pub mod directive;
pub mod error;
pub mod model;
pub mod render;
pub mod secret;

// Builder
pub use builder::{build_group, build_leaf, build_root, DirectiveBuilder, GroupKind, LeafKind, ToDirective};

// Configuration and core types
pub use config::{BuildConfig, RenderConfig};
pub use directive::{Directive, PluginMeta};
pub use error::{GrepError, Result};
pub use model::{AndSection, ExcludeSection, GrepConfig, OrSection, Param, RegexpSection, Section};

// Rendering and secrets
pub use render::{render, render_with};
pub use secret::{MapSecretLoader, NoSecretLoader, SecretLoader, SecretRef};
