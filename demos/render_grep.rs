//! Render a grep filter configuration file as Fluentd configuration.
//!
//! Usage: `cargo run --example render_grep -- <config.yml> [id-prefix]`
//!
//! Without arguments the documented example configuration is rendered.

use anyhow::Context;
use grep_directive::{render, DirectiveBuilder, GrepConfig, NoSecretLoader};
use std::env;

const DOCUMENTED_CONFIG: &str = r#"
regexp:
  - key: elso
    pattern: /^5\d\d$/
  - key: masodik
    pattern: /\.css$/
and:
  - regexp:
      - key: elso
        pattern: /^5\d\d$/
    exclude:
      - key: masodik
        pattern: /\.css$/
"#;

fn main() -> anyhow::Result<()> {
    let mut args = env::args().skip(1);

    let config = match args.next() {
        Some(path) => GrepConfig::from_path(&path)
            .with_context(|| format!("loading grep config from {path}"))?,
        None => GrepConfig::from_yaml(DOCUMENTED_CONFIG)?,
    };
    let id_prefix = args.next().unwrap_or_else(|| "test".to_string());

    let root = DirectiveBuilder::new(NoSecretLoader)
        .build_with_id(&config, &id_prefix)
        .context("building grep directive")?;

    print!("{}", render(&root).context("rendering grep directive")?);
    Ok(())
}
