//! End-to-end tests: configuration files in, Fluentd configuration text out.

use grep_directive::{
    render, DirectiveBuilder, GrepConfig, GrepError, MapSecretLoader, NoSecretLoader,
    RegexpSection,
};
use std::fs;

#[test]
fn test_documented_example_renders_exactly() {
    let config = GrepConfig::from_path("tests/configs/documented.yml")
        .expect("Failed to load documented.yml");
    let expected = fs::read_to_string("tests/configs/documented.fluentd.conf")
        .expect("Failed to read documented.fluentd.conf");

    let root = DirectiveBuilder::new(NoSecretLoader)
        .build_with_id(&config, "test")
        .unwrap();

    assert_eq!(render(&root).unwrap(), expected);
}

#[test]
fn test_documented_example_tree_shape() {
    let config = GrepConfig::from_yaml(
        r#"
regexp:
  - key: elso
    pattern: /^5\d\d$/
and:
  - regexp:
      - key: elso
        pattern: /^5\d\d$/
    exclude:
      - key: masodik
        pattern: /\.css$/
"#,
    )
    .unwrap();

    let root = DirectiveBuilder::new(NoSecretLoader)
        .build_with_id(&config, "test")
        .unwrap();

    assert_eq!(root.label(), "filter");
    assert_eq!(root.child_labels(), vec!["regexp", "and"]);

    let regexp = &root.children[0];
    assert!(regexp.is_leaf());
    assert_eq!(regexp.param("key"), Some("elso"));
    assert_eq!(regexp.param("pattern"), Some(r"/^5\d\d$/"));

    let and = &root.children[1];
    assert_eq!(and.child_labels(), vec!["regexp", "exclude"]);
    assert_eq!(and.children[1].param("key"), Some("masodik"));
    assert_eq!(and.children[1].param("pattern"), Some(r"/\.css$/"));
}

#[test]
fn test_secret_backed_config_renders_resolved_values() {
    let config = GrepConfig::from_path("tests/configs/secret_backed.yml")
        .expect("Failed to load secret_backed.yml");

    let loader = MapSecretLoader::new()
        .with_secret("grep-patterns", "static-assets", r"/\.(css|js)$/")
        .with_secret("grep-patterns", "server-errors", r"/^5\d\d$/");

    let root = DirectiveBuilder::new(loader)
        .build_with_id(&config, "flow_web")
        .unwrap();

    let expected = "\
<filter **>
  @type grep
  @id flow_web_grep
  <exclude>
    key path
    pattern /\\.(css|js)$/
  </exclude>
  <or>
    <regexp>
      key status
      pattern /^5\\d\\d$/
    </regexp>
    <regexp>
      key level
      pattern /^(error|fatal)$/
    </regexp>
  </or>
</filter>
";
    assert_eq!(render(&root).unwrap(), expected);
}

#[test]
fn test_secret_backed_config_without_secrets_fails() {
    let config = GrepConfig::from_path("tests/configs/secret_backed.yml").unwrap();

    let result = DirectiveBuilder::new(NoSecretLoader).build(&config);
    assert_eq!(
        result,
        Err(GrepError::SecretNotFound("grep-patterns".to_string()))
    );
}

#[test]
fn test_partial_secrets_fail_on_missing_key() {
    let config = GrepConfig::from_path("tests/configs/secret_backed.yml").unwrap();

    // The exclude rule resolves, the nested or-group rule does not.
    let loader = MapSecretLoader::new().with_secret("grep-patterns", "static-assets", "x");
    let result = DirectiveBuilder::new(loader).build(&config);

    assert_eq!(
        result,
        Err(GrepError::SecretKeyNotFound {
            secret: "grep-patterns".to_string(),
            key: "server-errors".to_string(),
        })
    );
}

#[test]
fn test_empty_config_renders_bare_filter() {
    let root = DirectiveBuilder::new(NoSecretLoader)
        .build_with_id(&GrepConfig::default(), "noop")
        .unwrap();

    assert_eq!(
        render(&root).unwrap(),
        "<filter **>\n  @type grep\n  @id noop_grep\n</filter>\n"
    );
}

#[test]
fn test_multiline_pattern_stays_inside_its_directive() {
    let config = GrepConfig {
        regexp: vec![RegexpSection::new(
            "message",
            "/x/\n</filter>\n<match **>\n  @type null\n</match>",
        )],
        ..GrepConfig::default()
    };

    let root = DirectiveBuilder::new(NoSecretLoader)
        .build_with_id(&config, "flow")
        .unwrap();
    let text = render(&root).unwrap();

    let expected = "\
<filter **>
  @type grep
  @id flow_grep
  <regexp>
    key message
    pattern \"/x/\\n</filter>\\n<match **>\\n  @type null\\n</match>\"
  </regexp>
</filter>
";
    assert_eq!(text, expected);
    assert_eq!(text.matches("</filter>\n").count(), 1);
}

#[test]
fn test_control_character_in_secret_value_fails_to_render() {
    let config = GrepConfig::from_path("tests/configs/secret_backed.yml").unwrap();
    let loader = MapSecretLoader::new()
        .with_secret("grep-patterns", "static-assets", "/\u{7}/")
        .with_secret("grep-patterns", "server-errors", "/^5/");

    let root = DirectiveBuilder::new(loader).build(&config).unwrap();
    assert!(matches!(render(&root), Err(GrepError::RenderError(_))));
}
