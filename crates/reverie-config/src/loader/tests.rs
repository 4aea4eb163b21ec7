//! Tests for config discovery and merging.

use super::*;
use crate::{AgentConfig, MemoryConfig, ModelConfig};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

/// An empty document yields the defaults.
#[test]
fn parse_minimal_config() {
    let config = ReverieConfig::load_from_str("{}").expect("config");
    assert_eq!(config.memory.path, PathBuf::from("core_memories.json"));
    assert_eq!(
        config.prompt.template_path,
        Some(PathBuf::from("prompt.txt"))
    );
    assert_eq!(config.model.name, "gpt-4o-mini");
    assert_eq!(config.model.api_key_env, "OPENAI_API_KEY");
    assert_eq!(config.agent.max_tool_iterations, 15);
    assert!(config.agent.handle_parsing_errors);
}

/// JSON5 syntax (comments, unquoted keys, trailing commas) is accepted.
#[test]
fn parse_json5_syntax() {
    let json5 = r#"{
        // where memories live
        memory: { path: "data/memories.json", },
        prompt: { template_path: null },
        model: { name: "gpt-4.1", temperature: 1 },
    }"#;
    let config = ReverieConfig::load_from_str(json5).expect("config");
    assert_eq!(config.memory.path, PathBuf::from("data/memories.json"));
    assert_eq!(config.prompt.template_path, None);
    assert_eq!(config.model.name, "gpt-4.1");
    assert_eq!(config.model.temperature, 1.0);
}

#[test]
fn rejects_unknown_top_level_key() {
    let err = ReverieConfig::load_from_str(r#"{ unexpected: true }"#).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("unknown key"));
    assert!(msg.contains("unexpected"));
}

#[test]
fn rejects_unknown_nested_key() {
    let err = ReverieConfig::load_from_str(r#"{ memory: { file: "x.json" } }"#).unwrap_err();
    assert!(format!("{err}").contains("memory.file"));
}

#[test]
fn rejects_wrong_types() {
    let err = ReverieConfig::load_from_str(r#"{ agent: { max_tool_iterations: "ten" } }"#)
        .unwrap_err();
    assert!(format!("{err}").contains("agent.max_tool_iterations"));

    let err = ReverieConfig::load_from_str(r#"{ agent: { handle_parsing_errors: 1 } }"#)
        .unwrap_err();
    assert!(format!("{err}").contains("agent.handle_parsing_errors"));
}

#[test]
fn rejects_invalid_values() {
    let err = ReverieConfig::load_from_str(r#"{ model: { temperature: 3.5 } }"#).unwrap_err();
    assert!(format!("{err}").contains("model.temperature"));

    let err = ReverieConfig::load_from_str(r#"{ agent: { max_tool_iterations: 0 } }"#)
        .unwrap_err();
    assert!(format!("{err}").contains("agent.max_tool_iterations"));

    let err = ReverieConfig::load_from_str(r#"{ memory: { path: "" } }"#).unwrap_err();
    assert!(format!("{err}").contains("memory.path"));
}

#[test]
fn rejects_malformed_json5() {
    let err = ReverieConfig::load_from_str("{ memory: ").unwrap_err();
    match err {
        ConfigError::Parse { layer, .. } => assert_eq!(layer, "inline"),
        other => panic!("unexpected error: {other:?}"),
    }
}

/// Later layers win and untouched keys survive; layers are reported in order.
#[test]
fn layers_merge_in_precedence_order() {
    let temp = TempDir::new().expect("tmp");
    let root = temp.path();
    let cwd = root.join("work");
    fs::create_dir_all(&cwd).expect("cwd");

    let user_config = root.join("user.json5");
    write_json5(
        &user_config,
        r#"{ model: { name: "user-model", temperature: 0.2 }, memory: { path: "user.json" } }"#,
    );
    write_json5(
        &cwd.join(CONFIG_FILE_NAME),
        r#"{ model: { name: "cwd-model" } }"#,
    );
    write_json5(
        &cwd.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
        r#"{ memory: { path: "project.json" } }"#,
    );
    let explicit = root.join("explicit.json5");
    write_json5(&explicit, r#"{ agent: { max_tool_iterations: 3 } }"#);

    let options = LoadOptions {
        cwd: cwd.clone(),
        user_config: Some(user_config),
        config_file: Some(explicit),
        overrides: ConfigOverrides::default(),
    };
    let layered = ReverieConfig::load(&options).expect("layered");

    let sources = layered
        .layers
        .iter()
        .map(|layer| layer.source)
        .collect::<Vec<_>>();
    assert_eq!(
        sources,
        vec![
            ConfigSource::User,
            ConfigSource::Cwd,
            ConfigSource::Project,
            ConfigSource::Explicit
        ]
    );
    assert_eq!(layered.config.model.name, "cwd-model");
    assert_eq!(layered.config.model.temperature, 0.2);
    assert_eq!(layered.config.memory.path, PathBuf::from("project.json"));
    assert_eq!(layered.config.agent.max_tool_iterations, 3);
}

/// Command-line overrides beat every file and are reported as their own layer.
#[test]
fn overrides_take_precedence_over_files() {
    let temp = TempDir::new().expect("tmp");
    write_json5(
        &temp.path().join(CONFIG_FILE_NAME),
        r#"{ model: { name: "file-model", temperature: 0.3 }, memory: { path: "file.json" } }"#,
    );
    let options = LoadOptions::new(temp.path())
        .without_user_layer()
        .with_overrides(ConfigOverrides {
            model: Some("cli-model".to_string()),
            memory_path: Some(PathBuf::from("cli.json")),
            prompt_template_path: Some(PathBuf::from("persona.txt")),
        });
    let layered = ReverieConfig::load(&options).expect("layered");

    assert_eq!(layered.config.model.name, "cli-model");
    assert_eq!(layered.config.model.temperature, 0.3);
    assert_eq!(layered.config.memory.path, PathBuf::from("cli.json"));
    assert_eq!(
        layered.config.prompt.template_path,
        Some(PathBuf::from("persona.txt"))
    );
    let last = layered.layers.last().expect("layer");
    assert_eq!(last.source, ConfigSource::Overrides);
    assert_eq!(last.to_string(), "overrides");
}

/// An empty override is still validated like a file value.
#[test]
fn empty_override_is_rejected() {
    let temp = TempDir::new().expect("tmp");
    let options = LoadOptions::new(temp.path())
        .without_user_layer()
        .with_overrides(ConfigOverrides {
            model: Some("  ".to_string()),
            ..ConfigOverrides::default()
        });
    let err = ReverieConfig::load(&options).unwrap_err();
    assert!(format!("{err}").contains("model.name"));
}

#[test]
fn no_files_uses_defaults() {
    let temp = TempDir::new().expect("tmp");
    let options = LoadOptions::new(temp.path()).without_user_layer();
    let layered = ReverieConfig::load(&options).expect("layered");
    assert!(layered.layers.is_empty());
    assert_eq!(layered.config, ReverieConfig::default());
}

#[test]
fn explicit_file_must_exist() {
    let temp = TempDir::new().expect("tmp");
    let missing = temp.path().join("missing.json5");
    let options = LoadOptions::new(temp.path())
        .without_user_layer()
        .with_config_file(&missing);
    let err = ReverieConfig::load(&options).unwrap_err();
    match err {
        ConfigError::Read { layer, source } => {
            assert!(layer.starts_with("explicit("));
            assert_eq!(source.kind(), ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// The same file reached twice is applied once.
#[test]
fn duplicate_file_is_applied_once() {
    let temp = TempDir::new().expect("tmp");
    let cwd_file = temp.path().join(CONFIG_FILE_NAME);
    write_json5(&cwd_file, r#"{ model: { name: "cwd-model" } }"#);
    let options = LoadOptions::new(temp.path())
        .without_user_layer()
        .with_config_file(&cwd_file);
    let layered = ReverieConfig::load(&options).expect("layered");
    assert_eq!(layered.layers.len(), 1);
    assert_eq!(layered.layers[0].source, ConfigSource::Cwd);
}

/// Invalid layers report which file failed.
#[test]
fn invalid_layer_is_labelled() {
    let temp = TempDir::new().expect("tmp");
    write_json5(
        &temp.path().join(CONFIG_FILE_NAME),
        r#"{ prompt: { template: "x" } }"#,
    );
    let options = LoadOptions::new(temp.path()).without_user_layer();
    let err = ReverieConfig::load(&options).unwrap_err();
    let msg = format!("{err}");
    assert!(msg.contains("cwd("));
    assert!(msg.contains("prompt.template"));
}

#[test]
fn builder_sets_sections() {
    let config = ReverieConfig::builder()
        .memory(MemoryConfig {
            path: PathBuf::from("m.json"),
        })
        .model(ModelConfig {
            name: "gpt-4.1".to_string(),
            ..ModelConfig::default()
        })
        .agent(AgentConfig {
            max_tool_iterations: 2,
            handle_parsing_errors: false,
        })
        .build();
    config.validate().expect("valid");
    assert_eq!(config.memory.path, PathBuf::from("m.json"));
    assert_eq!(config.model.name, "gpt-4.1");
    assert_eq!(config.agent.max_tool_iterations, 2);
    assert_eq!(
        config.prompt.template_path,
        Some(PathBuf::from("prompt.txt"))
    );
}
