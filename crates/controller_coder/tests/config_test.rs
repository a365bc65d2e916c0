// Configuration layering tests.

use controller_coder::{BackendKind, CoderConfig, CoderErrorKind, ControllerCoder};
use std::io::Write;

#[test]
fn test_bundled_defaults() -> anyhow::Result<()> {
    let config = CoderConfig::from_toml_str("")?;

    assert_eq!(*config.backend(), BackendKind::Direct);
    assert!(config.code_base().is_none());
    assert_eq!(config.models().fast(), "gemini-2.0-flash");
    assert_eq!(config.models().strong(), "gemini-2.5-pro-exp-03-25");
    assert_eq!(*config.generation().max_tokens(), 32_768);
    assert_eq!(*config.generation().max_retries(), 5);
    assert_eq!(config.git().branch_prefix(), "ai-impl-");
    assert_eq!(config.git().user_name(), "neutree-ai-coder");
    assert_eq!(
        config.git().format_commands(),
        &vec!["make mockgen".to_string(), "make fmt".to_string()]
    );
    assert!(config.git().base_ref().is_none());
    Ok(())
}

#[test]
fn test_partial_overrides_keep_other_defaults() -> anyhow::Result<()> {
    let config = CoderConfig::from_toml_str(
        r#"
code_base = "/srv/neutree"

[generation]
max_tokens = 8192
max_retries = 2
initial_backoff_ms = 100
max_delay_secs = 5

[git]
base_ref = "origin/main"

[prompts]
controller = "Write the controller."
"#,
    )?;

    assert_eq!(
        config.code_base().as_deref(),
        Some(std::path::Path::new("/srv/neutree"))
    );
    assert_eq!(*config.generation().max_tokens(), 8192);
    assert_eq!(config.git().base_ref().as_deref(), Some("origin/main"));
    assert_eq!(*config.git().max_branch_attempts(), 100);
    assert_eq!(config.prompts().controller(), "Write the controller.");
    assert!(config.prompts().storage_impl().contains("storage_impl_full"));

    let direct = config.direct_config()?;
    assert_eq!(*direct.max_retries(), 2);
    assert_eq!(*direct.initial_backoff_ms(), 100);
    assert_eq!(direct.fast_model(), "gemini-2.0-flash");
    Ok(())
}

#[test]
fn test_from_file() -> anyhow::Result<()> {
    let mut file = tempfile::NamedTempFile::with_suffix(".toml")?;
    writeln!(file, "backend = \"sampling\"\n[models]\nfast = \"f\"\nstrong = \"s\"")?;

    let config = CoderConfig::from_file(file.path())?;

    assert_eq!(*config.backend(), BackendKind::Sampling);
    assert_eq!(config.models().fast(), "f");
    Ok(())
}

#[test]
fn test_invalid_backend_is_config_error() {
    let err = CoderConfig::from_toml_str("backend = \"carrier-pigeon\"").unwrap_err();
    assert!(matches!(err.kind(), CoderErrorKind::Config(_)));
}

#[test]
fn test_require_code_base() -> anyhow::Result<()> {
    let config = CoderConfig::from_toml_str("")?;
    assert!(config.require_code_base().is_err());

    let config = config.with_code_base("/tmp/checkout");
    assert_eq!(
        config.require_code_base()?,
        std::path::Path::new("/tmp/checkout")
    );
    Ok(())
}

#[test]
fn test_sampling_backend_cannot_be_built_from_config() -> anyhow::Result<()> {
    let config = CoderConfig::from_toml_str("")?.with_backend(BackendKind::Sampling);
    let Err(err) = ControllerCoder::from_config(&config) else {
        panic!("the sampling backend needs a client-provided channel");
    };
    assert!(matches!(err.kind(), CoderErrorKind::Config(_)));
    Ok(())
}
