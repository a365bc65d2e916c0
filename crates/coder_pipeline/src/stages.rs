//! The four stage functions and their typed results.
//!
//! Every stage follows the same shape: build one exchange, send it once,
//! extract the YAML payload, then check it against the stage's required
//! string fields. Failures are returned as-is; no stage retries.

use crate::{Prompts, extract_yaml};
use coder_core::{DEFAULT_MAX_TOKENS, Message, ModelExchange, ModelPreferences, Stage};
use coder_error::{CoderResult, StageError, StageErrorKind};
use coder_interface::ModelGateway;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Stage 1 output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct ResourceType {
    /// Canonical singular identifier used for every later stage and path
    resource_name: String,
    /// Go type definition file content
    go_type: String,
}

/// Stage 2 output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StorageInterface {
    /// Full replacement content of the storage interface file
    storage_interface_full: String,
}

/// Stage 3 output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct StorageImpl {
    /// Full replacement content of the storage implementation file
    storage_impl_full: String,
}

/// Stage 4 output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Controller {
    /// Controller implementation file content
    controller_impl: String,
    /// Controller test file content
    controller_test: String,
}

/// Everything the controller stage reads.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ControllerInputs {
    resource_name: String,
    state_machine: String,
    go_type: String,
    storage_interface_full: String,
    storage_impl_full: String,
}

impl ControllerInputs {
    /// Bundle the controller stage inputs.
    pub fn new(
        resource_name: impl Into<String>,
        state_machine: impl Into<String>,
        go_type: impl Into<String>,
        storage_interface_full: impl Into<String>,
        storage_impl_full: impl Into<String>,
    ) -> Self {
        Self {
            resource_name: resource_name.into(),
            state_machine: state_machine.into(),
            go_type: go_type.into(),
            storage_interface_full: storage_interface_full.into(),
            storage_impl_full: storage_impl_full.into(),
        }
    }
}

/// Check that `payload` is a mapping whose `fields` are all strings, then
/// deserialize it.
///
/// Absent keys are reported as missing; keys holding anything but a string
/// (null included) are reported as mistyped. A payload that is not a mapping
/// misses every field.
pub fn validate_payload<T: DeserializeOwned>(
    stage: Stage,
    payload: serde_yaml::Value,
    fields: &[&str],
) -> CoderResult<T> {
    let mut missing = Vec::new();
    let mut mistyped = Vec::new();

    match payload.as_mapping() {
        Some(map) => {
            for field in fields {
                match map.get(*field) {
                    None => missing.push(field.to_string()),
                    Some(value) if !value.is_string() => mistyped.push(field.to_string()),
                    Some(_) => {}
                }
            }
        }
        None => missing.extend(fields.iter().map(|f| f.to_string())),
    }

    if !missing.is_empty() || !mistyped.is_empty() {
        return Err(schema_violation(stage, missing, mistyped));
    }

    serde_yaml::from_value(payload).map_err(|e| {
        tracing::error!(%stage, error = %e, "Validated payload failed to deserialize");
        schema_violation(stage, Vec::new(), fields.iter().map(|f| f.to_string()).collect())
    })
}

#[track_caller]
fn schema_violation(
    stage: Stage,
    missing: Vec<String>,
    mistyped: Vec<String>,
) -> coder_error::CoderError {
    tracing::warn!(%stage, ?missing, ?mistyped, "Stage output violates schema");
    StageError::new(StageErrorKind::SchemaViolation {
        stage: stage.to_string(),
        missing,
        mistyped,
    })
    .into()
}

/// True when `name` can be used as a file name fragment and a branch name
/// component: ASCII letters, digits, `_` and `-` only.
///
/// Anything else either breaks `git check-ref-format` (`:`, `~`, `..`,
/// `.lock`) or is a glob character for `git branch --list`.
pub fn is_usable_resource_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Runs individual stages against a gateway.
///
/// # Examples
///
/// ```
/// use coder_pipeline::{Prompts, StageRunner};
///
/// # struct Never;
/// # #[async_trait::async_trait]
/// # impl coder_interface::ModelGateway for Never {
/// #     async fn send(&self, _: &coder_core::ModelExchange) -> coder_error::CoderResult<String> {
/// #         unreachable!()
/// #     }
/// #     fn backend_name(&self) -> &'static str { "never" }
/// # }
/// let runner = StageRunner::new(Never, Prompts::default()).with_max_tokens(4096);
/// assert_eq!(runner.max_tokens(), 4096);
/// ```
#[derive(Debug, Clone)]
pub struct StageRunner<G> {
    gateway: G,
    prompts: Prompts,
    max_tokens: u32,
}

impl<G: ModelGateway> StageRunner<G> {
    /// Create a runner with the default token budget.
    pub fn new(gateway: G, prompts: Prompts) -> Self {
        Self {
            gateway,
            prompts,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Override the per-exchange token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// The gateway every stage calls.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Per-exchange token budget.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    fn exchange(
        &self,
        stage: Stage,
        user_text: String,
        preferences: Option<ModelPreferences>,
    ) -> CoderResult<ModelExchange> {
        let mut builder = ModelExchange::builder();
        builder
            .system_prompt(self.prompts.for_stage(stage))
            .messages(vec![Message::user(user_text)])
            .max_tokens(self.max_tokens);
        if let Some(prefs) = preferences {
            builder.model_preferences(prefs);
        }
        builder
            .build()
            .map_err(|e| coder_error::BuilderError::from(e.to_string()).into())
    }

    async fn call<T: DeserializeOwned>(
        &self,
        stage: Stage,
        user_text: String,
        preferences: Option<ModelPreferences>,
        fields: &[&str],
    ) -> CoderResult<T> {
        let exchange = self.exchange(stage, user_text, preferences)?;
        let response = self.gateway.send(&exchange).await?;
        debug!(%stage, chars = response.len(), "Stage response received");
        let payload = extract_yaml(&response)?;
        validate_payload(stage, payload, fields)
    }

    /// Stage 1: derive the resource name and Go type file.
    #[instrument(skip_all, fields(stage = %Stage::ResourceType))]
    pub async fn resource_type(
        &self,
        sql_schema: &str,
        state_machine: &str,
    ) -> CoderResult<ResourceType> {
        let user_text = format!(
            "<input_sql_schema>{}</input_sql_schema>\n<input_state_machine>{}</input_state_machine>\n",
            sql_schema, state_machine
        );
        let result: ResourceType = self
            .call(
                Stage::ResourceType,
                user_text,
                None,
                &["resource_name", "go_type"],
            )
            .await?;

        if !is_usable_resource_name(&result.resource_name) {
            return Err(schema_violation(
                Stage::ResourceType,
                Vec::new(),
                vec!["resource_name".to_string()],
            ));
        }

        info!(resource_name = %result.resource_name, "Resource type generated");
        Ok(result)
    }

    /// Stage 2: rewrite the storage interface to include the resource.
    #[instrument(skip(self, current_storage_interface), fields(stage = %Stage::StorageInterface))]
    pub async fn storage_interface(
        &self,
        resource_name: &str,
        current_storage_interface: &str,
    ) -> CoderResult<StorageInterface> {
        let user_text = format!(
            "<input_resource_name>{}</input_resource_name>\n<input_storage_interface>{}</input_storage_interface>",
            resource_name, current_storage_interface
        );
        let result = self
            .call(
                Stage::StorageInterface,
                user_text,
                None,
                &["storage_interface_full"],
            )
            .await?;
        info!("Storage interface generated");
        Ok(result)
    }

    /// Stage 3: rewrite the storage implementation. Asks for the strong model.
    #[instrument(skip(self, current_storage_impl), fields(stage = %Stage::StorageImpl))]
    pub async fn storage_impl(
        &self,
        resource_name: &str,
        current_storage_impl: &str,
    ) -> CoderResult<StorageImpl> {
        let user_text = format!(
            "<input_resource_name>{}</input_resource_name>\n<input_storage_impl>{}</input_storage_impl>",
            resource_name, current_storage_impl
        );
        let result = self
            .call(
                Stage::StorageImpl,
                user_text,
                Some(ModelPreferences::quality()),
                &["storage_impl_full"],
            )
            .await?;
        info!("Storage implementation generated");
        Ok(result)
    }

    /// Stage 4: write the controller and its tests.
    #[instrument(skip_all, fields(stage = %Stage::Controller, resource_name = %inputs.resource_name))]
    pub async fn controller(&self, inputs: &ControllerInputs) -> CoderResult<Controller> {
        let user_text = format!(
            "<input_resource_name>{}</input_resource_name>\n\
             <input_state_machine>{}</input_state_machine>\n\
             <input_resource_type>{}</input_resource_type>\n\
             <input_storage_interface>{}</input_storage_interface>\n\
             <input_storage_impl>{}</input_storage_impl>",
            inputs.resource_name,
            inputs.state_machine,
            inputs.go_type,
            inputs.storage_interface_full,
            inputs.storage_impl_full
        );
        let result = self
            .call(
                Stage::Controller,
                user_text,
                None,
                &["controller_impl", "controller_test"],
            )
            .await?;
        info!("Controller generated");
        Ok(result)
    }
}
