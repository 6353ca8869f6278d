//! Invoke tool use case.
//!
//! Validates a request against a registered model, builds the argument
//! vector, screens it, runs the command and extracts the response text.

use crate::config::{ExecutionParams, ToolSettings};
use crate::ports::command_runner::{CommandRunnerPort, RunError};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use askcli_domain::core::string::truncate;
use askcli_domain::{
    ArgumentScreen, BuildError, CapabilityModel, DefaultRequestValidator, InvocationBuilder,
    InvocationRequest, InvocationVector, RequestError, RequestValidator, ScreeningError,
    extract_text,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum InvokeToolError {
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] RequestError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("Rejected argument: {0}")]
    Rejected(#[from] ScreeningError),

    #[error(transparent)]
    Run(#[from] RunError),
}

/// A screened vector ready to be spawned.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedInvocation {
    pub vector: InvocationVector,
    /// Output is line-delimited JSON events
    pub structured: bool,
}

#[derive(Debug, Clone)]
pub struct InvokeToolOutput {
    pub vector: InvocationVector,
    /// Trimmed stdout as produced by the command
    pub raw: String,
    /// Extracted response text
    pub text: String,
    pub structured: bool,
}

pub struct InvokeToolUseCase {
    runner: Arc<dyn CommandRunnerPort>,
    builder: InvocationBuilder,
    validator: Arc<dyn RequestValidator>,
    screen: ArgumentScreen,
    progress: Arc<dyn ProgressNotifier>,
    params: ExecutionParams,
}

impl InvokeToolUseCase {
    pub fn new(runner: Arc<dyn CommandRunnerPort>) -> Self {
        Self {
            runner,
            builder: InvocationBuilder::default(),
            validator: Arc::new(DefaultRequestValidator),
            screen: ArgumentScreen::default(),
            progress: Arc::new(NoProgress),
            params: ExecutionParams::default(),
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_builder(mut self, builder: InvocationBuilder) -> Self {
        self.builder = builder;
        self
    }

    pub fn with_validator(mut self, validator: Arc<dyn RequestValidator>) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_screen(mut self, screen: ArgumentScreen) -> Self {
        self.screen = screen;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressNotifier>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    /// Everything short of spawning: validate, build, screen.
    pub fn prepare(
        &self,
        model: &CapabilityModel,
        settings: &ToolSettings,
        request: &InvocationRequest,
    ) -> Result<PreparedInvocation, InvokeToolError> {
        self.validator.validate(request, model)?;
        let vector = self
            .builder
            .build_with_defaults(model, request, settings.default_args())?;
        self.screen.screen(&vector)?;
        Ok(PreparedInvocation {
            vector,
            structured: self.builder.wants_structured(model, request),
        })
    }

    pub async fn execute(
        &self,
        model: &CapabilityModel,
        settings: &ToolSettings,
        request: &InvocationRequest,
    ) -> Result<InvokeToolOutput, InvokeToolError> {
        let PreparedInvocation { vector, structured } = self.prepare(model, settings, request)?;
        let timeout = settings.timeout.unwrap_or(self.params.timeout);

        info!(
            tool = %model.tool_name,
            prompt = %truncate(vector.prompt().unwrap_or(""), self.params.max_prompt_log_length),
            "Invoking tool"
        );
        debug!(command = %model.command, args = %vector, timeout_secs = timeout.as_secs(), "Spawning");

        self.progress.on_run_start(&model.tool_name, &vector);
        let result = self
            .runner
            .run(&model.command, vector.args(), timeout, &settings.env)
            .await;
        self.progress.on_run_complete(&model.tool_name, result.is_ok());

        let raw = result?;
        let text = extract_text(&raw, structured);
        Ok(InvokeToolOutput {
            vector,
            raw,
            text,
            structured,
        })
    }
}
