use std::path::Path;

use figura_config::{PipelineConfig, StageConfig};
use figura_extract::{ExtractedArtifact, Strategy};
use figura_ollama::{GenerationRequest, OllamaClient};
use serde::Serialize;

use crate::{error::GenerateError, prompts};

/// Body returned by `POST /generate-code/`
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub ui_description: String,
    pub angular_code: ExtractedArtifact,
}

/// Design image to component sources, in two sequential model calls
#[derive(Debug, Clone)]
pub struct Pipeline {
    client: OllamaClient,
    vision: StageConfig,
    codegen: StageConfig,
}

impl Pipeline {
    pub fn new(client: OllamaClient, config: &PipelineConfig) -> Self {
        Self {
            client,
            vision: config.vision.clone(),
            codegen: config.codegen.clone(),
        }
    }

    /// Describe the design at `image`, generate code from the description
    /// and split the completion into component sources
    ///
    /// The code model is never called if the vision call fails.
    pub async fn run(&self, image: &Path) -> Result<GenerateResponse, GenerateError> {
        let request = GenerationRequest::new(&self.vision.model, prompts::VISION_PROMPT)
            .with_image(image)
            .with_temperature(self.vision.temperature);

        let ui_description = self
            .client
            .generate(&request)
            .await
            .map_err(|source| GenerateError::vision(&self.vision.model, source))?;

        tracing::info!(model = %self.vision.model, chars = ui_description.len(), "described design");

        let request = GenerationRequest::new(&self.codegen.model, prompts::codegen_prompt(&ui_description))
            .with_temperature(self.codegen.temperature);

        let completion = self
            .client
            .generate(&request)
            .await
            .map_err(|source| GenerateError::codegen(&self.codegen.model, source))?;

        let (angular_code, strategy) = figura_extract::extract_with_strategy(&completion);

        tracing::info!(
            model = %self.codegen.model,
            strategy = strategy.map_or("none", Strategy::name),
            "generated component sources"
        );

        Ok(GenerateResponse {
            ui_description,
            angular_code,
        })
    }
}
