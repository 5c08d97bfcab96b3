use serde::Deserialize;

/// Model selection for the two sequential generation stages
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Vision model that turns the uploaded design into a description
    #[serde(default = "default_vision")]
    pub vision: StageConfig,
    /// Code model that turns the description into component sources
    #[serde(default = "default_codegen")]
    pub codegen: StageConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            vision: default_vision(),
            codegen: default_codegen(),
        }
    }
}

/// One model call within the pipeline
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageConfig {
    pub model: String,
    pub temperature: f32,
}

fn default_vision() -> StageConfig {
    StageConfig {
        model: "llava".to_string(),
        temperature: 0.3,
    }
}

fn default_codegen() -> StageConfig {
    StageConfig {
        model: "codellama".to_string(),
        temperature: 0.2,
    }
}
