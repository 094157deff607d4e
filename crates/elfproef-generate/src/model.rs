use serde::{Deserialize, Serialize};

use elfproef_core::DEFAULT_LENGTH;

use crate::sampler::DEFAULT_MAX_ATTEMPTS;

/// Options for the generation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Maximum candidates drawn per generation.
    pub max_attempts: u32,
    /// Seed for reproducible output; OS entropy when absent.
    pub seed: Option<u64>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            seed: None,
        }
    }
}

/// Arguments of a single generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateRequest {
    pub prefix: String,
    pub length: usize,
    pub unique: bool,
}

impl Default for GenerateRequest {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            length: DEFAULT_LENGTH,
            unique: true,
        }
    }
}

impl GenerateRequest {
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }
}

/// Generated and excluded numbers of an engine, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSnapshot {
    pub generated: Vec<String>,
    pub excluded: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_options_fall_back_to_defaults() {
        let options: EngineOptions = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(options.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(options.seed, Some(7));
    }

    #[test]
    fn request_defaults_to_unique_nine_digits() {
        let request: GenerateRequest = serde_json::from_str(r#"{"prefix": "85"}"#).unwrap();
        assert_eq!(request.prefix, "85");
        assert_eq!(request.length, 9);
        assert!(request.unique);
    }
}
