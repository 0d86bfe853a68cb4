use serde::{Deserialize, Serialize};

use crate::models::{Contract, ContractTerms, ContractType};

// Open-Meteo forecast response (only the `current` block is requested)
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub current: CurrentConditions,
}

#[derive(Debug, Deserialize)]
pub struct CurrentConditions {
    pub temperature_2m: f64,
    pub weather_code: i32,
    pub wind_speed_10m: f64,
}

// Generative Language API request/response wrappers
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<PromptContent>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptContent {
    #[serde(default)]
    pub parts: Vec<PromptPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PromptPart {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub temperature: f64,
}

impl GenerateContentRequest {
    pub fn json_prompt(prompt: &str, temperature: f64) -> Self {
        Self {
            contents: vec![PromptContent {
                parts: vec![PromptPart { text: prompt.to_string() }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                temperature,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<PromptContent>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().map(|p| p.text.as_str()).collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

/// Contract offer as produced by the generator; ids are always reassigned
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedContract {
    pub name: String,
    #[serde(rename = "type")]
    pub contract_type: ContractType,
    #[serde(default)]
    pub description: String,
    pub terms: ContractTerms,
    pub duration: u32,
}

impl GeneratedContract {
    pub fn into_offer(self) -> Contract {
        Contract {
            id: uuid::Uuid::new_v4().to_string(),
            name: self.name,
            contract_type: self.contract_type,
            description: self.description,
            terms: self.terms,
            duration: self.duration,
            days_remaining: None,
        }
    }
}
