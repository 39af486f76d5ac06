//! Reel creation payloads.
//!
//! The gateway does not interpret these fields; it only requires that the body
//! decodes into this shape before forwarding it to the queue. Absent and
//! `null` fields decode to their empty value, and optional fields that are
//! empty are left out when the request is re-serialized for the queue.

use crate::models::RunId;
use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateReelRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub project_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icp: IdealClientProfile,
    #[serde(deserialize_with = "null_as_default")]
    pub idea: String,
    #[serde(deserialize_with = "null_as_default")]
    pub flux_model: FluxModelConfig,
    #[serde(deserialize_with = "null_as_default")]
    pub flux_prompt: FluxPromptRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kling_preferences: Option<KlingPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_preferences: Option<CaptionPreferences>,
}

/// Ideal client profile the reel is aimed at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdealClientProfile {
    #[serde(deserialize_with = "null_as_default")]
    pub industry: String,
    #[serde(deserialize_with = "null_as_default")]
    pub audience_pain_points: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desired_outcome: Option<String>,
}

/// Image model selection. `lora_url` points at the fine-tuned weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FluxModelConfig {
    #[serde(deserialize_with = "null_as_default")]
    pub lora_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfg_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FluxPromptRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<i64>,
}

/// Video style preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KlingPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_preset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative_prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guidance_scale: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptionPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_to_action: Option<CallToAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CallToAction {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

/// Body of a `202 Accepted` response to `POST /reels`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReelResponse {
    pub run_id: RunId,
}
