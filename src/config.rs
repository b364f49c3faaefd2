use anyhow::{Result, anyhow};
use std::time::Duration;

pub const API_KEY_ENV: &str = "SILICONFLOW_API_KEY";
pub const BASE_URL_ENV: &str = "SILICONFLOW_BASE_URL";
pub const MODEL_ENV: &str = "SILICONFLOW_MODEL";

pub const DEFAULT_BASE_URL: &str = "https://api.siliconflow.cn/v1";
pub const DEFAULT_MODEL: &str = "Qwen/Qwen2.5-7B-Instruct";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Endpoint settings for the completion client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    /// Upper bound for one request, connection to last body byte.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Flags win over environment variables. The credential has no default.
    pub fn resolve(key_arg: Option<&str>, model_arg: Option<&str>) -> Result<Self> {
        resolve_with(key_arg, model_arg, get_env)
    }
}

fn resolve_with(
    key_arg: Option<&str>,
    model_arg: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig> {
    let api_key = non_empty(key_arg)
        .or_else(|| env(API_KEY_ENV))
        .ok_or_else(|| anyhow!("API key not found (set {} or pass --key)", API_KEY_ENV))?;
    let model = non_empty(model_arg)
        .or_else(|| env(MODEL_ENV))
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let base_url = env(BASE_URL_ENV)
        .map(|value| value.trim_end_matches('/').to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    Ok(ClientConfig {
        base_url,
        api_key,
        model,
        timeout: DEFAULT_TIMEOUT,
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub(crate) fn get_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
