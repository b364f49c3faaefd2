use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MAX_FEATURES: usize = 5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyStyle {
    #[default]
    #[serde(alias = "planting")]
    Seeding,
    Review,
    Tutorial,
    Story,
}

impl CopyStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyStyle::Seeding => "seeding",
            CopyStyle::Review => "review",
            CopyStyle::Tutorial => "tutorial",
            CopyStyle::Story => "story",
        }
    }

    /// Label embedded in the model instruction.
    pub fn label(&self) -> &'static str {
        match self {
            CopyStyle::Seeding => "种草文案",
            CopyStyle::Review => "测评文案",
            CopyStyle::Tutorial => "教程文案",
            CopyStyle::Story => "故事文案",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            CopyStyle::Seeding => "种草",
            CopyStyle::Review => "测评",
            CopyStyle::Tutorial => "教程",
            CopyStyle::Story => "故事",
        }
    }
}

impl fmt::Display for CopyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CopyStyle {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "seeding" | "planting" => Ok(CopyStyle::Seeding),
            "review" => Ok(CopyStyle::Review),
            "tutorial" => Ok(CopyStyle::Tutorial),
            "story" => Ok(CopyStyle::Story),
            other => Err(format!(
                "unknown style '{}' (expected seeding, review, tutorial or story)",
                other
            )),
        }
    }
}

/// A submitted generation request. Only built through [`InputDraft::submit`]
/// or deserialized from history, so it never changes after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationInput {
    topic: String,
    product_name: String,
    #[serde(default)]
    features: Vec<String>,
    #[serde(default)]
    target_audience: String,
    #[serde(default)]
    style: CopyStyle,
}

impl GenerationInput {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    pub fn target_audience(&self) -> &str {
        &self.target_audience
    }

    pub fn style(&self) -> CopyStyle {
        self.style
    }
}

/// Form state collected before submission.
#[derive(Debug, Clone, Default)]
pub struct InputDraft {
    pub topic: String,
    pub product_name: String,
    pub target_audience: String,
    pub style: CopyStyle,
    features: Vec<String>,
}

impl InputDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Appends a feature. Blank values are ignored; a sixth feature is rejected.
    pub fn add_feature(&mut self, feature: &str) -> Result<()> {
        let feature = feature.trim();
        if feature.is_empty() {
            return Ok(());
        }
        if self.features.len() >= MAX_FEATURES {
            return Err(anyhow!(
                "at most {} features are allowed (rejected '{}')",
                MAX_FEATURES,
                feature
            ));
        }
        self.features.push(feature.to_string());
        Ok(())
    }

    pub fn remove_feature(&mut self, index: usize) -> Option<String> {
        if index < self.features.len() {
            Some(self.features.remove(index))
        } else {
            None
        }
    }

    pub fn missing_topic(&self) -> bool {
        self.topic.trim().is_empty()
    }

    pub fn missing_product_name(&self) -> bool {
        self.product_name.trim().is_empty()
    }

    pub fn submit(self) -> Result<GenerationInput> {
        let topic = self.topic.trim().to_string();
        if topic.is_empty() {
            return Err(anyhow!("topic must not be empty"));
        }
        let product_name = self.product_name.trim().to_string();
        if product_name.is_empty() {
            return Err(anyhow!("product name must not be empty"));
        }
        Ok(GenerationInput {
            topic,
            product_name,
            features: self.features,
            target_audience: self.target_audience.trim().to_string(),
            style: self.style,
        })
    }
}

#[cfg(test)]
pub(crate) fn sample_input() -> GenerationInput {
    let mut draft = InputDraft::new();
    draft.topic = "夏日护肤".to_string();
    draft.product_name = "清透防晒霜".to_string();
    draft.target_audience = "学生党".to_string();
    draft.add_feature("轻薄不油腻").unwrap();
    draft.add_feature("SPF50").unwrap();
    draft.submit().unwrap()
}
