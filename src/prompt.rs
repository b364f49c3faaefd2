use crate::llm::parse::response_schema_example;
use crate::model::GenerationInput;

pub const SYSTEM_PROMPT: &str =
    "你是一名资深的小红书文案写手，擅长创作口语化、有感染力、让人忍不住下单的种草内容。";

pub const VARIANT_COUNT: usize = 3;

const FEATURE_SEPARATOR: &str = "、";
const NO_FEATURES: &str = "无";
const NO_AUDIENCE: &str = "无特定人群";

/// Renders the user instruction for one generation request.
pub fn build(input: &GenerationInput) -> String {
    let style = input.style().label();
    let features = if input.features().is_empty() {
        NO_FEATURES.to_string()
    } else {
        input.features().join(FEATURE_SEPARATOR)
    };
    let audience = if input.target_audience().is_empty() {
        NO_AUDIENCE
    } else {
        input.target_audience()
    };

    let mut prompt = String::new();
    prompt.push_str(&format!(
        "请根据以下信息，从{VARIANT_COUNT}个不同角度各写一条{style}。\n\n"
    ));
    prompt.push_str("写作要求：\n");
    prompt.push_str("1. 贴合小红书平台风格，口语化、接地气\n");
    prompt.push_str("2. 每条正文控制在200到300字\n");
    prompt.push_str("3. 适当加入emoji表情和话题标签\n");
    prompt.push_str("4. 突出产品卖点，击中用户痛点\n");
    prompt.push_str("5. 要有强烈的种草力和感染力\n\n");
    prompt.push_str("输入信息：\n");
    prompt.push_str(&format!("- 话题：{}\n", input.topic()));
    prompt.push_str(&format!("- 产品：{}\n", input.product_name()));
    prompt.push_str(&format!("- 产品特点：{features}\n"));
    prompt.push_str(&format!("- 目标人群：{audience}\n"));
    prompt.push_str(&format!("- 文案风格：{style}\n\n"));
    prompt.push_str(&format!(
        "请只返回一个JSON对象，copies数组中恰好包含{VARIANT_COUNT}条文案，\
         每条的tags和emojis各包含3项，格式如下：\n"
    ));
    prompt.push_str(&response_schema_example());
    prompt
}
