//! Builds upstream chat-completion requests from API input.

use config::PromptTemplate;
use inference::{ChatCompletionParams, ChatMessage};

/// Fixed user-turn instruction; the real content travels in the system prompt.
pub const DRAFTING_INSTRUCTION: &str = "请严格按照系统提示中的要求生成或润色公文内容。";

/// The two messages sent upstream for one generation request.
#[derive(Debug, Clone)]
pub struct PromptEnvelope {
    pub system_prompt: String,
    pub user_message: String,
}

impl PromptEnvelope {
    /// Renders the template with the user's input, prefixed with the document
    /// type and mode as labeled hint lines when they are not `"auto"`.
    pub fn build(template: &PromptTemplate, input: &str, mode: &str, doc_type: &str) -> Self {
        let mut merged = input.to_string();
        if !doc_type.is_empty() && doc_type != "auto" {
            merged = format!("文种：{}\n{}", doc_type, merged);
        }
        if !mode.is_empty() && mode != "auto" {
            merged = format!("模式：{}\n{}", mode, merged);
        }

        Self {
            system_prompt: template.render(&merged),
            user_message: DRAFTING_INSTRUCTION.to_string(),
        }
    }

    pub fn into_params(self, model: &str, temperature: f32) -> ChatCompletionParams {
        ChatCompletionParams {
            model: model.to_string(),
            messages: vec![
                ChatMessage::system(self.system_prompt),
                ChatMessage::user(self.user_message),
            ],
            temperature: Some(temperature),
            stream: None,
        }
    }
}
