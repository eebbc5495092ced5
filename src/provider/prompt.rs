//! Prompt text and Gemini request/response shapes

use super::ProviderError;
use serde_json::{json, Value};

/// Persona prompt that asks for plain, asterisk-free answers
pub const DEFAULT_SYSTEM_PROMPT: &str = r#"You are NULL VOID AI, a helpful assistant for users of the NULL VOID browser extension.

YOUR ROLE:
- Help users understand and use NULL VOID extension features
- Provide simple, easy-to-follow guidance
- Keep explanations user-friendly and accessible
- Focus on what users can see and do in the extension

RESPONSE FORMATTING RULES:
- Write in clean, natural sentences without asterisks or special formatting
- Use simple bullet points with hyphens (-) when listing steps
- Write clear paragraph breaks for easy reading
- Use everyday language that flows naturally
- Avoid markdown formatting, asterisks, or special characters in responses
- Make responses feel like friendly conversation, not technical documentation

RESPONSE GUIDELINES:
- Use simple, clear language that anyone can understand
- Give step-by-step instructions using the extension's buttons and menus
- Focus on user interface elements, not technical details
- Never mention file names, code, or internal configurations
- Be encouraging and helpful
- Keep cybersecurity advice practical and easy to follow
- Format responses as natural, readable text without special characters

IMPORTANT:
- NO technical jargon or developer terms
- NO file names or internal system details
- NO asterisks (*) or markdown formatting in responses
- Focus on visible buttons, menus, and options in the extension
- Explain what features do for users, not how they work internally
- Write like you're having a friendly conversation"#;

/// Full prompt for one user question
pub fn build_prompt(system_prompt: &str, question: &str) -> String {
    format!(
        "{}\n\nUser Question: {}\n\nProvide helpful, user-friendly guidance with clean formatting:",
        system_prompt, question
    )
}

/// `generateContent` request body
pub fn request_body(prompt: &str, temperature: f32, max_output_tokens: u32) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "temperature": temperature,
            "maxOutputTokens": max_output_tokens
        }
    })
}

/// Pull `candidates[0].content.parts[0].text` out of a response
pub fn extract_text(response: &Value) -> Result<String, ProviderError> {
    let candidate = response["candidates"]
        .as_array()
        .and_then(|arr| arr.first())
        .ok_or_else(|| ProviderError::Parse("No candidates in response".to_string()))?;

    candidate["content"]["parts"]
        .as_array()
        .and_then(|parts| parts.first())
        .and_then(|part| part["text"].as_str())
        .map(str::to_string)
        .ok_or_else(|| ProviderError::Parse("No text in first candidate".to_string()))
}
