// Responder Agent: prompt assembly and completion, or the offline template

use std::sync::Arc;

use crate::agents::retriever::NO_CONTEXT;
use crate::llm::{ChatMessage, ChatRole, CompletionClient, CompletionRequest, LlmError};
use crate::models::{Message, Role};
use tracing::{info, warn};

pub const HISTORY_WINDOW: usize = 8;

pub const NO_COMPLETION_REPLY: &str =
    "I'm sorry, I had trouble generating a response. Please try again.";

const OFFLINE_NO_CONTEXT_REPLY: &str = "I don't have specific information about that in Catherine's profile. You can ask about her work experience, technical skills, education, or leadership roles.";

const SYSTEM_PROMPT: &str = r#"You are CatheTwin, an AI assistant representing Catherine Dalafu, an IT Student majoring in Web and Application Development at Saint Paul University Philippines.

IMPORTANT: Speak in THIRD PERSON about Catherine Dalafu. Always refer to her as "Catherine", "Catherine Dalafu", or "she/her" - never use "I" or "my". You are her digital twin assistant introducing her to others.

Key information about Catherine:
- Born: August 25, 2003
- Address: Cabagan, Isabela, Philippines
- IT Student majoring in Web and Application Development at Saint Paul University Philippines
- Currently pursuing Bachelor of Science in Information Technology
- Passionate about database management, Python, web development, and software engineering
- Strong leader with experience in student government (PSG SITE Representative, JPCS Secretary)
- Completed internship at AusBiz Consulting Australia (August 2025 - October 2025)
- Dean's Lister maintaining excellence in academics and leadership
- Fluent in Filipino, intermediate in English
- Based in Tuguegarao City, Cagayan, Philippines
- Enjoys solving complex technical problems and mentoring others
- Proficient in Python (3 years), SQL/MySQL (3 years), Laravel, NodeJS, React

RESPONSE GUIDELINES:
- Keep responses SHORT and CONCISE (2-3 sentences maximum)
- Answer ONLY what is specifically asked - no extra information
- NO redundant phrases or filler words
- NO phrases like "elevator pitch", "interview preparation", "let me tell you", "here's what", etc.
- Be DIRECT and factual - get straight to the answer
- After your answer, add 2-3 relevant follow-up questions in bullet format like this:

You might also want to ask:
• [Related question 1]
• [Related question 2]
• [Related question 3]

Example format:
Catherine has experience with Python, MySQL, Laravel, NodeJS, and React, with over 3 years in database management and web development.

You might also want to ask:
• What projects has Catherine worked on?
• What was Catherine's role at AusBiz Consulting?
• What are Catherine's leadership experiences?"#;

/// Fixed sampling parameters sent with every completion request.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

pub struct ResponderAgent {
    client: Option<Arc<dyn CompletionClient>>,
    settings: CompletionSettings,
}

impl ResponderAgent {
    /// `client` is `None` when no credential is configured; the agent then
    /// answers from the offline templates.
    pub fn new(client: Option<Arc<dyn CompletionClient>>, settings: CompletionSettings) -> Self {
        Self { client, settings }
    }

    pub fn is_offline(&self) -> bool {
        self.client.is_none()
    }

    pub async fn respond(
        &self,
        message: &str,
        history: &[Message],
        context: &str,
    ) -> Result<String, LlmError> {
        let Some(client) = &self.client else {
            warn!("Responder: no completion credential configured, using offline reply");
            return Ok(offline_reply(context));
        };

        let request = CompletionRequest {
            model: self.settings.model.clone(),
            messages: build_messages(message, history, context),
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        info!("Responder: requesting completion with {} messages", request.messages.len());
        let text = client.complete(&request).await?;

        Ok(text.unwrap_or_else(|| NO_COMPLETION_REPLY.to_string()))
    }
}

/// System prompt, the last [`HISTORY_WINDOW`] turns, then the question with
/// its retrieved context.
pub fn build_messages(message: &str, history: &[Message], context: &str) -> Vec<ChatMessage> {
    let recent = &history[history.len().saturating_sub(HISTORY_WINDOW)..];

    let mut messages = Vec::with_capacity(recent.len() + 2);
    messages.push(ChatMessage::new(ChatRole::System, SYSTEM_PROMPT));
    messages.extend(recent.iter().map(|turn| {
        let role = match turn.role {
            Role::User => ChatRole::User,
            Role::Assistant => ChatRole::Assistant,
        };
        ChatMessage::new(role, turn.content.clone())
    }));
    messages.push(ChatMessage::new(
        ChatRole::User,
        format!("Context from Catherine's profile:\n{context}\n\nQuestion: {message}"),
    ));

    messages
}

pub fn offline_reply(context: &str) -> String {
    if context == NO_CONTEXT {
        OFFLINE_NO_CONTEXT_REPLY.to_string()
    } else {
        format!(
            "Based on Catherine's profile:\n\n{context}\n\nWould you like to know more about any specific aspect of her background?"
        )
    }
}
