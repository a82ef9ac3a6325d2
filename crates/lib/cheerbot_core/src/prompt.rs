//! Prompt template — fixed system instruction plus a single user turn.

use thiserror::Error;

/// Placeholder substituted with the user's message in the human template.
pub const TEXT_PLACEHOLDER: &str = "{text}";

/// Persona and behavior rules sent with every request.
pub const SYSTEM_INSTRUCTION: &str = concat!(
    "You are a highly friendly, engaging, and supportive AI conversation partner. ",
    "Your main goal is to mirror and enhance the user's emotional state. ",
    "1. When the user is positive or curious: Use lighthearted, playful language and inject positive humor. ",
    "2. When the user is negative, stressed, or sad: Be deeply empathetic, supportive, and comforting. ",
    "After validating their feelings, **you MUST recommend a simple activity, a casual game, or a small ",
    "distraction task** to help them forget the stress and boost their mood. ",
    "Maintain a warm, enthusiastic, and highly responsive tone. ",
    "IMPORTANT: Always respond in the same language as the user's message. ",
    "If the user writes in French, respond in French. If in English, respond in English."
);

/// Errors raised while building a template.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("System instruction is empty")]
    EmptySystemInstruction,

    #[error("Human template is missing the {{text}} placeholder")]
    MissingPlaceholder,
}

/// A rendered prompt, ready to hand to a model client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Reusable system + human template pair.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    system: String,
    human: String,
}

impl PromptTemplate {
    /// Builds a template, validating that the human part takes the user text.
    pub fn new(system: impl Into<String>, human: impl Into<String>) -> Result<Self, PromptError> {
        let system = system.into();
        let human = human.into();
        if system.trim().is_empty() {
            return Err(PromptError::EmptySystemInstruction);
        }
        if !human.contains(TEXT_PLACEHOLDER) {
            return Err(PromptError::MissingPlaceholder);
        }
        Ok(Self { system, human })
    }

    /// The default Cheerbot template: [`SYSTEM_INSTRUCTION`] and a bare user turn.
    pub fn cheerbot() -> Result<Self, PromptError> {
        Self::new(SYSTEM_INSTRUCTION, TEXT_PLACEHOLDER)
    }

    /// Renders the template for one user message.
    ///
    /// Only the template is scanned for the placeholder, so braces inside
    /// `text` pass through untouched.
    pub fn render(&self, text: &str) -> Prompt {
        Prompt {
            system: self.system.clone(),
            user: self.human.replace(TEXT_PLACEHOLDER, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cheerbot_template_renders_message_as_user_turn() {
        let template = PromptTemplate::cheerbot().unwrap();
        let prompt = template.render("I feel really sad today");
        assert_eq!(prompt.system, SYSTEM_INSTRUCTION);
        assert_eq!(prompt.user, "I feel really sad today");
    }

    #[test]
    fn placeholder_inside_message_is_not_expanded() {
        let template = PromptTemplate::new("sys", "User said: {text}").unwrap();
        let prompt = template.render("literal {text} here");
        assert_eq!(prompt.user, "User said: literal {text} here");
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        let err = PromptTemplate::new("sys", "no slot").unwrap_err();
        assert!(matches!(err, PromptError::MissingPlaceholder));
    }

    #[test]
    fn blank_system_instruction_is_rejected() {
        let err = PromptTemplate::new("   ", "{text}").unwrap_err();
        assert!(matches!(err, PromptError::EmptySystemInstruction));
    }

    #[test]
    fn system_instruction_keeps_language_rule() {
        assert!(SYSTEM_INSTRUCTION.contains("same language as the user's message"));
    }
}
