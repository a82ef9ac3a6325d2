//! Chat exchange — turns one user message into one reply.
//!
//! A [`ChatService`] is built once at startup. If building it fails the
//! service is [`ChatService::Degraded`] for the life of the process and every
//! chat gets the "not initialized" reply instead of a model call.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::llm::{ChatModel, GeminiModel, LlmError, ModelConfig};
use crate::prompt::{PromptError, PromptTemplate};

/// Reply sent when the service never initialized.
pub const NOT_INITIALIZED_REPLY: &str =
    "Erreur: Le chatbot n'est pas initialisé. Veuillez redémarrer le serveur.";

/// Tone assumed when the request does not name one.
pub const DEFAULT_TONE: &str = "supportive";

/// Errors that prevent the service from becoming ready.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Prompt template error: {0}")]
    Prompt(#[from] PromptError),

    #[error("Model client error: {0}")]
    Model(#[from] LlmError),
}

/// Apology returned when the model call fails. Embeds the raw error text.
pub fn apology(err: &LlmError) -> String {
    format!(
        "Désolé, une erreur est survenue lors du traitement de votre message. \
         Veuillez réessayer. (Erreur: {err})"
    )
}

/// Prompt template plus model client.
#[derive(Debug)]
pub struct ChatChain {
    template: PromptTemplate,
    model: Arc<dyn ChatModel>,
}

impl ChatChain {
    pub fn new(template: PromptTemplate, model: Arc<dyn ChatModel>) -> Self {
        Self { template, model }
    }

    /// Renders the prompt, calls the model and trims the answer.
    pub async fn invoke(&self, message: &str) -> Result<String, LlmError> {
        let prompt = self.template.render(message);
        let text = self.model.complete(&prompt).await?;
        Ok(text.trim().to_string())
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }
}

/// Process-wide chat state. Immutable once built.
#[derive(Debug)]
pub enum ChatService {
    Ready(ChatChain),
    Degraded { reason: String },
}

impl ChatService {
    /// Ready service over the default template and the given model.
    pub fn with_model(model: Arc<dyn ChatModel>) -> Result<Self, InitError> {
        let template = PromptTemplate::cheerbot()?;
        Ok(ChatService::Ready(ChatChain::new(template, model)))
    }

    /// Builds the Gemini-backed service.
    pub fn gemini(config: ModelConfig) -> Result<Self, InitError> {
        let model = GeminiModel::new(config)?;
        Self::with_model(Arc::new(model))
    }

    /// Runs `init` once and degrades instead of failing.
    pub fn initialize<F>(init: F) -> Self
    where
        F: FnOnce() -> Result<Self, InitError>,
    {
        match init() {
            Ok(service) => {
                if let ChatService::Ready(chain) = &service {
                    info!(model = chain.model_name(), "chat service initialized");
                }
                service
            }
            Err(e) => {
                error!(error = %e, "chat service initialization failed, chat is disabled");
                ChatService::degraded(e.to_string())
            }
        }
    }

    pub fn degraded(reason: impl Into<String>) -> Self {
        ChatService::Degraded {
            reason: reason.into(),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ChatService::Ready(_))
    }

    /// Produces the reply for one message. Never fails: model errors become
    /// an apology and a degraded service answers with [`NOT_INITIALIZED_REPLY`].
    pub async fn respond(&self, message: &str) -> String {
        match self {
            ChatService::Degraded { reason } => {
                warn!(%reason, "chat requested but service is not initialized");
                NOT_INITIALIZED_REPLY.to_string()
            }
            ChatService::Ready(chain) => match chain.invoke(message).await {
                Ok(text) => text,
                Err(e) => {
                    error!(model = chain.model_name(), error = %e, "model call failed");
                    apology(&e)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::FakeModel;
    use crate::prompt::SYSTEM_INSTRUCTION;

    #[tokio::test]
    async fn ready_service_trims_model_output() {
        let service =
            ChatService::with_model(Arc::new(FakeModel::replying("\n  I'm here for you.  \n")))
                .unwrap();
        assert_eq!(service.respond("hello").await, "I'm here for you.");
    }

    #[tokio::test]
    async fn message_reaches_model_with_system_instruction() {
        let model = Arc::new(FakeModel::replying("ok"));
        let service = ChatService::with_model(model.clone()).unwrap();
        service.respond("I feel really sad today").await;

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].system, SYSTEM_INSTRUCTION);
        assert_eq!(prompts[0].user, "I feel really sad today");
    }

    #[tokio::test]
    async fn model_failure_becomes_apology_with_error_text() {
        let service = ChatService::with_model(Arc::new(FakeModel::failing("quota exceeded")))
            .unwrap();
        let reply = service.respond("hello").await;
        assert!(reply.starts_with("Désolé"));
        assert!(reply.contains("quota exceeded"));
    }

    #[tokio::test]
    async fn degraded_service_never_calls_model() {
        let service = ChatService::degraded("GEMINI_API_KEY is not set");
        assert!(!service.is_ready());
        assert_eq!(service.respond("hello").await, NOT_INITIALIZED_REPLY);
    }

    #[test]
    fn failed_initialization_degrades() {
        let service = ChatService::initialize(|| {
            Err(InitError::Model(LlmError::NotConfigured("no key".into())))
        });
        match service {
            ChatService::Degraded { reason } => assert!(reason.contains("no key")),
            ChatService::Ready(_) => panic!("expected degraded service"),
        }
    }

    #[test]
    fn missing_key_degrades_gemini_service() {
        let service = ChatService::initialize(|| ChatService::gemini(ModelConfig::new("")));
        assert!(!service.is_ready());
    }

    #[test]
    fn successful_initialization_is_ready() {
        let service =
            ChatService::initialize(|| ChatService::with_model(Arc::new(FakeModel::replying("x"))));
        assert!(service.is_ready());
    }

    #[tokio::test]
    async fn bad_template_degrades_the_service() {
        let model = Arc::new(FakeModel::replying("unused"));
        let service = ChatService::initialize(|| {
            let template = PromptTemplate::new(SYSTEM_INSTRUCTION, "no slot")?;
            Ok(ChatService::Ready(ChatChain::new(template, model.clone())))
        });

        match &service {
            ChatService::Degraded { reason } => assert!(reason.contains("placeholder"), "{reason}"),
            ChatService::Ready(_) => panic!("bad template must not produce a ready service"),
        }
        assert_eq!(service.respond("hello").await, NOT_INITIALIZED_REPLY);
        assert!(model.prompts().is_empty());
    }
}
