//! Summaries and dialogue: model output when possible, templates otherwise.

use rmai_core::{Location, Resident};
use tracing::{debug, warn};

use crate::config::GenerationConfig;
use crate::openai::ChatClient;
use crate::prompts;

/// Produces narrator text. Never fails: without a configured client, or when
/// the client gives up, the matching template is returned.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    chat: Option<ChatClient>,
}

/// Backend chosen for a single generation call.
enum Backend<'a> {
    Remote(&'a ChatClient),
    Template,
}

impl Generator {
    pub fn new(chat: ChatClient) -> Self {
        Self { chat: Some(chat) }
    }

    /// Generator that only ever uses templates.
    pub fn template_only() -> Self {
        Self::default()
    }

    /// Use OpenAI when `OPENAI_API_KEY` is set, templates otherwise.
    pub fn from_env(config: GenerationConfig) -> Self {
        match ChatClient::from_env(config) {
            Ok(chat) => Self::new(chat),
            Err(e) => {
                debug!(error = %e, "no chat client, using templates");
                Self::template_only()
            }
        }
    }

    pub fn has_remote(&self) -> bool {
        self.chat.is_some()
    }

    fn backend(&self) -> Backend<'_> {
        match &self.chat {
            Some(chat) => Backend::Remote(chat),
            None => Backend::Template,
        }
    }

    /// Four to six sentences about `location`.
    pub async fn summarize_location(&self, location: &Location) -> String {
        self.generate("summary", prompts::summary_prompt(location), || {
            prompts::summary_template(location)
        })
        .await
    }

    /// A short exchange between two characters.
    pub async fn generate_dialogue(&self, a: &Resident, b: &Resident) -> String {
        self.generate("dialogue", prompts::dialogue_prompt(a, b), || {
            prompts::dialogue_template(a, b)
        })
        .await
    }

    async fn generate(
        &self,
        kind: &str,
        prompt: String,
        template: impl FnOnce() -> String,
    ) -> String {
        match self.backend() {
            Backend::Remote(chat) => match chat.complete(&prompt).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(kind, error = %e, "generation failed, using template");
                    template()
                }
            },
            Backend::Template => template(),
        }
    }
}
