pub mod openai;

use crate::error::Result;

pub use openai::OpenAiClient;

/// Remote side of the pipeline: turns an assembled prompt into a document
#[allow(async_fn_in_trait)]
pub trait Generator {
    /// Model identifier used for the request
    fn model(&self) -> &str;

    /// Generates the document text for a prompt
    async fn generate(&self, prompt: &str) -> Result<String>;
}
