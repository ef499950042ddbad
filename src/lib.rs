// Re-export modules
pub mod config;
pub mod error;
pub mod fetcher;
pub mod generators;
pub mod keywords;
pub mod output;
pub mod parsers;
pub mod pipeline;
pub mod prompt;
pub mod results;
pub mod variables;

// Re-export commonly used types for convenience
pub use config::GeneratorConfig;
pub use error::{GenerateError, Result};
pub use fetcher::fetch_meta;
pub use generators::{Generator, OpenAiClient};
pub use keywords::select_keyword;
pub use pipeline::{Pipeline, PreparedPrompt};
pub use prompt::Templater;
pub use results::PageMeta;
pub use variables::{VariableMap, build_variables};
