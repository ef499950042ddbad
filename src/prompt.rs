use crate::error::{GenerateError, Result};
use crate::variables::VariableMap;
use std::path::{Path, PathBuf};

/// Placeholder replaced by the raw HTML template
pub const TEMPLATE_HTML_TOKEN: &str = "{{TEMPLATE_HTML}}";

/// Placeholder replaced by the JSON-encoded variables
pub const VARIABLES_JSON_TOKEN: &str = "{{VARIABLES_JSON}}";

/// Reads a required text asset
pub fn load_asset<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| GenerateError::Asset {
        path: path.to_path_buf(),
        source,
    })
}

/// Substitutes both placeholders in a master prompt
pub fn render_prompt(master: &str, template_html: &str, variables_json: &str) -> String {
    master
        .replace(TEMPLATE_HTML_TOKEN, template_html)
        .replace(VARIABLES_JSON_TOKEN, variables_json)
}

/// Assembles prompts from the master prompt asset
///
/// The master prompt is read from disk on every call.
#[derive(Debug, Clone)]
pub struct Templater {
    master_path: PathBuf,
}

impl Templater {
    pub fn new<P: Into<PathBuf>>(master_path: P) -> Self {
        Self {
            master_path: master_path.into(),
        }
    }

    /// Builds the prompt for one run
    ///
    /// Fails when the master prompt cannot be read.
    pub fn build_prompt(&self, template_html: &str, variables: &VariableMap) -> Result<String> {
        let master = load_asset(&self.master_path)?;
        let variables_json = variables.to_json()?;

        let prompt = render_prompt(&master, template_html, &variables_json);
        ::log::info!("Assembled prompt of {} characters", prompt.chars().count());
        Ok(prompt)
    }
}
