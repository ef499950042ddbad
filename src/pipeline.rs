use crate::config::{self, GeneratorConfig};
use crate::error::Result;
use crate::fetcher;
use crate::generators::Generator;
use crate::keywords;
use crate::output;
use crate::prompt::{self, Templater};
use crate::results::PageMeta;
use crate::variables::{self, VariableMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything produced before the generation call
#[derive(Debug, Clone)]
pub struct PreparedPrompt {
    pub meta: PageMeta,
    pub keyword: String,
    pub variables: VariableMap,
    pub prompt: String,
}

/// Builder for a single article generation run
pub struct Pipeline {
    url: String,
    keyword: String,
    config: GeneratorConfig,
}

impl Pipeline {
    /// Create a pipeline for the given page URL with default configuration
    ///
    /// Default paths resolve against [`config::home_dir`].
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            keyword: String::new(),
            config: GeneratorConfig::default().resolve_paths(config::home_dir()),
        }
    }

    /// Set the keyword override (blank means pick from the pool)
    pub fn with_keyword(mut self, keyword: &str) -> Self {
        self.keyword = keyword.to_string();
        self
    }

    /// Apply a configuration
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    ///
    /// Relative paths in the file resolve against the file's own directory.
    pub fn with_config_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let path = path.as_ref();
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        self.config = GeneratorConfig::from_file(path)?.resolve_paths(base);
        Ok(self)
    }

    /// Apply environment overrides on top of the current configuration
    pub fn with_env(mut self) -> Self {
        self.config = self.config.with_env();
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Fetches metadata, selects the keyword, builds variables and the prompt
    pub async fn prepare(&self) -> Result<PreparedPrompt> {
        let timeout = Duration::from_secs(self.config.fetch_timeout_secs);
        let meta = fetcher::fetch_meta_with_timeout(&self.url, timeout).await;
        ::log::info!("Page title: {:?}", meta.title);

        let keyword = keywords::select_keyword(&self.keyword, &self.config.keywords_path)?;
        if keyword.is_empty() {
            ::log::info!("No keyword selected, using defaults");
        } else {
            ::log::info!("Keyword: {}", keyword);
        }

        let variables =
            variables::build_variables(&meta, &self.config.affiliate_link, &keyword);

        let template_html = prompt::load_asset(&self.config.template_path)?;
        let prompt = Templater::new(&self.config.prompt_master_path)
            .build_prompt(&template_html, &variables)?;

        Ok(PreparedPrompt {
            meta,
            keyword,
            variables,
            prompt,
        })
    }

    /// Runs the whole pipeline and returns the path of the saved document
    ///
    /// Nothing is written when any fatal stage fails.
    pub async fn run<G: Generator>(&self, generator: &G) -> Result<PathBuf> {
        let prepared = self.prepare().await?;

        ::log::info!("Generating with model {}", generator.model());
        let document = generator.generate(&prepared.prompt).await?;

        output::save_document(
            &self.config.output_dir,
            &self.config.output_suffix,
            &document,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerateError;
    use crate::variables::PRODUCT_NAME_PLACEHOLDER;
    use chrono::Local;
    use regex::Regex;

    const MASTER: &str = "次のテンプレートで記事を書いてください。\n{{TEMPLATE_HTML}}\n変数:\n{{VARIABLES_JSON}}\n";
    const TEMPLATE: &str = "<article><h2>{{商品名}}</h2><p>{{特集キーワード}}</p></article>";

    /// Returns the prompt length instead of calling a service
    struct EchoLength;

    impl Generator for EchoLength {
        fn model(&self) -> &str {
            "echo-length"
        }

        async fn generate(&self, prompt: &str) -> Result<String> {
            Ok(prompt.chars().count().to_string())
        }
    }

    struct Failing;

    impl Generator for Failing {
        fn model(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(GenerateError::Api {
                status: 503,
                message: "unavailable".to_string(),
            })
        }
    }

    fn workspace(keywords: Option<&str>) -> (tempfile::TempDir, GeneratorConfig) {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();

        std::fs::write(root.join("prompt_master.txt"), MASTER).unwrap();
        std::fs::write(root.join("template_wp.html"), TEMPLATE).unwrap();
        if let Some(contents) = keywords {
            std::fs::write(root.join("keywords.txt"), contents).unwrap();
        }

        let config = GeneratorConfig {
            prompt_master_path: root.join("prompt_master.txt"),
            template_path: root.join("template_wp.html"),
            keywords_path: root.join("keywords.txt"),
            output_dir: root.join("dist"),
            fetch_timeout_secs: 2,
            ..GeneratorConfig::default()
        };
        (tmp, config)
    }

    fn minute_stamp() -> String {
        Local::now().format(output::TIMESTAMP_FORMAT).to_string()
    }

    #[tokio::test]
    async fn test_end_to_end_with_stub_generator() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/item")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><head><title>Example | Shop</title></head><body></body></html>")
            .create_async()
            .await;

        let (_tmp, config) = workspace(Some("保湿\n美白\n"));
        let output_dir = config.output_dir.clone();

        let pipeline = Pipeline::new(&format!("{}/item", server.url()))
            .with_keyword("hydration")
            .with_config(config);

        let before = minute_stamp();
        let path = pipeline.run(&EchoLength).await.unwrap();
        let after = minute_stamp();

        assert_eq!(path.parent().unwrap(), output_dir);
        let name = path.file_name().unwrap().to_str().unwrap();
        let pattern = Regex::new(r"^(\d{8}_\d{4})_miori\.html$").unwrap();
        let captures = pattern.captures(name).expect("file name shape");
        let stamp = &captures[1];
        assert!(stamp == before || stamp == after, "unexpected stamp {}", stamp);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.is_empty());
        assert!(contents.parse::<usize>().unwrap() > MASTER.len());
    }

    #[tokio::test]
    async fn test_prepare_uses_page_and_keyword() {
        let mut server = mockito::Server::new_async().await;
        let _page = server
            .mock("GET", "/")
            .with_status(200)
            .with_body("<html><head><title>Example | Shop</title></head></html>")
            .create_async()
            .await;

        let (_tmp, config) = workspace(None);
        let prepared = Pipeline::new(&server.url())
            .with_keyword("hydration")
            .with_config(config)
            .prepare()
            .await
            .unwrap();

        assert_eq!(prepared.keyword, "hydration");
        assert_eq!(prepared.variables.product_name, "Example");
        assert_eq!(prepared.variables.feature_keyword, "hydration");
        assert!(prepared.prompt.contains(TEMPLATE));
        assert!(prepared.prompt.contains(&prepared.variables.to_json().unwrap()));
    }

    #[tokio::test]
    async fn test_prepare_picks_from_pool() {
        let (_tmp, config) = workspace(Some("\n  エイジングケア  \n\n"));
        let prepared = Pipeline::new("http://127.0.0.1:9/")
            .with_config(config)
            .prepare()
            .await
            .unwrap();

        assert_eq!(prepared.keyword, "エイジングケア");
        assert_eq!(prepared.variables.concern_keyword, "エイジングケア");
    }

    #[tokio::test]
    async fn test_unreachable_page_still_produces_output() {
        let (_tmp, config) = workspace(None);
        let pipeline = Pipeline::new("http://127.0.0.1:9/").with_config(config);

        let prepared = pipeline.prepare().await.unwrap();
        assert!(prepared.meta.is_empty());
        assert_eq!(prepared.variables.product_name, PRODUCT_NAME_PLACEHOLDER);

        let path = pipeline.run(&EchoLength).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_missing_template_is_fatal() {
        let (_tmp, mut config) = workspace(None);
        config.template_path = config.template_path.with_file_name("missing.html");
        let output_dir = config.output_dir.clone();

        let result = Pipeline::new("http://127.0.0.1:9/")
            .with_config(config)
            .run(&EchoLength)
            .await;

        assert!(matches!(result, Err(GenerateError::Asset { .. })));
        assert!(!output_dir.exists());
    }

    #[tokio::test]
    async fn test_generator_failure_writes_nothing() {
        let (_tmp, config) = workspace(None);
        let output_dir = config.output_dir.clone();

        let result = Pipeline::new("http://127.0.0.1:9/")
            .with_config(config)
            .run(&Failing)
            .await;

        assert!(matches!(result, Err(GenerateError::Api { status: 503, .. })));
        assert!(!output_dir.exists());
    }

    #[tokio::test]
    async fn test_unreadable_keyword_pool_is_fatal() {
        let (_tmp, config) = workspace(None);
        std::fs::write(&config.keywords_path, b"\xff\xfe\xfd\n").unwrap();
        let output_dir = config.output_dir.clone();

        let result = Pipeline::new("http://127.0.0.1:9/")
            .with_config(config)
            .run(&EchoLength)
            .await;

        assert!(matches!(result, Err(GenerateError::Asset { .. })));
        assert!(!output_dir.exists());
    }

    #[test]
    fn test_default_paths_are_absolute() {
        let pipeline = Pipeline::new("https://example.com/");
        let config = pipeline.config();

        assert!(config.prompt_master_path.is_absolute());
        assert!(config.template_path.is_absolute());
        assert!(config.keywords_path.is_absolute());
        assert!(config.output_dir.is_absolute());
        assert!(config.prompt_master_path.ends_with("assets/prompt_master.txt"));
    }

    #[tokio::test]
    async fn test_with_config_file_resolves_relative_paths() {
        let (tmp, _) = workspace(Some("エイジングケア\n"));
        let config_path = tmp.path().join("miori.json");
        std::fs::write(
            &config_path,
            r#"{
                "prompt_master_path": "prompt_master.txt",
                "template_path": "template_wp.html",
                "keywords_path": "keywords.txt",
                "output_dir": "out",
                "fetch_timeout_secs": 2
            }"#,
        )
        .unwrap();

        let pipeline = Pipeline::new("http://127.0.0.1:9/")
            .with_config_file(&config_path)
            .unwrap();
        assert_eq!(pipeline.config().output_dir, tmp.path().join("out"));
        assert_eq!(pipeline.config().fetch_timeout_secs, 2);

        let path = pipeline.run(&EchoLength).await.unwrap();
        assert_eq!(path.parent().unwrap(), tmp.path().join("out"));

        let prepared = pipeline.prepare().await.unwrap();
        assert_eq!(prepared.keyword, "エイジングケア");
    }

    #[test]
    fn test_with_config_file_missing() {
        let result = Pipeline::new("https://example.com/").with_config_file("/nonexistent/miori.json");
        assert!(matches!(result, Err(GenerateError::Config { .. })));
    }
}
