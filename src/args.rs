use clap::Parser;
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "miori")]
#[command(about = "Generates HTML marketing copy for a product page")]
#[command(version)]
pub struct Args {
    /// Product page to read the title, description and image from
    #[arg(long)]
    pub url: Url,

    /// Keyword override (picked from the keyword pool when empty)
    #[arg(long, default_value = "")]
    pub keyword: String,

    /// JSON configuration file; relative paths in it resolve against its
    /// directory. Without one, assets/, data/ and dist/ resolve against
    /// MIORI_HOME or the install directory
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the assembled prompt instead of calling the generation service
    #[arg(long)]
    pub dry_run: bool,
}
