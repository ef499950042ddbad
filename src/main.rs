use clap::Parser;
use miori::{OpenAiClient, Pipeline};

mod args;
use args::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    // .env is optional
    if let Err(e) = dotenv::dotenv() {
        ::log::debug!("No .env loaded: {}", e);
    }

    let args = Args::parse();

    if let Err(e) = run(args).await {
        ::log::error!("Generation failed: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> miori::Result<()> {
    ::log::info!("Starting generation for URL: {}", args.url);

    let mut pipeline = Pipeline::new(args.url.as_str()).with_keyword(&args.keyword);
    if let Some(path) = &args.config {
        pipeline = pipeline.with_config_file(path)?;
    }
    let pipeline = pipeline.with_env();

    if args.dry_run {
        let prepared = pipeline.prepare().await?;
        println!("{}", prepared.prompt);
        return Ok(());
    }

    let client = OpenAiClient::from_env(pipeline.config())?;
    let path = pipeline.run(&client).await?;

    println!("[OK] saved: {}", path.display());
    Ok(())
}
