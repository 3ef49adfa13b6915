use clap::Parser;
use omni_ocr::{backend, cli, config, input, progress, recognizer};
use omni_ocr_common::{list_styles, style::catalog_json};
use cli::{Cli, Commands};
use config::Config;
use recognizer::Recognizer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load()
        .with_backend(cli.backend)
        .with_endpoint(cli.endpoint)
        .with_model(cli.model)
        .with_timeout(cli.timeout);

    match cli.command {
        Commands::Recognize { image, style, output } => {
            let image = input::load_image(&image)?;
            let recognizer = Recognizer::new(backend::build(&config)?);

            let spinner = progress::spinner(
                format!("Processing {} as {}...", image.display_label(), style),
                progress::is_interactive(),
            );

            let result = recognizer.recognize(&image, style).await;
            spinner.finish_and_clear();
            let text = result?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &text)?;
                    eprintln!("✔ 結果を保存: {}", path.display());
                }
                None => println!("{}", text),
            }
        }

        Commands::Styles { json } => {
            if json {
                println!("{}", catalog_json()?);
            } else {
                for d in list_styles() {
                    println!("{:<14} {:<12} {}", d.label, d.style.id(), d.description);
                }
            }
        }

        Commands::Config { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
                return Ok(());
            }

            println!("設定:");
            println!("  バックエンド: {}", config.backend);
            println!("  エンドポイント: {}", config.endpoint_url());
            println!("  モデル: {}", config.model_name());
            println!("  タイムアウト: {}秒", config.timeout_seconds);
            println!("  APIキー: {}", config.masked_api_key());
        }
    }

    Ok(())
}
