use clap::Parser;
use serde::Serialize;
use serde_json::json;
use tracing::info;

mod cli;
mod logging;

use cli::{Cli, Commands};
use nl_core::Pipeline;

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn pipeline(cli: &Cli) -> anyhow::Result<Pipeline> {
    let pipeline = cli.build_pipeline().await?;
    info!(
        "🧠 Pipeline ready (source: {}, model: {})",
        pipeline.source_name(),
        pipeline.model_name()
    );
    Ok(pipeline)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match &cli.command {
        Commands::Serve { bind } => {
            let pipeline = pipeline(&cli).await?;
            info!("🚀 Starting News AI API on {}", bind);
            nl_web::serve(nl_web::AppState::new(pipeline), *bind).await?;
        }
        Commands::Everything { topic } => {
            print_json(&pipeline(&cli).await?.everything(topic).await?)?
        }
        Commands::Bias { topic } => print_json(&pipeline(&cli).await?.bias(topic).await?)?,
        Commands::Timeline { topic } => {
            print_json(&pipeline(&cli).await?.timeline(topic).await?)?
        }
        Commands::Summarize { article_url } => {
            let summary = pipeline(&cli).await?.summarize(article_url).await?;
            print_json(&json!({ "summary": summary }))?;
        }
        // Table lookup only; needs no API keys.
        Commands::Classify { url } => {
            print_json(&cli.load_bias_table()?.source_bias(url))?;
        }
    }

    Ok(())
}
