mod aggregate;
mod crawl;
mod error;
mod fetch;
mod model;
mod parser;
mod render;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use fetch::HttpFetcher;
use render::Style;

const INDEX_URL: &str = "http://www.factmag.com/tag/the-best-of-bandcamp/";

#[derive(Parser)]
#[command(
    name = "bandcamp_best_of",
    about = "Collect FACT's Best of Bandcamp roundups into a Markdown list"
)]
struct Cli {
    /// Tag page listing the roundup articles
    #[arg(long, env = "BESTOF_INDEX_URL", default_value = INDEX_URL)]
    index_url: String,

    /// Markdown output (overwritten)
    #[arg(short, long, env = "BESTOF_OUT", default_value = "list.md")]
    out: PathBuf,

    #[arg(long, env = "BESTOF_STYLE", value_enum, default_value_t = Style::Grouped)]
    style: Style,

    /// Also write the aggregated dataset, failures included, as JSON
    #[arg(long, env = "BESTOF_JSON")]
    json: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let fetcher = HttpFetcher::default();
    let rows = crawl::crawl(&fetcher, &cli.index_url).await?;
    let dataset = aggregate::aggregate(rows);

    let markdown = render::render(&dataset, cli.style);
    std::fs::write(&cli.out, markdown)
        .with_context(|| format!("Failed to write {}", cli.out.display()))?;

    if let Some(path) = &cli.json {
        let json = serde_json::to_string_pretty(&dataset)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Dataset written to {}", path.display());
    }

    println!(
        "Wrote {} artists ({} albums, {} failed) to {}",
        dataset.by_artist().len(),
        dataset.records.len(),
        dataset.failures.len(),
        cli.out.display()
    );

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
