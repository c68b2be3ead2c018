//! Example downloading a batch of URLs with retries over a few lanes.
//!
//! Usage: `cargo run --example batch -- <url>...`
//!
//! Set `RUST_LOG=lanefetch=trace` to follow every lane.

use color_eyre::Result;
use comfy_table::Table;
use console::style;
use lanefetch::{DownloaderBuilder, Status, Summary};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (urls, builder) = if args.is_empty() {
        // httpbin answers 503 about half of the time on this endpoint.
        let urls: Vec<String> = (1..=8)
            .map(|i| format!("https://httpbin.org/status/200,503?seed={}", i))
            .collect();
        let paths = (1..=8).map(|i| PathBuf::from(format!("downloads/status-{}.txt", i)));
        (urls, DownloaderBuilder::new().paths(paths))
    } else {
        (args, DownloaderBuilder::new().directory(PathBuf::from("downloads")))
    };

    run(&urls, builder).await
}

async fn run(urls: &[String], builder: DownloaderBuilder) -> Result<()> {
    let downloader = builder
        .attempts(3)
        .threads(4)
        .on_attempt(print_attempt)
        .build();

    let report = downloader.download(urls).await?;

    let mut table = Table::new();
    table.set_header(vec!["URL", "Result"]);
    for url in urls {
        let result = match report.path(url) {
            Some(path) => path.display().to_string(),
            None => "failed".to_string(),
        };
        table.add_row(vec![url.clone(), result]);
    }
    println!("{table}");

    println!(
        "\n{} downloaded, {} failed",
        style(report.downloaded.len()).green().bold(),
        style(report.failed.len()).red().bold()
    );
    Ok(())
}

fn print_attempt(summary: &Summary) {
    let source = &summary.download().source;
    match summary.status() {
        Status::Success => {}
        Status::Retrying(e) => eprintln!(
            "{} {} (attempt {}): {}",
            style("retry").yellow(),
            source,
            summary.attempt(),
            e
        ),
        Status::Fail(e) => eprintln!("{} {}: {}", style("failed").red(), source, e),
    }
}
