//! Batch upload binary.
//!
//! Usage: `reelsync [INPUT_FILE]`. Without an argument the input path is
//! prompted for on stdin.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use reelsync_media::{MediaConfig, PlayabilityChecker, YtDlp};
use reelsync_posts::{PostPublisher, PostsClient};
use reelsync_storage::StorageClient;
use reelsync_worker::{
    init_tracing, write_extracted, write_report, BatchRunner, Pipeline, PipelineConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // reqwest's rustls backend needs a process-wide crypto provider
    let _ = rustls::crypto::ring::default_provider().install_default();

    dotenvy::dotenv().ok();
    init_tracing();

    let config = PipelineConfig::from_env();
    info!("Pipeline config: {:?}", config);

    let input = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => prompt_input_path().await?,
    };

    let media = MediaConfig::from_env();
    let ytdlp = YtDlp::new(media.clone());
    let checker = PlayabilityChecker::new(&media);
    let storage = StorageClient::from_env().context("storage client")?;
    let posts = PostsClient::from_env().context("posts client")?;
    let publisher = PostPublisher::new(posts, ytdlp.clone());

    let pipeline = Pipeline::new(
        Arc::new(ytdlp),
        Arc::new(checker),
        Arc::new(storage),
        Arc::new(publisher),
        config.output_root.clone(),
    );
    let runner = BatchRunner::new(pipeline, config.max_parallel);

    let summary = runner
        .run_file(&input)
        .await
        .with_context(|| format!("batch over {}", input.display()))?;

    write_report(&config.report_path, &summary.report).context("writing report")?;
    match &config.extracted_csv {
        Some(path) => write_extracted(path, &summary.extracted).context("writing extracted records")?,
        None => info!(
            records = summary.extracted.len(),
            "Extracted records kept in memory (set REELSYNC_EXTRACTED_CSV to save them)"
        ),
    }

    println!("Upload report saved successfully.");
    Ok(())
}

async fn prompt_input_path() -> anyhow::Result<PathBuf> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(b"Enter the path to the input text file: ")
        .await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("reading input path")?;

    let path = line.trim();
    if path.is_empty() {
        anyhow::bail!("no input file given");
    }
    Ok(PathBuf::from(path))
}
