use std::path::Path;
use std::process::Command;

use reelsync_media::MediaConfig;
use reelsync_worker::PipelineConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = PipelineConfig::from_env();
    let media = MediaConfig::from_env();

    println!(
        "reelsync-selfcheck: starting with output_root={}",
        config.output_root.display()
    );
    ensure_output_root(&config.output_root).await?;
    ensure_tool(&media.ytdlp_bin, "--version")?;
    ensure_tool(&media.ffprobe_bin, "-version")?;
    ensure_env_present(&["STORAGE_ACCESS_KEY"])?;

    println!("reelsync-selfcheck: ok");
    Ok(())
}

async fn ensure_output_root<P: AsRef<Path>>(path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    tokio::fs::create_dir_all(path).await?;

    let marker = path.join(".reelsync-selfcheck");
    tokio::fs::write(&marker, b"ok")
        .await
        .map_err(|e| anyhow::anyhow!("output root {} not writable: {}", path.display(), e))?;
    tokio::fs::remove_file(&marker).await?;
    Ok(())
}

fn ensure_tool(bin: &str, version_flag: &str) -> anyhow::Result<()> {
    let output = Command::new(bin)
        .arg(version_flag)
        .output()
        .map_err(|e| anyhow::anyhow!("{} not available: {}", bin, e))?;

    if !output.status.success() {
        return Err(anyhow::anyhow!(
            "{} {} failed: {:?}",
            bin,
            version_flag,
            output.status
        ));
    }
    Ok(())
}

fn ensure_env_present(vars: &[&str]) -> anyhow::Result<()> {
    for var in vars {
        match std::env::var(var) {
            Ok(value) if !value.is_empty() => {}
            _ => return Err(anyhow::anyhow!("missing required env var {}", var)),
        }
    }
    Ok(())
}
