use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use hahow_dl_core::{CourseDownloader, DEFAULT_CONCURRENCY, ProgressEvent, Settings};

#[derive(Parser)]
#[command(name = "hahow-dl")]
#[command(about = "Batch-download hahow.in course videos and subtitles")]
struct Cli {
    /// Course page URL, e.g. https://hahow.in/courses/<id>.
    /// Overrides the settings file.
    course_url: Option<String>,

    /// Authorization header value. Overrides the settings file.
    #[arg(short, long)]
    auth: Option<String>,

    /// Settings file location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lectures downloaded at the same time
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    concurrency: usize,
}

fn download_bar(multi: &MultiProgress, file: &str, total_bytes: u64) -> ProgressBar {
    let bar = if total_bytes > 0 {
        let bar = multi.add(ProgressBar::new(total_bytes));
        bar.set_style(
            ProgressStyle::with_template(
                "{msg:32!} {bytes:>10} / {total_bytes:<10} {wide_bar:.cyan/blue}",
            )
            .unwrap(),
        );
        bar
    } else {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg:32!} {bytes:>10}").unwrap(),
        );
        bar
    };
    bar.set_message(file.to_string());
    bar
}

async fn render_events(mut events: mpsc::Receiver<ProgressEvent>) {
    let multi = MultiProgress::new();
    let mut bars: HashMap<usize, ProgressBar> = HashMap::new();

    while let Some(event) = events.recv().await {
        match event {
            ProgressEvent::CourseResolved { title } => {
                let _ = multi.println(format!(
                    "{} {}",
                    style("Course:").bold(),
                    style(&title).cyan()
                ));
            }
            ProgressEvent::LectureStarted { label } => {
                let _ = multi.println(format!("{} {}", style("▸").cyan(), label));
            }
            ProgressEvent::DownloadStarted {
                id,
                file,
                total_bytes,
            } => {
                bars.insert(id, download_bar(&multi, &file, total_bytes));
            }
            ProgressEvent::Chunk { id, bytes } => {
                if let Some(bar) = bars.get(&id) {
                    bar.inc(bytes);
                }
            }
            ProgressEvent::DownloadDone { id } => {
                if let Some(bar) = bars.remove(&id) {
                    bar.finish_and_clear();
                }
            }
            ProgressEvent::SubtitleConverted { path } => {
                let _ = multi.println(format!(
                    "{} {}",
                    style("✓").green().bold(),
                    path.display()
                ));
            }
            ProgressEvent::LectureFailed { label, reason } => {
                let _ = multi.println(format!(
                    "{} {}: {}",
                    style("✗").red().bold(),
                    label,
                    reason
                ));
            }
            ProgressEvent::LectureDone { label } => {
                let _ = multi.println(format!("{} {}", style("✓").green().bold(), label));
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hahow_dl=warn,hahow_dl_core=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(Settings::default_path);
    let mut settings = Settings::load(&config_path)?;
    settings.apply_overrides(cli.course_url, cli.auth);

    // Configuration problems abort here, before anything touches the
    // network.
    let downloader = match CourseDownloader::new(&settings) {
        Ok(downloader) => downloader.with_concurrency(cli.concurrency),
        Err(err) => {
            eprintln!("{} {}", style("Error:").red().bold(), err);
            std::process::exit(1);
        }
    };

    println!(
        "\n{}  {}\n",
        style("hahow-dl").cyan().bold(),
        style("Course Downloader").dim()
    );

    let (events_tx, events_rx) = mpsc::channel(64);
    let renderer = tokio::spawn(render_events(events_rx));
    let outcome = downloader.run(events_tx).await;
    renderer.await?;
    outcome?;

    println!(
        "\n{} {}",
        style("✓").green().bold(),
        style("All lecture tasks finished").dim()
    );
    Ok(())
}
