use chrono::prelude::*;
use clap::Parser;
use rand_files::{format_error, Generator, GeneratorConfig, Progress};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The directory to write file1.txt, file2.txt and file3.txt into.
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    dir: PathBuf,

    /// How many files are written at the same time
    #[arg(short = 'j', long, default_value = "1")]
    concurrency: u8,

    /// Do not print progress
    #[arg(short, long, default_value = "false")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cli = Cli::parse();
    let config = GeneratorConfig {
        dir: cli.dir,
        concurrency: cli.concurrency,
        ..Default::default()
    };
    run(config, cli.quiet).await
}

async fn run(config: GeneratorConfig, quiet: bool) -> Result<(), String> {
    let generator = Generator::new(config).map_err(format_error)?;
    let start_ts: DateTime<Local> = Local::now();
    let report = generator
        .generate_files(|progress: &Progress| {
            if !quiet && crossed_tenth(progress) {
                println!(
                    "{} {}: {:.2}%, {} / {} bytes",
                    now(),
                    progress.path.display(),
                    percent(progress.filled, progress.total),
                    progress.filled,
                    progress.total
                );
            }
        })
        .await;

    for file in report.generated() {
        if !quiet {
            println!(
                "{} generated {}, size: {}, time elapsed: {:?}",
                now(),
                file.path.display(),
                file.size,
                file.elapsed
            );
        }
    }

    for err in report.failures() {
        eprintln!("{} failed: {}", now(), err);
    }

    let total = report.files.len();
    let files = report.into_result().map_err(format_error)?;
    if !quiet {
        println!(
            "{} done, {} of {} files, time elapsed: {}",
            now(),
            files.len(),
            total,
            Local::now().signed_duration_since(start_ts)
        );
    }
    Ok(())
}

fn now() -> String {
    let ts: DateTime<Local> = Local::now();
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

fn percent(filled: u64, total: u64) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (filled as f64 / total as f64) * 100.0
}

// true when the last chunk moved progress into a new 10% step
fn crossed_tenth(progress: &Progress) -> bool {
    if progress.total == 0 || progress.filled == progress.total {
        return true;
    }
    let before = progress.filled - progress.written as u64;
    before * 10 / progress.total != progress.filled * 10 / progress.total
}
