/*!
 * Command-line interface for code-zippy
 */

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use indicatif::{ProgressBar, ProgressStyle};

use code_zippy::config::{Args, Config, TOOL_NAME};
use code_zippy::report::{ReportFormat, Reporter, ScanReport};
use code_zippy::utils::format_file_size;
use code_zippy::writer::SnapshotWriter;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        generate(shell, &mut Args::command(), TOOL_NAME, &mut io::stdout());
        return ExitCode::SUCCESS;
    }

    match run(Config::from_args(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> code_zippy::Result<()> {
    config.validate()?;

    let progress = ProgressBar::new_spinner();
    match ProgressStyle::default_spinner()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ⏱️  {elapsed_precise}")
    {
        Ok(style) => progress.set_style(style),
        Err(e) => eprintln!("Warning: Failed to set progress style: {}", e),
    }
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📊 Setup");
    progress.set_message(format!(
        "📂 Snapshotting directory: {}",
        config.source_dir.display()
    ));

    let start_time = Instant::now();
    let writer = SnapshotWriter::new(config, Arc::new(progress.clone()));
    let result = writer.run();
    progress.finish_and_clear();
    let outcome = result?;

    if let Some((path, size)) = &outcome.archive {
        println!(
            "✅ Archive created: {} ({} bytes, {})",
            path.display(),
            size,
            format_file_size(*size)
        );
    }

    let report = ScanReport {
        outcome,
        duration: start_time.elapsed(),
        finished_at: Local::now(),
    };
    Reporter::new(ReportFormat::ConsoleTable).print_report(&report);

    Ok(())
}
