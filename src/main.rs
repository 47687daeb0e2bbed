use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use lineitem_importer::cli::{Args, setup_logging};
use lineitem_importer::processor::discovery::expand_inputs;
use lineitem_importer::{LoadProcessor, LoadStats};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    setup_logging(&args);

    match run(&args).await {
        Ok(stats) => {
            if !args.quiet {
                print_summary(&stats);
            }
        }
        Err(e) => {
            // Malformed input is treated as a pipeline bug: stop the process
            error!("{:#}", e);
            eprintln!("{} {:#}", "Error:".bright_red().bold(), e);
            process::exit(1);
        }
    }
}

async fn run(args: &Args) -> Result<LoadStats> {
    let config = args.to_config().context("Invalid arguments")?;
    let inputs = expand_inputs(&args.inputs).context("Failed to resolve input files")?;

    if !args.quiet {
        println!("{}", "Loading lineitem data".bright_green().bold());
        println!(
            "  {} {}",
            "Files:".bright_cyan(),
            inputs.len().to_string().bright_white().bold()
        );
        match &args.output_dir {
            Some(dir) => println!("  {} {}", "Output:".bright_cyan(), dir.display()),
            None => println!("  {} count only", "Output:".bright_cyan()),
        }
    }

    let processor = LoadProcessor::new(inputs, args.output_dir.clone()).with_config(config);
    let stats = processor.process().await.context("Load aborted")?;
    Ok(stats)
}

fn print_summary(stats: &LoadStats) {
    println!("\n{}", "Load complete".bright_green().bold());
    println!(
        "  {} {}",
        "Rows:".bright_cyan(),
        stats.total_rows().to_string().bright_white().bold()
    );
    println!(
        "  {} {}",
        "Orders:".bright_cyan(),
        stats.total_orders().to_string().bright_white().bold()
    );
    if stats.total_skipped() > 0 {
        println!(
            "  {} {}",
            "Skipped:".bright_yellow(),
            stats.total_skipped().to_string().bright_yellow().bold()
        );
    }
    println!(
        "  {} {:.2}s ({:.0} rows/s)",
        "Time:".bright_cyan(),
        stats.processing_time_ms as f64 / 1000.0,
        stats.throughput()
    );

    for file in &stats.files {
        if let Some(output) = &file.output_path {
            println!("  {} {}", "Wrote".bright_green(), output.display());
        }
    }
}
