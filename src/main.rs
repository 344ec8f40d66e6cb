use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use tokio_util::sync::CancellationToken;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;

use cli::Args;
use tcp_ttl_probe::config::{ProbeConfig, parse_target};
use tcp_ttl_probe::export::{export_csv, export_json, write_attempt, write_header};
use tcp_ttl_probe::probe::TcpConnector;
use tcp_ttl_probe::trace::ProbeEngine;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose)?;

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let target = match parse_target(&args.addr, args.family()) {
        Ok(target) => target,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let config = ProbeConfig::new(target, args.max_ttl, args.timeout_duration());

    // Cancellation token for graceful shutdown
    let cancel = CancellationToken::new();

    // Setup Ctrl+C handler
    let cancel_clone = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        cancel_clone.cancel();
    });

    let engine = ProbeEngine::new(config, TcpConnector, cancel);

    if args.is_batch_mode() {
        let run = engine.run(|_| {}).await;
        if args.json {
            export_json(&run, std::io::stdout())?;
        } else {
            export_csv(&run, std::io::stdout())?;
        }
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    write_header(&engine.config().target, &mut stdout)?;
    stdout.flush()?;

    let mut write_err = None;
    engine
        .run(|attempt| {
            if write_err.is_some() {
                return;
            }
            if let Err(e) = write_attempt(attempt, &mut stdout).and_then(|_| stdout.flush()) {
                write_err = Some(e);
            }
        })
        .await;

    if let Some(e) = write_err {
        return Err(e).context("Failed to write probe output");
    }

    Ok(())
}

/// Install the stderr log subscriber; stdout is reserved for probe output
fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")?;
    Ok(())
}
