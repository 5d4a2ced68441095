use std::time::Duration;

use clap::Parser;
use tokio::sync::oneshot;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use simbook::Simulation;
use simbook::config::{LogFormat, Settings};
use simbook::metrics::install_recorder;

#[derive(Parser, Debug)]
#[command(name = "simbook", about = "Single-symbol limit order book simulation")]
struct Args {
    /// Settings file (yaml, toml or json).
    #[arg(long)]
    config: Option<String>,
    #[arg(long)]
    symbol: Option<String>,
    #[arg(long)]
    seed: Option<u64>,
    /// Stop after this many seconds instead of waiting for ENTER.
    #[arg(long)]
    duration_secs: Option<u64>,
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

// Detached thread: a pending stdin read must not hold up runtime shutdown.
fn enter_pressed() -> oneshot::Receiver<()> {
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let mut line = String::new();
        let _ = std::io::stdin().read_line(&mut line);
        let _ = tx.send(());
    });
    rx
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(symbol) = args.symbol {
        settings.symbol = symbol;
    }
    if args.seed.is_some() {
        settings.generator.seed = args.seed;
    }
    settings.validate()?;

    init_tracing(settings.log.format);
    let prometheus = if settings.metrics.enabled {
        Some(install_recorder()?)
    } else {
        None
    };

    let sim = Simulation::start(&settings, Box::new(std::io::stdout()));
    println!("Simulation running. Press ENTER to exit.");

    match args.duration_secs {
        Some(secs) => {
            tokio::select! {
                _ = tokio::time::sleep(Duration::from_secs(secs)) => {}
                _ = tokio::signal::ctrl_c() => info!("interrupted"),
            }
        }
        None => {
            tokio::select! {
                _ = enter_pressed() => {}
                _ = tokio::signal::ctrl_c() => info!("interrupted"),
            }
        }
    }

    let book = sim.shutdown().await;
    let (bids, asks) = book.depth();
    info!(
        trades = book.total_trades_executed(),
        resting_bids = bids,
        resting_asks = asks,
        "final book"
    );
    if let Some(handle) = prometheus {
        debug!(metrics = %handle.render(), "metrics at exit");
    }
    println!("Simulation stopped.");
    Ok(())
}
