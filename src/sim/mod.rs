pub mod display;
pub mod driver;
pub mod generator;
pub mod ids;

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::Settings;
use crate::orderbook::OrderBook;
use crate::sim::generator::OrderGenerator;
use crate::sim::ids::OrderIdSource;

pub struct Simulation {
    book: Arc<OrderBook>,
    ids: Arc<OrderIdSource>,
    running: Arc<AtomicBool>,
    tasks: Vec<(&'static str, JoinHandle<()>)>,
}

impl Simulation {
    pub fn start(settings: &Settings, out: Box<dyn Write + Send>) -> Self {
        let book = Arc::new(OrderBook::new(settings.symbol.clone()));
        let ids = Arc::new(OrderIdSource::new());
        let running = Arc::new(AtomicBool::new(true));

        let generator = OrderGenerator::new(settings.generator.clone(), Arc::clone(&ids));
        let tasks = vec![
            (
                "generator",
                tokio::spawn(generator.run(Arc::clone(&book), Arc::clone(&running))),
            ),
            (
                "matcher",
                tokio::spawn(driver::run_matcher(
                    Arc::clone(&book),
                    settings.matcher.interval(),
                    Arc::clone(&running),
                )),
            ),
            (
                "display",
                tokio::spawn(display::run_display(
                    Arc::clone(&book),
                    settings.display.rows,
                    settings.display.interval(),
                    Arc::clone(&running),
                    out,
                )),
            ),
        ];
        info!(symbol = %settings.symbol, "simulation started");

        Self {
            book,
            ids,
            running,
            tasks,
        }
    }

    pub fn book(&self) -> &Arc<OrderBook> {
        &self.book
    }

    pub fn ids(&self) -> &Arc<OrderIdSource> {
        &self.ids
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Clears the running flag and waits for all three tasks; nothing else
    /// holds the returned book afterwards.
    pub async fn shutdown(self) -> Arc<OrderBook> {
        self.running.store(false, Ordering::Release);
        for (name, handle) in self.tasks {
            if let Err(err) = handle.await {
                error!(task = name, %err, "simulation task failed");
            }
        }
        info!(
            trades = self.book.total_trades_executed(),
            "simulation stopped"
        );
        self.book
    }
}
