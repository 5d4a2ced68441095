use std::fmt::Write as _;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use crate::models::TopRow;
use crate::orderbook::OrderBook;

const CELL_WIDTH: usize = 15;
const GUTTER: &str = "     ";

fn cell(row: &TopRow) -> String {
    format!("{:>8.2} x {:>4}", row.price, row.quantity)
}

/// Buys in green on the left, sells in red on the right. Missing rows on
/// either side are left blank.
pub fn render_frame(
    symbol: &str,
    buys: &[TopRow],
    sells: &[TopRow],
    rows: usize,
    trades: u64,
    (bids, asks): (usize, usize),
) -> String {
    let mut frame = String::new();
    let _ = writeln!(frame, "==== REAL-TIME ORDER BOOK: {symbol} ====\n");
    let _ = writeln!(frame, "{:^w$}{GUTTER}{:^w$}", "BUY ORDERS", "SELL ORDERS", w = CELL_WIDTH);
    let _ = writeln!(frame, "{}", "-".repeat(CELL_WIDTH * 2 + GUTTER.len()));

    for i in 0..rows {
        match buys.get(i) {
            Some(row) => frame.push_str(&cell(row).green().to_string()),
            None => frame.push_str(&" ".repeat(CELL_WIDTH)),
        }
        frame.push_str(GUTTER);
        if let Some(row) = sells.get(i) {
            frame.push_str(&cell(row).red().to_string());
        }
        frame.push('\n');
    }

    let _ = writeln!(frame, "\nTrades executed: {trades}");
    let _ = writeln!(frame, "Resting: {bids} bids / {asks} asks");
    frame
}

fn draw<W: Write>(out: &mut W, frame: &str) -> std::io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    out.write_all(frame.as_bytes())?;
    out.flush()
}

pub async fn run_display(
    book: Arc<OrderBook>,
    rows: usize,
    period: Duration,
    running: Arc<AtomicBool>,
    mut out: Box<dyn Write + Send>,
) {
    info!(symbol = %book.symbol(), rows, "display started");
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    while running.load(Ordering::Acquire) {
        ticker.tick().await;
        let buys = book.top_buys(rows);
        let sells = book.top_sells(rows);
        let trades = book.total_trades_executed();
        let depth = book.depth();
        let frame = render_frame(book.symbol(), &buys, &sells, rows, trades, depth);

        // Terminal writes block; keep them off the runtime workers.
        let written = tokio::task::spawn_blocking(move || {
            let result = draw(&mut out, &frame);
            (out, result)
        })
        .await;
        match written {
            Ok((writer, result)) => {
                out = writer;
                if let Err(err) = result {
                    warn!(%err, "display write failed");
                }
            }
            Err(err) => {
                error!(%err, "display writer panicked");
                break;
            }
        }
    }
    info!("display stopped");
}
