use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const ORDERS_ACCEPTED: &str = "simbook_orders_accepted_total";
pub const ORDERS_REJECTED: &str = "simbook_orders_rejected_total";
pub const TRADES: &str = "simbook_trades_total";
pub const MATCHED_VOLUME: &str = "simbook_matched_volume_total";

pub fn install_recorder() -> anyhow::Result<PrometheusHandle> {
    let builder = PrometheusBuilder::new();
    let handle = builder.install_recorder()?;
    Ok(handle)
}
