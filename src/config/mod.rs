use std::time::Duration;

use anyhow::ensure;
use serde::Deserialize;

pub const ENV_PREFIX: &str = "SIMBOOK";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub symbol: String,
    pub generator: GeneratorConfig,
    pub matcher: MatcherConfig,
    pub display: DisplayConfig,
    pub log: LogConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub orders_per_burst: usize,
    pub order_interval_ms: u64,
    pub burst_pause_ms: u64,
    pub mid_price: f64,
    pub price_jitter: f64,
    pub min_price: f64,
    pub max_quantity: u64,
    /// Fixed RNG seed for reproducible runs; entropy when absent.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    pub interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub interval_ms: u64,
    pub rows: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            symbol: "ABC".to_string(),
            generator: GeneratorConfig::default(),
            matcher: MatcherConfig::default(),
            display: DisplayConfig::default(),
            log: LogConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            orders_per_burst: 10,
            order_interval_ms: 10,
            burst_pause_ms: 100,
            mid_price: 100.0,
            price_jitter: 1.0,
            min_price: 1.0,
            max_quantity: 100,
            seed: None,
        }
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self { interval_ms: 50 }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            interval_ms: 500,
            rows: 10,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
        }
    }
}

impl GeneratorConfig {
    pub fn order_interval(&self) -> Duration {
        Duration::from_millis(self.order_interval_ms)
    }

    pub fn burst_pause(&self) -> Duration {
        Duration::from_millis(self.burst_pause_ms)
    }
}

impl MatcherConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl DisplayConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Settings {
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.symbol.is_empty(), "symbol must not be empty");

        let g = &self.generator;
        ensure!(g.orders_per_burst > 0, "generator.orders_per_burst must be positive");
        ensure!(g.mid_price.is_finite() && g.mid_price > 0.0, "generator.mid_price must be positive");
        ensure!(g.min_price.is_finite() && g.min_price > 0.0, "generator.min_price must be positive");
        ensure!(g.price_jitter.is_finite() && g.price_jitter >= 0.0, "generator.price_jitter must not be negative");
        ensure!(g.max_quantity > 0, "generator.max_quantity must be positive");

        ensure!(self.matcher.interval_ms > 0, "matcher.interval_ms must be positive");
        ensure!(self.display.interval_ms > 0, "display.interval_ms must be positive");
        ensure!(self.display.rows > 0, "display.rows must be positive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // `load` reads process-wide env; tests that call it take this lock.
    static ENV_LOCK: parking_lot::Mutex<()> = parking_lot::const_mutex(());

    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        for (key, value) in vars {
            // SAFETY: every test touching these variables holds ENV_LOCK.
            unsafe { std::env::set_var(key, value) };
        }
        let out = f();
        for (key, _) in vars {
            // SAFETY: as above.
            unsafe { std::env::remove_var(key) };
        }
        out
    }

    #[test]
    fn defaults_validate() {
        let settings = Settings::default();
        settings.validate().unwrap();
        assert_eq!(settings.symbol, "ABC");
        assert_eq!(settings.matcher.interval(), Duration::from_millis(50));
        assert_eq!(settings.display.rows, 10);
    }

    #[test]
    fn file_overrides_defaults() {
        let _guard = ENV_LOCK.lock();
        let path = std::env::temp_dir().join("simbook-settings-test.yaml");
        std::fs::write(
            &path,
            "symbol: XYZ\nmatcher:\n  interval_ms: 5\ngenerator:\n  seed: 7\nlog:\n  format: json\n",
        )
        .unwrap();

        let settings = Settings::load(path.to_str()).unwrap();
        assert_eq!(settings.symbol, "XYZ");
        assert_eq!(settings.matcher.interval_ms, 5);
        assert_eq!(settings.generator.seed, Some(7));
        assert_eq!(settings.generator.orders_per_burst, 10);
        assert_eq!(settings.log.format, LogFormat::Json);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn shipped_config_loads() {
        let _guard = ENV_LOCK.lock();
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/simbook.yaml");
        let settings = Settings::load(Some(path)).unwrap();
        assert_eq!(settings.generator.max_quantity, 100);
        assert!(!settings.metrics.enabled);
    }

    #[test]
    fn env_overrides_defaults() {
        let _guard = ENV_LOCK.lock();
        let settings = with_env(
            &[("SIMBOOK__MATCHER__INTERVAL_MS", "20"), ("SIMBOOK__SYMBOL", "ENV")],
            || Settings::load(None),
        )
        .unwrap();
        assert_eq!(settings.matcher.interval_ms, 20);
        assert_eq!(settings.symbol, "ENV");
        assert_eq!(settings.display.interval_ms, 500);
    }

    #[test]
    fn env_beats_file() {
        let _guard = ENV_LOCK.lock();
        let path = std::env::temp_dir().join("simbook-settings-env-test.yaml");
        std::fs::write(&path, "symbol: FILE\nmatcher:\n  interval_ms: 5\ndisplay:\n  rows: 3\n").unwrap();

        let settings = with_env(&[("SIMBOOK__MATCHER__INTERVAL_MS", "20")], || {
            Settings::load(path.to_str())
        })
        .unwrap();
        assert_eq!(settings.matcher.interval_ms, 20);
        assert_eq!(settings.symbol, "FILE");
        assert_eq!(settings.display.rows, 3);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn invalid_env_value_fails_load() {
        let _guard = ENV_LOCK.lock();
        let result = with_env(&[("SIMBOOK__DISPLAY__ROWS", "0")], || Settings::load(None));
        assert!(result.is_err());
    }

    #[test]
    fn zero_rows_is_invalid() {
        let mut settings = Settings::default();
        settings.display.rows = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn negative_jitter_is_invalid() {
        let mut settings = Settings::default();
        settings.generator.price_jitter = -0.5;
        assert!(settings.validate().is_err());
    }
}
