// packages/engine/src/observability.rs
//! Logging and metrics setup for the binary

use crate::utils::config::{LoggingConfig, MetricsConfig};
use crate::utils::errors::{MockError, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber. `RUST_LOG` overrides the
/// configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| MockError::ConfigError(format!("Invalid log filter: {}", e)))?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };

    installed.map_err(|e| MockError::ConfigError(format!("Tracing already initialised: {}", e)))
}

/// Start the Prometheus exporter when an address is configured
pub fn init_metrics(config: &MetricsConfig) -> Result<()> {
    let Some(addr) = config.prometheus_addr.as_deref() else {
        return Ok(());
    };

    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| MockError::ConfigError(format!("Invalid metrics address {:?}: {}", addr, e)))?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| MockError::ConfigError(format!("Failed to start metrics exporter: {}", e)))?;

    info!("Prometheus metrics exposed on {}", addr);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_disabled_by_default() {
        assert!(init_metrics(&MetricsConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_metrics_address() {
        let config = MetricsConfig {
            prometheus_addr: Some("not an address".to_string()),
        };
        assert!(matches!(init_metrics(&config), Err(MockError::ConfigError(_))));
    }
}
