use thiserror::Error;

/// Operational failures at the façade boundary. Never returned from
/// `on_new_tick_dual` itself — that path always degrades to a tagged
/// `DualTimeframeResult` instead, per the engine's propagation policy.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("threshold reload failed, previous thresholds remain in effect: {source}")]
    Reload {
        #[source]
        source: lta_config::ConfigError,
    },
}
