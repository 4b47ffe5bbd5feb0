//! Shared fixtures for scenario tests: a canonical threshold document, raw
//! tick builders, and a cache warm-up helper. Mirrors the fixture-loader
//! role of the reference engine's own testkit crate, adapted to ticks and
//! YAML instead of CSV bars.

use chrono::{DateTime, Duration, TimeZone, Utc};

use lta_config::Thresholds;
use lta_types::{PercentageFormat, RawTick};

/// The YAML document every scenario fixture in this crate is compiled
/// against. Values are chosen so the documented end-to-end scenarios
/// (cold start, 6h-only gap, cooldown block, direction flip, extreme
/// regime veto, alignment conflict) produce their stated outcomes — not
/// meant to resemble a production tuning.
pub const SAMPLE_THRESHOLDS_YAML: &str = r#"
market_regime:
  extreme_price_change_1h: 0.05
  trend_price_change_6h: 0.02
risk_exposure:
  liquidation:
    price_change: 0.05
    oi_drop: 0.03
  crowding:
    funding_abs: 0.002
    oi_growth: 0.10
  extreme_volume:
    volume_ratio: 5.0
trade_quality:
  absorption:
    imbalance: 0.4
    volume_ratio: 0.6
  noise:
    funding_volatility: 0.0005
    funding_abs: 0.0005
  rotation:
    imbalance: 0.2
    price_change: 0.01
  range_weak:
    price_change: 0.003
direction:
  trend:
    long_imbalance: 0.3
    oi_growth: 0.05
    price_change: 0.02
  range:
    short_term_opportunity:
      imbalance_5m: 0.3
      price_change_15m: 0.01
      volume_ratio_15m: 1.5
confidence_scoring:
  caps:
    hybrid_mode: true
    uncertain_quality_hybrid: high
    uncertain_quality_default: medium
    funding_downgrade_steps: 1
  tag_caps:
    noisy_market: medium
    absorption_risk: medium
dual_timeframe:
  short_term:
    required_signals: 2
  conflict_resolution: no_trade
  frequency_control:
    cooldown_short_secs: 300
    cooldown_medium_secs: 7200
    min_interval_short_secs: 600
    min_interval_medium_secs: 1800
normalization:
  missing_format_policy: warn
"#;

/// Compile [`SAMPLE_THRESHOLDS_YAML`]. Panics on failure — a malformed
/// fixture document is a bug in this crate, not a runtime condition a
/// caller needs to handle.
pub fn sample_thresholds() -> Thresholds {
    lta_config::compile_str(SAMPLE_THRESHOLDS_YAML).expect("lta-testkit's sample threshold document is valid")
}

/// Anchor timestamp the scenario ticks below are offset from.
pub fn scenario_start() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0).unwrap()
}

/// A tick carrying only the three required core fields.
pub fn core_tick(symbol: &str, at: DateTime<Utc>) -> RawTick {
    RawTick::core(symbol, at, 50_000.0, 1e5, 1e-4, PercentageFormat::Decimal)
}

/// Three ticks landing inside the 1h/15m/5m floor-lookup tolerances ending
/// just before `decision_time`, so a tick evaluated *at* `decision_time`
/// sees every window as covered. Feed these through the cache (or the
/// engine) before the tick under test.
pub fn seed_lookback_history(symbol: &str, decision_time: DateTime<Utc>) -> Vec<RawTick> {
    vec![
        core_tick(symbol, decision_time - Duration::seconds(3_700)),
        core_tick(symbol, decision_time - Duration::seconds(950)),
        core_tick(symbol, decision_time - Duration::seconds(350)),
    ]
}

/// *S2 — 6h-only gap, strong 1h trend.* 1h fields support a long; 6h is
/// absent.
pub fn six_hour_gap_strong_trend_tick(symbol: &str, at: DateTime<Utc>) -> RawTick {
    let mut tick = core_tick(symbol, at);
    tick.price_change_1h = Some(0.025);
    tick.oi_change_1h = Some(0.06);
    tick.taker_imbalance_1h = Some(0.75);
    tick
}

/// *S3/S4 — cooldown / direction flip.* All four short-horizon K-of-N axes
/// favor LONG.
pub fn short_term_long_tick(symbol: &str, at: DateTime<Utc>) -> RawTick {
    let mut tick = core_tick(symbol, at);
    tick.price_change_5m = Some(0.01);
    tick.price_change_15m = Some(0.02);
    tick.taker_imbalance_15m = Some(0.35);
    tick.volume_ratio_15m = Some(2.0);
    tick.taker_imbalance_5m = Some(0.35);
    tick
}

/// Same shape as [`short_term_long_tick`], every axis flipped to favor
/// SHORT.
pub fn short_term_short_tick(symbol: &str, at: DateTime<Utc>) -> RawTick {
    let mut tick = core_tick(symbol, at);
    tick.price_change_5m = Some(-0.01);
    tick.price_change_15m = Some(-0.02);
    tick.taker_imbalance_15m = Some(-0.35);
    tick.volume_ratio_15m = Some(2.0);
    tick.taker_imbalance_5m = Some(-0.35);
    tick
}

/// *S5 — Extreme regime veto.* `price_change_1h` alone exceeds
/// `extreme_price_change_1h`.
pub fn extreme_regime_tick(symbol: &str, at: DateTime<Utc>) -> RawTick {
    let mut tick = core_tick(symbol, at);
    tick.price_change_1h = Some(0.06);
    tick
}
