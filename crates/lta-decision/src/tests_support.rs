//! Shared helper for stage-level unit tests: a fully-`None` snapshot that
//! individual tests populate field-by-field.
use chrono::{TimeZone, Utc};
use lta_types::{Coverage, FeatureSnapshot, Funding, Metadata, OpenInterest, Price, TakerImbalance, Volume};

pub fn empty_snapshot() -> FeatureSnapshot {
    let ts = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    FeatureSnapshot {
        price: Price::default(),
        open_interest: OpenInterest::default(),
        taker_imbalance: TakerImbalance::default(),
        volume: Volume::default(),
        funding: Funding::default(),
        coverage: Coverage::default(),
        metadata: Metadata {
            feature_version: "1".to_string(),
            generated_at: ts,
            source_timestamp: ts,
            symbol: "BTCUSDT".to_string(),
        },
    }
}
