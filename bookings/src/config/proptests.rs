//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat, PoolSettings};
use proptest::prelude::*;

fn format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop_oneof![
        Just(OutputFormat::Json),
        Just(OutputFormat::Csv),
        Just(OutputFormat::Table),
    ]
}

fn pool_strategy() -> impl Strategy<Value = PoolSettings> {
    (
        prop::option::of(1u32..=64),
        prop::option::of(1u64..=600),
        prop::option::of(1u64..=3600),
        prop::option::of(1u64..=30),
    )
        .prop_map(|(max, idle, lifetime, wait)| PoolSettings {
            max_connections: max,
            idle_timeout_secs: idle,
            max_lifetime_secs: lifetime,
            connection_timeout_secs: wait,
        })
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(1u64..=60_000),
        prop::option::of(6usize..=32),
        prop::option::of(1u32..=1000),
        prop::option::of(any::<bool>()),
        prop::option::of(format_strategy()),
        prop::option::of(pool_strategy()),
    )
        .prop_map(|(timeout, length, page, autoinit, format, pool)| Config {
            request_timeout_ms: timeout,
            reservation_code_length: length,
            page_size: page,
            disable_autoinit: autoinit,
            output_format: format,
            pool,
            ..Default::default()
        })
}

proptest! {
    #[test]
    fn config_merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut merged = low.clone();
        ConfigMerger::merge_into(&mut merged, &high);

        prop_assert_eq!(merged.request_timeout_ms, high.request_timeout_ms.or(low.request_timeout_ms));
        prop_assert_eq!(
            merged.reservation_code_length,
            high.reservation_code_length.or(low.reservation_code_length)
        );
        prop_assert_eq!(merged.page_size, high.page_size.or(low.page_size));
        prop_assert_eq!(merged.disable_autoinit, high.disable_autoinit.or(low.disable_autoinit));
        prop_assert_eq!(merged.output_format, high.output_format.or(low.output_format));
    }

    #[test]
    fn config_merge_with_empty_is_identity(config in config_strategy()) {
        let mut merged = config.clone();
        ConfigMerger::merge_into(&mut merged, &Config::default());
        prop_assert_eq!(&merged, &config);

        let mut from_empty = Config::default();
        ConfigMerger::merge_into(&mut from_empty, &config);
        prop_assert_eq!(from_empty, config);
    }

    #[test]
    fn config_yaml_roundtrip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
