//! StockReport Core — domain types, data retrieval and derived series.
//!
//! This crate contains everything upstream of the workbook:
//! - Domain types (bars, company info, financial statements, ticker records)
//! - The `MarketDataProvider` seam with a Yahoo implementation and an in-memory fixture
//! - The retriever that assembles a `TickerRecord` for one symbol
//! - Rolling indicators and the derived per-bar series used by the report

pub mod config;
pub mod data;
pub mod derived;
pub mod domain;
pub mod indicators;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: records and providers can cross thread boundaries.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::InfoMap>();
        require_sync::<domain::InfoMap>();
        require_send::<domain::Statement>();
        require_sync::<domain::Statement>();
        require_send::<domain::TickerRecord>();
        require_sync::<domain::TickerRecord>();

        // Derived series
        require_send::<derived::DerivedSeries>();
        require_sync::<derived::DerivedSeries>();

        // Providers
        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
        require_send::<data::FixtureProvider>();
        require_sync::<data::FixtureProvider>();
        require_send::<config::FetchConfig>();
        require_sync::<config::FetchConfig>();
    }

    /// The indicator trait is object safe.
    #[test]
    fn indicator_trait_object_builds() {
        let boxed: Vec<Box<dyn indicators::Indicator>> = vec![
            Box::new(indicators::sma::Sma::new(20)),
            Box::new(indicators::daily_return::DailyReturn),
            Box::new(indicators::volatility::RollingVolatility::new(20)),
        ];
        let names: Vec<&str> = boxed.iter().map(|i| i.name()).collect();
        assert_eq!(names.len(), 3);
    }
}
