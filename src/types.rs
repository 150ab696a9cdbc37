//! Types returned by the market data client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Market snapshot for a single coin
///
/// Numeric fields are optional because the API reports `null` for coins
/// without enough trading data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    /// API identifier (e.g. "bitcoin")
    pub id: String,

    /// Ticker symbol, lowercase as returned by the API
    pub symbol: String,

    /// Display name
    pub name: String,

    /// Image URL
    pub image: String,

    /// Price in USD
    pub current_price: Option<f64>,

    /// Market capitalization in USD
    pub market_cap: Option<f64>,

    /// Rank by market capitalization
    pub market_cap_rank: Option<u32>,

    /// 24h trading volume in USD
    pub total_volume: Option<f64>,

    /// 24h high
    pub high_24h: Option<f64>,

    /// 24h low
    pub low_24h: Option<f64>,

    /// 24h absolute price change
    pub price_change_24h: Option<f64>,

    /// 24h price change percentage
    pub price_change_percentage_24h: Option<f64>,

    /// 7d price change percentage, only present when requested upstream
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_change_percentage_7d_in_currency: Option<f64>,
}

/// Reduced coin record for selection lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularCoin {
    pub id: String,
    pub name: String,
    pub symbol: String,
}

impl From<Coin> for PopularCoin {
    fn from(coin: Coin) -> Self {
        Self {
            id: coin.id,
            name: coin.name,
            symbol: coin.symbol,
        }
    }
}

/// Entry of the full coin catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub symbol: String,
    pub name: String,
}

impl CatalogEntry {
    /// Case-insensitive symbol comparison
    pub fn matches_symbol(&self, symbol: &str) -> bool {
        self.symbol.to_lowercase() == symbol.to_lowercase()
    }
}

/// A single (timestamp, value) sample of a history series
///
/// Decoded from the API's `[timestamp_ms, value]` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct HistoryPoint {
    /// Milliseconds since the Unix epoch
    pub timestamp_ms: i64,
    pub value: f64,
}

impl From<(f64, f64)> for HistoryPoint {
    fn from((timestamp_ms, value): (f64, f64)) -> Self {
        Self {
            timestamp_ms: timestamp_ms as i64,
            value,
        }
    }
}

impl From<HistoryPoint> for (f64, f64) {
    fn from(point: HistoryPoint) -> Self {
        (point.timestamp_ms as f64, point.value)
    }
}

impl HistoryPoint {
    /// Sample time, or None if the timestamp is out of range
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }
}

/// Price, market cap and volume series over a day window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinHistory {
    pub prices: Vec<HistoryPoint>,

    #[serde(default)]
    pub market_caps: Vec<HistoryPoint>,

    #[serde(default)]
    pub total_volumes: Vec<HistoryPoint>,
}

impl CoinHistory {
    /// Last price sample, if any
    pub fn latest_price(&self) -> Option<f64> {
        self.prices.last().map(|p| p.value)
    }

    /// Difference between the last and the first price in the window
    pub fn price_change(&self) -> Option<f64> {
        match (self.prices.first(), self.prices.last()) {
            (Some(first), Some(last)) => Some(last.value - first.value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_market_row_with_nulls() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.example/btc.png",
            "current_price": 64000.5,
            "market_cap": 1260000000000,
            "market_cap_rank": 1,
            "total_volume": 31000000000,
            "high_24h": null,
            "low_24h": 63000,
            "price_change_24h": -120.4,
            "price_change_percentage_24h": -0.19,
            "fully_diluted_valuation": 1340000000000
        }"#;

        let coin: Coin = serde_json::from_str(json).unwrap();
        assert_eq!(coin.id, "bitcoin");
        assert_eq!(coin.market_cap_rank, Some(1));
        assert_eq!(coin.high_24h, None);
        assert_eq!(coin.low_24h, Some(63000.0));
        assert_eq!(coin.price_change_percentage_7d_in_currency, None);

        let popular = PopularCoin::from(coin);
        assert_eq!(popular.symbol, "btc");
    }

    #[test]
    fn catalog_symbol_match_ignores_case() {
        let entry = CatalogEntry {
            id: "ethereum".to_string(),
            symbol: "eth".to_string(),
            name: "Ethereum".to_string(),
        };
        assert!(entry.matches_symbol("ETH"));
        assert!(entry.matches_symbol("eth"));
        assert!(!entry.matches_symbol("etc"));
    }

    #[test]
    fn history_points_decode_from_pairs() {
        let json = r#"{
            "prices": [[1711929600000, 70000.0], [1712016000000, 71500.25]],
            "market_caps": [[1711929600000, 1.3e12]]
        }"#;

        let history: CoinHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.prices.len(), 2);
        assert_eq!(history.prices[0].timestamp_ms, 1_711_929_600_000);
        assert!(history.total_volumes.is_empty());
        assert_eq!(history.latest_price(), Some(71500.25));
        assert_eq!(history.price_change(), Some(1500.25));

        let time = history.prices[0].time().unwrap();
        assert_eq!(time.to_rfc3339(), "2024-04-01T00:00:00+00:00");
    }

    #[test]
    fn empty_history_has_no_change() {
        let history = CoinHistory {
            prices: Vec::new(),
            market_caps: Vec::new(),
            total_volumes: Vec::new(),
        };
        assert_eq!(history.latest_price(), None);
        assert_eq!(history.price_change(), None);
    }
}
