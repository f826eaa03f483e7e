//! Daily closes from the Yahoo chart API.

use chrono::DateTime;
use fundrate_core::{Date, DateRange, SeriesFrame};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::client::HttpClient;
use crate::error::{FetchError, FetchResult};

/// Chart endpoint.
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// A ticker and the market-data column it feeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YahooTicker {
    /// Exchange symbol, e.g. `^GSPC`.
    pub symbol: String,
    /// Column name in the market-data table.
    pub column_name: String,
}

impl YahooTicker {
    /// Creates a ticker mapping.
    pub fn new(symbol: impl Into<String>, column_name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            column_name: column_name.into(),
        }
    }
}

/// Yahoo source settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YahooSettings {
    /// Whether the source is queried at all
    #[serde(default)]
    pub enabled: bool,

    /// Chart endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Tickers to download, in output column order
    #[serde(default = "default_tickers")]
    pub tickers: Vec<YahooTicker>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_tickers() -> Vec<YahooTicker> {
    [
        ("USDCLP=X", "USDCLP"),
        ("^GSPC", "S&P 500"),
        ("^DJI", "Dow Jones"),
        ("^IXIC", "NASDAQ"),
        ("URTH", "MSCI World"),
        ("EFA", "MSCI EAFE"),
        ("^FTSE", "FTSE 100"),
        ("^N225", "Nikkei 225"),
        ("^HSI", "Hang Seng"),
    ]
    .into_iter()
    .map(|(symbol, column)| YahooTicker::new(symbol, column))
    .collect()
}

impl Default for YahooSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_base_url(),
            tickers: default_tickers(),
        }
    }
}

impl YahooSettings {
    /// Chart URL of `symbol` over `range`; the end date is exclusive.
    #[must_use]
    pub fn chart_url(&self, symbol: &str, range: &DateRange) -> String {
        format!(
            "{}/{}?period1={}&period2={}&interval=1d",
            self.base_url,
            encode_symbol(symbol),
            midnight_timestamp(range.start),
            midnight_timestamp(range.end),
        )
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Downloads Yahoo closes through an [`HttpClient`].
pub struct YahooSource<'a, C: HttpClient + ?Sized> {
    client: &'a C,
    settings: &'a YahooSettings,
}

impl<'a, C: HttpClient + ?Sized> YahooSource<'a, C> {
    /// Creates a source.
    pub fn new(client: &'a C, settings: &'a YahooSettings) -> Self {
        Self { client, settings }
    }

    /// Daily, forward-filled closes of `ticker` over `range`.
    pub fn fetch_ticker(&self, ticker: &YahooTicker, range: &DateRange) -> FetchResult<SeriesFrame> {
        let url = self.settings.chart_url(&ticker.symbol, range);
        let body = self.client.get_text(&url)?;
        let frame = parse_chart(&body, &ticker.column_name)?;
        info!(ticker = %ticker.symbol, rows = frame.len(), "fetched yahoo closes");
        Ok(frame.reindex_daily().forward_fill())
    }
}

/// Parses a chart response into a one-column frame of closes.
///
/// Several bars on the same day keep the last close.
pub fn parse_chart(body: &str, column_name: &str) -> FetchResult<SeriesFrame> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| FetchError::parse("chart response", e.to_string()))?;

    if let Some(error) = response.chart.error {
        return Err(FetchError::parse("chart response", error.description));
    }
    let result = response
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.swap_remove(0)) })
        .ok_or_else(|| FetchError::parse("chart response", "empty result"))?;

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    let mut dates: Vec<Date> = Vec::with_capacity(result.timestamp.len());
    let mut values: Vec<Option<f64>> = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        let date = DateTime::from_timestamp(*ts, 0)
            .map(|dt| Date::from(dt.date_naive()))
            .ok_or_else(|| FetchError::parse("chart timestamp", ts.to_string()))?;
        let close = closes.get(i).copied().flatten();
        match dates.last() {
            Some(last) if *last == date => {
                if close.is_some() {
                    if let Some(slot) = values.last_mut() {
                        *slot = close;
                    }
                }
            }
            Some(last) if *last > date => {
                return Err(FetchError::parse(
                    "chart timestamp",
                    format!("{date} follows {last}"),
                ));
            }
            _ => {
                dates.push(date);
                values.push(close);
            }
        }
    }

    let mut frame = SeriesFrame::new(dates)?;
    frame.push_column(column_name, values)?;
    Ok(frame)
}

fn midnight_timestamp(date: Date) -> i64 {
    date.as_naive_date()
        .and_hms_opt(0, 0, 0)
        .map_or(0, |dt| dt.and_utc().timestamp())
}

fn encode_symbol(symbol: &str) -> String {
    symbol.replace('^', "%5E").replace('=', "%3D")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_chart_url() {
        let settings = YahooSettings::default();
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 2)).unwrap();

        let url = settings.chart_url("^GSPC", &range);

        assert_eq!(
            url,
            "https://query1.finance.yahoo.com/v8/finance/chart/%5EGSPC?period1=1704067200&period2=1704153600&interval=1d"
        );
    }

    #[test]
    fn test_defaults() {
        let settings = YahooSettings::default();
        assert!(!settings.enabled);
        assert_eq!(settings.tickers.len(), 9);
        assert_eq!(settings.tickers[0], YahooTicker::new("USDCLP=X", "USDCLP"));
    }

    #[test]
    fn test_parse_chart() {
        // 2024-01-02, 2024-01-03 (no close), 2024-01-05 at 14:30 UTC
        let body = r#"{"chart":{"result":[{
            "timestamp":[1704205800,1704292200,1704465000],
            "indicators":{"quote":[{"close":[4742.83,null,4697.24]}]}
        }],"error":null}}"#;

        let frame = parse_chart(body, "S&P 500").unwrap();

        assert_eq!(frame.index(), &[d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 5)]);
        assert_eq!(frame.get(0, "S&P 500"), Some(4742.83));
        assert_eq!(frame.get(1, "S&P 500"), None);

        let daily = frame.reindex_daily().forward_fill();
        assert_eq!(daily.len(), 4);
        assert_eq!(daily.get(2, "S&P 500"), Some(4742.83));
    }

    #[test]
    fn test_chart_error() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

        let err = parse_chart(body, "X").unwrap_err();

        assert!(err.to_string().contains("delisted"));
    }
}
