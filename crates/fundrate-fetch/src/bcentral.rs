//! Banco Central de Chile statistics tables.
//!
//! Each series is served one calendar year at a time as an HTML table whose
//! header row holds the day labels (`dd.Mmm.yyyy`, Spanish month
//! abbreviations) from the third column on, and whose body rows carry the
//! series name in their second cell. Numbers use `,` for decimals and `.`
//! for thousands; days without publication are empty.

use fundrate_core::{Date, DateRange, SeriesFrame};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::HttpClient;
use crate::error::{FetchError, FetchResult};

/// Base URL of the statistics tables.
pub const DEFAULT_BASE_URL: &str = "https://si3.bcentral.cl/Siete/ES/Siete/Cuadro";

const SPANISH_MONTHS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// One published series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BcentralSeries {
    /// Path appended to the base URL.
    pub endpoint: String,
    /// Row label of the series in the published table.
    pub column_name: String,
    /// Column name in the market-data table.
    pub new_column_name: String,
}

impl BcentralSeries {
    /// Creates a series definition.
    pub fn new(
        endpoint: impl Into<String>,
        column_name: impl Into<String>,
        new_column_name: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            column_name: column_name.into(),
            new_column_name: new_column_name.into(),
        }
    }
}

/// Banco Central source settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BcentralSettings {
    /// Base URL of the statistics tables
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Series to download, in output column order
    #[serde(default = "default_series")]
    pub series: Vec<BcentralSeries>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_series() -> Vec<BcentralSeries> {
    vec![
        BcentralSeries::new(
            "/CAP_PRECIOS/MN_CAP_PRECIOS/UF_IVP_DIARIO/UF_IVP_DIARIO",
            "Unidad de fomento (UF)",
            "CLFCLP",
        ),
        BcentralSeries::new(
            "/CAP_TIPO_CAMBIO/MN_TIPO_CAMBIO4/DOLAR_OBS_ADO",
            "Dólar observado",
            "USDCLP OBS",
        ),
        BcentralSeries::new(
            "/CAP_TASA_INTERES/MN_TASA_INTERES_09/TPM_C1/T12",
            "Tasa de política monetaria (TPM) (porcentaje)",
            "TPM",
        ),
    ]
}

impl Default for BcentralSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            series: default_series(),
        }
    }
}

impl BcentralSettings {
    /// URL of one year of `series`.
    #[must_use]
    pub fn series_url(&self, series: &BcentralSeries, year: i32) -> String {
        format!(
            "{}{}?cbFechaDiaria={}&cbFrecuencia=DAILY&cbCalculo=NONE&cbFechaBase=",
            self.base_url, series.endpoint, year
        )
    }
}

/// Downloads Banco Central series through an [`HttpClient`].
pub struct BcentralSource<'a, C: HttpClient + ?Sized> {
    client: &'a C,
    settings: &'a BcentralSettings,
}

impl<'a, C: HttpClient + ?Sized> BcentralSource<'a, C> {
    /// Creates a source.
    pub fn new(client: &'a C, settings: &'a BcentralSettings) -> Self {
        Self { client, settings }
    }

    /// One year of `series`, daily and forward-filled.
    pub fn fetch_year(&self, series: &BcentralSeries, year: i32) -> FetchResult<SeriesFrame> {
        let url = self.settings.series_url(series, year);
        let body = self.client.get_text(&url)?;
        let frame = parse_table(&body, series, &url)?;
        debug!(
            series = %series.new_column_name,
            year,
            rows = frame.len(),
            "parsed bcentral table"
        );
        Ok(frame.reindex_daily().forward_fill())
    }

    /// Every year of `series` touched by `range`, concatenated.
    pub fn fetch_series(
        &self,
        series: &BcentralSeries,
        range: &DateRange,
    ) -> FetchResult<SeriesFrame> {
        let years = range
            .years()
            .map(|year| self.fetch_year(series, year))
            .collect::<FetchResult<Vec<_>>>()?;
        let frame = SeriesFrame::concat_rows(&years);
        info!(series = %series.new_column_name, rows = frame.len(), "fetched bcentral series");
        Ok(frame)
    }
}

/// Extracts `series` from a published table, one row per header date.
///
/// `url` is only used in error messages.
pub fn parse_table(html: &str, series: &BcentralSeries, url: &str) -> FetchResult<SeriesFrame> {
    let document = Html::parse_document(html);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let cell_sel = selector("th, td")?;

    let no_table = || FetchError::NoTable {
        url: url.to_string(),
    };
    let table = document.select(&table_sel).next().ok_or_else(no_table)?;
    let mut rows = table.select(&row_sel);
    let header = rows.next().ok_or_else(no_table)?;

    let dates = header
        .select(&cell_sel)
        .skip(2)
        .map(|cell| parse_spanish_date(&cell_text(cell)))
        .collect::<FetchResult<Vec<_>>>()?;

    let wanted = normalize_space(&series.column_name);
    let row = rows
        .find(|row| {
            row.select(&cell_sel)
                .nth(1)
                .is_some_and(|cell| cell_text(cell) == wanted)
        })
        .ok_or_else(|| FetchError::MissingSeries {
            series: series.column_name.clone(),
            url: url.to_string(),
        })?;

    let mut values = row
        .select(&cell_sel)
        .skip(2)
        .map(|cell| parse_number(&cell_text(cell)))
        .collect::<FetchResult<Vec<_>>>()?;
    values.resize(dates.len(), None);

    let mut frame = SeriesFrame::new(dates)?;
    frame.push_column(series.new_column_name.clone(), values)?;
    Ok(frame)
}

/// Parses a `dd.Mmm.yyyy` label with a Spanish month abbreviation.
///
/// ```rust
/// use fundrate_fetch::bcentral::parse_spanish_date;
///
/// let date = parse_spanish_date("05.Ago.2024").unwrap();
/// assert_eq!(date.to_string(), "2024-08-05");
/// ```
pub fn parse_spanish_date(label: &str) -> FetchResult<Date> {
    let invalid = |message: &str| FetchError::parse(format!("date label '{label}'"), message);

    let mut parts = label.trim().split('.');
    let (Some(day), Some(month), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid("expected dd.Mmm.yyyy"));
    };

    let month = month.to_lowercase();
    let month = SPANISH_MONTHS
        .iter()
        .position(|m| *m == month)
        .ok_or_else(|| invalid("unknown month"))?;
    let day: u32 = day.parse().map_err(|_| invalid("bad day"))?;
    let year: i32 = year.parse().map_err(|_| invalid("bad year"))?;

    // position is < 12
    #[allow(clippy::cast_possible_truncation)]
    let month = month as u32 + 1;
    Date::from_ymd(year, month, day).map_err(|e| invalid(&e.to_string()))
}

/// Parses a `1.234,56` style number; empty and `ND` cells are missing.
///
/// ```rust
/// use fundrate_fetch::bcentral::parse_number;
///
/// assert_eq!(parse_number("37.095,01").unwrap(), Some(37_095.01));
/// assert_eq!(parse_number("").unwrap(), None);
/// ```
pub fn parse_number(text: &str) -> FetchResult<Option<f64>> {
    let text = text.trim();
    if text.is_empty() || text.eq_ignore_ascii_case("nd") || text == "-" {
        return Ok(None);
    }
    let normalized = text.replace('.', "").replace(',', ".");
    normalized
        .parse::<f64>()
        .map(Some)
        .map_err(|e| FetchError::parse(format!("number '{text}'"), e.to_string()))
}

fn selector(css: &str) -> FetchResult<Selector> {
    Selector::parse(css).map_err(|e| FetchError::parse(format!("selector '{css}'"), e.to_string()))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    normalize_space(&cell.text().collect::<String>())
}

fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
