//! File-based and in-memory price history sources.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use ewvar_core::{Date, PriceHistory, PricePoint, Ticker};
use ewvar_traits::error::TraitError;
use ewvar_traits::market_data::{PriceHistoryFetcher, SourceType};

/// Per-ticker overview of a loaded source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySummary {
    /// Ticker
    pub ticker: Ticker,
    /// Number of observations
    pub observations: usize,
    /// First observation date
    pub first_date: Option<Date>,
    /// Last observation date
    pub last_date: Option<Date>,
}

/// Histories keyed by ticker, shared by the sources below.
#[derive(Default)]
struct HistoryStore {
    histories: DashMap<Ticker, PriceHistory>,
}

impl HistoryStore {
    fn insert(&self, mut history: PriceHistory) {
        history.sort_by_date();
        self.histories.insert(history.ticker().clone(), history);
    }

    fn range(&self, ticker: &Ticker, start: Date, end: Date) -> Result<PriceHistory, TraitError> {
        if start > end {
            return Err(TraitError::InvalidInput(format!(
                "start {start} is after end {end}"
            )));
        }
        self.histories
            .get(ticker)
            .map(|h| h.between(start, end))
            .ok_or_else(|| TraitError::NotFound(format!("ticker {ticker}")))
    }

    fn summaries(&self) -> Vec<HistorySummary> {
        let mut summaries: Vec<HistorySummary> = self
            .histories
            .iter()
            .map(|entry| HistorySummary {
                ticker: entry.key().clone(),
                observations: entry.len(),
                first_date: entry.first_date(),
                last_date: entry.last_date(),
            })
            .collect();
        summaries.sort_by(|a, b| a.ticker.cmp(&b.ticker));
        summaries
    }
}

// =============================================================================
// CSV PRICE HISTORY SOURCE
// =============================================================================

/// CSV record for one daily observation.
///
/// Long format, one row per ticker and date:
///
/// ```text
/// ticker,date,adjusted_close
/// SPY,2024-01-02,472.65
/// TLT,2024-01-02,97.12
/// ```
#[derive(Debug, Deserialize)]
struct PriceRecord {
    #[serde(alias = "symbol")]
    ticker: String,
    date: String,
    #[serde(alias = "adj_close", alias = "close")]
    adjusted_close: f64,
}

/// CSV-based price history source for EOD files.
pub struct CsvPriceHistorySource {
    file_path: PathBuf,
    store: HistoryStore,
}

impl CsvPriceHistorySource {
    /// Create a new CSV source and load the file.
    ///
    /// # Errors
    ///
    /// `TraitError::IoError` if the file cannot be opened,
    /// `TraitError::ParseError` for a malformed row.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            store: HistoryStore::default(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload histories from file, replacing what was loaded before.
    pub fn reload(&self) -> Result<(), TraitError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.file_path)
            .map_err(|e| TraitError::IoError(e.to_string()))?;

        let mut grouped: HashMap<Ticker, Vec<PricePoint>> = HashMap::new();

        for (index, result) in reader.deserialize().enumerate() {
            let record: PriceRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
            // header is line 1
            let line = index + 2;

            let ticker = Ticker::parse(&record.ticker)
                .map_err(|e| TraitError::ParseError(format!("line {line}: {e}")))?;
            let date = Date::parse(&record.date)
                .map_err(|e| TraitError::ParseError(format!("line {line}: {e}")))?;

            grouped
                .entry(ticker)
                .or_default()
                .push(PricePoint::new(date, record.adjusted_close));
        }

        // Replace entries in place so a ticker present before and after never
        // reads as missing to a concurrent fetch.
        let loaded: HashSet<Ticker> = grouped.keys().cloned().collect();
        for (ticker, points) in grouped {
            debug!(ticker = %ticker, observations = points.len(), "Loaded price history");
            self.store.insert(PriceHistory::new(ticker, points));
        }
        self.store.histories.retain(|ticker, _| loaded.contains(ticker));

        Ok(())
    }

    /// Path of the backing file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Overview of every loaded ticker, sorted by ticker.
    pub fn summaries(&self) -> Vec<HistorySummary> {
        self.store.summaries()
    }
}

#[async_trait]
impl PriceHistoryFetcher for CsvPriceHistorySource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    async fn fetch_history(
        &self,
        ticker: &Ticker,
        start: Date,
        end: Date,
    ) -> Result<PriceHistory, TraitError> {
        self.store.range(ticker, start, end)
    }
}

// =============================================================================
// IN-MEMORY PRICE HISTORY SOURCE
// =============================================================================

/// In-memory price history source for tests and canned fixtures.
#[derive(Default)]
pub struct InMemoryPriceHistorySource {
    store: HistoryStore,
}

impl InMemoryPriceHistorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a ticker's history.
    pub fn insert(&self, history: PriceHistory) {
        self.store.insert(history);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_history(self, history: PriceHistory) -> Self {
        self.insert(history);
        self
    }

    /// Overview of every stored ticker, sorted by ticker.
    pub fn summaries(&self) -> Vec<HistorySummary> {
        self.store.summaries()
    }
}

#[async_trait]
impl PriceHistoryFetcher for InMemoryPriceHistorySource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    async fn fetch_history(
        &self,
        ticker: &Ticker,
        start: Date,
        end: Date,
    ) -> Result<PriceHistory, TraitError> {
        self.store.range(ticker, start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn d(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_csv_source_groups_and_sorts() {
        let file = write_csv(
            "ticker,date,adjusted_close\n\
             SPY,2024-01-03,101.0\n\
             TLT,2024-01-02,95.5\n\
             SPY,2024-01-02,100.0\n\
             SPY,2024-01-04,102.5\n",
        );

        let source = CsvPriceHistorySource::new(file.path()).unwrap();
        let spy = source
            .fetch_history(&Ticker::from("SPY"), d("2024-01-01"), d("2024-01-31"))
            .await
            .unwrap();

        assert_eq!(spy.prices(), vec![100.0, 101.0, 102.5]);
        assert_eq!(spy.first_date(), Some(d("2024-01-02")));
        assert!(spy.validate().is_ok());
        assert_eq!(source.source_type(), SourceType::File);
    }

    #[tokio::test]
    async fn test_reload_replaces_contents() {
        let file = write_csv(
            "ticker,date,adjusted_close\n\
             SPY,2024-01-02,100.0\n\
             TLT,2024-01-02,95.5\n",
        );
        let source = CsvPriceHistorySource::new(file.path()).unwrap();

        std::fs::write(
            file.path(),
            "ticker,date,adjusted_close\n\
             SPY,2024-01-02,100.0\n\
             SPY,2024-01-03,101.0\n\
             GLD,2024-01-02,190.0\n",
        )
        .unwrap();
        source.reload().unwrap();

        let tickers: Vec<String> = source
            .summaries()
            .iter()
            .map(|s| s.ticker.to_string())
            .collect();
        assert_eq!(tickers, vec!["GLD", "SPY"]);

        let spy = source
            .fetch_history(&Ticker::from("SPY"), d("2024-01-01"), d("2024-01-31"))
            .await
            .unwrap();
        assert_eq!(spy.prices(), vec![100.0, 101.0]);

        let tlt = source
            .fetch_history(&Ticker::from("TLT"), d("2024-01-01"), d("2024-01-31"))
            .await;
        assert!(matches!(tlt, Err(TraitError::NotFound(_))));
    }

    #[test]
    fn test_reload_never_hides_a_retained_ticker() {
        let file = write_csv(
            "ticker,date,adjusted_close\n\
             SPY,2024-01-02,100.0\n\
             SPY,2024-01-03,101.0\n\
             TLT,2024-01-02,95.5\n",
        );
        let source = CsvPriceHistorySource::new(file.path()).unwrap();
        let spy = Ticker::from("SPY");

        std::thread::scope(|scope| {
            let reloader = scope.spawn(|| {
                for _ in 0..200 {
                    source.reload().unwrap();
                }
            });
            while !reloader.is_finished() {
                let history = source
                    .store
                    .range(&spy, d("2024-01-01"), d("2024-01-31"))
                    .unwrap();
                assert_eq!(history.len(), 2);
            }
        });
    }

    #[tokio::test]
    async fn test_csv_source_range_is_inclusive() {
        let file = write_csv(
            "ticker,date,adjusted_close\n\
             SPY,2024-01-02,100.0\n\
             SPY,2024-01-03,101.0\n\
             SPY,2024-01-04,102.0\n\
             SPY,2024-01-05,103.0\n",
        );

        let source = CsvPriceHistorySource::new(file.path()).unwrap();
        let window = source
            .fetch_history(&Ticker::from("SPY"), d("2024-01-03"), d("2024-01-04"))
            .await
            .unwrap();

        assert_eq!(window.prices(), vec![101.0, 102.0]);
    }

    #[tokio::test]
    async fn test_csv_source_unknown_ticker() {
        let file = write_csv("ticker,date,adjusted_close\nSPY,2024-01-02,100.0\n");
        let source = CsvPriceHistorySource::new(file.path()).unwrap();

        let err = source
            .fetch_history(&Ticker::from("QQQ"), d("2024-01-01"), d("2024-01-31"))
            .await
            .unwrap_err();
        assert!(matches!(err, TraitError::NotFound(_)));
    }

    #[test]
    fn test_csv_source_column_aliases() {
        let file = write_csv("symbol,date,adj_close\nGLD, 2024-01-02 ,185.2\n");
        let source = CsvPriceHistorySource::new(file.path()).unwrap();

        let summaries = source.summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].ticker, Ticker::from("GLD"));
        assert_eq!(summaries[0].observations, 1);
    }

    #[test]
    fn test_csv_source_bad_date_reports_line() {
        let file = write_csv(
            "ticker,date,adjusted_close\n\
             SPY,2024-01-02,100.0\n\
             SPY,02/01/2024,101.0\n",
        );

        match CsvPriceHistorySource::new(file.path()) {
            Err(TraitError::ParseError(msg)) => assert!(msg.contains("line 3"), "{msg}"),
            other => panic!("expected parse error, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_csv_source_missing_file() {
        let result = CsvPriceHistorySource::new("/nonexistent/prices.csv");
        assert!(matches!(result, Err(TraitError::IoError(_))));
    }

    #[test]
    fn test_csv_source_reload_picks_up_changes() {
        let mut file = write_csv("ticker,date,adjusted_close\nSPY,2024-01-02,100.0\n");
        let source = CsvPriceHistorySource::new(file.path()).unwrap();
        assert_eq!(source.summaries()[0].observations, 1);

        file.write_all(b"SPY,2024-01-03,101.0\n").unwrap();
        file.flush().unwrap();
        source.reload().unwrap();
        assert_eq!(source.summaries()[0].observations, 2);
    }

    #[tokio::test]
    async fn test_in_memory_source() {
        let source = InMemoryPriceHistorySource::new().with_history(PriceHistory::from_pairs(
            "SPY",
            vec![(d("2024-01-03"), 101.0), (d("2024-01-02"), 100.0)],
        ));

        let history = source
            .fetch_history(&Ticker::from("SPY"), d("2024-01-01"), d("2024-01-05"))
            .await
            .unwrap();
        assert_eq!(history.prices(), vec![100.0, 101.0]);

        let err = source
            .fetch_history(&Ticker::from("SPY"), d("2024-01-05"), d("2024-01-01"))
            .await
            .unwrap_err();
        assert!(matches!(err, TraitError::InvalidInput(_)));
    }
}
