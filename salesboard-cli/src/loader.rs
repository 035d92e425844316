//! Background dataset loads with supersession.
//!
//! Every reload gets a fresh generation number. When a load finishes, its
//! result is applied only if no newer load has been requested since; a
//! superseded result is dropped on the floor, never spliced into state
//! that has moved on.

use anyhow::Result;
use salesboard_core::SalesDataset;
use salesboard_ingest::{CsvSource, read_records};
use tokio::sync::mpsc;
use tracing::debug;

/// Fetch, parse, and normalize one dataset from a source
pub async fn load_dataset(source: &CsvSource) -> Result<SalesDataset> {
    let text = source.fetch_text().await?;
    let records = read_records(&text)?;
    Ok(SalesDataset::from_records(records))
}

struct LoadOutcome {
    generation: u64,
    result: Result<SalesDataset>,
}

pub struct Loader {
    source: CsvSource,
    current: u64,
    tx: mpsc::UnboundedSender<LoadOutcome>,
    rx: mpsc::UnboundedReceiver<LoadOutcome>,
}

impl Loader {
    pub fn new(source: CsvSource) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            source,
            current: 0,
            tx,
            rx,
        }
    }

    pub fn source(&self) -> &CsvSource {
        &self.source
    }

    /// Kick off a load; any load still in flight is now stale
    pub fn request(&mut self) -> u64 {
        self.current += 1;
        let generation = self.current;
        let source = self.source.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = load_dataset(&source).await;
            // The receiver disappears on shutdown; nothing to do then
            let _ = tx.send(LoadOutcome { generation, result });
        });
        generation
    }

    /// Non-blocking check for a finished load
    ///
    /// Stale completions are discarded here; only a result carrying the
    /// newest generation ever reaches the caller.
    pub fn poll(&mut self) -> Option<Result<SalesDataset>> {
        while let Ok(outcome) = self.rx.try_recv() {
            if outcome.generation == self.current {
                return Some(outcome.result);
            }
            debug!(
                generation = outcome.generation,
                current = self.current,
                "discarding superseded load result"
            );
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    const CSV_V1: &str = "YEAR,MONTH,ITEM TYPE,RETAIL SALES,RETAIL TRANSFERS,WAREHOUSE SALES\n\
2020,1,BEER,10,0,5\n";
    const CSV_V2: &str = "YEAR,MONTH,ITEM TYPE,RETAIL SALES,RETAIL TRANSFERS,WAREHOUSE SALES\n\
2020,1,BEER,10,0,5\n2020,2,WINE,20,1,6\n2021,1,BEER,30,2,7\n";

    async fn wait_for_result(loader: &mut Loader) -> Result<SalesDataset> {
        for _ in 0..200 {
            if let Some(result) = loader.poll() {
                return result;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("load never completed");
    }

    #[tokio::test]
    async fn test_load_dataset_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV_V1.as_bytes()).unwrap();
        let ds = load_dataset(&CsvSource::File(file.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(ds.record_count(), 1);
    }

    #[tokio::test]
    async fn test_load_dataset_missing_file_is_err() {
        let source = CsvSource::File("/no/such/sales.csv".into());
        assert!(load_dataset(&source).await.is_err());
    }

    #[tokio::test]
    async fn test_newer_request_supersedes_older() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV_V1.as_bytes()).unwrap();
        file.flush().unwrap();
        let mut loader = Loader::new(CsvSource::File(file.path().to_path_buf()));

        loader.request();
        // Rewrite the file, then request again before draining anything
        std::fs::write(file.path(), CSV_V2).unwrap();
        loader.request();

        let ds = wait_for_result(&mut loader).await.unwrap();
        // Only the second request's view of the file may come through
        assert_eq!(ds.record_count(), 3);

        // The superseded first result never surfaces afterwards
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(loader.poll().is_none());
    }

    #[tokio::test]
    async fn test_each_request_bumps_the_generation() {
        let mut loader = Loader::new(CsvSource::File("/dev/null".into()));
        let g1 = loader.request();
        let g2 = loader.request();
        assert!(g2 > g1);
    }
}
