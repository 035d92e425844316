//! CSV transport: where the text comes from

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::debug;

/// Where to fetch the dataset from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvSource {
    File(PathBuf),
    Http(String),
}

impl CsvSource {
    /// Treat anything with an http(s) scheme as a URL, everything else as
    /// a local path
    pub fn from_arg(arg: &str) -> Self {
        if arg.starts_with("http://") || arg.starts_with("https://") {
            CsvSource::Http(arg.to_string())
        } else {
            CsvSource::File(PathBuf::from(arg))
        }
    }

    /// Short form for status lines and log output
    pub fn describe(&self) -> String {
        match self {
            CsvSource::File(path) => path.display().to_string(),
            CsvSource::Http(url) => url.clone(),
        }
    }

    /// Fetch the raw CSV text
    ///
    /// One shot, no retries. Callers decide whether a failure is fatal or
    /// just an empty dashboard.
    pub async fn fetch_text(&self) -> Result<String> {
        match self {
            CsvSource::File(path) => {
                debug!(path = %path.display(), "reading CSV from disk");
                tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))
            }
            CsvSource::Http(url) => {
                debug!(%url, "fetching CSV over HTTP");
                let client = reqwest::Client::new();
                let resp = client
                    .get(url)
                    .send()
                    .await
                    .with_context(|| format!("fetching {url}"))?;

                let status = resp.status();
                if !status.is_success() {
                    bail!("CSV fetch failed: {status} for {url}");
                }
                resp.text().await.context("reading CSV response body")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_arg_classifies_scheme() {
        assert_eq!(
            CsvSource::from_arg("https://example.org/sales.csv"),
            CsvSource::Http("https://example.org/sales.csv".to_string())
        );
        assert_eq!(
            CsvSource::from_arg("data/sales.csv"),
            CsvSource::File(PathBuf::from("data/sales.csv"))
        );
        assert_eq!(
            CsvSource::from_arg("http://localhost:8080/x.csv"),
            CsvSource::Http("http://localhost:8080/x.csv".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error_with_path_context() {
        let source = CsvSource::File(PathBuf::from("/definitely/not/here.csv"));
        let err = source.fetch_text().await.unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.csv"));
    }
}
