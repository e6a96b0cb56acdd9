//! Remote CSV source — fetches a published spreadsheet's CSV export.
//!
//! Covers the "publish to web as CSV" URL a hosted sheet exposes, so no
//! credentialed API is involved. Transient failures are retried with
//! exponential backoff; the fetch is blocking, matching the synchronous
//! single-pass engine behind it.

use super::source::{SourceError, TableSource};
use crate::table::Table;
use std::io::Cursor;
use std::thread;
use std::time::Duration;

pub struct RemoteCsvSource {
    client: reqwest::blocking::Client,
    url: String,
    name: String,
    max_retries: u32,
    base_delay: Duration,
}

impl RemoteCsvSource {
    pub fn new(url: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            url: url.into(),
            name: "remote".to_string(),
            max_retries: 3,
            base_delay: Duration::from_millis(500),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn fetch_once(&self) -> Result<Table, SourceError> {
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus(status.as_u16()));
        }
        let body = response.bytes()?;
        Ok(Table::from_csv_reader(Cursor::new(body))?)
    }

    fn retryable(err: &SourceError) -> bool {
        match err {
            SourceError::Http(e) => e.is_timeout() || e.is_connect(),
            // 429 and 5xx are worth retrying; client errors are not.
            SourceError::HttpStatus(code) => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

impl TableSource for RemoteCsvSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Table, SourceError> {
        let mut attempt = 0;
        loop {
            match self.fetch_once() {
                Ok(table) => return Ok(table),
                Err(err) if attempt < self.max_retries && Self::retryable(&err) => {
                    let delay = self.base_delay * 2u32.pow(attempt);
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
