// src/client.rs
//! Caller side of `POST /analyze-sentiment`.

use anyhow::{bail, Context, Result};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::schema::{NewsItem, SentimentResult};

pub const ANALYZE_PATH: &str = "/analyze-sentiment";

#[derive(Clone, Debug)]
pub struct SentimentClient {
    http: reqwest::Client,
    endpoint: String,
}

impl SentimentClient {
    /// `base_url` like `http://127.0.0.1:8000` (trailing slash tolerated).
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("building HTTP client")?;
        Ok(Self {
            http,
            endpoint: format!("{}{ANALYZE_PATH}", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one batch. A non-2xx reply is an error carrying status and body.
    pub async fn analyze(&self, items: &[NewsItem]) -> Result<Vec<SentimentResult>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let resp = self
            .http
            .post(&self.endpoint)
            .json(items)
            .send()
            .await
            .with_context(|| format!("POST {}", self.endpoint))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            bail!("sentiment service returned {status}: {body}");
        }

        let results: Vec<SentimentResult> = resp
            .json()
            .await
            .context("decoding sentiment response")?;
        if results.len() != items.len() {
            bail!(
                "sentiment service returned {} results for {} items",
                results.len(),
                items.len()
            );
        }
        debug!(items = items.len(), "sentiment batch analyzed");
        Ok(results)
    }
}

/// Collapse items sharing `(stock, timestamp)` into one, joining texts with a
/// space. Groups keep the order in which they were first seen.
pub fn merge_same_timestamp(items: Vec<NewsItem>) -> Vec<NewsItem> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut out: Vec<NewsItem> = Vec::with_capacity(items.len());

    for it in items {
        let key = (it.stock.clone(), it.timestamp.clone());
        match index.get(&key) {
            Some(&i) => {
                let merged = &mut out[i].text;
                merged.push(' ');
                merged.push_str(&it.text);
            }
            None => {
                index.insert(key, out.len());
                out.push(it);
            }
        }
    }
    out
}
