use std::time::Duration;

use anyhow::{anyhow, Result};
use reqwest::Client;

use crate::api::InventoryReport;

const CONNECT_TIMEOUT: u64 = 5;
const READ_TIMEOUT: u64 = 60;
const RETRIES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutMode {
    Stdout,
    Http,
}

impl OutMode {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "http" => OutMode::Http,
            _ => OutMode::Stdout,
        }
    }
}

pub fn emit_stdout(report: &InventoryReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// POSTs the report, retrying with a linear backoff.
pub async fn post_report(endpoint: &str, report: &InventoryReport) -> Result<()> {
    let client = Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT))
        .timeout(Duration::from_secs(READ_TIMEOUT))
        .build()?;

    let mut last = None;
    for attempt in 1..=RETRIES {
        match client.post(endpoint).json(report).send().await {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            Ok(resp) => {
                let code = resp.status();
                let body = resp.text().await.unwrap_or_default();
                last = Some(anyhow!("HTTP {code} {body}"));
            }
            Err(err) => last = Some(anyhow!(err)),
        }
        tokio::time::sleep(Duration::from_millis(300 * attempt as u64)).await;
    }
    Err(last.unwrap_or_else(|| anyhow!("report post failed")))
}

#[cfg(test)]
mod tests {
    use super::OutMode;

    #[test]
    fn parse_defaults_to_stdout() {
        assert_eq!(OutMode::parse("HTTP"), OutMode::Http);
        assert_eq!(OutMode::parse("stdout"), OutMode::Stdout);
        assert_eq!(OutMode::parse("anything-else"), OutMode::Stdout);
    }
}
