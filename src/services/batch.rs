use std::future::Future;

use crate::domain::profile::ProfileRecord;

/// Run every URL through the scrape function, strictly one at a time,
/// and keep the successes in input order. A failed profile is logged,
/// skipped and never retried within the run.
pub async fn run_batch<F, Fut>(urls: Vec<String>, mut scrape: F) -> Vec<ProfileRecord>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = anyhow::Result<ProfileRecord>>,
{
    let mut records = Vec::new();
    for url in urls {
        match scrape(url.clone()).await {
            Ok(record) => records.push(record),
            Err(e) => log::error!("Skipping profile {}: {:?}", url, e),
        }
    }
    log::info!("Batch finished with {} records", records.len());
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn failed_profile_is_skipped_and_order_is_kept() {
        let urls = vec![
            "https://example.com/in/one".to_string(),
            "https://example.com/in/two".to_string(),
            "https://example.com/in/three".to_string(),
        ];

        let records = run_batch(urls, |url| async move {
            if url.ends_with("two") {
                anyhow::bail!("page heading did not render");
            }
            Ok(ProfileRecord::not_available(&url))
        })
        .await;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].url, "https://example.com/in/one");
        assert_eq!(records[1].url, "https://example.com/in/three");
    }

    #[tokio::test]
    async fn empty_input_yields_an_empty_batch() {
        let records = run_batch(vec![], |url| async move {
            Ok(ProfileRecord::not_available(&url))
        })
        .await;
        assert!(records.is_empty());
    }
}
