use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use rand::Rng;
use thirtyfour::{By, WebDriver};

use crate::{
    configuration::ScraperSettings,
    domain::profile::{extract_profile, ProfileRecord},
};

const HEADING_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Load one profile page and turn it into a record. The navigation and
/// the bounded wait for the primary heading are the only fatal steps;
/// once the page renders, extraction over the captured source always
/// produces a complete record.
pub async fn scrape_profile_page(
    driver: &WebDriver,
    url: &str,
    settings: &ScraperSettings,
) -> anyhow::Result<ProfileRecord> {
    driver
        .goto(url)
        .await
        .with_context(|| format!("Failed to load {}", url))?;
    wait_for_heading(
        driver,
        Duration::from_secs(settings.heading_wait_timeout_secs),
    )
    .await?;

    // Deliberate pause to keep the browsing cadence human-paced.
    let pause_ms = rand::thread_rng().gen_range(settings.pause_min_ms..=settings.pause_max_ms);
    tokio::time::sleep(Duration::from_millis(pause_ms)).await;

    let page_source = driver.source().await?;
    Ok(extract_profile(&page_source, url))
}

async fn wait_for_heading(driver: &WebDriver, timeout: Duration) -> anyhow::Result<()> {
    let deadline = Instant::now() + timeout;
    while driver.find(By::Tag("h1")).await.is_err() {
        if Instant::now() >= deadline {
            bail!("Page heading did not render within {}s", timeout.as_secs());
        }
        tokio::time::sleep(HEADING_POLL_INTERVAL).await;
    }
    Ok(())
}
