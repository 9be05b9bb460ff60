use std::{
    path::Path,
    time::{Duration, Instant},
};

use anyhow::{bail, Context};
use thirtyfour::{Cookie, DesiredCapabilities, WebDriver};

use crate::configuration::ScraperSettings;

pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    pub async fn connect(settings: &ScraperSettings) -> anyhow::Result<Self> {
        let caps = DesiredCapabilities::chrome();

        let driver = WebDriver::new(&settings.webdriver_url, caps)
            .await
            .with_context(|| format!("Failed to reach webdriver at {}", settings.webdriver_url))?;
        driver.maximize_window().await?;
        driver
            .set_page_load_timeout(Duration::from_secs(settings.page_load_timeout_secs))
            .await?;

        Ok(Droid { driver })
    }

    /// Establish an authenticated session before the batch starts:
    /// replay stored cookies if a state file exists, otherwise open the
    /// login page and wait for a manual login to complete, then store
    /// the cookies. An error here means the batch must not start.
    pub async fn ensure_session(&self, settings: &ScraperSettings) -> anyhow::Result<()> {
        let state_path = Path::new(&settings.session_state_path);
        if state_path.exists() {
            self.load_session(state_path, &settings.login_url).await
        } else {
            self.capture_session(state_path, settings).await
        }
    }

    async fn load_session(&self, state_path: &Path, login_url: &str) -> anyhow::Result<()> {
        let raw = std::fs::read_to_string(state_path)
            .with_context(|| format!("Failed to read session state {}", state_path.display()))?;
        let cookies: Vec<Cookie> = serde_json::from_str(&raw)
            .with_context(|| format!("Corrupt session state {}", state_path.display()))?;

        // Cookies can only be attached once the browser is on the
        // target domain.
        self.driver.goto(login_url).await?;
        for cookie in cookies {
            self.driver.add_cookie(cookie).await?;
        }
        log::info!("Restored session from {}", state_path.display());
        Ok(())
    }

    async fn capture_session(
        &self,
        state_path: &Path,
        settings: &ScraperSettings,
    ) -> anyhow::Result<()> {
        self.driver.goto(&settings.login_url).await?;
        log::info!("No stored session, complete the login in the browser window");

        let deadline = Instant::now() + Duration::from_secs(settings.login_wait_timeout_secs);
        loop {
            let current_url = self.driver.current_url().await?;
            if !current_url.as_str().contains("/login") {
                break;
            }
            if Instant::now() >= deadline {
                bail!(
                    "Login was not completed within {}s",
                    settings.login_wait_timeout_secs
                );
            }
            tokio::time::sleep(Duration::from_secs(2)).await;
        }

        let cookies = self.driver.get_all_cookies().await?;
        std::fs::write(state_path, serde_json::to_string_pretty(&cookies)?)
            .with_context(|| format!("Failed to write session state {}", state_path.display()))?;
        log::info!("Saved session to {}", state_path.display());
        Ok(())
    }
}
