use std::path::Path;

use actix_web::{get, web, HttpResponse};

use crate::{
    configuration::Settings,
    services::{read_profile_urls, run_batch, scrape_profile_page, write_records, Droid},
};

#[get("/start_scrape")]
async fn start_scrape(settings: web::Data<Settings>) -> HttpResponse {
    let scraper_settings = &settings.scraper;

    let urls = match read_profile_urls(Path::new(&scraper_settings.input_csv_path)) {
        Ok(urls) => urls,
        Err(e) => {
            return HttpResponse::BadRequest()
                .body(format!("No profile list uploaded yet: {}", e))
        }
    };
    log::info!("Starting batch of {} profiles", urls.len());

    let droid = match Droid::connect(scraper_settings).await {
        Ok(droid) => droid,
        Err(e) => {
            log::error!("Failed to start browser session: {:?}", e);
            return HttpResponse::InternalServerError().body(format!("Scraping error: {}", e));
        }
    };
    if let Err(e) = droid.ensure_session(scraper_settings).await {
        log::error!("Failed to establish authenticated session: {:?}", e);
        return HttpResponse::InternalServerError().body(format!("Scraping error: {}", e));
    }

    let driver = &droid.driver;
    let records = run_batch(urls, |url| async move {
        scrape_profile_page(driver, &url, scraper_settings).await
    })
    .await;

    if let Err(e) = droid.driver.quit().await {
        log::error!("Failed to close the browser session: {:?}", e);
    }

    if let Err(e) = write_records(Path::new(&scraper_settings.output_csv_path), &records) {
        log::error!("Failed to persist batch results: {:?}", e);
        return HttpResponse::InternalServerError().body(format!("Scraping error: {}", e));
    }

    HttpResponse::SeeOther()
        .insert_header(("Location", "/results"))
        .finish()
}
