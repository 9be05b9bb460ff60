use std::path::Path;

use actix_web::{get, web, HttpResponse};
use askama::Template;

use crate::{
    configuration::Settings,
    domain::profile::ProfileRecord,
    services::{read_profile_urls, read_records},
};

#[derive(Template)]
#[template(path = "results.html")]
struct ResultsTemplate {
    records: Vec<ProfileRecord>,
}

#[get("/results")]
async fn results(settings: web::Data<Settings>) -> HttpResponse {
    let output_path = Path::new(&settings.scraper.output_csv_path);
    if output_path.exists() {
        return match read_records(output_path) {
            Ok(records) => {
                HttpResponse::Ok().body(ResultsTemplate { records }.render().unwrap())
            }
            Err(e) => {
                log::error!("Failed to read scraped records: {:?}", e);
                HttpResponse::InternalServerError().body("Failed to read scraped records")
            }
        };
    }

    let input_path = Path::new(&settings.scraper.input_csv_path);
    if input_path.exists() {
        return match read_profile_urls(input_path) {
            Ok(urls) => HttpResponse::Ok().body(format!(
                "CSV uploaded successfully! {} profiles ready to scrape. Visit /start_scrape.",
                urls.len()
            )),
            Err(e) => {
                log::error!("Failed to read uploaded profile list: {:?}", e);
                HttpResponse::InternalServerError().body("Failed to read uploaded profile list")
            }
        };
    }

    HttpResponse::Ok().body(ResultsTemplate { records: vec![] }.render().unwrap())
}
