use actix_files::NamedFile;
use actix_web::{get, web, HttpRequest, HttpResponse};

use crate::configuration::Settings;

#[get("/download")]
async fn download(request: HttpRequest, settings: web::Data<Settings>) -> HttpResponse {
    match NamedFile::open(&settings.scraper.output_csv_path) {
        Ok(file) => file.into_response(&request),
        Err(_) => {
            HttpResponse::NotFound().body("No file available. Upload a CSV and scrape first.")
        }
    }
}
