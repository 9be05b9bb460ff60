use actix_multipart::form::{tempfile::TempFile, MultipartForm};
use actix_web::{post, web, HttpResponse};

use crate::configuration::Settings;

#[derive(MultipartForm)]
struct UploadForm {
    file: TempFile,
}

#[post("/upload")]
async fn upload(
    form: MultipartForm<UploadForm>,
    settings: web::Data<Settings>,
) -> HttpResponse {
    let form = form.into_inner();

    let file_name = form.file.file_name.clone().unwrap_or_default();
    if !file_name.to_lowercase().ends_with(".csv") {
        return HttpResponse::BadRequest().body("Invalid file type");
    }

    match std::fs::copy(form.file.file.path(), &settings.scraper.input_csv_path) {
        Ok(_) => {
            log::info!(
                "Stored uploaded profile list as {}",
                settings.scraper.input_csv_path
            );
            HttpResponse::SeeOther()
                .insert_header(("Location", "/results"))
                .finish()
        }
        Err(e) => {
            log::error!("Failed to store uploaded file: {:?}", e);
            HttpResponse::InternalServerError().body("Failed to store the uploaded file")
        }
    }
}
