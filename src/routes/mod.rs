pub mod default_route;
pub mod download_route;
pub mod results_route;
pub mod scrape_route;
pub mod upload_route;
