pub mod batch;
pub mod data_persistance;
pub mod droid;
pub mod profile_scraper;

pub use batch::*;
pub use data_persistance::*;
pub use droid::*;
pub use profile_scraper::*;
