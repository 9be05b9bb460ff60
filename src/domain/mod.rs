pub mod experience;
pub mod profile;
