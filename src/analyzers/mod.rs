pub mod insights;
pub mod summary;
