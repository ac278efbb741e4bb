pub mod reporting;
pub mod store;
