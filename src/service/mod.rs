pub mod dashboard;
pub mod raw_data;
