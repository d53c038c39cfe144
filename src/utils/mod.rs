pub mod fetch;
pub mod serde_date;
