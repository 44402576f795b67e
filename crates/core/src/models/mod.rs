pub mod chart;
pub mod farmer;
pub mod settings;
pub mod summary;
pub mod transaction;
