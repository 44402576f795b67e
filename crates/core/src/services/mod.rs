pub mod auth_service;
pub mod chart_service;
pub mod display_service;
pub mod summary_service;
pub mod transaction_store;
pub mod transactions_view;
