pub mod auth;
pub mod waiting;
