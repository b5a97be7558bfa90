pub mod auth;
pub mod id;
pub mod member;
pub mod reservation;
pub mod role;
pub mod waiting;
