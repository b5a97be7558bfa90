pub mod member;
pub mod reservation;
pub mod waiting;
