pub mod waiting;
