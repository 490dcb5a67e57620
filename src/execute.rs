pub mod executor;
pub mod ops;
