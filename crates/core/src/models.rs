pub mod form;
pub mod rotation;
pub mod schedule;
