pub mod doctor;
pub mod schedule;
