pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

// Re-export the schedule engine types for external use
pub use models::{DaySlot, Doctor, DoctorDetail, WeeklySchedule};
pub use services::schedule::{availability_summary, is_slot_available, AvailabilitySummary};
