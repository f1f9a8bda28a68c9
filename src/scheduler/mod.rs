// Slot state machine and booking exclusivity.
pub mod slots;

pub use slots::{SchedulerError, SlotScheduler};
