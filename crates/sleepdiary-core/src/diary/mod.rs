//! Diary data model: raw answers, computed metrics and the assembled record.

mod entry;
mod record;

pub use entry::RawEntry;
pub use record::{ComputedMetrics, SleepRecord};
