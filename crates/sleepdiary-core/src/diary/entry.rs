use serde::{Deserialize, Serialize};

/// One night's diary answers, exactly as collected.
///
/// Time fields are kept as the raw strings the user typed; they are parsed
/// (leniently) only when metrics are computed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawEntry {
    /// Calendar date of the entry (`YYYY-MM-DD`).
    pub entry_date: String,
    /// When the user went to bed (`HH:MM`).
    pub bedtime: String,
    /// Planned wake time (`HH:MM`).
    pub wake_time_target: String,
    /// Actual wake time (`HH:MM`).
    pub wake_time_actual: String,
    pub nap_minutes: u32,
    /// Self-rated quality, 1 (very poor) to 5 (excellent).
    pub sleep_quality_score: u32,
    pub total_sleep_minutes: u32,
    /// Minutes awake during the night, not counting sleep latency.
    pub awake_minutes: u32,
    /// Minutes between getting into bed and falling asleep.
    pub sleep_latency_minutes: u32,
    pub wake_count: u32,
    #[serde(default)]
    pub notes: Option<String>,
}
