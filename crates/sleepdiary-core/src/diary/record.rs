use serde::{Deserialize, Serialize};

use super::entry::RawEntry;

/// Efficiency percentages derived from a [`RawEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComputedMetrics {
    /// Time asleep as a percentage of time in bed.
    pub efficiency_actual_pct: f64,
    /// Time asleep as a percentage of the planned bedtime-to-wake window.
    pub efficiency_vs_target_pct: f64,
}

/// A diary entry together with its computed metrics.
///
/// Records are immutable once assembled. `id` stays `None` until the record
/// has been saved; storage hands back a new record carrying the assigned id.
///
/// Only [`RecordAssembler`](crate::RecordAssembler) and storage build records,
/// so they serialize but never deserialize:
///
/// ```compile_fail
/// let _: sleepdiary_core::SleepRecord = serde_json::from_str("{}").unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepRecord {
    id: Option<i64>,
    #[serde(flatten)]
    raw: RawEntry,
    #[serde(flatten)]
    metrics: ComputedMetrics,
}

impl SleepRecord {
    pub(crate) fn new(raw: RawEntry, metrics: ComputedMetrics) -> Self {
        Self {
            id: None,
            raw,
            metrics,
        }
    }

    pub(crate) fn with_id(self, id: i64) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn raw(&self) -> &RawEntry {
        &self.raw
    }

    pub fn metrics(&self) -> ComputedMetrics {
        self.metrics
    }

    pub fn entry_date(&self) -> &str {
        &self.raw.entry_date
    }

    pub fn efficiency_actual_pct(&self) -> f64 {
        self.metrics.efficiency_actual_pct
    }

    pub fn efficiency_vs_target_pct(&self) -> f64 {
        self.metrics.efficiency_vs_target_pct
    }

    /// Total sleep expressed in hours, for display.
    pub fn total_sleep_hours(&self) -> f64 {
        f64::from(self.raw.total_sleep_minutes) / 60.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SleepRecord {
        let raw = RawEntry {
            entry_date: "2024-03-01".into(),
            bedtime: "23:00".into(),
            wake_time_target: "07:00".into(),
            wake_time_actual: "07:10".into(),
            total_sleep_minutes: 420,
            ..RawEntry::default()
        };
        SleepRecord::new(
            raw,
            ComputedMetrics {
                efficiency_actual_pct: 93.33,
                efficiency_vs_target_pct: 87.5,
            },
        )
    }

    #[test]
    fn identity_is_absent_until_assigned() {
        let record = sample();
        assert_eq!(record.id(), None);
        let saved = record.clone().with_id(7);
        assert_eq!(saved.id(), Some(7));
        assert_eq!(saved.raw(), record.raw());
        assert_eq!(saved.metrics(), record.metrics());
    }

    #[test]
    fn serializes_as_flat_object() {
        let json = serde_json::to_value(sample().with_id(3)).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["bedtime"], "23:00");
        assert_eq!(json["efficiency_vs_target_pct"], 87.5);
        assert!(json.get("raw").is_none());
    }

    #[test]
    fn total_sleep_hours() {
        assert_eq!(sample().total_sleep_hours(), 7.0);
    }
}
