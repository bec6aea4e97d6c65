//! Turns raw diary answers into a finished [`SleepRecord`].

use crate::diary::{ComputedMetrics, RawEntry, SleepRecord};

use super::clock::minutes_or_zero;
use super::efficiency::time_in_bed;
use super::rounding::RoundingPolicy;
use super::window::window;

/// Computes efficiency metrics with a fixed rounding policy.
///
/// The assembler holds no state besides its policy, so one value can be shared
/// freely between callers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordAssembler {
    policy: RoundingPolicy,
}

impl RecordAssembler {
    pub fn new(policy: RoundingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RoundingPolicy {
        self.policy
    }

    /// Planned sleep window from bedtime to target wake time, in minutes.
    ///
    /// Unparseable times count as `00:00`, so this never fails.
    pub fn target_window(&self, raw: &RawEntry) -> u32 {
        let bed = minutes_or_zero(&raw.bedtime);
        let wake = minutes_or_zero(&raw.wake_time_target);
        window(bed, wake)
    }

    /// Compute both rounded efficiency percentages for `raw`.
    ///
    /// Rounds straight from the minute counts with
    /// [`RoundingPolicy::apply_ratio`].
    pub fn compute(&self, raw: &RawEntry) -> ComputedMetrics {
        let total = u64::from(raw.total_sleep_minutes);
        let in_bed = time_in_bed(
            raw.total_sleep_minutes,
            raw.awake_minutes,
            raw.sleep_latency_minutes,
        );
        let window = u64::from(self.target_window(raw));

        ComputedMetrics {
            efficiency_actual_pct: self.policy.apply_ratio(total, in_bed),
            efficiency_vs_target_pct: self.policy.apply_ratio(total, window),
        }
    }

    /// Package `raw` with its metrics into an unsaved record.
    pub fn assemble(&self, raw: RawEntry) -> SleepRecord {
        let metrics = self.compute(&raw);
        log::debug!(
            "assembled entry for {}: actual={}% vs_target={}% ({})",
            raw.entry_date,
            metrics.efficiency_actual_pct,
            metrics.efficiency_vs_target_pct,
            self.policy
        );
        SleepRecord::new(raw, metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn entry(bedtime: &str, wake_target: &str, total: u32, awake: u32, latency: u32) -> RawEntry {
        RawEntry {
            entry_date: "2024-05-02".into(),
            bedtime: bedtime.into(),
            wake_time_target: wake_target.into(),
            wake_time_actual: wake_target.into(),
            sleep_quality_score: 4,
            total_sleep_minutes: total,
            awake_minutes: awake,
            sleep_latency_minutes: latency,
            ..RawEntry::default()
        }
    }

    #[test]
    fn overnight_entry() {
        let assembler = RecordAssembler::default();
        let raw = entry("23:00", "07:00", 420, 20, 10);
        assert_eq!(assembler.target_window(&raw), 480);

        let record = assembler.assemble(raw);
        assert_eq!(record.id(), None);
        assert_eq!(record.efficiency_actual_pct(), 93.33);
        assert_eq!(record.efficiency_vs_target_pct(), 87.5);
    }

    #[test]
    fn nearest_integer_policy() {
        let assembler = RecordAssembler::new(RoundingPolicy::NearestInteger);
        let metrics = assembler.compute(&entry("22:30", "06:30", 420, 30, 10));
        assert_eq!(metrics.efficiency_actual_pct, 91.0);
        assert_eq!(metrics.efficiency_vs_target_pct, 88.0);
    }

    #[test]
    fn vs_target_exceeds_hundred_for_short_window() {
        let record = RecordAssembler::default().assemble(entry("01:00", "01:30", 60, 0, 0));
        assert_eq!(record.efficiency_vs_target_pct(), 200.0);
        assert_eq!(record.efficiency_actual_pct(), 100.0);
    }

    #[test]
    fn empty_night_scores_zero() {
        let metrics = RecordAssembler::default().compute(&entry("23:00", "07:00", 0, 0, 0));
        assert_eq!(metrics.efficiency_actual_pct, 0.0);
        assert_eq!(metrics.efficiency_vs_target_pct, 0.0);
    }

    #[test]
    fn unparseable_times_degrade_to_midnight() {
        let assembler = RecordAssembler::default();
        // Both sides degrade to 00:00, which is a full-day window.
        let raw = entry("bad:input", "nope", 720, 0, 0);
        assert_eq!(assembler.target_window(&raw), 1440);
        assert_eq!(assembler.assemble(raw).efficiency_vs_target_pct(), 50.0);

        let raw = entry("garbage", "06:00", 360, 0, 0);
        assert_eq!(assembler.target_window(&raw), 360);
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        // 23 of 4000 minutes asleep is exactly 0.575%.
        let metrics = RecordAssembler::default().compute(&entry("23:00", "07:00", 23, 3977, 0));
        assert_eq!(metrics.efficiency_actual_pct, 0.58);

        let metrics = RecordAssembler::new(RoundingPolicy::NearestInteger)
            .compute(&entry("23:00", "07:00", 420, 50, 10));
        assert_eq!(metrics.efficiency_actual_pct, 88.0);
        assert_eq!(metrics.efficiency_vs_target_pct, 88.0);
    }

    #[test]
    fn raw_fields_are_kept_verbatim() {
        let raw = entry(" 23:00", "7:00", 400, 5, 5);
        let record = RecordAssembler::default().assemble(raw.clone());
        assert_eq!(record.raw(), &raw);
    }

    proptest! {
        #[test]
        fn assembly_is_deterministic(
            bed in 0u32..1440,
            wake in 0u32..1440,
            total in 0u32..1000,
            awake in 0u32..300,
            latency in 0u32..200,
            integer in any::<bool>(),
        ) {
            let policy = if integer { RoundingPolicy::NearestInteger } else { RoundingPolicy::TwoSigFigs };
            let assembler = RecordAssembler::new(policy);
            let raw = entry(
                &format!("{:02}:{:02}", bed / 60, bed % 60),
                &format!("{:02}:{:02}", wake / 60, wake % 60),
                total,
                awake,
                latency,
            );
            let first = assembler.assemble(raw.clone());
            let second = assembler.assemble(raw);
            prop_assert_eq!(
                first.efficiency_actual_pct().to_bits(),
                second.efficiency_actual_pct().to_bits()
            );
            prop_assert_eq!(
                first.efficiency_vs_target_pct().to_bits(),
                second.efficiency_vs_target_pct().to_bits()
            );
            prop_assert!(first.efficiency_actual_pct() <= 100.0);
        }
    }
}
