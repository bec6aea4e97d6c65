//! Sleep efficiency ratios.
//!
//! Both ratios are returned unrounded and unclamped: a night where the reported
//! sleep exceeds the planned window legitimately scores above 100%.

/// Minutes spent in bed: asleep + awake overnight + time to fall asleep.
pub fn time_in_bed(total_sleep: u32, awake: u32, latency: u32) -> u64 {
    u64::from(total_sleep) + u64::from(awake) + u64::from(latency)
}

/// Percentage of the time in bed actually spent asleep.
///
/// Returns `0.0` when the time in bed is zero.
pub fn actual_efficiency(total_sleep: u32, awake: u32, latency: u32) -> f64 {
    let in_bed = time_in_bed(total_sleep, awake, latency);
    if in_bed == 0 {
        return 0.0;
    }
    100.0 * f64::from(total_sleep) / in_bed as f64
}

/// Sleep achieved as a percentage of the planned bedtime-to-wake window.
///
/// Returns `0.0` when the window is zero.
pub fn vs_target_efficiency(target_window_minutes: u32, total_sleep: u32) -> f64 {
    if target_window_minutes == 0 {
        return 0.0;
    }
    100.0 * f64::from(total_sleep) / f64::from(target_window_minutes)
}
