//! Elapsed time between two clock readings.

use super::clock::MINUTES_PER_DAY;

/// Minutes from `bed_minutes` to `wake_minutes`, both offsets since midnight.
///
/// A wake time at or before the bedtime is taken to fall on the next day, so
/// equal inputs give a full 1440-minute window rather than zero. Inputs past
/// one day are reduced modulo 1440 first, so the result is always in `1..=1440`.
pub fn window(bed_minutes: u32, wake_minutes: u32) -> u32 {
    let bed_minutes = bed_minutes % MINUTES_PER_DAY;
    let wake_minutes = wake_minutes % MINUTES_PER_DAY;
    if wake_minutes > bed_minutes {
        wake_minutes - bed_minutes
    } else {
        wake_minutes + MINUTES_PER_DAY - bed_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_day_window() {
        assert_eq!(window(390, 450), 60);
        assert_eq!(window(0, 1439), 1439);
    }

    #[test]
    fn rolls_over_midnight() {
        assert_eq!(window(450, 390), 1380);
        assert_eq!(window(23 * 60, 7 * 60), 480);
        assert_eq!(window(1439, 0), 1);
    }

    #[test]
    fn equal_times_span_a_full_day() {
        assert_eq!(window(450, 450), 1440);
        assert_eq!(window(0, 0), 1440);
    }

    #[test]
    fn offsets_past_one_day_wrap() {
        assert_eq!(window(2000, 0), 880);
        assert_eq!(window(1440, 60), 60);
        assert_eq!(window(u32::MAX, u32::MAX), 1440);
    }

    proptest! {
        #[test]
        fn any_offsets_stay_within_a_day(bed in any::<u32>(), wake in any::<u32>()) {
            let w = window(bed, wake);
            prop_assert!((1..=MINUTES_PER_DAY).contains(&w));
            prop_assert_eq!(w, window(bed % MINUTES_PER_DAY, wake % MINUTES_PER_DAY));
        }

        #[test]
        fn window_is_positive_and_under_two_days(bed in 0u32..1440, wake in 0u32..1440) {
            let w = window(bed, wake);
            prop_assert!(w > 0);
            prop_assert!(w <= MINUTES_PER_DAY);
            prop_assert_eq!((bed + w) % MINUTES_PER_DAY, wake);
        }
    }
}
