//! Time-of-day slider state and label.

use chrono::NaiveTime;

use crate::types::TimeFilter;

pub const MIN_VALUE: i32 = -1;
pub const MAX_VALUE: i32 = 1439;

/// Text shown next to the slider, e.g. `"9:05 AM"` or `"(any time)"`.
pub fn label(filter: TimeFilter) -> String {
    match filter {
        TimeFilter::Any => "(any time)".to_string(),
        TimeFilter::Minute(m) => format_minutes(m),
    }
}

/// 12-hour clock rendering of a minute of the day.
pub fn format_minutes(minutes: i32) -> String {
    let minutes = minutes.rem_euclid(24 * 60) as u32;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        .map(|t| t.format("%-I:%M %p").to_string())
        .unwrap_or_default()
}

/// Slider positions visited by a scrub: `-1` followed by every `step` minutes.
pub fn scrub_positions(step: u32) -> impl Iterator<Item = TimeFilter> {
    let step = step.max(1) as usize;
    std::iter::once(TimeFilter::from(MIN_VALUE))
        .chain((0..=MAX_VALUE).step_by(step).map(TimeFilter::Minute))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        assert_eq!(label(TimeFilter::Any), "(any time)");
        assert_eq!(label(TimeFilter::Minute(0)), "12:00 AM");
        assert_eq!(label(TimeFilter::Minute(545)), "9:05 AM");
        assert_eq!(label(TimeFilter::Minute(720)), "12:00 PM");
        assert_eq!(label(TimeFilter::Minute(1439)), "11:59 PM");
    }

    #[test]
    fn test_scrub_positions() {
        let positions: Vec<_> = scrub_positions(360).collect();
        assert_eq!(
            positions,
            vec![
                TimeFilter::Any,
                TimeFilter::Minute(0),
                TimeFilter::Minute(360),
                TimeFilter::Minute(720),
                TimeFilter::Minute(1080),
            ]
        );
        assert_eq!(scrub_positions(0).count(), 1 + 1440);
    }
}
