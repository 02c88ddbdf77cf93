// libs/doctor-cell/src/services/schedule.rs
//
// Pure weekly-schedule matching. Everything here is synchronous, allocation-light
// and fail-closed: bad input means "not available", never an error.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::WeeklySchedule;

/// Canonical presentation order for summaries. Deliberately Monday-first and
/// linear: runs never wrap from Sunday back into Monday.
pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Schedule key for a calendar weekday.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse an `HH:MM` string into minutes since midnight. Lenient on the hour
/// width so `9:00` and `09:00` compare equal; anything else is rejected.
pub fn parse_time(time: &str) -> Option<u32> {
    let (hours, minutes) = time.split_once(':')?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}

/// Whether `time` on `date` falls inside the doctor's working hours.
///
/// The match is half-open: a slot at exactly `startTime` is bookable, a slot
/// at exactly `endTime` is not. Missing schedule, unknown weekday, unparseable
/// or inverted ranges all yield `false` - a booking UI must never see an error
/// from this check, and must never be told "available" on ambiguous data.
pub fn is_slot_available(schedule: Option<&WeeklySchedule>, date: NaiveDate, time: &str) -> bool {
    let Some(schedule) = schedule else {
        return false;
    };
    if time.is_empty() {
        return false;
    }
    let Some(requested) = parse_time(time) else {
        return false;
    };

    let Some(slot) = schedule.day(weekday_name(date.weekday())) else {
        return false;
    };
    if !slot.is_available {
        return false;
    }

    // Degenerate (start == end) and inverted (start > end) windows never match.
    match (parse_time(&slot.start_time), parse_time(&slot.end_time)) {
        (Some(start), Some(end)) => requested >= start && requested < end,
        _ => false,
    }
}

/// Compressed weekly summary, e.g. `Mon-Fri: 09:00-17:00, Sat: 10:00-12:00`.
///
/// The two empty states are distinct: [`AvailabilitySummary::NotSet`] means no
/// schedule data exists at all, [`AvailabilitySummary::NoneAvailable`] means a
/// schedule exists but every day is off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilitySummary {
    NotSet,
    NoneAvailable,
    Ranges(String),
}

impl fmt::Display for AvailabilitySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AvailabilitySummary::NotSet => write!(f, "Availability not set"),
            AvailabilitySummary::NoneAvailable => write!(f, "Not available"),
            AvailabilitySummary::Ranges(text) => write!(f, "{}", text),
        }
    }
}

/// Walk the week Monday through Sunday, merging adjacent days whose start/end
/// times are identical into one segment. Times are rendered verbatim, so a day
/// flagged available with empty times shows up as `"-"` rather than being
/// special-cased away.
pub fn availability_summary(schedule: Option<&WeeklySchedule>) -> AvailabilitySummary {
    let Some(schedule) = schedule else {
        return AvailabilitySummary::NotSet;
    };
    if schedule.is_empty() {
        return AvailabilitySummary::NotSet;
    }

    let mut summary_parts: Vec<String> = Vec::new();
    let mut run_start: Option<usize> = None;
    let mut run_signature = String::new();

    for (i, day) in WEEKDAYS.iter().enumerate() {
        let signature = schedule
            .day(day)
            .filter(|slot| slot.is_available)
            .map(|slot| format!("{}-{}", slot.start_time, slot.end_time));

        match signature {
            Some(signature) => match run_start {
                None => {
                    run_start = Some(i);
                    run_signature = signature;
                }
                Some(start) if signature != run_signature => {
                    summary_parts.push(render_run(start, i - 1, &run_signature));
                    run_start = Some(i);
                    run_signature = signature;
                }
                Some(_) => {}
            },
            None => {
                if let Some(start) = run_start.take() {
                    summary_parts.push(render_run(start, i - 1, &run_signature));
                }
            }
        }
    }

    if let Some(start) = run_start {
        summary_parts.push(render_run(start, WEEKDAYS.len() - 1, &run_signature));
    }

    if summary_parts.is_empty() {
        AvailabilitySummary::NoneAvailable
    } else {
        AvailabilitySummary::Ranges(summary_parts.join(", "))
    }
}

fn render_run(start: usize, end: usize, time_range: &str) -> String {
    if start == end {
        format!("{}: {}", &WEEKDAYS[start][..3], time_range)
    } else {
        format!("{}-{}: {}", &WEEKDAYS[start][..3], &WEEKDAYS[end][..3], time_range)
    }
}
