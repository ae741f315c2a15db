//! Admission policy applied to each normalized observation, in upstream
//! arrival order. The policy never re-sorts; once the cap is reached all
//! later records are dropped regardless of validity.

use chrono::NaiveDate;
use specimap_core::{DisplayOptions, Observation};

/// Decides whether one observation enters the result set.
///
/// Checks run in a fixed order, short-circuiting on the first failure:
/// result cap, lower date bound, upper date bound, grade membership.
/// An unset date option applies no bound; an observation date that fails
/// to parse is not excluded by the date checks.
#[must_use]
pub fn admit(observation: &Observation, options: &DisplayOptions, admitted_count: usize) -> bool {
    if admitted_count >= options.display_amount as usize {
        return false;
    }

    let observed = parse_date(&observation.observed_date);

    if !options.since_date.is_empty() {
        if let (Some(observed), Some(since)) = (observed, parse_date(&options.since_date)) {
            if observed < since {
                return false;
            }
        }
    }

    if !options.before_date.is_empty() {
        if let (Some(observed), Some(before)) = (observed, parse_date(&options.before_date)) {
            if observed > before {
                return false;
            }
        }
    }

    options
        .grade_type
        .split(',')
        .any(|grade| grade == observation.grade_type)
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
