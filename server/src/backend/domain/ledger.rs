//! Ledger primitives.
//!
//! Pure functions shared by every money-touching path: cent rounding,
//! display formatting, elapsed-time billing and date-range membership.
//! The dashboard, the report and the per-entity detail derivations all go
//! through these helpers so their numbers can never diverge.

use chrono::{DateTime, NaiveDate, Utc};

use crate::backend::domain::models::WorkspaceSession;

/// Round to 2 fractional digits, half-up at the cent.
///
/// Every mutation of a monetary field passes its result through here, so
/// stored amounts always sit on the cent grid.
pub fn round_money(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Whole minutes between two instants, rounded to the nearest minute and
/// clamped to be non-negative.
pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let seconds = (end - start).num_seconds() as f64;
    (seconds / 60.0).round().max(0.0) as i64
}

/// Billed cost of a workspace session at the given hourly rate.
///
/// Open sessions bill zero; closed sessions bill minute-granular elapsed
/// time converted to hours.
pub fn session_cost(session: &WorkspaceSession, hourly_rate: f64) -> f64 {
    match session.check_out_at {
        None => 0.0,
        Some(check_out_at) => {
            let minutes = minutes_between(session.check_in_at, check_out_at);
            round_money(minutes as f64 / 60.0 * hourly_rate)
        }
    }
}

/// Whether an instant falls inside the inclusive day range.
///
/// Absent bounds do not constrain: no bounds at all means everything
/// matches. The start bound compares against start-of-day, the end bound
/// against end-of-day, both inclusive.
pub fn date_in_range(
    target: DateTime<Utc>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> bool {
    if let Some(start) = start {
        let floor = start.and_hms_opt(0, 0, 0).unwrap().and_utc();
        if target < floor {
            return false;
        }
    }
    if let Some(end) = end {
        let ceiling = end.and_hms_opt(23, 59, 59).unwrap().and_utc();
        if target > ceiling {
            return false;
        }
    }
    true
}

/// Same contract as [`date_in_range`] for fields that are calendar days.
pub fn day_in_range(day: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    start.map_or(true, |s| day >= s) && end.map_or(true, |e| day <= e)
}

/// Display formatting for amounts: currency symbol, thousands separators,
/// fraction shown only when the amount is not whole. The raw number stays
/// the source of truth; this output is presentation only.
pub fn format_money(x: f64, currency: &str) -> String {
    let rounded = round_money(x);
    let negative = rounded < 0.0;
    let cents_total = (rounded.abs() * 100.0).round() as i64;
    let whole = cents_total / 100;
    let cents = cents_total % 100;

    let grouped = group_thousands(whole);
    let body = if cents == 0 {
        grouped
    } else if cents % 10 == 0 {
        format!("{}.{}", grouped, cents / 10)
    } else {
        format!("{}.{:02}", grouped, cents)
    };

    let symbol = currency_symbol(currency);
    match (negative, symbol) {
        (false, Some(symbol)) => format!("{}{}", symbol, body),
        (true, Some(symbol)) => format!("-{}{}", symbol, body),
        (false, None) => format!("{} {}", currency, body),
        (true, None) => format!("-{} {}", currency, body),
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "ILS" => Some("₪"),
        "EGP" => Some("LE "),
        "SAR" => Some("SR "),
        _ => None,
    }
}

fn group_thousands(mut n: i64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut groups = Vec::new();
    while n > 0 {
        groups.push((n % 1000) as u16);
        n /= 1000;
    }
    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(group) = groups.pop() {
        out.push_str(&format!(",{:03}", group));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session(check_in: &str, check_out: Option<&str>) -> WorkspaceSession {
        WorkspaceSession {
            id: "w1".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            person_name: "Visitor".to_string(),
            check_in_at: check_in.parse().unwrap(),
            check_out_at: check_out.map(|s| s.parse().unwrap()),
        }
    }

    #[test]
    fn test_round_money_half_up_at_the_cent() {
        assert_eq!(round_money(33.333), 33.33);
        // 0.125 sits exactly on the half cent and rounds up.
        assert_eq!(round_money(0.125), 0.13);
        assert_eq!(round_money(99.999), 100.0);
        assert_eq!(round_money(0.0), 0.0);
    }

    #[test]
    fn test_rounding_closure_over_payment_deltas() {
        // Whatever sequence of deltas is applied, rounding after each step
        // keeps the running amount a fixed point of round_money.
        let deltas = [33.333, 33.333, 33.334, -0.001, 12.345];
        let mut paid = 0.0;
        for delta in deltas {
            paid = round_money(paid + delta);
            assert_eq!(paid, round_money(paid));
        }
    }

    #[test]
    fn test_forty_five_minute_session_costs_three_quarters_of_the_rate() {
        let s = session("2025-03-10T10:00:00Z", Some("2025-03-10T10:45:00Z"));
        assert_eq!(session_cost(&s, 20.0), 15.0);
    }

    #[test]
    fn test_open_session_costs_nothing() {
        let s = session("2025-03-10T10:00:00Z", None);
        assert_eq!(session_cost(&s, 20.0), 0.0);
    }

    #[test]
    fn test_session_cost_rounds_to_the_nearest_minute() {
        // 29 seconds rounds down to zero minutes, 31 seconds up to one.
        let short = session("2025-03-10T10:00:00Z", Some("2025-03-10T10:00:29Z"));
        assert_eq!(session_cost(&short, 60.0), 0.0);
        let minute = session("2025-03-10T10:00:00Z", Some("2025-03-10T10:00:31Z"));
        assert_eq!(session_cost(&minute, 60.0), 1.0);
    }

    #[test]
    fn test_checkout_before_checkin_clamps_to_zero() {
        let s = session("2025-03-10T10:00:00Z", Some("2025-03-10T09:00:00Z"));
        assert_eq!(session_cost(&s, 20.0), 0.0);
    }

    #[test]
    fn test_date_in_range_boundaries_are_inclusive() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let on_start = Utc.with_ymd_and_hms(2025, 3, 10, 0, 0, 0).unwrap();
        let on_end = Utc.with_ymd_and_hms(2025, 3, 20, 23, 59, 59).unwrap();
        let before = Utc.with_ymd_and_hms(2025, 3, 9, 23, 59, 59).unwrap();
        let after = Utc.with_ymd_and_hms(2025, 3, 21, 0, 0, 0).unwrap();

        assert!(date_in_range(on_start, Some(start), Some(end)));
        assert!(date_in_range(on_end, Some(start), Some(end)));
        assert!(!date_in_range(before, Some(start), Some(end)));
        assert!(!date_in_range(after, Some(start), Some(end)));
    }

    #[test]
    fn test_date_in_range_single_bound_constrains_one_side() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let early = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap();

        assert!(!date_in_range(early, Some(start), None));
        assert!(date_in_range(late, Some(start), None));
        assert!(date_in_range(early, None, Some(start)));
        assert!(!date_in_range(late, None, Some(start)));
        assert!(date_in_range(early, None, None));
    }

    #[test]
    fn test_day_in_range_matches_instant_semantics() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        assert!(day_in_range(start, Some(start), Some(end)));
        assert!(day_in_range(end, Some(start), Some(end)));
        assert!(!day_in_range(start.pred_opt().unwrap(), Some(start), Some(end)));
        assert!(!day_in_range(end.succ_opt().unwrap(), Some(start), Some(end)));
        assert!(day_in_range(start, None, None));
    }

    #[test]
    fn test_format_money_follows_display_rules() {
        assert_eq!(format_money(1200.0, "USD"), "$1,200");
        assert_eq!(format_money(1234.5, "USD"), "$1,234.5");
        assert_eq!(format_money(1234.56, "ILS"), "₪1,234.56");
        assert_eq!(format_money(-15.0, "EUR"), "-€15");
        assert_eq!(format_money(350.0, "AED"), "AED 350");
        assert_eq!(format_money(0.05, "USD"), "$0.05");
    }
}
