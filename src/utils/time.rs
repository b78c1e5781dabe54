use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};

/// Parse time string in HH:MM format
pub fn parse_time(time_str: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hour = parts[0].parse::<u32>().ok()?;
    let minute = parts[1].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Calculate the next digest fire time.
///
/// Daily digests fire every day at the target time; weekly digests fire on
/// Mondays at the target time.
pub fn next_notification_time<Tz: TimeZone>(
    current_time: DateTime<Tz>,
    target_time: &str,
    is_weekly: bool,
) -> Option<DateTime<Tz>> {
    let (target_hour, target_minute) = parse_time(target_time)?;

    let next = current_time
        .date_naive()
        .and_hms_opt(target_hour, target_minute, 0)?;

    let mut next = match current_time.timezone().from_local_datetime(&next) {
        chrono::LocalResult::Single(dt) => dt,
        _ => return None,
    };

    // If we've already passed the target time today, move to tomorrow
    if next <= current_time {
        next = next + Duration::days(1);
    }

    // For weekly digests, ensure it's on Monday
    if is_weekly {
        while next.weekday() != chrono::Weekday::Mon {
            next = next + Duration::days(1);
        }
    }

    Some(next)
}

/// Calculate the wait duration in seconds until the next fire time
pub fn calculate_wait_duration<Tz: TimeZone>(
    now: &DateTime<Tz>,
    next_time: &DateTime<Tz>,
) -> i64 {
    let wait_duration = next_time.clone().signed_duration_since(now.clone());
    let seconds = wait_duration.num_seconds();

    if seconds <= 0 {
        // Minimum wait time handles calculations landing right on the
        // scheduled instant
        return 60;
    }

    seconds
}

/// First and last day of a month given as YYYY-MM
pub fn month_bounds(month_str: &str) -> Option<(NaiveDate, NaiveDate)> {
    let parts: Vec<&str> = month_str.split('-').collect();
    if parts.len() != 2 {
        return None;
    }
    let year = parts[0].parse::<i32>().ok()?;
    let month = parts[1].parse::<u32>().ok()?;

    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_month_first.pred_opt()?;

    Some((first, last))
}
