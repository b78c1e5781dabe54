use super::{CommandContext, CommandResult};
use crate::components::employee_events::digest::{format_daily_digest, format_weekly_digest};
use crate::components::employee_events::mapper::{build_event_map, DATE_KEY_FORMAT};
use crate::components::EmployeeEventsHandle;
use crate::error::config_error;
use crate::utils::time::month_bounds;
use chrono::{Duration, Utc};

/// Print every populated day of a month (default: the current month)
pub async fn month(ctx: &CommandContext, month: Option<String>) -> CommandResult {
    let tz = ctx.timezone().await;

    let month_str = match month {
        Some(month) => month,
        None => Utc::now().with_timezone(&tz).format("%Y-%m").to_string(),
    };

    let (first, last) = month_bounds(&month_str).ok_or_else(|| {
        config_error(&format!("Invalid month '{}', expected YYYY-MM", month_str))
    })?;

    let handle = EmployeeEventsHandle::new(ctx.api.clone());
    let records = handle
        .get_events(first.to_string(), last.to_string())
        .await?;
    let map = build_event_map(&records);

    let default_color = {
        let config_read = ctx.config.read().await;
        config_read.default_event_color.clone()
    };

    println!("Events in {}:", month_str);
    if map.is_empty() {
        println!("  (none)");
    }

    let mut day = first;
    while day <= last {
        let key = day.format(DATE_KEY_FORMAT).to_string();
        if let Some(events) = map.get(&key) {
            for event in events {
                let color = event.color.as_deref().unwrap_or(&default_color);
                match &event.time {
                    Some(time) => println!("  {}  {}  {} ({})", key, color, event.title, time),
                    None => println!("  {}  {}  {}", key, color, event.title),
                }
            }
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }

    handle.shutdown().await?;
    Ok(())
}

/// Print today's events
pub async fn today(ctx: &CommandContext) -> CommandResult {
    let tz = ctx.timezone().await;
    let today = Utc::now().with_timezone(&tz).date_naive();

    let handle = EmployeeEventsHandle::new(ctx.api.clone());
    let records = handle
        .get_events(today.to_string(), today.to_string())
        .await?;
    let map = build_event_map(&records);

    match format_daily_digest(&map, today) {
        Some(digest) => println!("{}", digest),
        None => println!("No events today."),
    }

    handle.shutdown().await?;
    Ok(())
}

/// Print the events of the next seven days
pub async fn week(ctx: &CommandContext) -> CommandResult {
    let tz = ctx.timezone().await;
    let today = Utc::now().with_timezone(&tz).date_naive();
    let week_end = today + Duration::days(6);

    let handle = EmployeeEventsHandle::new(ctx.api.clone());
    let records = handle
        .get_events(today.to_string(), week_end.to_string())
        .await?;
    let map = build_event_map(&records);

    match format_weekly_digest(&map, today) {
        Some(digest) => println!("{}", digest),
        None => println!("No events this week."),
    }

    handle.shutdown().await?;
    Ok(())
}
