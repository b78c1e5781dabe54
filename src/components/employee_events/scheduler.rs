use chrono::Utc;
use chrono_tz::Tz;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{sleep, Duration as TokioDuration};
use tracing::{error, info, warn};

use super::digest::{format_daily_digest, format_new_events, format_weekly_digest};
use super::handle::EmployeeEventsHandle;
use super::mapper::{build_event_map, DATE_KEY_FORMAT};
use crate::config::Config;
use crate::utils::time::{calculate_wait_duration, next_notification_time};

/// Start the watch-mode scheduler for the employee events component
pub async fn start_scheduler(config: Arc<RwLock<Config>>, handle: EmployeeEventsHandle) {
    let (daily_time, weekly_time, timezone, check_interval) = {
        let config_read = config.read().await;
        (
            config_read.daily_digest_time.clone(),
            config_read.weekly_digest_time.clone(),
            config_read.timezone.clone(),
            config_read.new_events_check_interval,
        )
    };

    let tz: Tz = match timezone.parse() {
        Ok(tz) => tz,
        Err(_) => {
            warn!("Invalid timezone '{}', falling back to UTC", timezone);
            chrono_tz::UTC
        }
    };

    // Spawn task for daily/weekly digests
    let digest_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            let now = Utc::now().with_timezone(&tz);

            let next_daily = match next_notification_time(now, &daily_time, false) {
                Some(time) => time,
                None => {
                    error!("Failed to calculate next daily digest time");
                    sleep(TokioDuration::from_secs(3600)).await; // Retry in an hour
                    continue;
                }
            };

            let next_weekly = match next_notification_time(now, &weekly_time, true) {
                Some(time) => time,
                None => {
                    error!("Failed to calculate next weekly digest time");
                    sleep(TokioDuration::from_secs(3600)).await; // Retry in an hour
                    continue;
                }
            };

            let next = next_daily.min(next_weekly);
            let wait_seconds = calculate_wait_duration(&now, &next);

            info!("Next digest scheduled for {}", next);
            sleep(TokioDuration::from_secs(wait_seconds as u64)).await;

            let now = Utc::now().with_timezone(&tz);
            let today = now.date_naive();
            let week_end = today + chrono::Duration::days(6);

            // One fetch covers both digests
            let records = match digest_handle
                .get_events(
                    today.format(DATE_KEY_FORMAT).to_string(),
                    week_end.format(DATE_KEY_FORMAT).to_string(),
                )
                .await
            {
                Ok(records) => records,
                Err(e) => {
                    error!("Failed to fetch events for digest: {}", e);
                    continue;
                }
            };
            let map = build_event_map(&records);

            if now >= next_daily {
                if let Some(digest) = format_daily_digest(&map, today) {
                    println!("{}", digest);
                }
            }

            if now >= next_weekly {
                if let Some(digest) = format_weekly_digest(&map, today) {
                    println!("{}", digest);
                }
            }
        }
    });

    // Spawn task for checking new events
    tokio::spawn(async move {
        loop {
            sleep(TokioDuration::from_secs(check_interval)).await;

            match handle.check_new_events().await {
                Ok(new_records) => {
                    if let Some(message) = format_new_events(&new_records) {
                        println!("{}", message);
                    }
                }
                Err(e) => {
                    error!("Failed to check for new events: {}", e);
                }
            }
        }
    });
}
