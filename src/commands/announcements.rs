use super::{CommandContext, CommandResult};
use crate::components::AnnouncementsHandle;

/// List the current company announcements
pub async fn list(ctx: &CommandContext) -> CommandResult {
    let handle = AnnouncementsHandle::new(ctx.api.clone());
    let announcements = handle.get_announcements().await?;

    if announcements.is_empty() {
        println!("No announcements.");
    } else {
        println!("Announcements:");
        for announcement in &announcements {
            println!("  - {}", announcement.display_line());
            if let Some(body) = announcement.body.as_deref() {
                if !body.trim().is_empty() {
                    println!("      {}", body.trim());
                }
            }
        }
    }

    handle.shutdown().await?;
    Ok(())
}
