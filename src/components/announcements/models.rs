use serde::{Deserialize, Serialize};

/// A company announcement from the HR API.
///
/// Same loose contract as the events endpoint: every field optional,
/// unknown fields ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Announcement {
    pub id: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    #[serde(rename = "posted_at", alias = "postedAt")]
    pub posted_at: Option<String>,
}

impl Announcement {
    /// Identity used for "already reported" tracking: the id when present,
    /// the title otherwise
    pub fn identity(&self) -> String {
        self.id
            .clone()
            .or_else(|| self.title.clone())
            .unwrap_or_default()
    }

    /// One display line: title, optionally prefixed with the posted date
    pub fn display_line(&self) -> String {
        let title = self.title.as_deref().unwrap_or("(untitled)");
        match self.posted_at.as_deref() {
            Some(posted) => format!("[{}] {}", posted, title),
            None => title.to_string(),
        }
    }
}

/// Format a summary of newly posted announcements, or `None` when there
/// are none
pub fn format_new_announcements(announcements: &[Announcement]) -> Option<String> {
    if announcements.is_empty() {
        return None;
    }

    let mut message = String::from("New announcements:\n");
    for announcement in announcements {
        message.push_str(&format!("  - {}\n", announcement.display_line()));
    }

    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_prefers_id() {
        let announcement = Announcement {
            id: Some("42".to_string()),
            title: Some("Office closed".to_string()),
            ..Default::default()
        };
        assert_eq!(announcement.identity(), "42");

        let announcement = Announcement {
            title: Some("Office closed".to_string()),
            ..Default::default()
        };
        assert_eq!(announcement.identity(), "Office closed");
    }

    #[test]
    fn test_display_line() {
        let announcement = Announcement {
            title: Some("Office closed".to_string()),
            posted_at: Some("2025-08-07".to_string()),
            ..Default::default()
        };
        assert_eq!(announcement.display_line(), "[2025-08-07] Office closed");

        let announcement = Announcement::default();
        assert_eq!(announcement.display_line(), "(untitled)");
    }

    #[test]
    fn test_format_new_announcements() {
        let announcements = vec![Announcement {
            title: Some("Payroll cutoff moved".to_string()),
            posted_at: Some("2025-08-07".to_string()),
            ..Default::default()
        }];

        assert_eq!(
            format_new_announcements(&announcements),
            Some("New announcements:\n  - [2025-08-07] Payroll cutoff moved\n".to_string())
        );
        assert_eq!(format_new_announcements(&[]), None);
    }
}
