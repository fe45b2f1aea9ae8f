use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a bounty listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BountyStatus {
    Open,
    Review,
    Closed,
}

impl std::fmt::Display for BountyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BountyStatus::Open => write!(f, "OPEN"),
            BountyStatus::Review => write!(f, "REVIEW"),
            BountyStatus::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Kind of notification recorded in the email log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text")]
pub enum NotificationKind {
    /// Sponsor reminder sent once a bounty is a week past its deadline
    /// without winners announced.
    #[sqlx(rename = "BOUNTY_DEADLINE_WEEK")]
    #[serde(rename = "deadline-week")]
    DeadlineWeek,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::DeadlineWeek => write!(f, "deadline-week"),
        }
    }
}

/// A sponsor contact or a submitter. Either field may be missing in the
/// main application's data; callers skip sends when they are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    pub first_name: Option<String>,
}

impl User {
    /// Email and first name, if both are present and non-blank.
    pub fn addressable(&self) -> Option<(&str, &str)> {
        let email = non_blank(self.email.as_deref())?;
        let name = non_blank(self.first_name.as_deref())?;
        Some((email, name))
    }
}

/// A bounty row as stored by the main application.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bounty {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub deadline: Option<DateTime<Utc>>,
    pub status: BountyStatus,
    pub is_published: bool,
    pub is_active: bool,
    pub is_archived: bool,
    pub is_winners_announced: bool,
    pub sponsor_id: Uuid,
}

/// A bounty together with its sponsor's primary contact (the earliest
/// user linked to the sponsor), if the sponsor has any users.
#[derive(Debug, Clone)]
pub struct BountyWithContact {
    pub bounty: Bounty,
    pub contact: Option<User>,
}

/// An append-only record that a notification of `kind` was sent for a bounty.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct NotificationLogEntry {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    pub kind: NotificationKind,
    pub bounty_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Returns the trimmed value when it has visible content.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: Option<&str>, name: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.map(String::from),
            first_name: name.map(String::from),
        }
    }

    #[test]
    fn test_addressable_requires_both_fields() {
        assert_eq!(
            user(Some("s@x.com"), Some("Sam")).addressable(),
            Some(("s@x.com", "Sam"))
        );
        assert!(user(None, Some("Sam")).addressable().is_none());
        assert!(user(Some("s@x.com"), None).addressable().is_none());
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        assert!(user(Some("  "), Some("Sam")).addressable().is_none());
        assert!(user(Some("s@x.com"), Some("")).addressable().is_none());
    }

    #[test]
    fn test_notification_kind_display() {
        assert_eq!(NotificationKind::DeadlineWeek.to_string(), "deadline-week");
    }
}
