//! Field-level cleaning of submitted forms.
//!
//! Everything arrives as text, the way an HTML form posts it. Cleaning either
//! yields typed values or a [`FieldErrors`] map naming every bad field.
//! Checks that need storage (does the category exist?) are left to the caller.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::FieldErrors;

use super::post::{PostDraft, TITLE_MAX_LENGTH};
use super::user::validate_username;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Select a valid choice.";

pub const PASSWORD_MIN_LENGTH: usize = 8;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Raw post form fields. Empty strings stand for missing values.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostFields<'a> {
    pub title: &'a str,
    pub text: &'a str,
    pub image: &'a str,
    pub pub_date: &'a str,
    pub category: &'a str,
    pub location: &'a str,
    pub is_published: &'a str,
}

pub fn clean_post(fields: PostFields<'_>) -> Result<PostDraft, FieldErrors> {
    let mut errors = FieldErrors::new();

    let title = fields.title.trim();
    if title.is_empty() {
        errors.add("title", REQUIRED);
    } else if title.chars().count() > TITLE_MAX_LENGTH {
        errors.add(
            "title",
            format!("Ensure this value has at most {TITLE_MAX_LENGTH} characters."),
        );
    }

    let text = fields.text.trim();
    if text.is_empty() {
        errors.add("text", REQUIRED);
    }

    let pub_date = match parse_datetime(fields.pub_date) {
        Ok(value) => value,
        Err(message) => {
            errors.add("pub_date", message);
            None
        }
    };

    let category_id = match parse_choice(fields.category) {
        Ok(Some(id)) => Some(id),
        Ok(None) => {
            errors.add("category", REQUIRED);
            None
        }
        Err(()) => {
            errors.add("category", INVALID_CHOICE);
            None
        }
    };

    let location_id = parse_choice(fields.location).unwrap_or_else(|()| {
        errors.add("location", INVALID_CHOICE);
        None
    });

    match (pub_date, category_id) {
        (Some(pub_date), Some(category_id)) if errors.is_empty() => Ok(PostDraft {
            title: title.to_string(),
            text: text.to_string(),
            image: non_blank(fields.image),
            pub_date,
            is_published: parse_checkbox(fields.is_published),
            category_id,
            location_id,
        }),
        _ => Err(errors),
    }
}

pub fn clean_comment(text: &str) -> Result<String, FieldErrors> {
    let text = text.trim();
    let mut errors = FieldErrors::new();
    if text.is_empty() {
        errors.add("text", REQUIRED);
    }
    errors.into_result(text.to_string())
}

/// A cleaned registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: Option<String>,
    pub password: String,
}

pub fn clean_registration(
    username: &str,
    email: &str,
    password: &str,
) -> Result<Registration, FieldErrors> {
    let mut errors = FieldErrors::new();

    let username = username.trim();
    validate_username(username, &mut errors);

    let email = non_blank(email);
    if email.as_deref().is_some_and(|e| !e.contains('@')) {
        errors.add("email", "Enter a valid email address.");
    }

    if password.chars().count() < PASSWORD_MIN_LENGTH {
        errors.add(
            "password",
            format!("This password is too short. It must contain at least {PASSWORD_MIN_LENGTH} characters."),
        );
    }

    errors.into_result(Registration {
        username: username.to_string(),
        email,
        password: password.to_string(),
    })
}

/// Accepts RFC 3339 or a browser `datetime-local` value, the latter taken as UTC.
fn parse_datetime(raw: &str) -> Result<Option<DateTime<Utc>>, &'static str> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(REQUIRED);
    }

    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(value.with_timezone(&Utc)));
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Some(naive.and_utc()))
        .ok_or("Enter a valid date/time.")
}

fn parse_choice(raw: &str) -> Result<Option<i64>, ()> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>().map(Some).map_err(|_| ())
}

fn parse_checkbox(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "1" | "yes"
    )
}

fn non_blank(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn valid() -> PostFields<'static> {
        PostFields {
            title: "Mountains",
            text: "A long walk.",
            image: "",
            pub_date: "2024-05-01T10:30",
            category: "2",
            location: "",
            is_published: "on",
        }
    }

    #[test]
    fn test_clean_post_valid() {
        let draft = clean_post(valid()).unwrap();

        assert_eq!(draft.title, "Mountains");
        assert_eq!(draft.category_id, 2);
        assert_eq!(draft.location_id, None);
        assert_eq!(draft.image, None);
        assert!(draft.is_published);
        assert_eq!(
            draft.pub_date,
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_clean_post_accepts_rfc3339_with_offset() {
        let fields = PostFields {
            pub_date: "2024-05-01T12:00:00+02:00",
            ..valid()
        };
        let draft = clean_post(fields).unwrap();
        assert_eq!(draft.pub_date.hour(), 10);
    }

    #[test]
    fn test_clean_post_unchecked_box_is_unpublished() {
        let fields = PostFields {
            is_published: "",
            ..valid()
        };
        assert!(!clean_post(fields).unwrap().is_published);
    }

    #[test]
    fn test_clean_post_reports_every_bad_field() {
        let fields = PostFields {
            title: "  ",
            text: "",
            pub_date: "yesterday",
            category: "",
            location: "here",
            ..valid()
        };
        let errors = clean_post(fields).unwrap_err();

        for field in ["title", "text", "pub_date", "category", "location"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_clean_post_title_too_long() {
        let title = "x".repeat(TITLE_MAX_LENGTH + 1);
        let fields = PostFields {
            title: &title,
            ..valid()
        };
        assert!(clean_post(fields).unwrap_err().contains("title"));
    }

    #[test]
    fn test_clean_comment() {
        assert_eq!(clean_comment("  hello ").unwrap(), "hello");
        assert!(clean_comment("   ").unwrap_err().contains("text"));
    }

    #[test]
    fn test_clean_registration() {
        let registration = clean_registration("alice", "", "password123").unwrap();
        assert_eq!(registration.email, None);

        let errors = clean_registration("bad name", "nope", "short").unwrap_err();
        assert!(errors.contains("username"));
        assert!(errors.contains("email"));
        assert!(errors.contains("password"));
    }
}
