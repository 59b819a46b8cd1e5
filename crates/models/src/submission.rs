use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validation::{is_valid_email, is_valid_github_link, is_valid_phone};

/// One stored form submission: contact details plus the challenge stopwatch time.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub github_link: String,
    pub stopwatch_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied fields for submit/edit. Every field is optional on the wire so a
/// missing field is reported as a validation failure rather than a decoding error.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SubmissionInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub github_link: Option<String>,
    pub stopwatch_time: Option<String>,
}

/// Field set that passed [`SubmissionInput::validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmissionFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub github_link: String,
    pub stopwatch_time: String,
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl SubmissionInput {
    /// Check presence, then email, phone and GitHub link, stopping at the first failure.
    pub fn validate(self) -> Result<SubmissionFields, ModelError> {
        let (Some(name), Some(email), Some(phone), Some(github_link), Some(stopwatch_time)) = (
            required(self.name),
            required(self.email),
            required(self.phone),
            required(self.github_link),
            required(self.stopwatch_time),
        ) else {
            return Err(ModelError::MissingFields);
        };

        if !is_valid_email(&email) {
            return Err(ModelError::InvalidEmail);
        }
        if !is_valid_phone(&phone) {
            return Err(ModelError::InvalidPhone);
        }
        if !is_valid_github_link(&github_link) {
            return Err(ModelError::InvalidGithubLink);
        }

        Ok(SubmissionFields { name, email, phone, github_link, stopwatch_time })
    }
}

impl Submission {
    /// New record with `created_at == updated_at == now`.
    pub fn create(id: Uuid, fields: SubmissionFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            github_link: fields.github_link,
            stopwatch_time: fields.stopwatch_time,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field and refresh `updated_at`; `id` and `created_at` stay.
    pub fn apply(&mut self, fields: SubmissionFields, now: DateTime<Utc>) {
        self.name = fields.name;
        self.email = fields.email;
        self.phone = fields.phone;
        self.github_link = fields.github_link;
        self.stopwatch_time = fields.stopwatch_time;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_input() -> SubmissionInput {
        SubmissionInput {
            name: Some("Alice".into()),
            email: Some("alice@example.com".into()),
            phone: Some("1234567890".into()),
            github_link: Some("https://github.com/alice".into()),
            stopwatch_time: Some("00:01:23".into()),
        }
    }

    #[test]
    fn valid_input_yields_fields() {
        let fields = valid_input().validate().unwrap();
        assert_eq!(fields.name, "Alice");
        assert_eq!(fields.stopwatch_time, "00:01:23");
    }

    #[test]
    fn missing_or_empty_field_is_reported_first() {
        let mut input = valid_input();
        input.stopwatch_time = None;
        assert_eq!(input.validate(), Err(ModelError::MissingFields));

        // empty name wins over the malformed email that follows it
        let mut input = valid_input();
        input.name = Some(String::new());
        input.email = Some("nope".into());
        assert_eq!(input.validate(), Err(ModelError::MissingFields));

        assert_eq!(SubmissionInput::default().validate(), Err(ModelError::MissingFields));
    }

    #[test]
    fn whitespace_counts_as_present() {
        let mut input = valid_input();
        input.name = Some("  ".into());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn rules_apply_in_order() {
        let mut input = valid_input();
        input.email = Some("bad".into());
        input.phone = Some("12345".into());
        assert_eq!(input.clone().validate(), Err(ModelError::InvalidEmail));

        input.email = Some("alice@example.com".into());
        input.github_link = Some("https://gitlab.com/alice".into());
        assert_eq!(input.clone().validate(), Err(ModelError::InvalidPhone));

        input.phone = Some("1234567890".into());
        assert_eq!(input.validate(), Err(ModelError::InvalidGithubLink));
    }

    #[test]
    fn error_messages_match_wire_text() {
        assert_eq!(ModelError::MissingFields.to_string(), "All fields are required");
        assert_eq!(ModelError::InvalidEmail.to_string(), "Invalid email format");
        assert_eq!(ModelError::InvalidPhone.to_string(), "Phone number must be 10 digits long");
        assert_eq!(ModelError::InvalidGithubLink.to_string(), "Invalid GitHub link");
    }

    #[test]
    fn apply_keeps_identity_and_creation_time() {
        let created_at = Utc::now();
        let mut submission = Submission::create(Uuid::new_v4(), valid_input().validate().unwrap(), created_at);
        assert_eq!(submission.created_at, submission.updated_at);
        let id = submission.id;

        let mut edit = valid_input();
        edit.name = Some("Bob".into());
        edit.github_link = Some("https://github.com/bob/repo".into());
        let later = created_at + Duration::seconds(5);
        submission.apply(edit.validate().unwrap(), later);

        assert_eq!(submission.id, id);
        assert_eq!(submission.created_at, created_at);
        assert_eq!(submission.updated_at, later);
        assert_eq!(submission.name, "Bob");
        assert_eq!(submission.github_link, "https://github.com/bob/repo");
    }

    #[test]
    fn reads_records_with_millisecond_timestamps() {
        let raw = r#"{
            "id": "0f8fad5b-d9cb-469f-a165-70867728950e",
            "name": "Alice",
            "email": "alice@example.com",
            "phone": "1234567890",
            "github_link": "https://github.com/alice",
            "stopwatch_time": "12.5",
            "created_at": "2024-06-01T12:00:00.000Z",
            "updated_at": "2024-06-02T08:30:00.250Z"
        }"#;
        let submission: Submission = serde_json::from_str(raw).unwrap();
        assert_eq!(submission.created_at.to_rfc3339(), "2024-06-01T12:00:00+00:00");
        assert!(submission.updated_at > submission.created_at);
    }

    #[test]
    fn input_decodes_missing_and_null_as_none() {
        let input: SubmissionInput =
            serde_json::from_str(r#"{"name": "Alice", "email": null}"#).unwrap();
        assert_eq!(input.name.as_deref(), Some("Alice"));
        assert!(input.email.is_none());
        assert!(input.phone.is_none());
    }
}
