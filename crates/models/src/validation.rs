//! Format predicates for submission fields.
//!
//! Each predicate is total over its input and independent of the others; the
//! order in which they are applied lives in [`crate::SubmissionInput::validate`].

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email pattern"));

// `\d` is Unicode-aware in the regex crate, so the ASCII class is spelled out.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid phone pattern"));

static GITHUB_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://github\.com/[A-Za-z0-9-]+(/[A-Za-z0-9-]+)*/?$")
        .expect("Invalid GitHub link pattern")
});

/// `local@domain.tld` shape: no whitespace, exactly one `@`, a dot after it.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Exactly ten ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// `https://github.com/<owner>` optionally followed by path segments and a trailing slash.
pub fn is_valid_github_link(link: &str) -> bool {
    GITHUB_RE.is_match(link)
}
