use super::document::FieldMatch;

pub const EMAIL: &str = "email";

const EMAIL_PATH: &[&str] = &[EMAIL];

pub fn by_email(email: impl Into<String>) -> FieldMatch {
    FieldMatch::new(EMAIL_PATH, email)
}
