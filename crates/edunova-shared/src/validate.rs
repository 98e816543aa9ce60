//! Pure field validators.
//!
//! Every validator maps a candidate value to a verdict without touching
//! any state.  An empty value always fails with [`ValidationError::Required`],
//! which the controllers surface with a different message than a value
//! that is present but malformed.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// A field-level validation failure.  Recoverable by the user; the form
/// stays editable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The field was empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// The field had content that fails the rule set.
    #[error("{field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ValidationError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field } | Self::Invalid { field, .. } => field,
        }
    }

    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Convenience alias used by every validator.
pub type Verdict = Result<(), ValidationError>;

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Username: at least 3 characters from `[A-Za-z0-9_]`.
pub fn username(value: &str) -> Verdict {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field: "username" });
    }
    if value.len() < 3 {
        return Err(ValidationError::invalid(
            "username",
            "must be at least 3 characters long",
        ));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::invalid(
            "username",
            "can only contain letters, numbers, and underscores",
        ));
    }
    Ok(())
}

/// Security key: shape check only (at least 6 characters).  Whether the
/// key is *correct* is decided behind the `AdminApi` boundary, never in
/// client code.
pub fn security_key(value: &str) -> Verdict {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "security key",
        });
    }
    if value.len() < 6 {
        return Err(ValidationError::invalid(
            "security key",
            "must be at least 6 characters long",
        ));
    }
    Ok(())
}

/// Password: length >= 8 with lowercase, uppercase, and a digit.
pub fn password(value: &str) -> Verdict {
    if value.is_empty() {
        return Err(ValidationError::Required { field: "password" });
    }
    if value.len() < 8 {
        return Err(ValidationError::invalid(
            "password",
            "must be at least 8 characters long",
        ));
    }
    let lower = value.chars().any(|c| c.is_ascii_lowercase());
    let upper = value.chars().any(|c| c.is_ascii_uppercase());
    let digit = value.chars().any(|c| c.is_ascii_digit());
    if !(lower && upper && digit) {
        return Err(ValidationError::invalid(
            "password",
            "must contain uppercase, lowercase, and number",
        ));
    }
    Ok(())
}

/// The special characters the strict password rule accepts.
const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Strict password variant: the [`password`] rules plus a special
/// character.
pub fn strict_password(value: &str) -> Verdict {
    password(value)?;
    if !value.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(ValidationError::invalid(
            "password",
            "must be at least 8 characters with uppercase, lowercase, numbers, and special characters",
        ));
    }
    Ok(())
}

/// Password strength bucket, by number of satisfied rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Weak,
    Medium,
    Strong,
}

/// Bucket a password into weak / medium / strong.  Each of the five
/// rules (length, upper, lower, digit, special) counts one point:
/// <=2 weak, <=4 medium, 5 strong.
pub fn password_strength(value: &str) -> PasswordStrength {
    let mut score = 0;
    if value.len() >= 8 {
        score += 1;
    }
    if value.chars().any(|c| c.is_ascii_uppercase()) {
        score += 1;
    }
    if value.chars().any(|c| c.is_ascii_lowercase()) {
        score += 1;
    }
    if value.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if value.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        score += 1;
    }
    match score {
        0..=2 => PasswordStrength::Weak,
        3..=4 => PasswordStrength::Medium,
        _ => PasswordStrength::Strong,
    }
}

/// Confirm-password: equality with the primary password.
pub fn confirm_password(password: &str, confirm: &str) -> Verdict {
    if confirm.is_empty() {
        return Err(ValidationError::Required {
            field: "confirm password",
        });
    }
    if password != confirm {
        return Err(ValidationError::invalid(
            "confirm password",
            "passwords do not match",
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Contact details
// ---------------------------------------------------------------------------

/// Email: `local@domain.tld` shape.  Not RFC-complete on purpose.
pub fn email(value: &str) -> Verdict {
    static EMAIL_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static pattern"));

    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field: "email" });
    }
    if !EMAIL_RE.is_match(value) {
        return Err(ValidationError::invalid(
            "email",
            "please enter a valid email address",
        ));
    }
    Ok(())
}

/// Contact number: exactly 10 digits once separators are stripped.
/// Returns the normalized digit string.
pub fn contact_number(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "contact number",
        });
    }
    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 10 {
        return Err(ValidationError::invalid(
            "contact number",
            "must be exactly 10 digits",
        ));
    }
    Ok(digits)
}

// ---------------------------------------------------------------------------
// Google URLs
// ---------------------------------------------------------------------------

static DRIVE_URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^https://drive\.google\.com/drive/folders/[a-zA-Z0-9_\-]+",
        r"^https://drive\.google\.com/file/d/[a-zA-Z0-9_\-]+",
        r"^https://drive\.google\.com/open\?id=[a-zA-Z0-9_\-]+",
        r"^https://docs\.google\.com/document/d/[a-zA-Z0-9_\-]+",
        r"^https://docs\.google\.com/spreadsheets/d/[a-zA-Z0-9_\-]+",
        r"^https://docs\.google\.com/presentation/d/[a-zA-Z0-9_\-]+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

static FORM_URL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^https://docs\.google\.com/forms/d/[a-zA-Z0-9_\-]+",
        r"^https://forms\.gle/[a-zA-Z0-9_\-]+",
        r"^https://docs\.google\.com/forms/[a-zA-Z0-9_\-/]+",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// Google Drive / Docs share link.
pub fn drive_url(value: &str) -> Verdict {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "Google Drive link",
        });
    }
    if !DRIVE_URL_PATTERNS.iter().any(|p| p.is_match(value)) {
        return Err(ValidationError::invalid(
            "Google Drive link",
            "please enter a valid Google Drive URL",
        ));
    }
    Ok(())
}

/// Google Forms link.
pub fn form_url(value: &str) -> Verdict {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: "Google Form link",
        });
    }
    if !FORM_URL_PATTERNS.iter().any(|p| p.is_match(value)) {
        return Err(ValidationError::invalid(
            "Google Form link",
            "URL should start with https://docs.google.com/forms/ or https://forms.gle/",
        ));
    }
    Ok(())
}
