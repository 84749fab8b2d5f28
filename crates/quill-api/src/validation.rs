//! Field rules shared by every service.
//!
//! Each input field maps to one [`Rule`]. Services never check fields by
//! hand; they call [`validate`] with the field and the raw value.

use thiserror::Error;

pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_USERNAME_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{label} cannot be empty")]
    Empty { label: &'static str },

    #[error("{label} cannot exceed {max} characters")]
    TooLong { label: &'static str, max: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
    Username,
    Password,
    SearchQuery,
}

/// Constraints for one field.
#[derive(Debug)]
pub struct Rule {
    /// Name used in error messages.
    pub label: &'static str,
    /// Strip surrounding whitespace from the stored value.
    pub trim: bool,
    /// Upper bound in characters, counted on the value that gets stored.
    pub max_chars: Option<usize>,
}

static TITLE: Rule = Rule {
    label: "Title",
    trim: true,
    max_chars: Some(MAX_TITLE_CHARS),
};

static CONTENT: Rule = Rule {
    label: "Content",
    trim: true,
    max_chars: None,
};

// Credentials are matched byte for byte, so they are never trimmed.
static USERNAME: Rule = Rule {
    label: "Username",
    trim: false,
    max_chars: Some(MAX_USERNAME_CHARS),
};

static PASSWORD: Rule = Rule {
    label: "Password",
    trim: false,
    max_chars: None,
};

static SEARCH_QUERY: Rule = Rule {
    label: "Query",
    trim: true,
    max_chars: None,
};

impl Field {
    pub fn rule(self) -> &'static Rule {
        match self {
            Field::Title => &TITLE,
            Field::Content => &CONTENT,
            Field::Username => &USERNAME,
            Field::Password => &PASSWORD,
            Field::SearchQuery => &SEARCH_QUERY,
        }
    }
}

/// Check `raw` against the rule for `field` and return the value to store.
///
/// A value that is only whitespace counts as empty for every field.
pub fn validate(field: Field, raw: &str) -> Result<String, ValidationError> {
    let rule = field.rule();
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { label: rule.label });
    }

    let value = if rule.trim { trimmed } else { raw };

    if let Some(max) = rule.max_chars {
        if value.chars().count() > max {
            return Err(ValidationError::TooLong {
                label: rule.label,
                max,
            });
        }
    }

    Ok(value.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_messages() {
        assert_eq!(
            validate(Field::Title, "").unwrap_err().to_string(),
            "Title cannot be empty"
        );
        assert_eq!(
            validate(Field::Title, "   \t").unwrap_err().to_string(),
            "Title cannot be empty"
        );
        assert_eq!(
            validate(Field::Title, &"a".repeat(201)).unwrap_err().to_string(),
            "Title cannot exceed 200 characters"
        );
    }

    #[test]
    fn title_boundary_is_inclusive() {
        let title = "a".repeat(200);
        assert_eq!(validate(Field::Title, &title).unwrap(), title);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 200 two-byte characters
        let title = "é".repeat(200);
        assert!(validate(Field::Title, &title).is_ok());
    }

    #[test]
    fn trimmed_fields_are_stored_trimmed() {
        assert_eq!(validate(Field::Title, "  Hello  ").unwrap(), "Hello");
        assert_eq!(validate(Field::Content, "\n body \n").unwrap(), "body");
    }

    #[test]
    fn credentials_are_stored_verbatim() {
        assert_eq!(validate(Field::Password, " secret ").unwrap(), " secret ");
        assert_eq!(
            validate(Field::Username, "").unwrap_err(),
            ValidationError::Empty { label: "Username" }
        );
        assert_eq!(
            validate(Field::Password, "  ").unwrap_err().to_string(),
            "Password cannot be empty"
        );
        assert!(validate(Field::Username, &"u".repeat(101)).is_err());
    }

    #[test]
    fn untrimmed_length_includes_surrounding_whitespace() {
        let padded = format!("{}  ", "u".repeat(100));
        assert_eq!(
            validate(Field::Username, &padded).unwrap_err(),
            ValidationError::TooLong {
                label: "Username",
                max: 100
            }
        );
        assert!(validate(Field::Username, &"u".repeat(100)).is_ok());

        // Trimmed fields still measure after trimming
        let title = format!("  {}  ", "a".repeat(200));
        assert_eq!(validate(Field::Title, &title).unwrap(), "a".repeat(200));
    }

    #[test]
    fn content_has_no_length_limit() {
        assert!(validate(Field::Content, &"x".repeat(100_000)).is_ok());
        assert_eq!(
            validate(Field::Content, " ").unwrap_err().to_string(),
            "Content cannot be empty"
        );
    }
}
