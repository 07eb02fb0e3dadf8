//! Username type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Username`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum UsernameError {
    /// The input is empty or only whitespace.
    #[error("username cannot be empty")]
    Empty,
    /// The input starts or ends with whitespace.
    #[error("username cannot start or end with whitespace")]
    SurroundingWhitespace,
    /// The input is too long.
    #[error("username must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A login name.
///
/// Usernames are free-form text; the only rules are that they are not blank
/// and not absurdly long. Leading or trailing whitespace is rejected rather
/// than trimmed, so `" alice"` can never shadow `"alice"`.
///
/// ## Examples
///
/// ```
/// use dynamic_pricing_core::Username;
///
/// assert!(Username::parse("alice").is_ok());
/// assert!(Username::parse("bob smith").is_ok());
///
/// assert!(Username::parse("").is_err());
/// assert!(Username::parse("   ").is_err());
/// assert!(Username::parse(" alice").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Maximum length of a username, in characters.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `Username` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank, has leading or trailing
    /// whitespace, or is longer than [`Self::MAX_LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, UsernameError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }

        if trimmed.len() != s.len() {
            return Err(UsernameError::SurroundingWhitespace);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Username` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Username {
    type Err = UsernameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert!(Username::parse("alice").is_ok());
        assert!(Username::parse("bob.smith").is_ok());
        assert!(Username::parse("x").is_ok());
        assert!(Username::parse("with space").is_ok());
    }

    #[test]
    fn test_parse_rejects_surrounding_whitespace() {
        assert_eq!(
            Username::parse(" alice"),
            Err(UsernameError::SurroundingWhitespace)
        );
        assert_eq!(
            Username::parse("\t carol \n"),
            Err(UsernameError::SurroundingWhitespace)
        );
        assert_eq!(Username::parse("carol").unwrap().as_str(), "carol");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Username::parse(""), Err(UsernameError::Empty));
        assert_eq!(Username::parse("   "), Err(UsernameError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(Username::MAX_LENGTH + 1);
        assert!(matches!(
            Username::parse(&long),
            Err(UsernameError::TooLong { .. })
        ));

        let max = "a".repeat(Username::MAX_LENGTH);
        assert!(Username::parse(&max).is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let name = "é".repeat(Username::MAX_LENGTH);
        assert!(Username::parse(&name).is_ok());
    }

    #[test]
    fn test_from_str() {
        let name: Username = "dave".parse().unwrap();
        assert_eq!(name.to_string(), "dave");
    }
}
