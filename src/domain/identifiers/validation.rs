use thiserror::Error;

/// Longest accepted chart or module name.
///
/// Lower than the limits of common filesystems and of the Kubernetes name
/// fields the generated templates derive from it.
pub const MAX_NAME_LENGTH: usize = 250;

/// Human-readable form of the accepted character class.
pub const NAME_PATTERN: &str = "^[a-zA-Z0-9._-]+$";

/// Reasons a chart or module name is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name must be between 1 and {max} characters")]
    EmptyOrTooLong { max: usize },

    #[error("name '{name}' must match the regular expression \"{}\"", NAME_PATTERN)]
    InvalidCharacters { name: String },
}

/// Validates a chart or module name.
///
/// Checks:
/// - Length between 1 and [`MAX_NAME_LENGTH`]
/// - Characters are ASCII alphanumeric, '.', '_', or '-'
pub fn validate_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        return Err(NameError::EmptyOrTooLong { max: MAX_NAME_LENGTH });
    }
    if !name.chars().all(is_name_char) {
        return Err(NameError::InvalidCharacters { name: name.to_string() });
    }
    Ok(())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')
}

/// Implements constructor and string accessors for a validated name newtype.
#[macro_export]
macro_rules! impl_validated_name {
    ($name:ident) => {
        impl $name {
            /// Validate and create a new instance.
            pub fn new(name: &str) -> Result<Self, $crate::domain::identifiers::NameError> {
                $crate::domain::identifiers::validate_name(name)?;
                Ok(Self(name.to_string()))
            }

            /// Return the inner string value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::identifiers::NameError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}
