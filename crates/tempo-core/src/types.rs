//! Core type definitions with validation.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// The progress value was out of range.
    #[error("progress must be between 0 and 100, got {value}")]
    ProgressOutOfRange { value: i64 },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// A validated time-entry identifier.
    ///
    /// Entry IDs must be non-empty strings. They should be unique within the
    /// system, though uniqueness is enforced at the database level.
    EntryId, "entry ID"
);

define_string_id!(
    /// A validated team-member identifier.
    MemberId, "member ID"
);

define_string_id!(
    /// A validated project identifier.
    ProjectId, "project ID"
);

define_string_id!(
    /// A validated task identifier.
    TaskId, "task ID"
);

/// A project completion percentage in the range \[0, 100\].
///
/// Progress is reported by the project store and treated as authoritative;
/// the metrics pipeline never recomputes it from task state. Values are
/// clamped during deserialization to be lenient with external data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Progress(u8);

impl Progress {
    /// Fully complete (100%).
    pub const COMPLETE: Self = Self(100);

    /// Not started (0%).
    pub const ZERO: Self = Self(0);

    /// Creates a new progress value after validation.
    ///
    /// Returns an error if the value is outside \[0, 100\].
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "range-checked before casting"
    )]
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if (0..=100).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::ProgressOutOfRange { value })
        }
    }

    /// Creates a progress value, clamping to \[0, 100\].
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "range-checked by the branches"
    )]
    pub const fn clamped(value: i64) -> Self {
        if value < 0 {
            Self(0)
        } else if value > 100 {
            Self(100)
        } else {
            Self(value as u8)
        }
    }

    /// Returns the inner percentage value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether the project has reached 100%.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        self.0 >= 100
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<i64> for Progress {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Progress> for u8 {
    fn from(p: Progress) -> Self {
        p.0
    }
}

impl Serialize for Progress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Progress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i64::deserialize(deserializer)?;
        // Clamp on deserialization to be lenient with external data
        Ok(Self::clamped(value))
    }
}
