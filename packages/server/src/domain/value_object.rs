//! Value objects for the poll session domain.
//!
//! Each type validates on construction so that the aggregate only ever sees
//! well-formed values.

use std::{fmt, time::Duration};

use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum length of a student display name (in characters).
pub const MAX_STUDENT_NAME_LENGTH: usize = 50;
/// Maximum length of a poll question (in characters).
pub const MAX_QUESTION_LENGTH: usize = 500;
/// Maximum length of a single option text (in characters).
pub const MAX_OPTION_TEXT_LENGTH: usize = 200;
/// Duration used when a poll is created without one.
pub const DEFAULT_POLL_DURATION_SECS: u64 = 60;
/// Longest accepted poll duration.
pub const MAX_POLL_DURATION_SECS: u64 = 3600;

/// Identity of one WebSocket connection.
///
/// A student's identity is the identity of the connection it joined from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh random identity.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<&str> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| ValueObjectError::InvalidConnectionId(value.to_string()))
    }
}

/// Display name of a student, unique among connected students.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StudentName(String);

impl StudentName {
    /// Create a name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed name is empty or longer than
    /// [`MAX_STUDENT_NAME_LENGTH`] characters.
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyStudentName);
        }
        let length = trimmed.chars().count();
        if length > MAX_STUDENT_NAME_LENGTH {
            return Err(ValueObjectError::StudentNameTooLong {
                length,
                max: MAX_STUDENT_NAME_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for StudentName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Question text of a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionText(String);

impl QuestionText {
    /// Create a question, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed question is empty or too long.
    pub fn new(question: String) -> Result<Self, ValueObjectError> {
        let trimmed = question.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyQuestion);
        }
        let length = trimmed.chars().count();
        if length > MAX_QUESTION_LENGTH {
            return Err(ValueObjectError::QuestionTooLong {
                length,
                max: MAX_QUESTION_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Zero-based index of an option within the current poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionId(usize);

impl OptionId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How long a poll stays open before the scheduler closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollDuration(u64);

impl PollDuration {
    /// Create a duration from seconds.
    ///
    /// `None` and `Some(0)` fall back to `default_secs`.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolved duration exceeds [`MAX_POLL_DURATION_SECS`].
    pub fn from_secs(secs: Option<u64>, default_secs: u64) -> Result<Self, ValueObjectError> {
        match secs {
            None | Some(0) => Self::new(default_secs),
            Some(secs) => Self::new(secs),
        }
    }

    /// Exact duration in seconds, 1..=[`MAX_POLL_DURATION_SECS`].
    pub fn new(secs: u64) -> Result<Self, ValueObjectError> {
        if secs == 0 || secs > MAX_POLL_DURATION_SECS {
            return Err(ValueObjectError::DurationOutOfRange {
                secs,
                max: MAX_POLL_DURATION_SECS,
            });
        }
        Ok(Self(secs))
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for PollDuration {
    fn default() -> Self {
        Self(DEFAULT_POLL_DURATION_SECS)
    }
}

/// Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Sequence number of a created poll.
///
/// The scheduler echoes the generation back when it fires, which lets the
/// session ignore a timer that belongs to a superseded or closed poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PollGeneration(u64);

impl PollGeneration {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PollGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
