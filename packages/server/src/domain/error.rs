//! Domain error types.

use thiserror::Error;

/// Value object construction errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Invalid connection id: '{0}'")]
    InvalidConnectionId(String),

    #[error("Student name must not be empty")]
    EmptyStudentName,

    #[error("Student name is too long ({length} > {max} characters)")]
    StudentNameTooLong { length: usize, max: usize },

    #[error("Question must not be empty")]
    EmptyQuestion,

    #[error("Question is too long ({length} > {max} characters)")]
    QuestionTooLong { length: usize, max: usize },

    #[error("Option text is too long ({length} > {max} characters)")]
    OptionTextTooLong { length: usize, max: usize },

    #[error("A poll needs at least {min} non-empty options (got {count})")]
    TooFewOptions { count: usize, min: usize },

    #[error("Poll duration must be between 1 and {max} seconds (got {secs})")]
    DurationOutOfRange { secs: u64, max: u64 },
}

/// Rejections produced by the poll session.
///
/// Every variant is reported back to the originating connection only and
/// leaves session state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Name '{0}' is already taken")]
    NameTaken(String),

    #[error("Invalid name: {0}")]
    InvalidName(ValueObjectError),

    #[error("This connection has already joined as a student")]
    AlreadyJoined,

    #[error("A connection cannot be both teacher and student")]
    RoleConflict,

    #[error("Only a teacher can perform this action")]
    NotATeacher,

    #[error("Only a joined student can answer")]
    NotAStudent,

    #[error("There is no active poll")]
    NoActivePoll,

    #[error("Answer already submitted for this poll")]
    AlreadySubmitted,

    #[error("Option {0} does not exist in the current poll")]
    UnknownOption(usize),

    #[error("Invalid poll: {0}")]
    InvalidPoll(ValueObjectError),

    #[error("A poll is still waiting for answers")]
    PollInProgress,
}

impl SessionError {
    /// Stable machine-readable code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::NameTaken(_) => "name-taken",
            SessionError::InvalidName(_) => "invalid-name",
            SessionError::AlreadyJoined => "already-joined",
            SessionError::RoleConflict => "role-conflict",
            SessionError::NotATeacher => "not-a-teacher",
            SessionError::NotAStudent => "not-a-student",
            SessionError::NoActivePoll => "no-active-poll",
            SessionError::AlreadySubmitted => "already-submitted",
            SessionError::UnknownOption(_) => "unknown-option",
            SessionError::InvalidPoll(_) => "invalid-poll",
            SessionError::PollInProgress => "poll-in-progress",
        }
    }
}

/// Message delivery errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}
