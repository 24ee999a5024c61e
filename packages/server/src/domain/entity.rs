//! Domain entities.

use super::{
    error::ValueObjectError,
    tally::Tally,
    value_object::{
        ConnectionId, MAX_OPTION_TEXT_LENGTH, OptionId, PollDuration, QuestionText, StudentName,
        Timestamp,
    },
};

/// Minimum number of usable options a poll must have.
pub const MIN_POLL_OPTIONS: usize = 2;

/// A connected student and their answer state for the current poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: ConnectionId,
    pub name: StudentName,
    pub has_answered: bool,
    pub answer: Option<OptionId>,
}

impl Student {
    pub fn new(id: ConnectionId, name: StudentName) -> Self {
        Self {
            id,
            name,
            has_answered: false,
            answer: None,
        }
    }

    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            id: self.id,
            name: self.name.clone(),
            has_answered: self.has_answered,
        }
    }
}

/// Roster entry as shown to teachers (the chosen option is not exposed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSummary {
    pub id: ConnectionId,
    pub name: StudentName,
    pub has_answered: bool,
}

/// One selectable choice of a poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOption {
    pub id: OptionId,
    pub text: String,
}

/// The question currently put to the class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poll {
    pub question: QuestionText,
    pub options: Vec<PollOption>,
    pub duration: PollDuration,
    pub started_at: Timestamp,
}

impl Poll {
    /// Build a poll from raw option texts.
    ///
    /// Option texts are trimmed and blank ones dropped before indices are
    /// assigned, so ids are always contiguous from zero.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than [`MIN_POLL_OPTIONS`] options remain or
    /// an option text is too long.
    pub fn new(
        question: QuestionText,
        option_texts: Vec<String>,
        duration: PollDuration,
        started_at: Timestamp,
    ) -> Result<Self, ValueObjectError> {
        let texts: Vec<String> = option_texts
            .into_iter()
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .collect();

        if texts.len() < MIN_POLL_OPTIONS {
            return Err(ValueObjectError::TooFewOptions {
                count: texts.len(),
                min: MIN_POLL_OPTIONS,
            });
        }
        if let Some(length) = texts
            .iter()
            .map(|text| text.chars().count())
            .find(|length| *length > MAX_OPTION_TEXT_LENGTH)
        {
            return Err(ValueObjectError::OptionTextTooLong {
                length,
                max: MAX_OPTION_TEXT_LENGTH,
            });
        }

        let options = texts
            .into_iter()
            .enumerate()
            .map(|(index, text)| PollOption {
                id: OptionId::new(index),
                text,
            })
            .collect();

        Ok(Self {
            question,
            options,
            duration,
            started_at,
        })
    }

    pub fn has_option(&self, option_id: OptionId) -> bool {
        option_id.index() < self.options.len()
    }

    pub fn option_ids(&self) -> impl Iterator<Item = OptionId> + '_ {
        self.options.iter().map(|option| option.id)
    }
}

/// Immutable summary of a closed poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub question: QuestionText,
    pub options: Vec<PollOption>,
    pub results: Tally,
    pub total_students: usize,
    pub closed_at: Timestamp,
}

/// Closing summary pushed to everyone when a poll ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollClosedSummary {
    pub results: Tally,
    pub total_students: usize,
    pub question: QuestionText,
    pub options: Vec<PollOption>,
}

/// Full state handed to a newly registered teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current_poll: Option<Poll>,
    pub students: Vec<StudentSummary>,
    pub results: Tally,
}
