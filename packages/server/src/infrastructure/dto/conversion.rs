//! Conversion logic between DTOs and domain types.

use classpoll_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    ClientEvent, ConnectionId, HistoryEntry, Poll, PollClosedSummary, PollOption, ServerEvent,
    SessionSnapshot, StudentSummary, Tally, ValueObjectError,
};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::ClientMessage> for ClientEvent {
    type Error = ValueObjectError;

    fn try_from(message: dto::ClientMessage) -> Result<Self, Self::Error> {
        let event = match message {
            dto::ClientMessage::TeacherJoin => ClientEvent::TeacherJoin,
            dto::ClientMessage::StudentJoin(name) => ClientEvent::StudentJoin { name },
            dto::ClientMessage::PollCreate(payload) => ClientEvent::CreatePoll {
                question: payload.question,
                options: payload.options,
                duration: payload.duration,
            },
            dto::ClientMessage::AnswerSubmit(payload) => ClientEvent::SubmitAnswer {
                answer_id: payload.answer_id,
            },
            dto::ClientMessage::PollCheckNew => ClientEvent::CheckCanCreate,
            dto::ClientMessage::StudentRemove(student_id) => ClientEvent::RemoveStudent {
                student_id: ConnectionId::try_from(student_id.as_str())?,
            },
            dto::ClientMessage::PollHistory => ClientEvent::RequestHistory,
        };
        Ok(event)
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&Tally> for dto::ResultsDto {
    fn from(tally: &Tally) -> Self {
        tally.iter().map(|(id, count)| (id.index(), count)).collect()
    }
}

impl From<&PollOption> for dto::PollOptionDto {
    fn from(option: &PollOption) -> Self {
        Self {
            id: option.id.index(),
            text: option.text.clone(),
        }
    }
}

fn options_to_dto(options: &[PollOption]) -> Vec<dto::PollOptionDto> {
    options.iter().map(dto::PollOptionDto::from).collect()
}

impl From<&Poll> for dto::PollDto {
    fn from(poll: &Poll) -> Self {
        Self {
            question: poll.question.as_str().to_string(),
            options: options_to_dto(&poll.options),
            duration: poll.duration.as_secs(),
            start_time: poll.started_at.value(),
        }
    }
}

impl From<&StudentSummary> for dto::StudentDto {
    fn from(student: &StudentSummary) -> Self {
        Self {
            id: student.id.to_string(),
            name: student.name.as_str().to_string(),
            has_answered: student.has_answered,
        }
    }
}

fn students_to_dto(students: &[StudentSummary]) -> Vec<dto::StudentDto> {
    students.iter().map(dto::StudentDto::from).collect()
}

impl From<&HistoryEntry> for dto::HistoryEntryDto {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            question: entry.question.as_str().to_string(),
            options: options_to_dto(&entry.options),
            results: (&entry.results).into(),
            total_students: entry.total_students,
            timestamp: timestamp_to_rfc3339(entry.closed_at.value()),
        }
    }
}

impl From<&PollClosedSummary> for dto::PollClosedDto {
    fn from(summary: &PollClosedSummary) -> Self {
        Self {
            results: (&summary.results).into(),
            total_students: summary.total_students,
            question: summary.question.as_str().to_string(),
            options: options_to_dto(&summary.options),
        }
    }
}

impl From<&SessionSnapshot> for dto::PollStateDto {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            current_poll: snapshot.current_poll.as_ref().map(dto::PollDto::from),
            students: students_to_dto(&snapshot.students),
            results: (&snapshot.results).into(),
        }
    }
}

impl From<&ServerEvent> for dto::ServerMessage {
    fn from(event: &ServerEvent) -> Self {
        match event {
            ServerEvent::PollActive(poll) => Self::PollActive(poll.into()),
            ServerEvent::PollStarted(poll) => Self::PollStarted(poll.into()),
            ServerEvent::StudentsUpdate(students) => Self::StudentsUpdate(students_to_dto(students)),
            ServerEvent::PollResults {
                results,
                total_students,
            } => Self::PollResults(dto::PollResultsDto {
                results: results.into(),
                total_students: *total_students,
            }),
            ServerEvent::PollClosed(summary) => Self::PollClosed(summary.into()),
            ServerEvent::PollState(snapshot) => Self::PollState(snapshot.into()),
            ServerEvent::StudentJoined { name } => Self::StudentJoined(dto::StudentJoinedDto {
                name: name.as_str().to_string(),
            }),
            ServerEvent::NameTaken => Self::NameTaken,
            ServerEvent::AlreadySubmitted => Self::AlreadySubmitted,
            ServerEvent::CanCreate(can_create) => Self::CanCreate(*can_create),
            ServerEvent::StudentRemoved => Self::StudentRemoved,
            ServerEvent::HistoryData(entries) => {
                Self::HistoryData(entries.iter().map(dto::HistoryEntryDto::from).collect())
            }
            ServerEvent::Error { code, message } => Self::Error(dto::ErrorDto {
                code: code.to_string(),
                message: message.clone(),
            }),
        }
    }
}
