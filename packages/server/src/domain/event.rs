//! Inbound client actions and outbound effects of the session.

use super::{
    entity::{HistoryEntry, Poll, PollClosedSummary, SessionSnapshot, StudentSummary},
    error::SessionError,
    tally::Tally,
    value_object::{ConnectionId, StudentName},
};

/// Action requested by a connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    TeacherJoin,
    StudentJoin {
        name: String,
    },
    CreatePoll {
        question: String,
        options: Vec<String>,
        duration: Option<u64>,
    },
    SubmitAnswer {
        answer_id: usize,
    },
    CheckCanCreate,
    RemoveStudent {
        student_id: ConnectionId,
    },
    RequestHistory,
    Disconnect,
}

/// Notification sent to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    PollActive(Poll),
    PollStarted(Poll),
    StudentsUpdate(Vec<StudentSummary>),
    PollResults { results: Tally, total_students: usize },
    PollClosed(PollClosedSummary),
    PollState(SessionSnapshot),
    StudentJoined { name: StudentName },
    NameTaken,
    AlreadySubmitted,
    CanCreate(bool),
    StudentRemoved,
    HistoryData(Vec<HistoryEntry>),
    Error { code: &'static str, message: String },
}

impl ServerEvent {
    /// Reply sent to the caller whose action was rejected.
    pub fn rejection(error: &SessionError) -> Self {
        match error {
            SessionError::NameTaken(_) => ServerEvent::NameTaken,
            SessionError::AlreadySubmitted => ServerEvent::AlreadySubmitted,
            other => ServerEvent::Error {
                code: other.code(),
                message: other.to_string(),
            },
        }
    }

    /// Event name used for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::PollActive(_) => "poll:active",
            ServerEvent::PollStarted(_) => "poll:started",
            ServerEvent::StudentsUpdate(_) => "students:update",
            ServerEvent::PollResults { .. } => "poll:results",
            ServerEvent::PollClosed(_) => "poll:closed",
            ServerEvent::PollState(_) => "poll:state",
            ServerEvent::StudentJoined { .. } => "student:joined",
            ServerEvent::NameTaken => "student:name-taken",
            ServerEvent::AlreadySubmitted => "answer:already-submitted",
            ServerEvent::CanCreate(_) => "poll:can-create",
            ServerEvent::StudentRemoved => "student:removed",
            ServerEvent::HistoryData(_) => "poll:history-data",
            ServerEvent::Error { .. } => "error",
        }
    }
}

/// Named subscriber set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    Teachers,
    Students,
}

/// Who receives a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recipient {
    Audience(Audience),
    /// Every connected client, whatever its role.
    Everyone,
    Connection(ConnectionId),
}

/// Side effect produced by a session handler, applied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Deliver {
        recipient: Recipient,
        event: ServerEvent,
    },
    Subscribe {
        connection: ConnectionId,
        audience: Audience,
    },
    Unsubscribe {
        connection: ConnectionId,
        audience: Audience,
    },
}

impl Effect {
    pub fn deliver(recipient: Recipient, event: ServerEvent) -> Self {
        Effect::Deliver { recipient, event }
    }

    pub fn to_audience(audience: Audience, event: ServerEvent) -> Self {
        Self::deliver(Recipient::Audience(audience), event)
    }

    pub fn reply(connection: ConnectionId, event: ServerEvent) -> Self {
        Self::deliver(Recipient::Connection(connection), event)
    }
}
