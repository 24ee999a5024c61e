//! Domain layer: the poll session and everything it owns.

pub mod entity;
pub mod error;
pub mod event;
pub mod history;
pub mod pusher;
pub mod roster;
pub mod scheduler;
pub mod session;
pub mod tally;
pub mod value_object;

pub use entity::{
    HistoryEntry, Poll, PollClosedSummary, PollOption, SessionSnapshot, Student, StudentSummary,
};
pub use error::{MessagePushError, SessionError, ValueObjectError};
pub use event::{Audience, ClientEvent, Effect, Recipient, ServerEvent};
pub use history::HistoryLog;
pub use pusher::{MessagePusher, PusherChannel};
pub use roster::Roster;
pub use scheduler::AutoCloseScheduler;
pub use session::{PollSession, SessionConfig};
pub use tally::Tally;
pub use value_object::{
    ConnectionId, OptionId, PollDuration, PollGeneration, QuestionText, StudentName, Timestamp,
};
