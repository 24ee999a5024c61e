//! WebSocket message DTOs.
//!
//! Every frame is a JSON object `{"type": "<event>", "data": <payload>}`;
//! `data` is absent for events without a payload.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Frames sent by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    #[serde(rename = "teacher:join")]
    TeacherJoin,
    #[serde(rename = "student:join")]
    StudentJoin(String),
    #[serde(rename = "poll:create")]
    PollCreate(PollCreateDto),
    #[serde(rename = "answer:submit")]
    AnswerSubmit(AnswerSubmitDto),
    #[serde(rename = "poll:check-new")]
    PollCheckNew,
    #[serde(rename = "student:remove")]
    StudentRemove(String),
    #[serde(rename = "poll:history")]
    PollHistory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollCreateDto {
    pub question: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub duration: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmitDto {
    pub answer_id: usize,
}

/// Frames sent by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    #[serde(rename = "poll:active")]
    PollActive(PollDto),
    #[serde(rename = "poll:started")]
    PollStarted(PollDto),
    #[serde(rename = "students:update")]
    StudentsUpdate(Vec<StudentDto>),
    #[serde(rename = "poll:results")]
    PollResults(PollResultsDto),
    #[serde(rename = "poll:closed")]
    PollClosed(PollClosedDto),
    #[serde(rename = "poll:state")]
    PollState(PollStateDto),
    #[serde(rename = "student:joined")]
    StudentJoined(StudentJoinedDto),
    #[serde(rename = "student:name-taken")]
    NameTaken,
    #[serde(rename = "answer:already-submitted")]
    AlreadySubmitted,
    #[serde(rename = "poll:can-create")]
    CanCreate(bool),
    #[serde(rename = "student:removed")]
    StudentRemoved,
    #[serde(rename = "poll:history-data")]
    HistoryData(Vec<HistoryEntryDto>),
    #[serde(rename = "error")]
    Error(ErrorDto),
}

/// Vote counts keyed by option index.
pub type ResultsDto = BTreeMap<usize, u32>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOptionDto {
    pub id: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollDto {
    pub question: String,
    pub options: Vec<PollOptionDto>,
    /// Seconds
    pub duration: u64,
    /// Unix milliseconds
    pub start_time: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    pub id: String,
    pub name: String,
    pub has_answered: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResultsDto {
    pub results: ResultsDto,
    pub total_students: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollClosedDto {
    pub results: ResultsDto,
    pub total_students: usize,
    pub question: String,
    pub options: Vec<PollOptionDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PollStateDto {
    pub current_poll: Option<PollDto>,
    pub students: Vec<StudentDto>,
    pub results: ResultsDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentJoinedDto {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryDto {
    pub question: String,
    pub options: Vec<PollOptionDto>,
    pub results: ResultsDto,
    pub total_students: usize,
    /// RFC 3339 (UTC)
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub code: String,
    pub message: String,
}
