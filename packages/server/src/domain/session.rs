//! The poll session aggregate.
//!
//! `PollSession` owns the roster, the current poll slot, the tally, the
//! history log and the auto-close scheduler handle. Every handler runs to
//! completion on `&mut self` and returns the effects it wants delivered, so
//! the session itself never performs I/O.

use std::sync::Arc;

use classpoll_shared::time::Clock;

use super::{
    entity::{HistoryEntry, Poll, PollClosedSummary, SessionSnapshot},
    error::{SessionError, ValueObjectError},
    event::{Audience, ClientEvent, Effect, Recipient, ServerEvent},
    history::HistoryLog,
    roster::Roster,
    scheduler::AutoCloseScheduler,
    tally::Tally,
    value_object::{
        ConnectionId, DEFAULT_POLL_DURATION_SECS, OptionId, PollDuration, PollGeneration,
        QuestionText, StudentName, Timestamp,
    },
};

/// Tunables of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Duration used when a poll is created without one.
    pub default_duration_secs: u64,
    /// Reject `poll:create` while a poll is active and not everyone answered,
    /// instead of superseding it.
    pub reject_superseding_create: bool,
}

impl SessionConfig {
    /// Build a config, refusing a default duration that no poll could use.
    pub fn new(
        default_duration_secs: u64,
        reject_superseding_create: bool,
    ) -> Result<Self, ValueObjectError> {
        let default_duration = PollDuration::new(default_duration_secs)?;
        Ok(Self {
            default_duration_secs: default_duration.as_secs(),
            reject_superseding_create,
        })
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_duration_secs: DEFAULT_POLL_DURATION_SECS,
            reject_superseding_create: false,
        }
    }
}

#[derive(Debug)]
enum PollPhase {
    Idle,
    Active {
        poll: Poll,
        generation: PollGeneration,
    },
}

/// Authoritative state of the single poll session.
pub struct PollSession {
    config: SessionConfig,
    roster: Roster,
    phase: PollPhase,
    /// Results of the current poll, or of the last closed one while idle.
    tally: Tally,
    history: HistoryLog,
    generation: PollGeneration,
    scheduler: Box<dyn AutoCloseScheduler>,
    clock: Arc<dyn Clock>,
}

impl PollSession {
    pub fn new(
        config: SessionConfig,
        scheduler: Box<dyn AutoCloseScheduler>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            roster: Roster::new(),
            phase: PollPhase::Idle,
            tally: Tally::default(),
            history: HistoryLog::new(),
            generation: PollGeneration::default(),
            scheduler,
            clock,
        }
    }

    /// Handle one client action and return the effects to apply.
    ///
    /// Rejections never escape: they become a single reply to `caller`.
    pub fn dispatch(&mut self, caller: ConnectionId, event: ClientEvent) -> Vec<Effect> {
        let result = match event {
            ClientEvent::TeacherJoin => self.join_teacher(caller),
            ClientEvent::StudentJoin { name } => self.join_student(caller, name),
            ClientEvent::CreatePoll {
                question,
                options,
                duration,
            } => self.create_poll(caller, question, options, duration),
            ClientEvent::SubmitAnswer { answer_id } => self.submit_answer(caller, answer_id),
            ClientEvent::CheckCanCreate => Ok(vec![Effect::reply(
                caller,
                ServerEvent::CanCreate(self.check_can_create()),
            )]),
            ClientEvent::RemoveStudent { student_id } => self.remove_student(caller, student_id),
            ClientEvent::RequestHistory => Ok(vec![Effect::reply(
                caller,
                ServerEvent::HistoryData(self.history.all().to_vec()),
            )]),
            ClientEvent::Disconnect => Ok(self.disconnect(caller)),
        };

        result.unwrap_or_else(|error| {
            tracing::warn!("Rejected action from '{}': {}", caller, error);
            vec![Effect::reply(caller, ServerEvent::rejection(&error))]
        })
    }

    /// Register `caller` as a teacher observer and send it a full snapshot.
    pub fn join_teacher(&mut self, caller: ConnectionId) -> Result<Vec<Effect>, SessionError> {
        if self.roster.add_teacher(caller)? {
            tracing::info!("Teacher '{}' joined", caller);
        }

        Ok(vec![
            Effect::Subscribe {
                connection: caller,
                audience: Audience::Teachers,
            },
            Effect::reply(caller, ServerEvent::PollState(self.snapshot())),
        ])
    }

    /// Register `caller` as a student named `name`.
    pub fn join_student(
        &mut self,
        caller: ConnectionId,
        name: String,
    ) -> Result<Vec<Effect>, SessionError> {
        let name = StudentName::new(name).map_err(SessionError::InvalidName)?;
        let name = self.roster.join(caller, name)?.name.clone();
        tracing::info!("Student '{}' joined as '{}'", caller, name.as_str());

        let mut effects = vec![
            Effect::Subscribe {
                connection: caller,
                audience: Audience::Students,
            },
            self.roster_update(),
        ];
        if let PollPhase::Active { poll, .. } = &self.phase {
            effects.push(Effect::reply(caller, ServerEvent::PollActive(poll.clone())));
        }
        effects.push(Effect::reply(caller, ServerEvent::StudentJoined { name }));
        Ok(effects)
    }

    /// Start a new poll, superseding the active one if any.
    pub fn create_poll(
        &mut self,
        caller: ConnectionId,
        question: String,
        option_texts: Vec<String>,
        duration: Option<u64>,
    ) -> Result<Vec<Effect>, SessionError> {
        if !self.roster.is_teacher(&caller) {
            return Err(SessionError::NotATeacher);
        }
        if self.config.reject_superseding_create && self.is_active() && !self.roster.all_answered()
        {
            return Err(SessionError::PollInProgress);
        }

        let question = QuestionText::new(question).map_err(SessionError::InvalidPoll)?;
        let duration = PollDuration::from_secs(duration, self.config.default_duration_secs)
            .map_err(SessionError::InvalidPoll)?;
        let poll = Poll::new(question, option_texts, duration, self.now())
            .map_err(SessionError::InvalidPoll)?;

        if let PollPhase::Active { generation, .. } = &self.phase {
            tracing::info!("Poll {} superseded before closing", generation);
        }

        self.scheduler.cancel();
        self.generation = self.generation.next();
        self.tally = Tally::zeroed(poll.option_ids());
        self.roster.reset_all();
        self.scheduler.arm(self.generation, poll.duration);
        self.phase = PollPhase::Active {
            poll: poll.clone(),
            generation: self.generation,
        };
        tracing::info!(
            "Poll {} created: '{}' ({} options, {}s)",
            self.generation,
            poll.question.as_str(),
            poll.options.len(),
            poll.duration.as_secs()
        );

        Ok(vec![
            Effect::to_audience(Audience::Students, ServerEvent::PollActive(poll.clone())),
            Effect::to_audience(Audience::Teachers, ServerEvent::PollStarted(poll)),
        ])
    }

    /// Record `caller`'s answer, closing the poll early once everyone answered.
    pub fn submit_answer(
        &mut self,
        caller: ConnectionId,
        answer_id: usize,
    ) -> Result<Vec<Effect>, SessionError> {
        let Some(student) = self.roster.get(&caller) else {
            return Err(SessionError::NotAStudent);
        };
        let PollPhase::Active { poll, .. } = &self.phase else {
            return Err(SessionError::NoActivePoll);
        };
        if student.has_answered {
            return Err(SessionError::AlreadySubmitted);
        }
        let option_id = OptionId::new(answer_id);
        if !poll.has_option(option_id) {
            return Err(SessionError::UnknownOption(answer_id));
        }

        if !self.roster.mark_answered(&caller, option_id) {
            return Err(SessionError::AlreadySubmitted);
        }
        self.tally.increment(option_id);
        tracing::info!("Student '{}' answered option {}", caller, option_id);

        let mut effects = vec![
            self.roster_update(),
            Effect::to_audience(
                Audience::Teachers,
                ServerEvent::PollResults {
                    results: self.tally.clone(),
                    total_students: self.roster.len(),
                },
            ),
        ];
        effects.extend(self.close_if_all_answered());
        Ok(effects)
    }

    /// Whether launching a new poll is currently sensible. Advisory only.
    pub fn check_can_create(&self) -> bool {
        !self.is_active() || self.roster.all_answered()
    }

    /// Remove a student on a teacher's request. Unknown ids are ignored.
    pub fn remove_student(
        &mut self,
        caller: ConnectionId,
        student_id: ConnectionId,
    ) -> Result<Vec<Effect>, SessionError> {
        if !self.roster.is_teacher(&caller) {
            return Err(SessionError::NotATeacher);
        }
        let Some(student) = self.roster.remove(&student_id) else {
            tracing::debug!("Ignoring removal of unknown student '{}'", student_id);
            return Ok(Vec::new());
        };
        tracing::info!("Removed student '{}' ({})", student.name.as_str(), student.id);

        let mut effects = vec![
            Effect::reply(student.id, ServerEvent::StudentRemoved),
            Effect::Unsubscribe {
                connection: student.id,
                audience: Audience::Students,
            },
            self.roster_update(),
        ];
        effects.extend(self.close_if_all_answered());
        Ok(effects)
    }

    /// Forget everything about a closed connection.
    pub fn disconnect(&mut self, caller: ConnectionId) -> Vec<Effect> {
        if self.roster.remove_teacher(&caller) {
            tracing::info!("Teacher '{}' left", caller);
            return Vec::new();
        }
        let Some(student) = self.roster.remove(&caller) else {
            return Vec::new();
        };
        tracing::info!("Student '{}' left", student.name.as_str());

        let mut effects = vec![self.roster_update()];
        effects.extend(self.close_if_all_answered());
        effects
    }

    /// Timer entry point. Closes only if `generation` is the active poll.
    pub fn expire(&mut self, generation: PollGeneration) -> Vec<Effect> {
        let is_current = matches!(
            &self.phase,
            PollPhase::Active { generation: active, .. } if *active == generation
        );
        if !is_current {
            tracing::debug!("Ignoring stale timer for poll {}", generation);
            return Vec::new();
        }
        tracing::info!("Poll {} timed out", generation);
        self.close()
    }

    /// Close the active poll. No-op while idle.
    pub fn close(&mut self) -> Vec<Effect> {
        let PollPhase::Active { poll, generation } =
            std::mem::replace(&mut self.phase, PollPhase::Idle)
        else {
            return Vec::new();
        };
        self.scheduler.cancel();

        // Closure timestamps never go backwards, even if the wall clock does.
        let now = self.now();
        let closed_at = self
            .history
            .last()
            .map_or(now, |last| now.max(last.closed_at));
        let total_students = self.roster.len();
        self.history.append(HistoryEntry {
            question: poll.question.clone(),
            options: poll.options.clone(),
            results: self.tally.clone(),
            total_students,
            closed_at,
        });
        tracing::info!(
            "Poll {} closed with {} of {} answers",
            generation,
            self.tally.total(),
            total_students
        );

        vec![Effect::deliver(
            Recipient::Everyone,
            ServerEvent::PollClosed(PollClosedSummary {
                results: self.tally.clone(),
                total_students,
                question: poll.question,
                options: poll.options,
            }),
        )]
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_poll: self.current_poll().cloned(),
            students: self.roster.summaries(),
            results: self.tally.clone(),
        }
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.all()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    pub fn current_poll(&self) -> Option<&Poll> {
        match &self.phase {
            PollPhase::Active { poll, .. } => Some(poll),
            PollPhase::Idle => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, PollPhase::Active { .. })
    }

    /// Generation of the most recently created poll.
    pub fn generation(&self) -> PollGeneration {
        self.generation
    }

    fn close_if_all_answered(&mut self) -> Vec<Effect> {
        if self.is_active() && !self.roster.is_empty() && self.roster.all_answered() {
            tracing::info!("All {} students answered, closing early", self.roster.len());
            self.close()
        } else {
            Vec::new()
        }
    }

    fn roster_update(&self) -> Effect {
        Effect::to_audience(
            Audience::Teachers,
            ServerEvent::StudentsUpdate(self.roster.summaries()),
        )
    }

    fn now(&self) -> Timestamp {
        Timestamp::new(self.clock.now_millis())
    }
}
