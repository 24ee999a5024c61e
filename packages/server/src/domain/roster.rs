//! Connected students and teacher observers.

use std::collections::HashSet;

use super::{
    entity::{Student, StudentSummary},
    error::SessionError,
    value_object::{ConnectionId, OptionId, StudentName},
};

/// Students in join order plus the set of teacher observers.
#[derive(Debug, Default)]
pub struct Roster {
    students: Vec<Student>,
    teachers: HashSet<ConnectionId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a student.
    ///
    /// # Errors
    ///
    /// * `NameTaken` if a connected student already uses exactly this name
    /// * `AlreadyJoined` if the connection is already a student
    /// * `RoleConflict` if the connection is a teacher observer
    pub fn join(&mut self, id: ConnectionId, name: StudentName) -> Result<&Student, SessionError> {
        if self.teachers.contains(&id) {
            return Err(SessionError::RoleConflict);
        }
        if self.get(&id).is_some() {
            return Err(SessionError::AlreadyJoined);
        }
        if self.students.iter().any(|student| student.name == name) {
            return Err(SessionError::NameTaken(name.into_string()));
        }

        self.students.push(Student::new(id, name));
        Ok(&self.students[self.students.len() - 1])
    }

    /// Remove a student. Unknown ids are ignored.
    pub fn remove(&mut self, id: &ConnectionId) -> Option<Student> {
        let position = self.students.iter().position(|student| &student.id == id)?;
        Some(self.students.remove(position))
    }

    /// Record an answer.
    ///
    /// Returns `false` without changing anything if the student is unknown or
    /// has already answered.
    pub fn mark_answered(&mut self, id: &ConnectionId, option_id: OptionId) -> bool {
        match self.students.iter_mut().find(|student| &student.id == id) {
            Some(student) if !student.has_answered => {
                student.has_answered = true;
                student.answer = Some(option_id);
                true
            }
            _ => false,
        }
    }

    /// Clear every student's answer state.
    pub fn reset_all(&mut self) {
        for student in &mut self.students {
            student.has_answered = false;
            student.answer = None;
        }
    }

    /// True when every student answered; vacuously true for an empty roster.
    pub fn all_answered(&self) -> bool {
        self.students.iter().all(|student| student.has_answered)
    }

    pub fn get(&self, id: &ConnectionId) -> Option<&Student> {
        self.students.iter().find(|student| &student.id == id)
    }

    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn summaries(&self) -> Vec<StudentSummary> {
        self.students.iter().map(Student::summary).collect()
    }

    /// Register a teacher observer. Returns `false` if already registered.
    ///
    /// # Errors
    ///
    /// `RoleConflict` if the connection already joined as a student.
    pub fn add_teacher(&mut self, id: ConnectionId) -> Result<bool, SessionError> {
        if self.get(&id).is_some() {
            return Err(SessionError::RoleConflict);
        }
        Ok(self.teachers.insert(id))
    }

    pub fn remove_teacher(&mut self, id: &ConnectionId) -> bool {
        self.teachers.remove(id)
    }

    pub fn is_teacher(&self, id: &ConnectionId) -> bool {
        self.teachers.contains(id)
    }

    pub fn teacher_count(&self) -> usize {
        self.teachers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(value: &str) -> StudentName {
        StudentName::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_join_registers_unanswered_student() {
        // テスト項目: 参加した生徒は未回答状態で登録される
        // given (前提条件):
        let mut roster = Roster::new();
        let id = ConnectionId::generate();

        // when (操作):
        let student = roster.join(id, name("Sam")).unwrap().clone();

        // then (期待する結果):
        assert_eq!(student.id, id);
        assert!(!student.has_answered);
        assert_eq!(student.answer, None);
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_join_rejects_duplicate_name() {
        // テスト項目: 同名の生徒の参加は拒否され、名簿は変わらない
        // given (前提条件):
        let mut roster = Roster::new();
        roster.join(ConnectionId::generate(), name("Sam")).unwrap();

        // when (操作):
        let result = roster.join(ConnectionId::generate(), name("Sam"));

        // then (期待する結果):
        assert_eq!(
            result.map(|s| s.id),
            Err(SessionError::NameTaken("Sam".to_string()))
        );
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_join_name_is_reusable_after_removal() {
        // テスト項目: 退出した生徒の名前は再利用できる
        // given (前提条件):
        let mut roster = Roster::new();
        let first = ConnectionId::generate();
        roster.join(first, name("Sam")).unwrap();
        roster.remove(&first);

        // when (操作):
        let result = roster.join(ConnectionId::generate(), name("Sam"));

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_join_rejects_second_join_from_same_connection() {
        // テスト項目: 同じ接続からの 2 回目の参加は拒否される
        // given (前提条件):
        let mut roster = Roster::new();
        let id = ConnectionId::generate();
        roster.join(id, name("Sam")).unwrap();

        // when (操作):
        let result = roster.join(id, name("Alex"));

        // then (期待する結果):
        assert_eq!(result.map(|s| s.id), Err(SessionError::AlreadyJoined));
    }

    #[test]
    fn test_teacher_cannot_join_as_student() {
        // テスト項目: 教師として登録済みの接続は生徒として参加できない
        // given (前提条件):
        let mut roster = Roster::new();
        let id = ConnectionId::generate();
        roster.add_teacher(id).unwrap();

        // when (操作):
        let result = roster.join(id, name("Sam"));

        // then (期待する結果):
        assert_eq!(result.map(|s| s.id), Err(SessionError::RoleConflict));
        assert!(roster.is_empty());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        // テスト項目: 未知の ID の削除は何もしない（冪等）
        // given (前提条件):
        let mut roster = Roster::new();
        roster.join(ConnectionId::generate(), name("Sam")).unwrap();

        // when (操作):
        let removed = roster.remove(&ConnectionId::generate());

        // then (期待する結果):
        assert!(removed.is_none());
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_mark_answered_only_once() {
        // テスト項目: 回答の記録は 1 回だけ有効
        // given (前提条件):
        let mut roster = Roster::new();
        let id = ConnectionId::generate();
        roster.join(id, name("Sam")).unwrap();

        // when (操作):
        let first = roster.mark_answered(&id, OptionId::new(0));
        let second = roster.mark_answered(&id, OptionId::new(1));

        // then (期待する結果):
        assert!(first);
        assert!(!second);
        assert_eq!(roster.get(&id).unwrap().answer, Some(OptionId::new(0)));
    }

    #[test]
    fn test_mark_answered_unknown_student() {
        // テスト項目: 未知の生徒の回答記録は失敗する
        // given (前提条件):
        let mut roster = Roster::new();

        // when (操作):
        let marked = roster.mark_answered(&ConnectionId::generate(), OptionId::new(0));

        // then (期待する結果):
        assert!(!marked);
    }

    #[test]
    fn test_reset_all_clears_answers() {
        // テスト項目: reset_all で全生徒の回答状態がクリアされる
        // given (前提条件):
        let mut roster = Roster::new();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        roster.join(alice, name("Alice")).unwrap();
        roster.join(bob, name("Bob")).unwrap();
        roster.mark_answered(&alice, OptionId::new(0));
        roster.mark_answered(&bob, OptionId::new(1));

        // when (操作):
        roster.reset_all();

        // then (期待する結果):
        assert!(
            roster
                .students()
                .iter()
                .all(|s| !s.has_answered && s.answer.is_none())
        );
    }

    #[test]
    fn test_all_answered() {
        // テスト項目: 空の名簿では真、全員回答で真、未回答者がいれば偽
        // given (前提条件):
        let mut roster = Roster::new();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();

        // when (操作) / then (期待する結果):
        assert!(roster.all_answered());

        roster.join(alice, name("Alice")).unwrap();
        roster.join(bob, name("Bob")).unwrap();
        roster.mark_answered(&alice, OptionId::new(0));
        assert!(!roster.all_answered());

        roster.mark_answered(&bob, OptionId::new(0));
        assert!(roster.all_answered());
    }

    #[test]
    fn test_summaries_keep_join_order() {
        // テスト項目: 名簿のスナップショットは参加順
        // given (前提条件):
        let mut roster = Roster::new();
        roster.join(ConnectionId::generate(), name("Charlie")).unwrap();
        roster.join(ConnectionId::generate(), name("Alice")).unwrap();

        // when (操作):
        let summaries = roster.summaries();

        // then (期待する結果):
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Charlie", "Alice"]);
    }
}
