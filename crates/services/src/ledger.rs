use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::Arc;

use quiz_core::model::{Competency, MistakeRecord, Question, QuestionId};

/// Deduplicated, most-recent-first record of wrongly answered questions.
///
/// The first mistake per question wins: recording a question that is already
/// in the ledger is a no-op and leaves the existing record untouched. There
/// is no removal API; the ledger lives as long as its owner.
#[derive(Debug, Clone, Default)]
pub struct MistakeLedger {
    records: VecDeque<MistakeRecord>,
    ids: HashSet<QuestionId>,
}

impl MistakeLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mistake for `question`. Returns `true` if it was inserted.
    pub fn record(
        &mut self,
        question: Arc<Question>,
        recorded_at: DateTime<Utc>,
        wrong_answer_index: Option<usize>,
    ) -> bool {
        self.record_mistake(MistakeRecord::new(question, recorded_at, wrong_answer_index))
    }

    /// Insert a prepared record at the front unless its question is already present.
    pub fn record_mistake(&mut self, record: MistakeRecord) -> bool {
        if !self.ids.insert(record.question.id().clone()) {
            tracing::debug!(question = %record.question.id(), "mistake already recorded");
            return false;
        }
        tracing::debug!(
            question = %record.question.id(),
            wrong = ?record.wrong_answer_index,
            "mistake recorded"
        );
        self.records.push_front(record);
        debug_assert_eq!(self.records.len(), self.ids.len());
        true
    }

    /// Snapshot of all records, most recent first.
    #[must_use]
    pub fn list(&self) -> Vec<MistakeRecord> {
        self.records.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MistakeRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &QuestionId) -> bool {
        self.ids.contains(id)
    }

    /// Records grouped by competency, each group most recent first.
    #[must_use]
    pub fn by_competency(&self) -> BTreeMap<Competency, Vec<MistakeRecord>> {
        let mut groups: BTreeMap<Competency, Vec<MistakeRecord>> = BTreeMap::new();
        for record in &self.records {
            groups
                .entry(record.question.competency())
                .or_default()
                .push(record.clone());
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::{DifficultyLevel, QuestionDraft};
    use quiz_core::time::fixed_now;

    fn question(id: &str, competency: Competency) -> Arc<Question> {
        Arc::new(
            QuestionDraft {
                id: id.into(),
                scenario: String::new(),
                question_text: format!("Question {id}"),
                options: vec!["A".into(), "B".into(), "C".into()],
                correct_option_index: 0,
                explanation: "see notes".into(),
                difficulty: DifficultyLevel::Level2,
                topic: "sulfur".into(),
                competency,
                misconception: None,
                learning_tip: None,
                resource: None,
            }
            .validate()
            .unwrap(),
        )
    }

    #[test]
    fn records_are_most_recent_first() {
        let mut ledger = MistakeLedger::new();
        let now = fixed_now();
        assert!(ledger.record(question("a", Competency::MacroMicro), now, Some(1)));
        assert!(ledger.record(
            question("b", Competency::MacroMicro),
            now + Duration::seconds(5),
            Some(2)
        ));

        let ids: Vec<_> = ledger
            .list()
            .iter()
            .map(|r| r.question.id().as_str().to_owned())
            .collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(ledger.count(), 2);
    }

    #[test]
    fn duplicate_question_keeps_first_record() {
        let mut ledger = MistakeLedger::new();
        let now = fixed_now();
        let q = question("so2", Competency::ChangeBalance);

        assert!(ledger.record(Arc::clone(&q), now, Some(1)));
        assert!(!ledger.record(Arc::clone(&q), now + Duration::minutes(3), Some(2)));

        assert_eq!(ledger.count(), 1);
        let only = &ledger.list()[0];
        assert_eq!(only.recorded_at, now);
        assert_eq!(only.wrong_answer_index, Some(1));
        assert!(ledger.contains(q.id()));
    }

    #[test]
    fn groups_by_competency() {
        let mut ledger = MistakeLedger::new();
        let now = fixed_now();
        ledger.record(question("a", Competency::EvidenceModel), now, None);
        ledger.record(question("b", Competency::MacroMicro), now, None);
        ledger.record(question("c", Competency::EvidenceModel), now, None);

        let groups = ledger.by_competency();
        assert_eq!(groups.len(), 2);
        let evidence: Vec<_> = groups[&Competency::EvidenceModel]
            .iter()
            .map(|r| r.question.id().as_str().to_owned())
            .collect();
        assert_eq!(evidence, vec!["c", "a"]);
    }
}
