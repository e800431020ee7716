//! Top-level screen state machine.
//!
//! The controller owns the mistake ledger and at most one active diagnostic or
//! learning session. Every intent runs to completion synchronously; intents
//! that are not valid on the current screen are ignored.

use std::fmt;
use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{DifficultyLevel, MistakeRecord, Question, QuestionId, UserProgress};
use storage::QuestionRepository;

use crate::assessment::{AssessmentEngine, AssessmentStep};
use crate::config::QuizConfig;
use crate::error::ControllerError;
use crate::ledger::MistakeLedger;
use crate::sessions::{AnswerOutcome, LearningSession, QuestionPicker};

//
// ─── SCREENS & INTENTS ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Welcome,
    Assessment,
    Learning,
    Mastery,
    MistakeBook,
}

/// User intents emitted by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    StartDiagnostic,
    SubmitAnswer {
        question_id: QuestionId,
        option_index: usize,
    },
    ViewMistakes,
    GoBack,
    Restart,
    GoHome,
}

/// A screen change caused by an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
}

/// What an answer submission did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerReceipt {
    /// No answerable question on the current screen.
    Ignored,
    /// A diagnostic answer; `placement` is set when it was the last one.
    Assessed {
        correct: bool,
        placement: Option<DifficultyLevel>,
        transition: Option<Transition>,
    },
    /// A learning answer.
    Learned {
        outcome: AnswerOutcome,
        transition: Option<Transition>,
    },
}

impl AnswerReceipt {
    #[must_use]
    pub fn transition(&self) -> Option<Transition> {
        match self {
            Self::Ignored => None,
            Self::Assessed { transition, .. } | Self::Learned { transition, .. } => *transition,
        }
    }
}

/// Result of dispatching an [`Intent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Navigated(Option<Transition>),
    Answered(AnswerReceipt),
}

/// Immutable view of the controller for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct AppSnapshot {
    pub screen: Screen,
    /// Live progress while learning, final progress on the mastery screen.
    pub progress: Option<UserProgress>,
    pub placement: Option<DifficultyLevel>,
    pub mistake_count: usize,
    pub question: Option<Arc<Question>>,
    /// `(answered, total)` while the diagnostic runs.
    pub assessment_position: Option<(usize, usize)>,
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Routes intents between the assessment engine, the learning session and
/// the mistake ledger.
pub struct ScreenController {
    repo: Arc<dyn QuestionRepository>,
    config: QuizConfig,
    clock: Clock,
    screen: Screen,
    diagnostic: AssessmentEngine,
    /// Shared by every learning run so rotation and shuffle state carry over.
    picker: QuestionPicker,
    assessment: Option<AssessmentEngine>,
    session: Option<LearningSession>,
    placement: Option<DifficultyLevel>,
    final_progress: Option<UserProgress>,
    ledger: MistakeLedger,
}

impl ScreenController {
    /// Create a controller on the welcome screen.
    ///
    /// The bank is checked up front so that content defects surface here,
    /// not in the middle of a session.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::Assessment` if the bank cannot fill the
    /// diagnostic, or `ControllerError::Progression` if a level is empty.
    pub fn new(
        repo: Arc<dyn QuestionRepository>,
        config: QuizConfig,
    ) -> Result<Self, ControllerError> {
        let diagnostic = AssessmentEngine::start(repo.as_ref(), config.assessment)?;
        let mut picker = QuestionPicker::new(repo.as_ref())?;
        if config.shuffle {
            picker = picker.with_shuffle(config.shuffle_seed);
        }
        Ok(Self {
            repo,
            config,
            clock: Clock::default(),
            screen: Screen::Welcome,
            diagnostic,
            picker,
            assessment: None,
            session: None,
            placement: None,
            final_progress: None,
            ledger: MistakeLedger::new(),
        })
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the clock used to stamp mistakes.
    pub fn set_clock(&mut self, clock: Clock) {
        self.clock = clock;
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    #[must_use]
    pub fn ledger(&self) -> &MistakeLedger {
        &self.ledger
    }

    /// Mistake records, most recent first.
    #[must_use]
    pub fn mistakes(&self) -> Vec<MistakeRecord> {
        self.ledger.list()
    }

    #[must_use]
    pub fn snapshot(&self) -> AppSnapshot {
        let progress = match self.screen {
            Screen::Learning => self.session.as_ref().map(LearningSession::progress),
            Screen::Mastery => self.final_progress,
            _ => None,
        };
        let question = match self.screen {
            Screen::Assessment => self
                .assessment
                .as_ref()
                .and_then(|a| a.current_question().cloned()),
            Screen::Learning => self
                .session
                .as_ref()
                .and_then(|s| s.current_question().cloned()),
            _ => None,
        };
        let assessment_position = match (self.screen, self.assessment.as_ref()) {
            (Screen::Assessment, Some(a)) => Some((a.position(), a.total())),
            _ => None,
        };
        AppSnapshot {
            screen: self.screen,
            progress,
            placement: self.placement,
            mistake_count: self.ledger.count(),
            question,
            assessment_position,
        }
    }

    /// Dispatch an intent to its handler.
    ///
    /// # Errors
    ///
    /// Only answer submissions can fail; see [`Self::submit_answer`].
    pub fn dispatch(&mut self, intent: Intent) -> Result<Dispatch, ControllerError> {
        let dispatch = match intent {
            Intent::StartDiagnostic => Dispatch::Navigated(self.start_diagnostic()),
            Intent::SubmitAnswer {
                question_id,
                option_index,
            } => Dispatch::Answered(self.submit_answer(&question_id, option_index)?),
            Intent::ViewMistakes => Dispatch::Navigated(self.view_mistakes()),
            Intent::GoBack => Dispatch::Navigated(self.go_back()),
            Intent::Restart => Dispatch::Navigated(self.restart()),
            Intent::GoHome => Dispatch::Navigated(self.go_home()),
        };
        Ok(dispatch)
    }

    /// Welcome → Assessment.
    pub fn start_diagnostic(&mut self) -> Option<Transition> {
        if self.screen != Screen::Welcome {
            return self.ignore("start_diagnostic");
        }
        self.assessment = Some(self.diagnostic.clone());
        Some(self.move_to(Screen::Assessment))
    }

    /// Any screen except the mistake book → MistakeBook.
    ///
    /// Leaving an unfinished diagnostic or learning run discards it.
    pub fn view_mistakes(&mut self) -> Option<Transition> {
        if self.screen == Screen::MistakeBook {
            return self.ignore("view_mistakes");
        }
        self.assessment = None;
        self.session = None;
        Some(self.move_to(Screen::MistakeBook))
    }

    /// MistakeBook → Welcome.
    pub fn go_back(&mut self) -> Option<Transition> {
        if self.screen != Screen::MistakeBook {
            return self.ignore("go_back");
        }
        Some(self.move_to(Screen::Welcome))
    }

    /// Mastery or Learning → Learning with fresh Level1 progress.
    ///
    /// The mistake ledger is kept.
    pub fn restart(&mut self) -> Option<Transition> {
        if !matches!(self.screen, Screen::Mastery | Screen::Learning) {
            return self.ignore("restart");
        }
        self.final_progress = None;
        self.start_learning(DifficultyLevel::Level1);
        Some(self.move_to(Screen::Learning))
    }

    /// Any screen except Welcome → Welcome, discarding unfinished runs.
    pub fn go_home(&mut self) -> Option<Transition> {
        if self.screen == Screen::Welcome {
            return self.ignore("go_home");
        }
        self.assessment = None;
        self.session = None;
        Some(self.move_to(Screen::Welcome))
    }

    /// Answer the question on screen.
    ///
    /// Diagnostic answers feed the assessment engine; learning answers feed
    /// the progression engine and wrong ones land in the mistake ledger. On
    /// other screens the answer is ignored.
    ///
    /// # Errors
    ///
    /// Returns `ControllerError::UnknownQuestion` if the id is not in the
    /// bank, and `ControllerError::Assessment` / `ControllerError::Progression`
    /// if the engine rejects the answer. Progress is unchanged on error.
    pub fn submit_answer(
        &mut self,
        question_id: &QuestionId,
        option_index: usize,
    ) -> Result<AnswerReceipt, ControllerError> {
        if !matches!(self.screen, Screen::Assessment | Screen::Learning) {
            self.ignore("submit_answer");
            return Ok(AnswerReceipt::Ignored);
        }

        if let Err(err) = self.repo.get(question_id) {
            tracing::warn!(question = %question_id, "answer for unknown question");
            return Err(err.into());
        }

        match self.screen {
            Screen::Assessment => self.submit_assessment_answer(question_id, option_index),
            Screen::Learning => self.submit_learning_answer(question_id, option_index),
            _ => Ok(AnswerReceipt::Ignored),
        }
    }

    fn submit_assessment_answer(
        &mut self,
        question_id: &QuestionId,
        option_index: usize,
    ) -> Result<AnswerReceipt, ControllerError> {
        let Some(assessment) = self.assessment.as_mut() else {
            return Ok(AnswerReceipt::Ignored);
        };
        let step = assessment.submit(question_id, option_index)?;

        let transition = match step {
            AssessmentStep::Next { .. } => None,
            AssessmentStep::Complete { placement, .. } => {
                self.placement = Some(placement);
                self.assessment = None;
                self.start_learning(placement);
                Some(self.move_to(Screen::Learning))
            }
        };
        Ok(AnswerReceipt::Assessed {
            correct: step.correct(),
            placement: step.placement(),
            transition,
        })
    }

    fn submit_learning_answer(
        &mut self,
        question_id: &QuestionId,
        option_index: usize,
    ) -> Result<AnswerReceipt, ControllerError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(AnswerReceipt::Ignored);
        };
        let outcome = session.answer(
            question_id,
            option_index,
            self.clock.now(),
            &mut self.picker,
        )?;

        if let Some(mistake) = outcome.mistake.clone() {
            self.ledger.record_mistake(mistake);
        }

        let transition = match outcome.mastery {
            Some(mastery) => {
                self.final_progress = Some(mastery.progress);
                self.session = None;
                Some(self.move_to(Screen::Mastery))
            }
            None => None,
        };
        Ok(AnswerReceipt::Learned {
            outcome,
            transition,
        })
    }

    fn start_learning(&mut self, level: DifficultyLevel) {
        self.session = Some(LearningSession::new(
            level,
            self.config.progression,
            &mut self.picker,
        ));
    }

    fn move_to(&mut self, to: Screen) -> Transition {
        let transition = Transition {
            from: self.screen,
            to,
        };
        self.screen = to;
        tracing::info!(from = ?transition.from, to = ?transition.to, "screen transition");
        transition
    }

    fn ignore(&self, intent: &'static str) -> Option<Transition> {
        tracing::warn!(intent, screen = ?self.screen, "intent ignored on this screen");
        None
    }
}

impl fmt::Debug for ScreenController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenController")
            .field("bank_len", &self.repo.len())
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("screen", &self.screen)
            .field("assessment", &self.assessment.as_ref().map(AssessmentEngine::position))
            .field("session", &self.session.as_ref().map(LearningSession::progress))
            .field("placement", &self.placement)
            .field("final_progress", &self.final_progress)
            .field("mistakes", &self.ledger.count())
            .finish_non_exhaustive()
    }
}
