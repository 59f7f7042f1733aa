//! Engine handle
//!
//! Owns one entry session and maps every key event onto it. Each call to
//! [`Engine::submit`] returns what happened together with the view to render.

use super::action::{EngineAction, Outcome, Rejection, View};
use super::session::{EntrySession, EntryState};
use crate::config::EngineConfig;
use crate::input::KeyEvent;

/// Calculator engine
#[derive(Debug, Clone, Default)]
pub struct Engine {
    session: EntrySession,
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with a fresh session
    pub const fn new(config: EngineConfig) -> Self {
        Self {
            session: EntrySession::new(),
            config,
        }
    }

    /// Apply one key event
    pub fn submit(&mut self, event: KeyEvent) -> EngineAction {
        let outcome = match event {
            KeyEvent::None | KeyEvent::Chord(_) => Outcome::Ignored,
            KeyEvent::Digit(digit) => Self::settle(self.session.insert_digit(digit)),
            KeyEvent::Operator(op) => Self::settle(self.session.insert_operator(op)),
            KeyEvent::Delete => {
                self.session.delete();
                Outcome::Accepted
            }
            KeyEvent::Enter => match self.session.compute(self.config.overflow) {
                None => Outcome::Ignored,
                Some(Ok(eval)) => Outcome::Computed {
                    value: eval.value,
                    overflow: eval.overflow,
                },
                Some(Err(e)) => Outcome::Failed(e),
            },
            KeyEvent::Terminate(kind) => Outcome::Terminated(kind),
        };

        EngineAction {
            outcome,
            view: self.session.view(),
        }
    }

    fn settle(result: Result<(), Rejection>) -> Outcome {
        match result {
            Ok(()) => Outcome::Accepted,
            Err(rejection) => Outcome::Rejected(rejection),
        }
    }

    /// Start a fresh session
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// What to render right now
    pub fn view(&self) -> View {
        self.session.view()
    }

    /// Current session
    pub fn session(&self) -> &EntrySession {
        &self.session
    }

    /// Current entry state
    pub fn state(&self) -> EntryState {
        self.session.state()
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
