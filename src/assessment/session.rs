use serde::{Deserialize, Serialize};

use super::domain::{AnswerLabel, ResponseError, SubmissionForm};
use super::scoring::ScoreSummary;
use super::validation::{is_organization_email, ValidationError};

/// The three wizard steps. `Done` is terminal and carries the computed score;
/// there is no path back out of it. A fresh session is the only restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "step")]
pub enum SessionState {
    Contact,
    Questions,
    Done { score: ScoreSummary },
}

impl SessionState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Questions => "questions",
            Self::Done { .. } => "done",
        }
    }
}

/// Events that move a session between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    ContactConfirmed,
    SubmissionAccepted(ScoreSummary),
}

impl SessionEvent {
    const fn label(self) -> &'static str {
        match self {
            Self::ContactConfirmed => "contact_confirmed",
            Self::SubmissionAccepted(_) => "submission_accepted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session already submitted; start a new session to reassess")]
    SessionClosed,
    #[error("event {event} is not valid on the {state} step")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },
    #[error("answers can only be recorded on the questions step")]
    NotAcceptingAnswers,
    #[error("confirm the contact step before submitting")]
    ContactStepIncomplete,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Response(#[from] ResponseError),
}

/// Pure step-transition function. Guards that depend on form content (email
/// check, full validation) run in the session controller and the service
/// before the event is emitted.
pub fn transition(state: SessionState, event: SessionEvent) -> Result<SessionState, SessionError> {
    match (state, event) {
        (SessionState::Contact, SessionEvent::ContactConfirmed) => Ok(SessionState::Questions),
        (SessionState::Questions, SessionEvent::SubmissionAccepted(score)) => {
            Ok(SessionState::Done { score })
        }
        (SessionState::Done { .. }, _) => Err(SessionError::SessionClosed),
        (state, event) => Err(SessionError::InvalidTransition {
            state: state.label(),
            event: event.label(),
        }),
    }
}

/// Controller owning the in-progress form and the current step. All mutation
/// goes through it; there is no ambient session state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssessmentSession {
    form: SubmissionForm,
    state: SessionState,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Contact
    }
}

impl AssessmentSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session from an already-populated form, e.g. one read from a
    /// file. The session starts on the contact step regardless of how much
    /// of the form is filled in.
    pub fn from_form(form: SubmissionForm) -> Self {
        Self {
            form,
            state: SessionState::Contact,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn form(&self) -> &SubmissionForm {
        &self.form
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), SessionError> {
        self.editable()?;
        self.form.contact.name = name.into();
        Ok(())
    }

    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), SessionError> {
        self.editable()?;
        self.form.contact.email = email.into();
        Ok(())
    }

    pub fn set_company(&mut self, company: impl Into<String>) -> Result<(), SessionError> {
        self.editable()?;
        self.form.contact.company = company.into();
        Ok(())
    }

    pub fn set_contact_number(&mut self, contact: impl Into<String>) -> Result<(), SessionError> {
        self.editable()?;
        self.form.contact.contact = Some(contact.into());
        Ok(())
    }

    /// Advance from the contact step to the questions step. Only the email
    /// domain is checked here; the remaining fields are validated at
    /// submission time.
    pub fn confirm_contact(&mut self) -> Result<(), SessionError> {
        if !is_organization_email(&self.form.contact.email) {
            return Err(ValidationError::InvalidEmailDomain.into());
        }
        self.state = transition(self.state, SessionEvent::ContactConfirmed)?;
        Ok(())
    }

    /// Record an answer. Re-answering a question overwrites the earlier
    /// choice.
    pub fn answer(&mut self, index: usize, answer: AnswerLabel) -> Result<(), SessionError> {
        match self.state {
            SessionState::Questions => {
                self.form.responses.record(index, answer)?;
                Ok(())
            }
            SessionState::Done { .. } => Err(SessionError::SessionClosed),
            SessionState::Contact => Err(SessionError::NotAcceptingAnswers),
        }
    }

    /// Close the session after a successful sink call.
    pub(crate) fn accept_submission(&mut self, score: ScoreSummary) -> Result<(), SessionError> {
        self.state = transition(self.state, SessionEvent::SubmissionAccepted(score))?;
        Ok(())
    }

    fn editable(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Done { .. } => Err(SessionError::SessionClosed),
            _ => Ok(()),
        }
    }
}
