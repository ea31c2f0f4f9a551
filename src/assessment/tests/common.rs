use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Notify;

use crate::assessment::domain::{
    AnswerLabel, ContactDetails, ResponseSet, SubmissionForm, QUESTION_COUNT,
};
use crate::assessment::session::AssessmentSession;
use crate::assessment::sink::{SinkAck, SubmissionError, SubmissionSink};

/// Recording sink for exercising the orchestrator without a network. Fails
/// the first `fail_times` calls with a transport-class error, then succeeds.
#[derive(Debug, Default)]
pub struct RecordingSink {
    calls: AtomicUsize,
    fail_times: AtomicUsize,
    rejection: Option<String>,
}

impl RecordingSink {
    pub fn failing(times: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_times: AtomicUsize::new(times),
            rejection: None,
        }
    }

    pub fn rejecting(message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_times: AtomicUsize::new(0),
            rejection: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SubmissionSink for RecordingSink {
    async fn submit(&self, _form: &SubmissionForm) -> Result<SinkAck, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let remaining = self.fail_times.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_times.store(remaining - 1, Ordering::SeqCst);
            return Err(SubmissionError::Status(503));
        }

        if let Some(message) = &self.rejection {
            return Err(SubmissionError::Rejected(message.clone()));
        }

        Ok(SinkAck {
            message: Some("Success".to_string()),
        })
    }
}

/// Sink whose calls park until released, so a submission can be held
/// in flight while the test pokes at the service from another task.
#[derive(Debug, Default)]
pub struct GatedSink {
    calls: AtomicUsize,
    gate: Notify,
}

impl GatedSink {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

impl SubmissionSink for GatedSink {
    async fn submit(&self, _form: &SubmissionForm) -> Result<SinkAck, SubmissionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(SinkAck {
            message: Some("Success".to_string()),
        })
    }
}

pub fn contact_details() -> ContactDetails {
    ContactDetails {
        name: "Dana Whitfield".to_string(),
        email: "dana@acme.io".to_string(),
        company: "Acme Consulting".to_string(),
        contact: Some("+1 555 0100".to_string()),
    }
}

/// Twelve answers alternating Strongly Agree and Maybe: total 48, 80%.
pub fn alternating_responses() -> ResponseSet {
    let mut responses = ResponseSet::new();
    for index in 0..QUESTION_COUNT {
        let answer = if index % 2 == 0 {
            AnswerLabel::StronglyAgree
        } else {
            AnswerLabel::Maybe
        };
        responses.record(index, answer).expect("index in range");
    }
    responses
}

pub fn uniform_responses(answer: AnswerLabel) -> ResponseSet {
    let mut responses = ResponseSet::new();
    for index in 0..QUESTION_COUNT {
        responses.record(index, answer).expect("index in range");
    }
    responses
}

pub fn complete_form() -> SubmissionForm {
    SubmissionForm {
        contact: contact_details(),
        responses: alternating_responses(),
    }
}

/// A session advanced to the questions step with the given form.
pub fn session_on_questions(form: SubmissionForm) -> AssessmentSession {
    let mut session = AssessmentSession::from_form(form);
    session.confirm_contact().expect("organization email passes");
    session
}
