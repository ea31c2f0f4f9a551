use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::scoring::{score, ScoreSummary};
use super::session::{AssessmentSession, SessionError, SessionState};
use super::sink::{SinkAck, SubmissionError, SubmissionSink};
use super::validation::{validate_submission, ValidationError, ValidationPolicy};

/// Result of a completed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub score: ScoreSummary,
    pub ack: SinkAck,
}

/// Error raised by the submission orchestrator.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
}

/// Orchestrator composing the validation policy, the scorer, and the sink.
///
/// Exactly one submission may be in flight at a time; a second call while
/// one is pending is rejected rather than queued.
pub struct AssessmentService<S> {
    sink: Arc<S>,
    policy: ValidationPolicy,
    in_flight: AtomicBool,
}

impl<S> AssessmentService<S>
where
    S: SubmissionSink,
{
    pub fn new(sink: Arc<S>, policy: ValidationPolicy) -> Self {
        Self {
            sink,
            policy,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validate, score, and submit the session's form. The sink is only
    /// invoked once every check passes; a failed sink call leaves the
    /// session on the questions step so the caller can resubmit, which
    /// re-runs validation from scratch.
    pub async fn submit(
        &self,
        session: &mut AssessmentSession,
    ) -> Result<SubmissionOutcome, AssessmentServiceError> {
        match session.state() {
            SessionState::Questions => {}
            SessionState::Done { .. } => return Err(SessionError::SessionClosed.into()),
            SessionState::Contact => return Err(SessionError::ContactStepIncomplete.into()),
        }

        validate_submission(session.form(), &self.policy)?;
        let summary = score(&session.form().responses);

        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AssessmentServiceError::SubmissionInFlight)?;

        info!(
            total = summary.total,
            percentage = summary.percentage,
            "submitting assessment"
        );
        let result = self.sink.submit(session.form()).await;
        self.in_flight.store(false, Ordering::Release);

        let ack = match result {
            Ok(ack) => ack,
            Err(err) => {
                warn!(error = %err, "submission failed");
                return Err(err.into());
            }
        };

        session.accept_submission(summary)?;
        Ok(SubmissionOutcome {
            score: summary,
            ack,
        })
    }
}
