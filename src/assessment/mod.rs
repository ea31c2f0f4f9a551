//! Assessment intake, validation, scoring, and submission pipeline.

pub mod domain;
pub mod importer;
pub mod report;
pub mod scoring;
pub mod service;
pub mod session;
pub mod sink;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    question_index, AnswerLabel, Category, ContactDetails, ResponseError, ResponseSet,
    SubmissionForm, MAX_TOTAL, QUESTIONNAIRE, QUESTION_COUNT,
};
pub use importer::{AnswerImporter, ImportError};
pub use scoring::{
    score, AssessmentResults, CategoryScore, CategoryScorer, ScoreSummary, SectionMap,
};
pub use service::{AssessmentService, AssessmentServiceError, SubmissionOutcome};
pub use session::{transition, AssessmentSession, SessionError, SessionEvent, SessionState};
pub use sink::{HttpSink, SinkAck, SubmissionError, SubmissionSink};
pub use validation::{
    is_organization_email, validate_submission, CheckKind, ValidationError, ValidationPolicy,
};
