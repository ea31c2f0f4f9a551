use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::domain::{question_index, AnswerLabel, ResponseError, ResponseSet, QUESTION_COUNT};

/// Error raised while importing answers from a CSV export.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read answers file")]
    Io(#[from] std::io::Error),
    #[error("invalid answers CSV data")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Response(#[from] ResponseError),
    #[error("unrecognized answer {answer:?} for question {question:?}")]
    UnknownAnswer { question: String, answer: String },
}

#[derive(Debug, Deserialize)]
struct AnswerRecord {
    question: String,
    answer: String,
}

/// Reads `question,answer` rows into a response set. The question column is
/// either the exact prompt text or a 1-based question number; the answer
/// column is either the Likert label or its weight 1-5. Later rows for the
/// same question overwrite earlier ones.
pub struct AnswerImporter;

impl AnswerImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ResponseSet, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ResponseSet, ImportError> {
        let mut responses = ResponseSet::new();
        let mut csv_reader = csv::Reader::from_reader(reader);

        for record in csv_reader.deserialize::<AnswerRecord>() {
            let record = record?;
            let index = resolve_question(&record.question)
                .ok_or_else(|| ResponseError::UnknownPrompt(record.question.clone()))?;
            let answer = resolve_answer(&record.answer).ok_or_else(|| ImportError::UnknownAnswer {
                question: record.question.clone(),
                answer: record.answer.clone(),
            })?;
            responses.record(index, answer)?;
        }

        Ok(responses)
    }
}

fn resolve_question(raw: &str) -> Option<usize> {
    let trimmed = raw.trim();
    if let Ok(number) = trimmed.parse::<usize>() {
        return (1..=QUESTION_COUNT).contains(&number).then(|| number - 1);
    }
    question_index(trimmed)
}

fn resolve_answer(raw: &str) -> Option<AnswerLabel> {
    let trimmed = raw.trim();
    if let Ok(weight) = trimmed.parse::<u8>() {
        return AnswerLabel::from_weight(weight);
    }
    AnswerLabel::from_label(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn imports_labels_numbers_and_weights() {
        let csv = format!(
            "question,answer\n{},Strongly Agree\n2,3\n12,Disagree\n",
            crate::assessment::domain::QUESTIONNAIRE[0]
        );
        let responses = AnswerImporter::from_reader(Cursor::new(csv)).expect("imports");
        assert_eq!(responses.len(), 3);
        assert_eq!(responses.get(0), Some(AnswerLabel::StronglyAgree));
        assert_eq!(responses.get(1), Some(AnswerLabel::Maybe));
        assert_eq!(responses.get(11), Some(AnswerLabel::Disagree));
    }

    #[test]
    fn later_rows_overwrite_earlier_answers() {
        let csv = "question,answer\n5,Agree\n5,1\n";
        let responses = AnswerImporter::from_reader(Cursor::new(csv)).expect("imports");
        assert_eq!(responses.get(4), Some(AnswerLabel::StronglyDisagree));
    }

    #[test]
    fn unknown_prompts_are_rejected() {
        let csv = "question,answer\nNot a real question,Agree\n";
        let err = AnswerImporter::from_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(
            err,
            ImportError::Response(ResponseError::UnknownPrompt(_))
        ));
    }

    #[test]
    fn question_numbers_outside_the_assessment_are_rejected() {
        let csv = "question,answer\n13,Agree\n";
        assert!(AnswerImporter::from_reader(Cursor::new(csv)).is_err());
    }

    #[test]
    fn out_of_range_weights_are_rejected() {
        let csv = "question,answer\n1,6\n";
        let err = AnswerImporter::from_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, ImportError::UnknownAnswer { .. }));
    }
}
