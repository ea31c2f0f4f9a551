use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of questions in the assessment. Every complete response set holds
/// exactly this many answers.
pub const QUESTION_COUNT: usize = 12;

/// Maximum attainable raw score (12 questions at weight 5).
pub const MAX_TOTAL: u16 = 60;

/// The fixed questionnaire, in presentation order. Questions are identified
/// by their index in this sequence.
pub const QUESTIONNAIRE: [&str; QUESTION_COUNT] = [
    "My company's product or service has a strong and clear point of differentiation from my competitors.",
    "My client and I can summarize my brand in one word/statement.",
    "The value of my product or services is relevant to the current market environment.",
    "There is harmony/linkage between my company's vision, mission, values and strategy.",
    "My employees are brand ambassadors of the company and can articulate how the offering differs from competitors.",
    "I regularly survey my customers on my brand and use their feedback as an input for strategy.",
    "My marketing material clearly communicates the company's brand.",
    "Management reinforces the company's brand in all staff meetings and employee interactions.",
    "All departments follow the company's brand guidelines document and prescribed templates.",
    "Clients get the same positive brand experience no matter which department or employee they interact with.",
    "My company has a robust mechanism to deliver a brand experience at every stage of the customer journey (attract, engage, and retain).",
    "My clients do not switch between my competitors and me and regularly refer others to my company.",
];

/// Look up a question's index by its exact prompt text.
pub fn question_index(prompt: &str) -> Option<usize> {
    QUESTIONNAIRE.iter().position(|question| *question == prompt)
}

/// The five Likert agreement levels, ordered by weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerLabel {
    StronglyDisagree,
    Disagree,
    Maybe,
    Agree,
    StronglyAgree,
}

impl AnswerLabel {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::StronglyDisagree,
            Self::Disagree,
            Self::Maybe,
            Self::Agree,
            Self::StronglyAgree,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::StronglyDisagree => "Strongly Disagree",
            Self::Disagree => "Disagree",
            Self::Maybe => "Maybe",
            Self::Agree => "Agree",
            Self::StronglyAgree => "Strongly Agree",
        }
    }

    /// Integer weight contributed to the raw score.
    pub const fn weight(self) -> u8 {
        match self {
            Self::StronglyDisagree => 1,
            Self::Disagree => 2,
            Self::Maybe => 3,
            Self::Agree => 4,
            Self::StronglyAgree => 5,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|candidate| candidate.label().eq_ignore_ascii_case(label.trim()))
    }

    pub const fn from_weight(weight: u8) -> Option<Self> {
        match weight {
            1 => Some(Self::StronglyDisagree),
            2 => Some(Self::Disagree),
            3 => Some(Self::Maybe),
            4 => Some(Self::Agree),
            5 => Some(Self::StronglyAgree),
            _ => None,
        }
    }
}

/// The four report sections, each covering three consecutive questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    BrandStrategy,
    BrandAlignment,
    BrandCommunication,
    BrandExecution,
}

impl Category {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::BrandStrategy,
            Self::BrandAlignment,
            Self::BrandCommunication,
            Self::BrandExecution,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BrandStrategy => "Brand Strategy",
            Self::BrandAlignment => "Brand Alignment",
            Self::BrandCommunication => "Brand Communication",
            Self::BrandExecution => "Brand Execution",
        }
    }
}

/// Error raised when an answer targets a question outside the questionnaire.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResponseError {
    #[error("question index {0} is outside the {QUESTION_COUNT}-question assessment")]
    InvalidQuestion(usize),
    #[error("unknown question prompt: {0:?}")]
    UnknownPrompt(String),
    #[error("answer weight {0} is outside the 1-5 Likert range")]
    InvalidWeight(u8),
}

/// Answers recorded so far, keyed by question index. Re-answering a question
/// overwrites the earlier answer; insertion order is irrelevant.
///
/// Serializes as the wire mapping from question text to numeric weight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSet {
    answers: BTreeMap<usize, AnswerLabel>,
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, index: usize, answer: AnswerLabel) -> Result<(), ResponseError> {
        if index >= QUESTION_COUNT {
            return Err(ResponseError::InvalidQuestion(index));
        }
        self.answers.insert(index, answer);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<AnswerLabel> {
        self.answers.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == QUESTION_COUNT
    }

    /// Recorded answer weights, in question order.
    pub fn weights(&self) -> impl Iterator<Item = u8> + '_ {
        self.answers.values().map(|answer| answer.weight())
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, AnswerLabel)> + '_ {
        self.answers.iter().map(|(index, answer)| (*index, *answer))
    }
}

impl Serialize for ResponseSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.answers.len()))?;
        for (index, answer) in &self.answers {
            map.serialize_entry(QUESTIONNAIRE[*index], &answer.weight())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ResponseSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ResponseSetVisitor;

        impl<'de> Visitor<'de> for ResponseSetVisitor {
            type Value = ResponseSet;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map from question text to answer weight")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut responses = ResponseSet::new();
                while let Some((prompt, weight)) = access.next_entry::<String, u8>()? {
                    let index = question_index(&prompt)
                        .ok_or_else(|| de::Error::custom(format!("unknown question: {prompt:?}")))?;
                    let answer = AnswerLabel::from_weight(weight).ok_or_else(|| {
                        de::Error::custom(format!("weight {weight} is outside the 1-5 range"))
                    })?;
                    responses
                        .record(index, answer)
                        .map_err(de::Error::custom)?;
                }
                Ok(responses)
            }
        }

        deserializer.deserialize_map(ResponseSetVisitor)
    }
}

/// Contact fields collected on the first step of the assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub contact: Option<String>,
}

/// The full submission payload handed to the sink. Mutated field-by-field
/// while the session runs; treated as immutable once it reaches the scorer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionForm {
    #[serde(flatten)]
    pub contact: ContactDetails,
    #[serde(default)]
    pub responses: ResponseSet,
}
