use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Horizon literal that unlocks the growth-oriented profiles.
pub const LONG_HORIZON: &str = "7+ Years";

/// Ordered from highest to lowest risk tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskProfile {
    Aggressive,
    Moderate,
    Conservative,
    #[serde(rename = "Very Conservative")]
    VeryConservative,
}

impl RiskProfile {
    pub const ALL: [RiskProfile; 4] = [
        RiskProfile::Aggressive,
        RiskProfile::Moderate,
        RiskProfile::Conservative,
        RiskProfile::VeryConservative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskProfile::Aggressive => "Aggressive",
            RiskProfile::Moderate => "Moderate",
            RiskProfile::Conservative => "Conservative",
            RiskProfile::VeryConservative => "Very Conservative",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single multiple-choice quiz answer. Anything other than the exact letters is kept as
/// `Unrecognized` rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    A,
    B,
    C,
    Unrecognized,
}

impl Answer {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("A") => Answer::A,
            Some("B") => Answer::B,
            Some("C") => Answer::C,
            _ => Answer::Unrecognized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    SevenPlusYears,
    Shorter,
}

impl Horizon {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(LONG_HORIZON) => Horizon::SevenPlusYears,
            _ => Horizon::Shorter,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizInput {
    /// Reaction to a sharp market drop.
    pub reaction: Answer,
    /// Primary investment goal.
    pub goal: Answer,
    pub horizon: Horizon,
}

impl QuizInput {
    pub fn new(reaction: Answer, goal: Answer, horizon: Horizon) -> Self {
        Self {
            reaction,
            goal,
            horizon,
        }
    }
}

/// Quiz answers as they arrive from the request handler.
///
/// Every field is optional and non-string values are treated as missing, so malformed input
/// never fails deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRequest {
    #[serde(rename = "Quiz_Answer_1", default, deserialize_with = "lenient_string")]
    pub quiz_answer_1: Option<String>,
    #[serde(rename = "Quiz_Answer_2", default, deserialize_with = "lenient_string")]
    pub quiz_answer_2: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub horizon: Option<String>,
}

impl From<&QuizRequest> for QuizInput {
    fn from(req: &QuizRequest) -> Self {
        QuizInput {
            reaction: Answer::parse(req.quiz_answer_1.as_deref()),
            goal: Answer::parse(req.quiz_answer_2.as_deref()),
            horizon: Horizon::parse(req.horizon.as_deref()),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    Ok(match v {
        serde_json::Value::String(s) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quiz_request_reads_wire_field_names() {
        let req: QuizRequest = serde_json::from_value(json!({
            "Quiz_Answer_1": "C",
            "Quiz_Answer_2": "B",
            "horizon": "7+ Years",
        }))
        .unwrap();
        let quiz = QuizInput::from(&req);
        assert_eq!(quiz.reaction, Answer::C);
        assert_eq!(quiz.goal, Answer::B);
        assert_eq!(quiz.horizon, Horizon::SevenPlusYears);
    }

    #[test]
    fn malformed_answers_are_unrecognized_not_errors() {
        let req: QuizRequest = serde_json::from_value(json!({
            "Quiz_Answer_1": 3,
            "Quiz_Answer_2": "c",
            "horizon": null,
        }))
        .unwrap();
        let quiz = QuizInput::from(&req);
        assert_eq!(quiz.reaction, Answer::Unrecognized);
        assert_eq!(quiz.goal, Answer::Unrecognized);
        assert_eq!(quiz.horizon, Horizon::Shorter);

        let empty: QuizRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, QuizRequest::default());
    }

    #[test]
    fn horizon_requires_exact_literal() {
        assert_eq!(Horizon::parse(Some("7+ Years")), Horizon::SevenPlusYears);
        assert_eq!(Horizon::parse(Some("7+ years")), Horizon::Shorter);
        assert_eq!(Horizon::parse(Some("3-5 Years")), Horizon::Shorter);
    }

    #[test]
    fn profile_parse_accepts_display_names() {
        assert_eq!(
            RiskProfile::parse("very conservative"),
            Some(RiskProfile::VeryConservative)
        );
        assert_eq!(RiskProfile::parse("Aggressive"), Some(RiskProfile::Aggressive));
        assert_eq!(RiskProfile::parse("reckless"), None);
        assert_eq!(
            serde_json::to_string(&RiskProfile::VeryConservative).unwrap(),
            "\"Very Conservative\""
        );
    }
}
