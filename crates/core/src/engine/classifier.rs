use crate::domain::profile::{Answer, Horizon, QuizInput, RiskProfile};

/// Maps quiz answers to a risk profile. Rules are checked in order and the first match wins;
/// unrecognised answers simply fail to match and fall through to the default.
pub fn classify(quiz: &QuizInput) -> RiskProfile {
    let long_horizon = quiz.horizon == Horizon::SevenPlusYears;

    if (quiz.reaction == Answer::C || quiz.goal == Answer::C) && long_horizon {
        return RiskProfile::Aggressive;
    }

    // Capital preservation goal.
    if quiz.goal == Answer::A {
        return RiskProfile::VeryConservative;
    }

    // Sells everything on a drop.
    if quiz.reaction == Answer::A {
        return RiskProfile::Conservative;
    }

    if quiz.reaction == Answer::B || quiz.goal == Answer::B {
        return if long_horizon {
            RiskProfile::Moderate
        } else {
            RiskProfile::Conservative
        };
    }

    RiskProfile::Moderate
}
