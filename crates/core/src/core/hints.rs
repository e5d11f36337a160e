//! Graded scaffolding hints shown beside a scenario.
//!
//! Each question carries ordered logic steps; each step has three hint levels,
//! from a nudge (level 1) to a worked answer (level 3).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Scaffolding {
    pub level_1: String,
    pub level_2: String,
    pub level_3: String,
}

impl Scaffolding {
    pub fn level(&self, level: u8) -> Option<&str> {
        match level {
            1 => Some(self.level_1.as_str()),
            2 => Some(self.level_2.as_str()),
            3 => Some(self.level_3.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogicStep {
    pub step_id: u32,
    pub scaffolding: Scaffolding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Question {
    pub question_index: u32,
    pub question_text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub logic_steps: Vec<LogicStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProblemSet {
    #[cfg_attr(feature = "serde", serde(default))]
    pub questions: Vec<Question>,
}

impl ProblemSet {
    pub fn question(&self, index: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.question_index == index)
    }

    /// Hint text at `level` (1..=3). The level also picks the logic step
    /// (`level - 1`), so questions with a single step only answer level 1.
    pub fn hint(&self, question_index: u32, level: u8) -> Option<&str> {
        if !(1..=3).contains(&level) {
            return None;
        }
        let step = self
            .question(question_index)?
            .logic_steps
            .get(usize::from(level - 1))?;
        step.scaffolding.level(level)
    }

    /// Problems that go with the robot rendezvous scenario.
    pub fn robot_rendezvous() -> Self {
        fn step(step_id: u32, l1: &str, l2: &str, l3: &str) -> LogicStep {
            LogicStep {
                step_id,
                scaffolding: Scaffolding {
                    level_1: l1.to_string(),
                    level_2: l2.to_string(),
                    level_3: l3.to_string(),
                },
            }
        }

        Self {
            questions: vec![
                Question {
                    question_index: 1,
                    question_text: "Find the distance between A(-5) and B(8) on the number line."
                        .to_string(),
                    logic_steps: vec![
                        step(
                            1,
                            "Distance between two points is |x2 - x1|.",
                            "|8 - (-5)| = |13|.",
                            "A is at -5, B is at 8, so AB = 13.",
                        ),
                        step(
                            2,
                            "Count units from -5 up to 0, then from 0 up to 8.",
                            "5 units to reach 0, then 8 more units.",
                            "5 + 8 = 13 units.",
                        ),
                    ],
                },
                Question {
                    question_index: 2,
                    question_text: "M leaves A at 4 units/s. N waits 1 s at B, then moves left at \
                                    2 units/s. When and where do they meet?"
                        .to_string(),
                    logic_steps: vec![
                        step(
                            1,
                            "Let the meeting time be t seconds and write both positions.",
                            "M is at -5 + 4t, N is at 8 - 2(t - 1).",
                            "M(t) = -5 + 4t and N(t) = 10 - 2t for t >= 1.",
                        ),
                        step(
                            2,
                            "Set the two positions equal.",
                            "-5 + 4t = 10 - 2t, so 6t = 15.",
                            "t = 2.5 s, and they meet at P = -5 + 4 * 2.5 = 5.",
                        ),
                        step(
                            3,
                            "Check the answer with N's position.",
                            "N(2.5) = 8 - 2 * 1.5.",
                            "N(2.5) = 5, the same point P.",
                        ),
                    ],
                },
                Question {
                    question_index: 3,
                    question_text: "After meeting, both robots turn back at 2 units/s. Track the \
                                    sum of distances MA + NB."
                        .to_string(),
                    logic_steps: vec![step(
                        1,
                        "Write MA and NB as absolute values of position differences.",
                        "MA = |M(t) + 5|, NB = |N(t) - 8|.",
                        "At the meeting MA = 10 and NB = 3, so the sum is 13.",
                    )],
                },
            ],
        }
    }

    #[cfg(feature = "serde")]
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
