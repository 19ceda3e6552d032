use crate::domain::ticket::Classification;

pub const SOLUTION_FALLBACK: &str = "AI could not generate a solution.";

/// Advisory AI output held by a view until replaced or dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AiInsight {
    Classification(Classification),
    Solution(String),
}

impl AiInsight {
    pub fn solution_fallback() -> Self {
        AiInsight::Solution(SOLUTION_FALLBACK.to_string())
    }
}
