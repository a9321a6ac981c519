pub mod runner;
pub mod types;

pub use runner::{render_prompt, run_evaluation};
pub use types::{
    EvaluationJob, EvaluationResult, EvaluationStats, EvaluationSummary, ExpectedScore, TestVector,
    Trend,
};
