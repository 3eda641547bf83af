pub mod api;
pub mod language;
pub mod problem;
pub mod submission;
pub mod test_case;

pub use language::Language;
pub use problem::{Difficulty, Problem, StarterCode};
pub use submission::{Submission, SubmissionStatus, TestResult};
pub use test_case::{TestCase, TestCaseKey, TestCases};
