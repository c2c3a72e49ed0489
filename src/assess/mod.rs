pub mod compare;
pub mod tremor;

pub use compare::{accuracy_score, accuracy_score_with, average_error, landmark_errors, ErrorGrade};
pub use compare::{GOOD_ERROR, MAX_ERROR, POOR_ERROR};
pub use tremor::{TremorAnalyzer, WINDOW_SECS};
