mod answer;
mod feedback;
mod ids;
mod question;

pub use answer::{AnswerSheet, toggle_letter};
pub use feedback::{FeedbackItem, GradeReport, ReviewItem};
pub use ids::QuestionId;
pub use question::{ChoiceOption, Question, QuestionError, QuestionKind};
