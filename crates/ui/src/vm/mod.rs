mod quiz_vm;

pub use quiz_vm::{
    OptionRowVm, QuestionRowVm, QuizIntent, QuizMode, QuizPhase, QuizVm, ReviewRowVm, load_quiz,
};
