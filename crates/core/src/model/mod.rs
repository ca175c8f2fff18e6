mod answer;
mod catalog;
mod history;
mod ids;
mod question;
mod session;
mod settings;

pub use ids::{ParseIdError, QuestionId};

pub use answer::SessionAnswer;
pub use catalog::{CatalogError, QuestionCatalog};
pub use history::SubjectHistory;
pub use question::{AnswerKey, Question, QuestionError, QuestionRecord};
pub use session::{Performance, QuizResult, QuizResultError, ScoreSummary};
pub use settings::{QuizSettings, QuizSettingsError};
