pub mod api;
pub mod session;

pub use api::{ApiError, CreateTrigger, LettersApi, DEFAULT_TITLE};
pub use session::{EditorSession, SaveOutcome, SessionState};
