mod error_code;
mod hint;
mod severity;

pub use error_code::{ErrorCode, ErrorType};
pub use hint::{Hint, HintKind};
pub use severity::Severity;
