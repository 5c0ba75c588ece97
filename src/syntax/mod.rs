pub mod alias;
pub mod datatype;
pub mod entry;
pub mod expression;
pub mod lexer;
pub mod name;
pub mod parser;
pub mod precedence;
pub mod schema;
pub mod source;
pub mod span_builder;
pub mod token;
pub mod token_type;
pub mod visit;

pub use entry::{ParseOutput, parse_source, parse_sources, parse_str};

// Re-exports: diagnostics and position live at crate::diagnostics
pub use crate::diagnostics;
pub use crate::diagnostics::position;
