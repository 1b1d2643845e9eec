pub mod ast;
pub mod error;
pub mod lexer;
pub mod mode;
pub mod parser;
pub mod printer;
pub mod source;
pub mod token;

pub use error::{Diagnostic, Diagnostics, ErrorKind, ImbalancedStackError};
pub use lexer::Lexer;
pub use mode::{Mode, ModeStack};
pub use parser::{Parser, parse_expr, parse_file};
pub use printer::{print_expr, print_file, string_lit};
pub use source::{Span, line_col};
pub use token::{Token, TokenKind};
