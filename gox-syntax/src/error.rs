//! Diagnostics produced while lexing and parsing.

use std::fmt;

use thiserror::Error;

use crate::source::{Span, line_col};

/// Raised when the lexer tries to pop the bottom `HOST` frame of its mode stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot pop the bottom frame of the mode stack")]
pub struct ImbalancedStackError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("illegal character {0:?}")]
    IllegalCharacter(char),
    #[error("end of input inside tag")]
    EofInTag,
    #[error("unterminated tag body")]
    UnterminatedTagBody,
    #[error("close tag not terminated")]
    UnterminatedCloseTag,
    #[error("{0} literal not terminated")]
    UnterminatedLiteral(&'static str),
    #[error("comment not terminated")]
    UnterminatedComment,
    #[error("expected {expected}, found {found}")]
    Expected { expected: String, found: String },
    #[error("illegal attribute value {found} in tag")]
    IllegalAttrValue { found: String },
    #[error("unexpected {found} in tag body")]
    UnexpectedInTag { found: String },
    #[error("unexpected end of input inside tag")]
    EofInMarkup,
    #[error("tag <{open}> closed by </{close}>")]
    MismatchedCloseTag { open: String, close: String },
    #[error("unbalanced markup nesting: {depth} lexer modes still open at end of input")]
    UnbalancedNesting { depth: usize },
    #[error("mixed named and unnamed parameters")]
    MixedParameters,
    #[error("{0} is not supported")]
    Unsupported(&'static str),
    #[error("too many errors")]
    TooManyErrors,
    #[error("internal error: {0}")]
    Stack(#[from] ImbalancedStackError),
}

/// One positioned error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Span,
    pub kind: ErrorKind,
}

impl Diagnostic {
    pub fn new(span: Span, kind: ErrorKind) -> Self {
        Self { span, kind }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.kind, self.span.start)
    }
}

/// Every error reported for one compilation unit, ordered by position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct Diagnostics(pub Vec<Diagnostic>);

impl Diagnostics {
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Formats each diagnostic as `file:line:col: message`.
    pub fn render(&self, src: &str, file_name: &str) -> String {
        self.0
            .iter()
            .map(|d| {
                let (line, col) = line_col(src, d.span.start);
                format!("{file_name}:{line}:{col}: {}", d.kind)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_uses_line_and_column() {
        let src = "x := 1\ny := <div>\n";
        let diags = Diagnostics(vec![Diagnostic::new(
            Span::at(12),
            ErrorKind::UnterminatedTagBody,
        )]);
        assert_eq!(
            diags.render(src, "app.gox"),
            "app.gox:2:6: unterminated tag body"
        );
    }

    #[test]
    fn stack_error_converts_into_kind() {
        let kind: ErrorKind = ImbalancedStackError.into();
        assert_eq!(
            kind.to_string(),
            "internal error: cannot pop the bottom frame of the mode stack"
        );
    }
}
