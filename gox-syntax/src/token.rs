use std::fmt;

use crate::source::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,

    Ident,
    Int,
    Float,
    Imag,
    Char,
    String,

    Add,
    Sub,
    Mul,
    Quo,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    AndNot,
    AddAssign,
    SubAssign,
    MulAssign,
    QuoAssign,
    RemAssign,
    AndAssign,
    OrAssign,
    XorAssign,
    ShlAssign,
    ShrAssign,
    AndNotAssign,
    LAnd,
    LOr,
    Arrow,
    Inc,
    Dec,
    Eql,
    Lss,
    Gtr,
    Assign,
    Not,
    Neq,
    Leq,
    Geq,
    Define,
    Ellipsis,
    LParen,
    LBrack,
    LBrace,
    Comma,
    Period,
    RParen,
    RBrack,
    RBrace,
    Semicolon,
    Colon,

    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,

    /// `<` starting an open tag.
    TagOpen,
    /// `>` ending an open tag.
    TagOpenEnd,
    /// `/>`
    TagSelfClose,
    /// `</name>`; the token text is `name`.
    TagClose,
    /// A literal run of tag body text.
    BareText,
}

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("break", TokenKind::Break),
    ("case", TokenKind::Case),
    ("chan", TokenKind::Chan),
    ("const", TokenKind::Const),
    ("continue", TokenKind::Continue),
    ("default", TokenKind::Default),
    ("defer", TokenKind::Defer),
    ("else", TokenKind::Else),
    ("fallthrough", TokenKind::Fallthrough),
    ("for", TokenKind::For),
    ("func", TokenKind::Func),
    ("go", TokenKind::Go),
    ("goto", TokenKind::Goto),
    ("if", TokenKind::If),
    ("import", TokenKind::Import),
    ("interface", TokenKind::Interface),
    ("map", TokenKind::Map),
    ("package", TokenKind::Package),
    ("range", TokenKind::Range),
    ("return", TokenKind::Return),
    ("select", TokenKind::Select),
    ("struct", TokenKind::Struct),
    ("switch", TokenKind::Switch),
    ("type", TokenKind::Type),
    ("var", TokenKind::Var),
];

impl TokenKind {
    /// Maps an identifier to its keyword kind, or `Ident`.
    pub fn lookup(word: &str) -> TokenKind {
        KEYWORDS
            .iter()
            .find(|(kw, _)| *kw == word)
            .map_or(TokenKind::Ident, |(_, kind)| *kind)
    }

    pub fn is_keyword(self) -> bool {
        KEYWORDS.iter().any(|(_, kind)| *kind == self)
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Float | TokenKind::Imag | TokenKind::Char | TokenKind::String
        )
    }

    pub fn is_assign_op(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Assign
                | Define
                | AddAssign
                | SubAssign
                | MulAssign
                | QuoAssign
                | RemAssign
                | AndAssign
                | OrAssign
                | XorAssign
                | ShlAssign
                | ShrAssign
                | AndNotAssign
        )
    }

    /// Binary operator precedence; 0 for anything that is not a binary operator.
    pub fn precedence(self) -> u8 {
        use TokenKind::*;
        match self {
            LOr => 1,
            LAnd => 2,
            Eql | Neq | Lss | Leq | Gtr | Geq => 3,
            Add | Sub | Or | Xor => 4,
            Mul | Quo | Rem | Shl | Shr | And | AndNot => 5,
            _ => 0,
        }
    }

    /// Whether an expression may start right after this token, which is what
    /// lets a following `<` open a tag instead of comparing.
    pub fn permits_tag(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Assign | Eql | Neq | Define | LParen | LBrace | Comma | Colon | Return | If | Switch | Case
        )
    }

    pub fn as_str(self) -> &'static str {
        use TokenKind::*;
        match self {
            Illegal => "ILLEGAL",
            Eof => "EOF",
            Ident => "IDENT",
            Int => "INT",
            Float => "FLOAT",
            Imag => "IMAG",
            Char => "CHAR",
            String => "STRING",
            Add => "+",
            Sub => "-",
            Mul => "*",
            Quo => "/",
            Rem => "%",
            And => "&",
            Or => "|",
            Xor => "^",
            Shl => "<<",
            Shr => ">>",
            AndNot => "&^",
            AddAssign => "+=",
            SubAssign => "-=",
            MulAssign => "*=",
            QuoAssign => "/=",
            RemAssign => "%=",
            AndAssign => "&=",
            OrAssign => "|=",
            XorAssign => "^=",
            ShlAssign => "<<=",
            ShrAssign => ">>=",
            AndNotAssign => "&^=",
            LAnd => "&&",
            LOr => "||",
            Arrow => "<-",
            Inc => "++",
            Dec => "--",
            Eql => "==",
            Lss => "<",
            Gtr => ">",
            Assign => "=",
            Not => "!",
            Neq => "!=",
            Leq => "<=",
            Geq => ">=",
            Define => ":=",
            Ellipsis => "...",
            LParen => "(",
            LBrack => "[",
            LBrace => "{",
            Comma => ",",
            Period => ".",
            RParen => ")",
            RBrack => "]",
            RBrace => "}",
            Semicolon => ";",
            Colon => ":",
            Break => "break",
            Case => "case",
            Chan => "chan",
            Const => "const",
            Continue => "continue",
            Default => "default",
            Defer => "defer",
            Else => "else",
            Fallthrough => "fallthrough",
            For => "for",
            Func => "func",
            Go => "go",
            Goto => "goto",
            If => "if",
            Import => "import",
            Interface => "interface",
            Map => "map",
            Package => "package",
            Range => "range",
            Return => "return",
            Select => "select",
            Struct => "struct",
            Switch => "switch",
            Type => "type",
            Var => "var",
            TagOpen => "TAG_OPEN",
            TagOpenEnd => "TAG_OPEN_END",
            TagSelfClose => "TAG_SELF_CLOSE",
            TagClose => "TAG_CLOSE",
            BareText => "BARE_TEXT",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal text. For `TagClose` this is the tag name between `</` and `>`,
    /// for an inserted semicolon it is `"\n"`.
    pub text: String,
    /// Byte offset where the token starts.
    pub start: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, start: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
        }
    }

    pub fn span(&self) -> Span {
        let len = match self.kind {
            // `</` and `>` around the name
            TokenKind::TagClose => self.text.len() + 3,
            _ => self.text.len(),
        };
        Span::new(self.start, self.start + len)
    }

    /// How the token reads in an error message.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Semicolon if self.text == "\n" => "newline".to_string(),
            TokenKind::Ident
            | TokenKind::Int
            | TokenKind::Float
            | TokenKind::Imag
            | TokenKind::Char
            | TokenKind::String => format!("{} {}", self.kind, self.text),
            TokenKind::BareText => "text".to_string(),
            TokenKind::TagOpen => "'<'".to_string(),
            TokenKind::TagOpenEnd => "'>'".to_string(),
            TokenKind::TagSelfClose => "'/>'".to_string(),
            TokenKind::TagClose => format!("</{}>", self.text),
            kind => format!("'{kind}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_looked_up() {
        assert_eq!(TokenKind::lookup("return"), TokenKind::Return);
        assert_eq!(TokenKind::lookup("div"), TokenKind::Ident);
        assert!(TokenKind::Var.is_keyword());
        assert!(!TokenKind::Ident.is_keyword());
    }

    #[test]
    fn comparison_binds_tighter_than_logic() {
        assert!(TokenKind::Lss.precedence() > TokenKind::LAnd.precedence());
        assert_eq!(TokenKind::TagOpenEnd.precedence(), 0);
    }
}
