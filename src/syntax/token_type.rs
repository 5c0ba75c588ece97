use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenType {
    // Special
    Error,
    Eof,

    // Hidden channel
    Whitespace,
    LineComment,
    DocComment,

    // Words
    UcWord,
    LcWord,
    Variable,

    // Literals
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    RegexLiteral,

    // Keywords
    Schema,
    Import,
    As,
    Type,
    Datatype,
    Required,
    Primary,
    Extends,
    Includes,
    Abstract,
    Part,
    One,
    Many,
    In,
    True,
    False,
    Nil,

    // Built-in type keywords
    IntegerType,
    FloatType,
    BooleanType,
    StringType,
    EnumType,
    PatternType,
    TimestampType,
    VectorType,
    DateType,
    UuidType,
    ListType,

    // Relations
    Association, // -->
    Composition, // *->
    Arrow,       // ->

    // Arithmetic operators
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,

    // Comparison operators
    Lt,
    Lte,
    Gt,
    Gte,
    Eq,
    NotEq,
    Match,
    NotMatch,

    // Logical operators
    Bang,
    And,
    Or,
    Caret,

    // Delimiters
    Assign,
    Question,
    Pipe,
    Dot,
    Comma,
    Colon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Underscore,
}

impl TokenType {
    pub const COUNT: usize = TokenType::Underscore as usize + 1;

    #[inline]
    pub fn as_usize(self) -> usize {
        self as usize
    }

    pub fn is_keyword(self) -> bool {
        KEYWORDS.iter().any(|(_, kind)| *kind == self)
    }

    pub fn is_builtin_type(self) -> bool {
        matches!(
            self,
            TokenType::IntegerType
                | TokenType::FloatType
                | TokenType::BooleanType
                | TokenType::StringType
                | TokenType::EnumType
                | TokenType::PatternType
                | TokenType::TimestampType
                | TokenType::VectorType
                | TokenType::DateType
                | TokenType::UuidType
                | TokenType::ListType
        )
    }

    pub fn is_word(self) -> bool {
        matches!(self, TokenType::UcWord | TokenType::LcWord)
    }

    /// Tokens that never reach the parser's default channel.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenType::Whitespace | TokenType::LineComment | TokenType::DocComment
        )
    }

    /// Whether a token of this type can end an operand. A `/` following such
    /// a token is division (or the reverse-edge separator), never a regex.
    pub fn ends_operand(self) -> bool {
        matches!(
            self,
            TokenType::UcWord
                | TokenType::LcWord
                | TokenType::Variable
                | TokenType::IntegerLiteral
                | TokenType::FloatLiteral
                | TokenType::StringLiteral
                | TokenType::RegexLiteral
                | TokenType::True
                | TokenType::False
                | TokenType::Nil
                | TokenType::Underscore
                | TokenType::RParen
                | TokenType::RBracket
                | TokenType::RBrace
        ) || self.is_builtin_type()
    }
}

/// Every literal keyword the lexer can emit, in one table. The alias
/// validator's reserved-word check reads the same table.
pub const KEYWORDS: &[(&str, TokenType)] = &[
    ("schema", TokenType::Schema),
    ("import", TokenType::Import),
    ("as", TokenType::As),
    ("type", TokenType::Type),
    ("datatype", TokenType::Datatype),
    ("required", TokenType::Required),
    ("primary", TokenType::Primary),
    ("extends", TokenType::Extends),
    ("includes", TokenType::Includes),
    ("abstract", TokenType::Abstract),
    ("part", TokenType::Part),
    ("one", TokenType::One),
    ("many", TokenType::Many),
    ("in", TokenType::In),
    ("true", TokenType::True),
    ("false", TokenType::False),
    ("nil", TokenType::Nil),
    ("Integer", TokenType::IntegerType),
    ("Float", TokenType::FloatType),
    ("Boolean", TokenType::BooleanType),
    ("String", TokenType::StringType),
    ("Enum", TokenType::EnumType),
    ("Pattern", TokenType::PatternType),
    ("Timestamp", TokenType::TimestampType),
    ("Vector", TokenType::VectorType),
    ("Date", TokenType::DateType),
    ("UUID", TokenType::UuidType),
    ("List", TokenType::ListType),
];

/// Lowercase keywords accepted as literal property names.
pub const PROPERTY_NAME_KEYWORDS: &[TokenType] = &[
    TokenType::Schema,
    TokenType::Import,
    TokenType::Type,
    TokenType::Datatype,
    TokenType::Required,
    TokenType::Primary,
    TokenType::Extends,
    TokenType::Includes,
    TokenType::Abstract,
    TokenType::One,
    TokenType::Many,
];

static KEYWORD_MAP: LazyLock<HashMap<&'static str, TokenType>> =
    LazyLock::new(|| KEYWORDS.iter().copied().collect());

pub fn lookup_keyword(word: &str) -> Option<TokenType> {
    KEYWORD_MAP.get(word).copied()
}

/// Classify a scanned word: keywords win, otherwise the first letter's case
/// picks `UcWord` or `LcWord`.
pub fn lookup_ident(word: &str) -> TokenType {
    if let Some(keyword) = lookup_keyword(word) {
        return keyword;
    }
    if word.starts_with(|ch: char| ch.is_ascii_uppercase()) {
        TokenType::UcWord
    } else {
        TokenType::LcWord
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((text, _)) = KEYWORDS.iter().find(|(_, kind)| kind == self) {
            return write!(f, "`{}`", text);
        }
        let s = match self {
            // Special
            TokenType::Error => "invalid token",
            TokenType::Eof => "end of file",

            // Hidden channel
            TokenType::Whitespace => "whitespace",
            TokenType::LineComment => "comment",
            TokenType::DocComment => "doc comment",

            // Words
            TokenType::UcWord => "uppercase name",
            TokenType::LcWord => "lowercase name",
            TokenType::Variable => "variable",

            // Literals
            TokenType::IntegerLiteral => "integer",
            TokenType::FloatLiteral => "float",
            TokenType::StringLiteral => "string",
            TokenType::RegexLiteral => "regex",

            // Operators and delimiters
            TokenType::Association => "`-->`",
            TokenType::Composition => "`*->`",
            TokenType::Arrow => "`->`",
            TokenType::Plus => "`+`",
            TokenType::Minus => "`-`",
            TokenType::Asterisk => "`*`",
            TokenType::Slash => "`/`",
            TokenType::Percent => "`%`",
            TokenType::Lt => "`<`",
            TokenType::Lte => "`<=`",
            TokenType::Gt => "`>`",
            TokenType::Gte => "`>=`",
            TokenType::Eq => "`==`",
            TokenType::NotEq => "`!=`",
            TokenType::Match => "`=~`",
            TokenType::NotMatch => "`!~`",
            TokenType::Bang => "`!`",
            TokenType::And => "`&&`",
            TokenType::Or => "`||`",
            TokenType::Caret => "`^`",
            TokenType::Assign => "`=`",
            TokenType::Question => "`?`",
            TokenType::Pipe => "`|`",
            TokenType::Dot => "`.`",
            TokenType::Comma => "`,`",
            TokenType::Colon => "`:`",
            TokenType::LParen => "`(`",
            TokenType::RParen => "`)`",
            TokenType::LBracket => "`[`",
            TokenType::RBracket => "`]`",
            TokenType::LBrace => "`{`",
            TokenType::RBrace => "`}`",
            TokenType::Underscore => "`_`",

            // Keywords are handled by the table lookup above.
            _ => "keyword",
        };
        write!(f, "{}", s)
    }
}
