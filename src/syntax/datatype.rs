//! Built-in datatypes and their parameters.

use std::fmt;

use serde::Serialize;

use crate::diagnostics::position::Span;
use crate::syntax::schema::DataTypeRef;
use crate::syntax::token_type::TokenType;

/// The built-in type keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuiltinKind {
    Integer,
    Float,
    Boolean,
    String,
    Enum,
    Pattern,
    Timestamp,
    Vector,
    Date,
    Uuid,
    List,
}

impl BuiltinKind {
    pub fn from_token(token_type: TokenType) -> Option<Self> {
        let kind = match token_type {
            TokenType::IntegerType => BuiltinKind::Integer,
            TokenType::FloatType => BuiltinKind::Float,
            TokenType::BooleanType => BuiltinKind::Boolean,
            TokenType::StringType => BuiltinKind::String,
            TokenType::EnumType => BuiltinKind::Enum,
            TokenType::PatternType => BuiltinKind::Pattern,
            TokenType::TimestampType => BuiltinKind::Timestamp,
            TokenType::VectorType => BuiltinKind::Vector,
            TokenType::DateType => BuiltinKind::Date,
            TokenType::UuidType => BuiltinKind::Uuid,
            TokenType::ListType => BuiltinKind::List,
            _ => return None,
        };
        Some(kind)
    }

    pub fn keyword(self) -> &'static str {
        match self {
            BuiltinKind::Integer => "Integer",
            BuiltinKind::Float => "Float",
            BuiltinKind::Boolean => "Boolean",
            BuiltinKind::String => "String",
            BuiltinKind::Enum => "Enum",
            BuiltinKind::Pattern => "Pattern",
            BuiltinKind::Timestamp => "Timestamp",
            BuiltinKind::Vector => "Vector",
            BuiltinKind::Date => "Date",
            BuiltinKind::Uuid => "UUID",
            BuiltinKind::List => "List",
        }
    }
}

/// One side of a `[min, max]` range; `_` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Bound<T> {
    Unbounded,
    Value(T),
}

impl<T> Bound<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Bound::Unbounded => None,
            Bound::Value(v) => Some(v),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Bound::Unbounded)
    }
}

impl<T: fmt::Display> fmt::Display for Bound<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Unbounded => write!(f, "_"),
            Bound::Value(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Builtin {
    Integer { min: Bound<i64>, max: Bound<i64> },
    Float { min: Bound<f64>, max: Bound<f64> },
    Boolean,
    String { min: Bound<u64>, max: Bound<u64> },
    Enum { values: Vec<String> },
    Pattern { regex: String, flags: Option<String> },
    Timestamp { format: Option<String> },
    Vector { dimensions: u64 },
    Date,
    Uuid,
    List {
        element: Box<DataTypeRef>,
        min: Bound<u64>,
        max: Bound<u64>,
    },
}

impl Builtin {
    pub fn kind(&self) -> BuiltinKind {
        match self {
            Builtin::Integer { .. } => BuiltinKind::Integer,
            Builtin::Float { .. } => BuiltinKind::Float,
            Builtin::Boolean => BuiltinKind::Boolean,
            Builtin::String { .. } => BuiltinKind::String,
            Builtin::Enum { .. } => BuiltinKind::Enum,
            Builtin::Pattern { .. } => BuiltinKind::Pattern,
            Builtin::Timestamp { .. } => BuiltinKind::Timestamp,
            Builtin::Vector { .. } => BuiltinKind::Vector,
            Builtin::Date => BuiltinKind::Date,
            Builtin::Uuid => BuiltinKind::Uuid,
            Builtin::List { .. } => BuiltinKind::List,
        }
    }
}

/// A built-in datatype with its parameters, as written at one use site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltinType {
    pub builtin: Builtin,
    pub span: Span,
}

impl BuiltinType {
    pub fn kind(&self) -> BuiltinKind {
        self.builtin.kind()
    }
}

fn write_range<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    min: &Bound<T>,
    max: &Bound<T>,
) -> fmt::Result {
    if min.is_unbounded() && max.is_unbounded() {
        return Ok(());
    }
    write!(f, "[{}, {}]", min, max)
}

impl fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind().keyword())?;
        match &self.builtin {
            Builtin::Integer { min, max } => write_range(f, min, max),
            Builtin::Float { min, max } => write_range(f, min, max),
            Builtin::String { min, max } => write_range(f, min, max),
            Builtin::Enum { values } => {
                let values: Vec<String> = values.iter().map(|v| format!("{:?}", v)).collect();
                write!(f, "[{}]", values.join(", "))
            }
            Builtin::Pattern { regex, flags } => match flags {
                Some(flags) => write!(f, "[{:?}, {:?}]", regex, flags),
                None => write!(f, "[{:?}]", regex),
            },
            Builtin::Timestamp { format } => match format {
                Some(format) => write!(f, "[{:?}]", format),
                None => Ok(()),
            },
            Builtin::Vector { dimensions } => write!(f, "[{}]", dimensions),
            Builtin::List { element, min, max } => {
                write!(f, "<{}>", element)?;
                write_range(f, min, max)
            }
            Builtin::Boolean | Builtin::Date | Builtin::Uuid => Ok(()),
        }
    }
}
