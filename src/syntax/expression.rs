//! Constraint-expression AST used by invariants.

use std::fmt;

use serde::Serialize;

use crate::diagnostics::position::Span;
use crate::syntax::datatype::BuiltinKind;
use crate::syntax::name::Name;
use crate::syntax::token_type::TokenType;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value")]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Regex(String),
    Nil,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum UnaryOp {
    Negate,
    Not,
}

impl UnaryOp {
    pub fn from_token(token_type: TokenType) -> Option<Self> {
        match token_type {
            TokenType::Minus => Some(UnaryOp::Negate),
            TokenType::Bang => Some(UnaryOp::Not),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
            UnaryOp::Not => "!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryClass {
    Logical,
    Equality,
    Match,
    Membership,
    Comparison,
    Arithmetic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BinaryOp {
    Or,
    Xor,
    And,
    Equal,
    NotEqual,
    Match,
    NotMatch,
    In,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOp {
    pub fn from_token(token_type: TokenType) -> Option<Self> {
        let op = match token_type {
            TokenType::Or => BinaryOp::Or,
            TokenType::Caret => BinaryOp::Xor,
            TokenType::And => BinaryOp::And,
            TokenType::Eq => BinaryOp::Equal,
            TokenType::NotEq => BinaryOp::NotEqual,
            TokenType::Match => BinaryOp::Match,
            TokenType::NotMatch => BinaryOp::NotMatch,
            TokenType::In => BinaryOp::In,
            TokenType::Lt => BinaryOp::Less,
            TokenType::Lte => BinaryOp::LessEqual,
            TokenType::Gt => BinaryOp::Greater,
            TokenType::Gte => BinaryOp::GreaterEqual,
            TokenType::Plus => BinaryOp::Add,
            TokenType::Minus => BinaryOp::Subtract,
            TokenType::Asterisk => BinaryOp::Multiply,
            TokenType::Slash => BinaryOp::Divide,
            TokenType::Percent => BinaryOp::Modulo,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Or => "||",
            BinaryOp::Xor => "^",
            BinaryOp::And => "&&",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Match => "=~",
            BinaryOp::NotMatch => "!~",
            BinaryOp::In => "in",
            BinaryOp::Less => "<",
            BinaryOp::LessEqual => "<=",
            BinaryOp::Greater => ">",
            BinaryOp::GreaterEqual => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Modulo => "%",
        }
    }

    pub fn class(self) -> BinaryClass {
        match self {
            BinaryOp::Or | BinaryOp::Xor | BinaryOp::And => BinaryClass::Logical,
            BinaryOp::Equal | BinaryOp::NotEqual => BinaryClass::Equality,
            BinaryOp::Match | BinaryOp::NotMatch => BinaryClass::Match,
            BinaryOp::In => BinaryClass::Membership,
            BinaryOp::Less | BinaryOp::LessEqual | BinaryOp::Greater | BinaryOp::GreaterEqual => {
                BinaryClass::Comparison
            }
            BinaryOp::Add
            | BinaryOp::Subtract
            | BinaryOp::Multiply
            | BinaryOp::Divide
            | BinaryOp::Modulo => BinaryClass::Arithmetic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Expr {
    Literal {
        value: Literal,
        span: Span,
    },
    List {
        elements: Vec<Expr>,
        span: Span,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        span: Span,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
        span: Span,
    },
    Member {
        object: Box<Expr>,
        member: Name,
        span: Span,
    },
    Index {
        object: Box<Expr>,
        indices: Vec<Expr>,
        span: Span,
    },
    Ternary {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
        span: Span,
    },
    /// `subject -> function(args) |params| { body }`; every tail part is
    /// optional and `None` means it was absent (not empty).
    Pipeline {
        subject: Box<Expr>,
        function: Name,
        args: Option<Vec<Expr>>,
        params: Option<Vec<Name>>,
        body: Option<Box<Expr>>,
        span: Span,
    },
    /// `$name`; the stored name excludes the `$`.
    Variable {
        name: String,
        span: Span,
    },
    /// Bare lowercase name referring to a property.
    Name {
        name: String,
        span: Span,
    },
    /// Bare uppercase name referring to a relation.
    RelationName {
        name: String,
        span: Span,
    },
    /// Built-in datatype keyword used as a value (`x in String`).
    DatatypeKeyword {
        keyword: BuiltinKind,
        span: Span,
    },
}

impl Expr {
    pub fn span(&self) -> Span {
        match self {
            Expr::Literal { span, .. }
            | Expr::List { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Member { span, .. }
            | Expr::Index { span, .. }
            | Expr::Ternary { span, .. }
            | Expr::Pipeline { span, .. }
            | Expr::Variable { span, .. }
            | Expr::Name { span, .. }
            | Expr::RelationName { span, .. }
            | Expr::DatatypeKeyword { span, .. } => *span,
        }
    }

    /// Replace the node's span, e.g. to cover the parentheses around it.
    pub fn with_span(mut self, new_span: Span) -> Self {
        match &mut self {
            Expr::Literal { span, .. }
            | Expr::List { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. }
            | Expr::Member { span, .. }
            | Expr::Index { span, .. }
            | Expr::Ternary { span, .. }
            | Expr::Pipeline { span, .. }
            | Expr::Variable { span, .. }
            | Expr::Name { span, .. }
            | Expr::RelationName { span, .. }
            | Expr::DatatypeKeyword { span, .. } => *span = new_span,
        }
        self
    }

    pub fn is_nil(&self) -> bool {
        matches!(
            self,
            Expr::Literal {
                value: Literal::Nil,
                ..
            }
        )
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Float(value) => write!(f, "{:?}", value),
            Literal::String(value) => write!(f, "{:?}", value),
            Literal::Boolean(value) => write!(f, "{}", value),
            Literal::Regex(source) => write!(f, "/{}/", source.replace('/', "\\/")),
            Literal::Nil => write!(f, "nil"),
        }
    }
}

fn join(items: &[Expr]) -> String {
    items
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Fully parenthesized rendering; the nesting shows how the parser grouped
/// operators.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal { value, .. } => write!(f, "{}", value),
            Expr::List { elements, .. } => write!(f, "[{}]", join(elements)),
            Expr::Unary { op, operand, .. } => write!(f, "({}{})", op.symbol(), operand),
            Expr::Binary {
                op, left, right, ..
            } => write!(f, "({} {} {})", left, op.symbol(), right),
            Expr::Member { object, member, .. } => write!(f, "{}.{}", object, member),
            Expr::Index {
                object, indices, ..
            } => write!(f, "{}[{}]", object, join(indices)),
            Expr::Ternary {
                condition,
                then_branch,
                else_branch,
                ..
            } => write!(
                f,
                "({} ? {{{}}} : {{{}}})",
                condition, then_branch, else_branch
            ),
            Expr::Pipeline {
                subject,
                function,
                args,
                params,
                body,
                ..
            } => {
                write!(f, "{} -> {}", subject, function)?;
                if let Some(args) = args {
                    write!(f, "({})", join(args))?;
                }
                if let Some(params) = params {
                    let params: Vec<String> = params.iter().map(|p| format!("${}", p)).collect();
                    write!(f, " |{}|", params.join(", "))?;
                }
                if let Some(body) = body {
                    write!(f, " {{{}}}", body)?;
                }
                Ok(())
            }
            Expr::Variable { name, .. } => write!(f, "${}", name),
            Expr::Name { name, .. } | Expr::RelationName { name, .. } => write!(f, "{}", name),
            Expr::DatatypeKeyword { keyword, .. } => write!(f, "{}", keyword.keyword()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(value: Literal) -> Expr {
        Expr::Literal {
            value,
            span: Span::default(),
        }
    }

    fn name(n: &str) -> Expr {
        Expr::Name {
            name: n.to_string(),
            span: Span::default(),
        }
    }

    #[test]
    fn operator_tables_agree() {
        for token in [
            TokenType::Or,
            TokenType::Caret,
            TokenType::And,
            TokenType::Eq,
            TokenType::NotEq,
            TokenType::Match,
            TokenType::NotMatch,
            TokenType::In,
            TokenType::Lt,
            TokenType::Lte,
            TokenType::Gt,
            TokenType::Gte,
            TokenType::Plus,
            TokenType::Minus,
            TokenType::Asterisk,
            TokenType::Slash,
            TokenType::Percent,
        ] {
            let op = BinaryOp::from_token(token).unwrap();
            assert_eq!(token.to_string().trim_matches('`'), op.symbol());
        }
        assert_eq!(BinaryOp::from_token(TokenType::Dot), None);
    }

    #[test]
    fn display_parenthesizes_binary_and_unary() {
        let expr = Expr::Binary {
            op: BinaryOp::NotEqual,
            left: Box::new(name("name")),
            right: Box::new(Expr::Unary {
                op: UnaryOp::Negate,
                operand: Box::new(lit(Literal::Integer(1))),
                span: Span::default(),
            }),
            span: Span::default(),
        };
        assert_eq!(expr.to_string(), "(name != (-1))");
    }

    #[test]
    fn literal_display() {
        assert_eq!(lit(Literal::Float(1.5)).to_string(), "1.5");
        assert_eq!(lit(Literal::String("a\"b".into())).to_string(), "\"a\\\"b\"");
        assert_eq!(lit(Literal::Regex("a/b".into())).to_string(), "/a\\/b/");
        assert!(lit(Literal::Nil).is_nil());
        assert!(!name("x").is_nil());
    }

    #[test]
    fn classes_group_operators() {
        assert_eq!(BinaryOp::Xor.class(), BinaryClass::Logical);
        assert_eq!(BinaryOp::NotMatch.class(), BinaryClass::Match);
        assert_eq!(BinaryOp::In.class(), BinaryClass::Membership);
        assert_eq!(BinaryOp::Modulo.class(), BinaryClass::Arithmetic);
    }
}
