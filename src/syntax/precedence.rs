use std::sync::LazyLock;

use crate::syntax::token_type::TokenType;

/// Binding strength, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Ternary,     // c ? {a} : {b}
    LogicalOr,   // ||, ^
    LogicalAnd,  // &&
    Equals,      // ==, !=
    Match,       // =~, !~
    Membership,  // in
    LessGreater, // <, >, <=, >=
    Sum,         // +, -
    Product,     // *, /, %
    Prefix,      // -x, !x
    Postfix,     // a.b, a[i], a -> f
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assoc {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    Prefix,
    Infix,
    Postfix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpInfo {
    pub token: TokenType,
    pub precedence: Precedence,
    pub associativity: Assoc,
    pub fixity: Fixity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfixInfo {
    pub precedence: Precedence,
    pub associativity: Assoc,
    pub fixity: Fixity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixInfo {
    pub precedence: Precedence,
}

const fn infix(token: TokenType, precedence: Precedence) -> OpInfo {
    OpInfo {
        token,
        precedence,
        associativity: Assoc::Left,
        fixity: Fixity::Infix,
    }
}

const fn postfix(token: TokenType) -> OpInfo {
    OpInfo {
        token,
        precedence: Precedence::Postfix,
        associativity: Assoc::Left,
        fixity: Fixity::Postfix,
    }
}

const fn prefix(token: TokenType) -> OpInfo {
    OpInfo {
        token,
        precedence: Precedence::Prefix,
        associativity: Assoc::Right,
        fixity: Fixity::Prefix,
    }
}

// Single source of truth for operator precedence + associativity.
pub const OPERATOR_TABLE: &[OpInfo] = &[
    OpInfo {
        token: TokenType::Question,
        precedence: Precedence::Ternary,
        associativity: Assoc::Right,
        fixity: Fixity::Infix,
    },
    infix(TokenType::Or, Precedence::LogicalOr),
    infix(TokenType::Caret, Precedence::LogicalOr),
    infix(TokenType::And, Precedence::LogicalAnd),
    infix(TokenType::Eq, Precedence::Equals),
    infix(TokenType::NotEq, Precedence::Equals),
    infix(TokenType::Match, Precedence::Match),
    infix(TokenType::NotMatch, Precedence::Match),
    infix(TokenType::In, Precedence::Membership),
    infix(TokenType::Lt, Precedence::LessGreater),
    infix(TokenType::Lte, Precedence::LessGreater),
    infix(TokenType::Gt, Precedence::LessGreater),
    infix(TokenType::Gte, Precedence::LessGreater),
    infix(TokenType::Plus, Precedence::Sum),
    infix(TokenType::Minus, Precedence::Sum),
    infix(TokenType::Asterisk, Precedence::Product),
    infix(TokenType::Slash, Precedence::Product),
    infix(TokenType::Percent, Precedence::Product),
    // Postfix operators handled by Pratt infix dispatch
    postfix(TokenType::Dot),
    postfix(TokenType::LBracket),
    postfix(TokenType::Arrow),
    // Prefix operators
    prefix(TokenType::Bang),
    prefix(TokenType::Minus),
];

pub static INFIX_TABLE: LazyLock<[Option<InfixInfo>; TokenType::COUNT]> = LazyLock::new(|| {
    let mut table = [None; TokenType::COUNT];
    for info in OPERATOR_TABLE {
        match info.fixity {
            Fixity::Infix | Fixity::Postfix => {
                let index = info.token.as_usize();
                debug_assert!(
                    table[index].is_none(),
                    "duplicate infix/postfix operator table entry for token {:?}",
                    info.token
                );
                table[index] = Some(InfixInfo {
                    precedence: info.precedence,
                    associativity: info.associativity,
                    fixity: info.fixity,
                });
            }
            Fixity::Prefix => {}
        }
    }
    table
});

pub static PREFIX_TABLE: LazyLock<[Option<PrefixInfo>; TokenType::COUNT]> = LazyLock::new(|| {
    let mut table = [None; TokenType::COUNT];
    for info in OPERATOR_TABLE {
        if info.fixity == Fixity::Prefix {
            table[info.token.as_usize()] = Some(PrefixInfo {
                precedence: info.precedence,
            });
        }
    }
    table
});

pub fn infix_op(token_type: TokenType) -> Option<InfixInfo> {
    INFIX_TABLE[token_type.as_usize()]
}

pub fn prefix_op(token_type: TokenType) -> Option<PrefixInfo> {
    PREFIX_TABLE[token_type.as_usize()]
}

fn precedence_below(precedence: Precedence) -> Precedence {
    match precedence {
        Precedence::Lowest | Precedence::Ternary => Precedence::Lowest,
        Precedence::LogicalOr => Precedence::Ternary,
        Precedence::LogicalAnd => Precedence::LogicalOr,
        Precedence::Equals => Precedence::LogicalAnd,
        Precedence::Match => Precedence::Equals,
        Precedence::Membership => Precedence::Match,
        Precedence::LessGreater => Precedence::Membership,
        Precedence::Sum => Precedence::LessGreater,
        Precedence::Product => Precedence::Sum,
        Precedence::Prefix => Precedence::Product,
        Precedence::Postfix => Precedence::Prefix,
    }
}

/// Precedence to parse the right operand with: the operator's own level for
/// left-associative operators, one below it for right-associative ones.
pub fn rhs_precedence_for_infix(token_type: TokenType) -> Option<Precedence> {
    let op = infix_op(token_type)?;
    Some(match op.associativity {
        Assoc::Left => op.precedence,
        Assoc::Right => precedence_below(op.precedence),
    })
}

pub fn token_precedence(token_type: TokenType) -> Precedence {
    infix_op(token_type)
        .map(|op| op.precedence)
        .unwrap_or(Precedence::Lowest)
}
