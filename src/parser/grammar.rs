//! Grammar table shared by the parser and the completer
//!
//! Root operations, the clauses each operation accepts (in their fixed
//! order), keyword spellings with their usage hints, and the operator
//! mapping all live here. The parser walks these tables to decide what may
//! come next and the completer walks the same tables to decide what to
//! offer, so the two cannot drift apart.

use super::lexer::TokenKind;
use super::operation::Operator;

/// A keyword as offered to the user, with its usage hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Keyword {
    pub text: &'static str,
    pub description: &'static str,
}

pub const AND: Keyword = Keyword {
    text: "AND",
    description: "AND [field] [operator] [value]",
};

pub const ASC: Keyword = Keyword {
    text: "ASC",
    description: "ASC",
};

pub const DESC: Keyword = Keyword {
    text: "DESC",
    description: "DESC",
};

pub const BY: Keyword = Keyword {
    text: "BY",
    description: "BY [field]",
};

/// Identifier that introduces a timestamp literal: `TIMESTAMP("...")`
pub const TIMESTAMP_FUNCTION: &str = "TIMESTAMP";

/// Data operations that may start a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Get,
    Query,
    Count,
}

/// Order in which root keywords are offered
pub const ROOT_OPERATIONS: [OperationKind; 3] =
    [OperationKind::Get, OperationKind::Query, OperationKind::Count];

impl OperationKind {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Get => Some(OperationKind::Get),
            TokenKind::Query => Some(OperationKind::Query),
            TokenKind::Count => Some(OperationKind::Count),
            _ => None,
        }
    }

    pub fn keyword(&self) -> Keyword {
        match self {
            OperationKind::Get => Keyword {
                text: "GET",
                description: "GET [docPath]",
            },
            OperationKind::Query => Keyword {
                text: "QUERY",
                description: "QUERY [collection]",
            },
            OperationKind::Count => Keyword {
                text: "COUNT",
                description: "COUNT [collection]",
            },
        }
    }

    /// Optional clauses accepted after the path, in their fixed order
    pub fn clauses(&self) -> &'static [Clause] {
        match self {
            OperationKind::Get => &[],
            OperationKind::Query => &[Clause::Select, Clause::Where, Clause::OrderBy, Clause::Limit],
            OperationKind::Count => &[Clause::Where],
        }
    }
}

/// Optional clauses following an operation's path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    Select,
    Where,
    OrderBy,
    Limit,
}

impl Clause {
    /// Token that opens the clause
    pub fn token(&self) -> TokenKind {
        match self {
            Clause::Select => TokenKind::Select,
            Clause::Where => TokenKind::Where,
            Clause::OrderBy => TokenKind::Order,
            Clause::Limit => TokenKind::Limit,
        }
    }

    pub fn keyword(&self) -> Keyword {
        match self {
            Clause::Select => Keyword {
                text: "SELECT",
                description: "SELECT [field...]",
            },
            Clause::Where => Keyword {
                text: "WHERE",
                description: "WHERE [field] [operator] [value]",
            },
            Clause::OrderBy => Keyword {
                text: "ORDER BY",
                description: "ORDER BY [field] [ASC/DESC]",
            },
            Clause::Limit => Keyword {
                text: "LIMIT",
                description: "LIMIT [count]",
            },
        }
    }
}

/// Find the clause opened by `kind` within `clauses`
///
/// # Returns
/// * `Option<usize>` - Index of the clause in the table
pub fn clause_index(clauses: &[Clause], kind: TokenKind) -> Option<usize> {
    clauses.iter().position(|c| c.token() == kind)
}

/// Map an operator token onto the filter operator it denotes
pub fn operator_for(kind: TokenKind) -> Option<Operator> {
    match kind {
        TokenKind::Eq => Some(Operator::Eq),
        TokenKind::NotEq => Some(Operator::NotEq),
        TokenKind::Gt => Some(Operator::Gt),
        TokenKind::Gte => Some(Operator::Gte),
        TokenKind::Lt => Some(Operator::Lt),
        TokenKind::Lte => Some(Operator::Lte),
        TokenKind::In => Some(Operator::In),
        TokenKind::ArrayContains => Some(Operator::ArrayContains),
        TokenKind::ArrayContainsAny => Some(Operator::ArrayContainsAny),
        _ => None,
    }
}

/// Strip one leading `/` from a path
pub fn normalize_path(path: &str) -> &str {
    path.strip_prefix('/').unwrap_or(path)
}
