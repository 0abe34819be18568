//! Grammar categories of the SPL syntax tree.
//!
//! Every node carries exactly one [`Production`]. The parser that builds the
//! tree names its categories with plain strings ("N", "user-defined name",
//! "eq", ...); [`Production::from_token_class`] maps those names onto the
//! closed enum the checker matches on.

use lazy_static::lazy_static;
use regex::Regex;
use std::{collections::HashMap, fmt::Display};

lazy_static! {
    static ref BOOLEAN_OPERATOR_PATTERN: Regex = Regex::new("^(eq|not|and|or)$").unwrap();
    pub static ref PRODUCTION_LOOKUP: HashMap<&'static str, Production> = {
        let mut map = HashMap::new();
        map.insert("number", Production::NumberLiteral);
        map.insert("user-defined name", Production::UserDefinedName);
        map.insert("short string", Production::ShortString);
        map.insert("keyword", Production::Keyword);
        map.insert("N", Production::NumberVariable);
        map.insert("S", Production::StringVariable);
        map.insert("V", Production::Variable);
        map.insert("L", Production::Calculation);
        map.insert("B", Production::BooleanExpr);
        map.insert("W", Production::ConditionalBranch);
        map.insert("T", Production::IntermediateT);
        map.insert("U", Production::IntermediateU);
        map.insert("A", Production::Assign);
        map.insert("Z", Production::ConditionalLoop);
        map.insert("Q", Production::Terminator);
        map.insert("P", Production::Program);
        map.insert("D", Production::ProcDefs);
        map.insert("R", Production::Proc);
        map.insert("C", Production::Code);
        map.insert("I", Production::Instr);
        map.insert("O", Production::Io);
        map.insert("Y", Production::Call);
        map
    };
}

/// Operators of the boolean sub-language that are typed `Boolean` as leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOperator {
    Eq,
    Not,
    And,
    Or,
}

impl BooleanOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BooleanOperator::Eq => "eq",
            BooleanOperator::Not => "not",
            BooleanOperator::And => "and",
            BooleanOperator::Or => "or",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    NumberLiteral,
    UserDefinedName,
    ShortString,
    BooleanOperator(BooleanOperator),
    /// The `halt` instruction.
    Keyword,
    /// Any other syntax token kept in the tree: `if`, `then`, `=`, `<`, `add`, ...
    Token,
    /// N
    NumberVariable,
    /// S
    StringVariable,
    /// V
    Variable,
    /// L
    Calculation,
    /// B
    BooleanExpr,
    /// W
    ConditionalBranch,
    /// T
    IntermediateT,
    /// U
    IntermediateU,
    /// A
    Assign,
    /// Z
    ConditionalLoop,
    /// Q
    Terminator,
    /// P
    Program,
    /// D
    ProcDefs,
    /// R
    Proc,
    /// C
    Code,
    /// I
    Instr,
    /// O
    Io,
    /// Y
    Call,
}

impl Production {
    /// Maps a parser class name onto a production.
    ///
    /// Unknown class names are treated as structural tokens.
    pub fn from_token_class(class: &str) -> Production {
        if let Some(production) = PRODUCTION_LOOKUP.get(class) {
            return *production;
        }

        if BOOLEAN_OPERATOR_PATTERN.is_match(class) {
            let operator = match class {
                "eq" => BooleanOperator::Eq,
                "not" => BooleanOperator::Not,
                "and" => BooleanOperator::And,
                _ => BooleanOperator::Or,
            };
            return Production::BooleanOperator(operator);
        }

        Production::Token
    }

    /// The grammar symbol or class name shown in diagnostics.
    pub fn symbol(&self) -> &'static str {
        match self {
            Production::NumberLiteral => "number",
            Production::UserDefinedName => "user-defined name",
            Production::ShortString => "short string",
            Production::BooleanOperator(operator) => operator.as_str(),
            Production::Keyword => "keyword",
            Production::Token => "token",
            Production::NumberVariable => "N",
            Production::StringVariable => "S",
            Production::Variable => "V",
            Production::Calculation => "L",
            Production::BooleanExpr => "B",
            Production::ConditionalBranch => "W",
            Production::IntermediateT => "T",
            Production::IntermediateU => "U",
            Production::Assign => "A",
            Production::ConditionalLoop => "Z",
            Production::Terminator => "Q",
            Production::Program => "P",
            Production::ProcDefs => "D",
            Production::Proc => "R",
            Production::Code => "C",
            Production::Instr => "I",
            Production::Io => "O",
            Production::Call => "Y",
        }
    }

    /// Leaves that carry no value and are settled by the rule consuming them.
    pub fn is_syntax_token(&self) -> bool {
        matches!(self, Production::Token | Production::BooleanOperator(_))
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
