//! Type tags assigned to AST nodes.

use std::fmt::Display;

/// The closed set of tags a node can carry.
///
/// `Unbound` is the initial state of every record and doubles as the
/// error sentinel: a node still `Unbound` after a check was never typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TypeTag {
    #[default]
    Unbound,
    /// A statement or program fragment that satisfies all its obligations.
    /// Not a value type.
    WellTyped,
    Procedure,
    Number,
    /// A value consumed in output position (a Number or a String).
    Output,
    String,
    Boolean,
    Halt,
}

impl TypeTag {
    pub fn is_bound(&self) -> bool {
        *self != TypeTag::Unbound
    }

    /// Returns whether the tag is one of `tags`.
    pub fn is_one_of(&self, tags: &[TypeTag]) -> bool {
        tags.contains(self)
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TypeTag::Unbound => "Unbound",
            TypeTag::WellTyped => "Well-Typed",
            TypeTag::Procedure => "Procedure",
            TypeTag::Number => "Number",
            TypeTag::Output => "Output",
            TypeTag::String => "String",
            TypeTag::Boolean => "Boolean",
            TypeTag::Halt => "Halt",
        };
        write!(f, "{}", name)
    }
}

/// Renders a list of accepted tags as `A or B or C`.
pub fn describe_tags(tags: &[TypeTag]) -> String {
    tags.iter()
        .map(|tag| tag.to_string())
        .collect::<Vec<String>>()
        .join(" or ")
}
