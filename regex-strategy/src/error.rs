use thiserror::Error;

use crate::syntax::{ast::Node, ParseError};

/// Errors from [`from_regex()`](crate::from_regex) and [`Pattern::new()`](crate::Pattern::new).
///
/// Failing to find an example while drawing is a different thing, see [`DrawError`](crate::strategy::DrawError).
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A node the compiler cannot translate, e.g. a character set with a misplaced negation.
    #[error("unrecognized {}: {reason}", node.kind())]
    UnrecognizedNode { node: Box<Node>, reason: String },

    /// A back reference to a group whose strategy has not been compiled.
    #[error("reference to unknown group {0}")]
    UnknownGroupReference(usize),

    /// The pattern could not be turned into a matcher for the final filter.
    #[error("failed to build matcher: {0}")]
    Matcher(#[from] fancy_regex::Error),
}

impl Error {
    pub(crate) fn unrecognized(node: &Node, reason: impl Into<String>) -> Self {
        Error::UnrecognizedNode {
            node: Box::new(node.clone()),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let e = Error::unrecognized(&Node::Literal('a'), "test");
        assert_eq!(e.to_string(), "unrecognized literal: test");
        assert_eq!(
            Error::UnknownGroupReference(2).to_string(),
            "reference to unknown group 2"
        );
    }
}
