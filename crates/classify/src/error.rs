use thiserror::Error;

/// Errors raised while building a [`CategoryLexicon`](crate::CategoryLexicon).
///
/// Classification itself cannot fail; only lexicon construction can.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexiconError {
    #[error("lexicon must contain at least one category")]
    Empty,
    #[error("category name must not be blank")]
    BlankName,
    #[error("category name '{0}' is reserved")]
    ReservedName(String),
    #[error("category '{0}' is declared more than once")]
    DuplicateCategory(String),
    #[error("category '{0}' has no triggers")]
    NoTriggers(String),
    #[error("category '{0}' has a blank trigger")]
    BlankTrigger(String),
}
