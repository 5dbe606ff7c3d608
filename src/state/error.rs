use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("context path does not resolve: {path:?}")]
    UnresolvedContext { path: Vec<String> },

    #[error("no layer with id {id:?} in the addressed layer list")]
    UnknownLayer { id: String },
}
