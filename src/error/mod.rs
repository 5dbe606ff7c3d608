use crate::remote::RemoteError;
use crate::state::StateError;
use crate::template::TemplateError;
use thiserror::Error;

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}
