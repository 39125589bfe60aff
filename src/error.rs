use thiserror::Error;

/// Errors raised while configuring a pipeline.
///
/// These cover API misuse only. Parsing itself never fails on input —
/// malformed Markdown always resolves to literal text — and broken
/// extensions (contract violations inside a parse) are programming errors
/// that panic immediately rather than surfacing here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// A relative insertion named a parser type that is not registered.
    #[error("unknown parser `{0}`: it is not registered in this pipeline")]
    UnknownParser(&'static str),
    /// The same parser type was registered twice.
    #[error("parser `{0}` is already registered")]
    DuplicateParser(&'static str),
}

/// Errors raised while rendering a document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// Roundtrip rendering asked of a document parsed without trivia
    /// tracking.
    #[error("document was parsed without trivia tracking; roundtrip rendering needs it")]
    TriviaNotTracked,
}
