use async_trait::async_trait;
use nl_core::{BaselineResult, NeuroSymbolicResult, PuzzleRequest, SolveError};

/// The remote solver. Every failure is already classified as a `SolveError`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Unconstrained LLM answer plus its post-hoc validation.
    async fn baseline(&self, request: &PuzzleRequest) -> Result<BaselineResult, SolveError>;

    /// Formalize and exhaustively solve.
    async fn neurosymbolic(
        &self,
        request: &PuzzleRequest,
    ) -> Result<NeuroSymbolicResult, SolveError>;

    /// Liveness probe; returns the backend's banner message.
    async fn health(&self) -> Result<String, SolveError>;
}
