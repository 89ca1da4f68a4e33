/// Capability boundary for the external excuse-analysis provider (an LLM in
/// the source deployment).
///
/// Implementations return a raw integer signal; the scoring engine clamps it
/// into its bounded range before use, so a misbehaving provider can shift
/// the composite by at most the signal cap. When no provider is available
/// the documented fallback is a contribution of zero, never an omission.
pub trait TextSignalProvider: Send + Sync {
    fn assess(&self, reason: &str) -> Result<i64, SignalError>;
}

/// Failure raised by a signal provider adapter.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("signal provider unavailable: {0}")]
    Unavailable(String),
    #[error("signal provider returned malformed output: {0}")]
    Malformed(String),
}

/// Fallback provider used when no analysis backend is configured. Always
/// contributes the neutral value.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSignalProvider;

impl TextSignalProvider for NullSignalProvider {
    fn assess(&self, _reason: &str) -> Result<i64, SignalError> {
        Ok(0)
    }
}

/// Deterministic provider for demos and tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedSignalProvider(pub i64);

impl TextSignalProvider for FixedSignalProvider {
    fn assess(&self, _reason: &str) -> Result<i64, SignalError> {
        Ok(self.0)
    }
}
