//! Progress notification port
//!
//! Reports provider acquisition as it happens. Implementations live in the
//! presentation layer.

pub trait AcquireProgress: Send + Sync {
    /// Called before a provider is launched
    fn on_provider_starting(&self, provider: &str);

    /// Called once a provider has listed its capabilities
    fn on_provider_ready(&self, provider: &str, capabilities: usize);

    /// Called when a provider fails to start or enumerate
    fn on_provider_failed(&self, _provider: &str, _error: &str) {}
}

/// No-op progress for tests and quiet runs
pub struct NoAcquireProgress;

impl AcquireProgress for NoAcquireProgress {
    fn on_provider_starting(&self, _provider: &str) {}
    fn on_provider_ready(&self, _provider: &str, _capabilities: usize) {}
}

/// Tool activity during a consultation
pub trait ConsultProgress: Send + Sync {
    /// Called before a capability is invoked
    fn on_tool_call(&self, _tool: &str, _args_preview: &str) {}

    /// Called after a capability returns
    fn on_tool_result(&self, _tool: &str, _is_error: bool) {}
}

pub struct NoConsultProgress;

impl ConsultProgress for NoConsultProgress {}
