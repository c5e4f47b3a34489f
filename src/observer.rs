//! Step observer trait for monitoring simulation progress.

/// Trait for observing simulation steps.
///
/// Implement this trait to monitor the stepper (e.g., for debugging,
/// visualization, or performance profiling). All methods have default
/// no-op implementations. `on_integrate` runs after positions have moved and
/// before the next force pass, which is where a position-correction pass
/// (collision response) would go.
pub trait StepObserver {
    /// Called after every particle's acceleration has been written.
    fn on_forces_accumulated(&mut self) {}

    /// Called after all particles have been integrated (one sub-step).
    fn on_integrate(&mut self) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
