mod evaluator;
mod kind;
mod sampler;
mod service;
mod state;

pub use kind::AlertKind;
pub use service::run_cycle;
pub use state::ThrottleState;

#[cfg(test)]
pub(crate) use sampler::fixtures;
