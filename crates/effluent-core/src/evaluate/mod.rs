pub mod engine;
pub mod outcome;

pub use engine::ThresholdEvaluator;
pub use outcome::{ParameterVerdict, SampleVerdict};
