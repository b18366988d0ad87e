pub mod context;
pub mod runner;

pub use context::{CaseReceipt, PipelineContext};
pub use runner::IntakePipeline;
