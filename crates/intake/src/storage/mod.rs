pub mod scratch;

pub use scratch::ScratchStorage;
