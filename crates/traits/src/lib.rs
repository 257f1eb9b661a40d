pub mod measure;
pub mod sink;

pub use measure::TextMeasurer;
pub use sink::{ArtifactSink, InMemorySink, SavedArtifact, SharedArtifactData, SinkError};
