//! Local files: upload candidates, validation, and the pending queue.

mod candidate;
pub mod pending;
pub mod validation;

pub use candidate::CandidateFile;
pub use pending::{
    AddSummary, PendingLocalFile, PendingQueue, PreviewHandle, PreviewRegistry, Submission,
};
pub use validation::{partition_files, require_text, validate_file, ValidationError};
