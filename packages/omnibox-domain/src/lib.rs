pub mod action;
pub mod autoselect;
pub mod candidate;
pub mod mode;
pub mod scorer;
pub mod source;
pub mod url;

pub use action::CommitAction;
pub use candidate::{Candidate, CandidateBuilder, CandidateId, CandidateOverrides};
pub use mode::Mode;
pub use source::{Source, SourceKind, TabGroupRef, UrlFields};
