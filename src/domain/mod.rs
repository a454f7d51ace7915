//! Domain logic - pure version values independent of git operations

pub mod branch;
pub mod enforcement;
pub mod release;
pub mod release_type;
pub mod tag;
pub mod version;

pub use branch::BranchState;
pub use enforcement::SemVerEnforcementLevel;
pub use release::{LowerBound, ReleaseVersion};
pub use release_type::SemVerReleaseType;
pub use tag::TagPattern;
pub use version::{Distance, Qualifier, SemanticVersion};
