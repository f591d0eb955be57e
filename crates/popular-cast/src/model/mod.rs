//! Pure data structures exchanged with the remote source and stored by the aggregator.

pub mod actor;
pub mod envelope;
pub mod movie;

pub use actor::*;
pub use envelope::*;
pub use movie::*;
