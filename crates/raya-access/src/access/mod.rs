//! `access` subcommand: routing, validation, and completion

mod command;
mod completion;
mod error;
mod router;

pub use command::{
    validate_team_ref, AccessCommand, GrantArgs, LsCollaboratorsArgs, LsPackagesArgs, PackageArgs,
    RevokeArgs, Subcommand, USAGE,
};
pub use completion::complete;
pub use error::{AccessError, ArgPosition};
pub use router::{AccessRouter, OutputSink};
pub use crate::registry::TeamRef;
