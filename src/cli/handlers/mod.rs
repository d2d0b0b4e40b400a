//! Subcommand handlers, one per `Commands` variant.

pub mod migrate;
pub mod serve;

pub use migrate::MigrateCommandHandler;
pub use serve::ServeCommandHandler;
