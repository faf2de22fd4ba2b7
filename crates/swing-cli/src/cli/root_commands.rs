use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Match two device exports and group them into sessions.
    Reconcile(InputArgs),
    /// Match two device exports and list the raw pairs.
    Pairs(InputArgs),
    /// Print the JSON Schema of an output type.
    Schema(SchemaArgs),
}

/// The two device streams to reconcile.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Primary stream (usually the bat sensor export), JSON
    #[arg(long)]
    pub primary: PathBuf,

    /// Secondary stream (ball tracker and/or combined unit export), JSON
    #[arg(long)]
    pub secondary: PathBuf,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum)]
    pub type_name: SchemaType,
}

/// Output types with a published schema.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    Session,
    Pair,
    Reconciliation,
}
