use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `swingsync` binary.
#[derive(Debug, Parser)]
#[command(
    name = "swingsync",
    version,
    about = "swingsync - reconcile swing data from independent capture devices"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max sessions or pairs to print
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Matching window in seconds (overrides config)
    #[arg(short, long, global = true, value_name = "SECONDS")]
    pub window: Option<f64>,

    /// Hard-hit exit velocity threshold (overrides config)
    #[arg(long, global = true, value_name = "MPH")]
    pub hard_hit_threshold: Option<f64>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub const fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            window: self.window,
            hard_hit_threshold: self.hard_hit_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::{CommandFactory, Parser};

    use super::root_commands::SchemaType;
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "swingsync",
            "--format",
            "table",
            "--limit",
            "10",
            "--verbose",
            "reconcile",
            "--primary",
            "bat.json",
            "--secondary",
            "ball.json",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        let Commands::Reconcile(args) = &cli.command else {
            panic!("expected reconcile, got {:?}", cli.command);
        };
        assert_eq!(args.primary, Path::new("bat.json"));
        assert_eq!(args.secondary, Path::new("ball.json"));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "swingsync",
            "pairs",
            "--primary",
            "a.json",
            "--secondary",
            "b.json",
            "--format",
            "raw",
            "--window",
            "4.5",
            "--quiet",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert_eq!(cli.window, Some(4.5));
        assert!(matches!(cli.command, Commands::Pairs(_)));
    }

    #[test]
    fn inputs_are_required() {
        let parsed = Cli::try_parse_from(["swingsync", "reconcile", "--primary", "a.json"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["swingsync", "--format", "xml", "schema", "session"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn schema_accepts_known_types_only() {
        for (value, expected) in [
            ("session", SchemaType::Session),
            ("pair", SchemaType::Pair),
            ("reconciliation", SchemaType::Reconciliation),
        ] {
            let cli =
                Cli::try_parse_from(["swingsync", "schema", value]).expect("cli should parse");
            let Commands::Schema(args) = cli.command else {
                panic!("expected schema");
            };
            assert_eq!(args.type_name, expected);
        }
        assert!(Cli::try_parse_from(["swingsync", "schema", "swing-row"]).is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from([
            "swingsync",
            "--hard-hit-threshold",
            "100",
            "schema",
            "pair",
        ])
        .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.hard_hit_threshold, Some(100.0));
        assert_eq!(flags.window, None);
        assert_eq!(flags.format, OutputFormat::Json);
    }
}
