use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use spots::region::OutOfBoundsPolicy;

#[derive(Parser, Debug)]
#[command(name = "spot-ingest")]
#[command(version, about = "Loads fishing spots into the spot database")]
pub struct Cli {
    /// What coordinates outside of the country resolve to.
    #[arg(
        long,
        value_enum,
        global = true,
        env = "SPOT_OUT_OF_BOUNDS",
        default_value_t = OutOfBounds::Strict
    )]
    pub out_of_bounds: OutOfBounds,

    /// Work on an empty in-memory store and print the resulting rows.
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutOfBounds {
    /// No region.
    Strict,
    /// The `기타` region.
    CatchAll,
}

impl From<OutOfBounds> for OutOfBoundsPolicy {
    fn from(value: OutOfBounds) -> Self {
        match value {
            OutOfBounds::Strict => OutOfBoundsPolicy::Absent,
            OutOfBounds::CatchAll => OutOfBoundsPolicy::CatchAll,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ingest every fishing-spot workbook (xlsx, xls, csv) below a directory.
    Spreadsheets {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Ingest a single workbook.
    Spreadsheet { file: PathBuf },

    /// Sea fishing points of the forecast service.
    Forecast {
        #[command(subcommand)]
        command: ForecastCommand,
    },

    /// Re-resolve regions that are missing or still full names.
    BackfillRegions,

    /// Re-resolve coordinate-sourced spots without a specific region from
    /// their coordinates.
    RefreshCoordinateRegions,
}

#[derive(Subcommand, Debug)]
pub enum ForecastCommand {
    /// Fetch every category from the service and ingest it.
    Fetch {
        /// Also save the responses as JSON snapshots into this directory.
        #[arg(long)]
        save_dir: Option<PathBuf>,

        /// Only fetch (and save), do not touch the store.
        #[arg(long, requires = "save_dir")]
        skip_ingest: bool,
    },

    /// Ingest a previously saved snapshot.
    Load { file: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_options_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "spot-ingest",
            "backfill-regions",
            "--dry-run",
            "--out-of-bounds",
            "catch-all",
        ])
        .unwrap();
        assert!(cli.dry_run);
        assert_eq!(cli.out_of_bounds, OutOfBounds::CatchAll);
        assert!(matches!(cli.command, Command::BackfillRegions));
    }

    #[test]
    fn forecast_fetch() {
        let cli = Cli::try_parse_from([
            "spot-ingest",
            "forecast",
            "fetch",
            "--save-dir",
            "snapshots",
            "--skip-ingest",
        ])
        .unwrap();
        assert_eq!(cli.out_of_bounds, OutOfBounds::Strict);
        match cli.command {
            Command::Forecast {
                command: ForecastCommand::Fetch {
                    save_dir,
                    skip_ingest,
                },
            } => {
                assert_eq!(save_dir, Some(PathBuf::from("snapshots")));
                assert!(skip_ingest);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn skip_ingest_needs_a_save_dir() {
        assert!(Cli::try_parse_from(["spot-ingest", "forecast", "fetch", "--skip-ingest"]).is_err());
    }

    #[test]
    fn policies() {
        assert_eq!(OutOfBoundsPolicy::from(OutOfBounds::Strict), OutOfBoundsPolicy::Absent);
        assert_eq!(OutOfBoundsPolicy::from(OutOfBounds::CatchAll), OutOfBoundsPolicy::CatchAll);
    }
}
