use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::records::{NewRecord, RecordFilter, SortOrder};

#[derive(Parser)]
#[command(name = "herdbook")]
#[command(about = "Record-keeper for district and commune livestock statistics")]
#[command(long_about = "herdbook - livestock statistics record-keeper

Keeps one row per district, commune and year with headcounts for buffalo,
cattle, pigs and goats, the number of animals slaughtered and the meat
output in tonnes. Records live in a local SQLite file.

QUICK START:
  herdbook list                                  Newest records first
  herdbook list --district \"Huyện Ba Bể\"         Filter by district
  herdbook list --search nam                     Search district or commune
  herdbook add --district \"Huyện Ba Bể\" --commune \"Xã Nam Mẫu\" --pig 30
  herdbook tui                                   Interactive editor

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Defaults to the `general.default_output` config value, or 'pretty'.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Database file to use instead of ~/.herdbook/herdbook.db
    #[arg(long, global = true, env = "HERDBOOK_DB", value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Configuration file to use instead of ~/.herdbook/config.yaml
    #[arg(long, global = true, env = "HERDBOOK_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    ///
    /// RUST_LOG takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List records, newest first
    ///
    /// Filters combine with AND. The search text matches district or
    /// commune names case-insensitively.
    ///
    /// # Examples
    ///
    ///   herdbook list
    ///   herdbook list --district "Huyện Ba Bể" --commune "Xã Nam Mẫu"
    ///   herdbook list --search "chợ" --page 2
    ///   herdbook list --oldest-first --page 1 --page-size 20
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show a single record by id
    Show {
        /// Record id
        id: i64,
    },

    /// Add a new record
    ///
    /// Counts default to 0 and the year to the current year.
    ///
    /// # Examples
    ///
    ///   herdbook add --district "Huyện Ba Bể" --commune "Xã Nam Mẫu" \
    ///     --year 2024 --buffalo 10 --cattle 20 --pig 30 --goat 5 \
    ///     --slaughter 15 --meat 1.2
    #[command(alias = "a")]
    Add(AddArgs),

    /// Update an existing record
    ///
    /// Only the given fields change; the rest keep their stored values.
    /// The record is then written back in full.
    Update(UpdateArgs),

    /// Delete a record by id
    ///
    /// Asks for confirmation unless --yes is given. Deleting an id that
    /// does not exist changes nothing.
    #[command(alias = "rm")]
    Delete {
        /// Record id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List districts and their communes
    Districts {
        /// Only show the communes of this district
        district: Option<String>,
    },

    /// Show totals over the matching records
    Stats(FilterArgs),

    /// Replace ALL records with generated sample data
    ///
    /// DESTRUCTIVE: deletes every stored record and restarts ids at 1
    /// before inserting the sample rows. Asks for confirmation unless
    /// --yes is given.
    Seed {
        /// Number of records to generate (default from config, 50)
        count: Option<usize>,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Open the interactive terminal UI
    Tui,

    /// Generate shell completions
    ///
    /// # Examples
    ///
    ///   source <(herdbook completions bash)
    ///   herdbook completions zsh > ~/.zsh/completions/_herdbook
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Record filter flags.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Exact district name
    #[arg(long, short = 'd')]
    pub district: Option<String>,

    /// Exact commune name
    #[arg(long, short = 'c')]
    pub commune: Option<String>,

    /// Case-insensitive text contained in the district or commune name
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

impl FilterArgs {
    #[must_use]
    pub fn to_filter(&self) -> RecordFilter {
        let mut filter = RecordFilter::all();
        if let Some(district) = &self.district {
            filter = filter.district(district.as_str());
        }
        if let Some(commune) = &self.commune {
            filter = filter.commune(commune.as_str());
        }
        if let Some(search) = &self.search {
            filter = filter.text(search.as_str());
        }
        filter
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Page number, starting at 1 (default: show every match)
    #[arg(long, short = 'p')]
    pub page: Option<u32>,

    /// Rows per page (default from config, 10); implies --page 1
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Order by ascending id
    #[arg(long, conflicts_with = "newest_first")]
    pub oldest_first: bool,

    /// Order by descending id
    #[arg(long)]
    pub newest_first: bool,
}

impl ListArgs {
    /// Resolve the ordering, falling back to the configured default.
    #[must_use]
    pub const fn order(&self, default: SortOrder) -> SortOrder {
        if self.oldest_first {
            SortOrder::OldestFirst
        } else if self.newest_first {
            SortOrder::NewestFirst
        } else {
            default
        }
    }
}

/// Year and figure flags shared by `add` and `update`.
#[derive(Args, Debug, Default, Clone)]
pub struct FigureArgs {
    /// Reporting year (1990-2100)
    #[arg(long, allow_negative_numbers = true)]
    pub year: Option<i64>,

    /// Buffalo headcount
    #[arg(long, allow_negative_numbers = true)]
    pub buffalo: Option<i64>,

    /// Cattle headcount
    #[arg(long, allow_negative_numbers = true)]
    pub cattle: Option<i64>,

    /// Pig headcount
    #[arg(long, allow_negative_numbers = true)]
    pub pig: Option<i64>,

    /// Goat headcount
    #[arg(long, allow_negative_numbers = true)]
    pub goat: Option<i64>,

    /// Animals slaughtered in the period
    #[arg(long, allow_negative_numbers = true)]
    pub slaughter: Option<i64>,

    /// Meat output in tonnes
    #[arg(long, allow_negative_numbers = true)]
    pub meat: Option<f64>,
}

impl FigureArgs {
    /// Overwrite the fields of `record` that were given on the command line.
    pub fn apply(&self, record: &mut NewRecord) {
        if let Some(year) = self.year {
            record.year = year;
        }
        if let Some(buffalo) = self.buffalo {
            record.buffalo_count = buffalo;
        }
        if let Some(cattle) = self.cattle {
            record.cattle_count = cattle;
        }
        if let Some(pig) = self.pig {
            record.pig_count = pig;
        }
        if let Some(goat) = self.goat {
            record.goat_count = goat;
        }
        if let Some(slaughter) = self.slaughter {
            record.slaughter_total = slaughter;
        }
        if let Some(meat) = self.meat {
            record.meat_output_tons = meat;
        }
    }
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// District name
    #[arg(long, short = 'd')]
    pub district: String,

    /// Commune name
    #[arg(long, short = 'c')]
    pub commune: String,

    #[command(flatten)]
    pub figures: FigureArgs,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Record id
    pub id: i64,

    /// New district name
    #[arg(long, short = 'd')]
    pub district: Option<String>,

    /// New commune name
    #[arg(long, short = 'c')]
    pub commune: Option<String>,

    #[command(flatten)]
    pub figures: FigureArgs,
}

impl UpdateArgs {
    /// Whether any field was given at all.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        let f = &self.figures;
        self.district.is_some()
            || self.commune.is_some()
            || f.year.is_some()
            || f.buffalo.is_some()
            || f.cattle.is_some()
            || f.pig.is_some()
            || f.goat.is_some()
            || f.slaughter.is_some()
            || f.meat.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_list_defaults() {
        let cli = Cli::try_parse_from(["herdbook", "list"]).unwrap();
        if let Commands::List(args) = cli.command {
            assert!(args.filter.to_filter().is_empty());
            assert!(args.page.is_none());
            assert_eq!(args.order(SortOrder::NewestFirst), SortOrder::NewestFirst);
            assert_eq!(args.order(SortOrder::OldestFirst), SortOrder::OldestFirst);
        } else {
            panic!("Expected List command");
        }
        assert!(cli.output.is_none());
    }

    #[test]
    fn test_cli_list_filters() {
        let cli = Cli::try_parse_from([
            "herdbook",
            "ls",
            "--district",
            "Huyện Ba Bể",
            "-c",
            "Xã Nam Mẫu",
            "-s",
            "nam",
            "--page",
            "2",
            "--oldest-first",
        ])
        .unwrap();
        if let Commands::List(args) = cli.command {
            let filter = args.filter.to_filter();
            assert_eq!(filter.district.as_deref(), Some("Huyện Ba Bể"));
            assert_eq!(filter.commune.as_deref(), Some("Xã Nam Mẫu"));
            assert_eq!(filter.text.as_deref(), Some("nam"));
            assert_eq!(args.page, Some(2));
            assert_eq!(args.order(SortOrder::NewestFirst), SortOrder::OldestFirst);
        } else {
            panic!("Expected List command");
        }
    }

    #[test]
    fn test_cli_list_order_conflict() {
        let result =
            Cli::try_parse_from(["herdbook", "list", "--oldest-first", "--newest-first"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_add() {
        let cli = Cli::try_parse_from([
            "herdbook",
            "add",
            "--district",
            "Huyện Ba Bể",
            "--commune",
            "Xã Nam Mẫu",
            "--year",
            "2024",
            "--pig",
            "30",
            "--meat",
            "1.2",
        ])
        .unwrap();
        if let Commands::Add(args) = cli.command {
            assert_eq!(args.district, "Huyện Ba Bể");
            assert_eq!(args.figures.year, Some(2024));
            assert_eq!(args.figures.pig, Some(30));
            assert_eq!(args.figures.meat, Some(1.2));
            assert!(args.figures.goat.is_none());
        } else {
            panic!("Expected Add command");
        }
    }

    #[test]
    fn test_cli_add_requires_location() {
        assert!(Cli::try_parse_from(["herdbook", "add", "--district", "Huyện Ba Bể"]).is_err());
    }

    #[test]
    fn test_cli_add_accepts_negative_for_validation() {
        let cli = Cli::try_parse_from([
            "herdbook", "add", "-d", "A", "-c", "B", "--goat", "-3",
        ])
        .unwrap();
        if let Commands::Add(args) = cli.command {
            assert_eq!(args.figures.goat, Some(-3));
        } else {
            panic!("Expected Add command");
        }
    }

    #[test]
    fn test_cli_update() {
        let cli = Cli::try_parse_from(["herdbook", "update", "7", "--cattle", "12"]).unwrap();
        if let Commands::Update(args) = cli.command {
            assert_eq!(args.id, 7);
            assert!(args.has_changes());

            let mut record = NewRecord::new("A", "B", 2020);
            args.figures.apply(&mut record);
            assert_eq!(record.cattle_count, 12);
            assert_eq!(record.year, 2020);
        } else {
            panic!("Expected Update command");
        }

        let cli = Cli::try_parse_from(["herdbook", "update", "7"]).unwrap();
        if let Commands::Update(args) = cli.command {
            assert!(!args.has_changes());
        } else {
            panic!("Expected Update command");
        }
    }

    #[test]
    fn test_cli_delete() {
        let cli = Cli::try_parse_from(["herdbook", "rm", "9", "-y"]).unwrap();
        assert!(matches!(cli.command, Commands::Delete { id: 9, yes: true }));
    }

    #[test]
    fn test_cli_seed() {
        let cli = Cli::try_parse_from(["herdbook", "seed"]).unwrap();
        assert!(matches!(cli.command, Commands::Seed { count: None, yes: false }));

        let cli = Cli::try_parse_from(["herdbook", "seed", "20", "--yes"]).unwrap();
        assert!(matches!(cli.command, Commands::Seed { count: Some(20), yes: true }));
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from([
            "herdbook",
            "stats",
            "--output",
            "json",
            "--database",
            "/tmp/x.db",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/x.db")));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Stats(_)));
    }

    #[test]
    fn test_cli_tui_and_completions() {
        let cli = Cli::try_parse_from(["herdbook", "tui"]).unwrap();
        assert!(matches!(cli.command, Commands::Tui));

        let cli = Cli::try_parse_from(["herdbook", "completions", "zsh"]).unwrap();
        assert!(matches!(cli.command, Commands::Completions { shell: Shell::Zsh }));
    }

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
