use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "clipshelf", bin_name = "clipshelf", version)]
#[command(about = "Keeps a searchable history of your clipboard", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the clipboard and record every change until interrupted
    Watch,

    /// List entries, most recent first
    #[command(alias = "ls")]
    List {
        /// Only entries containing this text (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Show at most this many entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show one entry in full
    Show { id: u64 },

    /// Put an entry back on the clipboard
    #[command(alias = "cp")]
    Copy { id: u64 },

    /// Delete entries
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u64>,
    },

    /// Delete every entry and stored image
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Get or set configuration (hotkey, max-entries, poll-interval)
    Config {
        key: Option<String>,
        value: Option<String>,
    },

    /// Show where history, settings and images are stored
    Paths,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["clipshelf"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["clipshelf", "list", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn list_flags() {
        let cli = Cli::try_parse_from(["clipshelf", "ls", "-s", "foo", "-n", "3"]).unwrap();
        match cli.command {
            Some(Commands::List { search, limit }) => {
                assert_eq!(search.as_deref(), Some("foo"));
                assert_eq!(limit, Some(3));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn delete_needs_numeric_ids() {
        assert!(Cli::try_parse_from(["clipshelf", "delete"]).is_err());
        assert!(Cli::try_parse_from(["clipshelf", "delete", "abc"]).is_err());
        let cli = Cli::try_parse_from(["clipshelf", "rm", "1", "4"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Delete { ids }) if ids == vec![1, 4]));
    }
}
