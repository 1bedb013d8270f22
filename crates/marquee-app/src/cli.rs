use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(author, version, about = "Browse the TMDB movie catalog from the terminal")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the featured slides and every genre row
    Home,

    /// Show the details of one movie
    Details {
        /// TMDB movie id
        id: u64,
    },

    /// Search movies and series by title
    Search {
        /// Search text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Interactive session with autoplaying featured slides (default)
    Browse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["marquee"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_search_joins_words() {
        let args = ["marquee", "search", "star", "wars", "-c", "x.toml"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Commands::Search { query }) => assert_eq!(query.join(" "), "star wars"),
            _ => panic!("expected search"),
        }
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn test_details_requires_numeric_id() {
        assert!(Cli::try_parse_from(["marquee", "details", "abc"]).is_err());
        assert!(Cli::try_parse_from(["marquee", "details", "550"]).is_ok());
    }
}
