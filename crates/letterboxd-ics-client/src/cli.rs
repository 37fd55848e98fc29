//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// letterboxd-ics - Letterboxd diary as an iCalendar feed
#[derive(Debug, Parser)]
#[command(name = "letterboxd-ics")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the JSON options file
    #[arg(long, short, env = "LETTERBOXD_ICS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Letterboxd username
    #[arg(long, env = "LETTERBOXD_USERNAME")]
    pub username: Option<String>,

    /// Letterboxd password
    #[arg(long, env = "LETTERBOXD_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Read the diary from a local CSV instead of logging in
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Suppress the HTTP response headers
    #[arg(long)]
    pub no_headers: bool,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_leave_everything_unset() {
        let cli = Cli::parse_from(["letterboxd-ics"]);
        assert!(cli.config.is_none());
        assert!(cli.username.is_none());
        assert!(cli.file.is_none());
        assert!(!cli.no_headers);
        assert!(!cli.debug);
    }

    #[test]
    fn flags_are_parsed() {
        let cli = Cli::parse_from([
            "letterboxd-ics",
            "--file",
            "/tmp/diary.csv",
            "--no-headers",
            "-v",
        ]);
        assert_eq!(cli.file.as_deref(), Some(std::path::Path::new("/tmp/diary.csv")));
        assert!(cli.no_headers);
        assert!(cli.debug);
    }
}
