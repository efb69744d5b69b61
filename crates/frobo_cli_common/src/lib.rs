#![doc = include_str!("../README.md")]

use clap::{value_parser, ArgAction, Args};

/// Common way to set logging levels
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct LoggingArgs {
    /// Log more, up to twice
    #[clap(short = 'v', value_parser = value_parser!(u8).range(0..=2), action=ArgAction::Count, conflicts_with="quiet")]
    verbose: u8,
    /// Log less, up to twice
    #[clap(short = 'q', value_parser = value_parser!(u8).range(0..=2), action=ArgAction::Count, conflicts_with="verbose")]
    quiet: u8,
}

impl LoggingArgs {
    /// How far from the default level the flags move logging, between -2 and 2
    pub fn verbosity(&self) -> i8 {
        self.verbose.min(2) as i8 - self.quiet.min(2) as i8
    }

    /// Gets the logging level based on whether `-v[v]` or `-q[q]` has been used,
    #[cfg(feature = "tracing")]
    pub fn log_level_filter(&self) -> tracing::level_filters::LevelFilter {
        use tracing::level_filters::LevelFilter;
        match self.verbosity() {
            i8::MIN..=-2 => LevelFilter::OFF,
            -1 => LevelFilter::ERROR,
            0 => LevelFilter::INFO,
            1 => LevelFilter::DEBUG,
            2..=i8::MAX => LevelFilter::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use test_log::test;

    #[derive(Debug, Parser)]
    struct Cli {
        #[command(flatten)]
        logging: LoggingArgs,
    }

    #[test]
    fn test_verbosity() {
        let cli = Cli::try_parse_from(["cli", "-vv"]).expect("could not parse");
        assert_eq!(cli.logging.verbosity(), 2);
        let cli = Cli::try_parse_from(["cli", "-q"]).expect("could not parse");
        assert_eq!(cli.logging.verbosity(), -1);
        let cli = Cli::try_parse_from(["cli"]).expect("could not parse");
        assert_eq!(cli.logging.verbosity(), 0);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["cli", "-v", "-q"]).is_err());
    }

    #[test]
    #[cfg(feature = "tracing")]
    fn test_log_level_filter() {
        use tracing::level_filters::LevelFilter;
        let cli = Cli::try_parse_from(["cli", "-qq"]).expect("could not parse");
        assert_eq!(cli.logging.log_level_filter(), LevelFilter::OFF);
        let cli = Cli::try_parse_from(["cli", "-v"]).expect("could not parse");
        assert_eq!(cli.logging.log_level_filter(), LevelFilter::DEBUG);
    }
}
