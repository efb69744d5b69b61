//! the args for running froboc

use frobo_cli_common::LoggingArgs;
use std::path::PathBuf;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Compiles frobo source into html, css and javascript")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    /// Specify which source files to compile
    #[clap(required = true, value_name="source file", value_hint=clap::ValueHint::FilePath)]
    pub files: Vec<PathBuf>,
    /// Specify where to place generated files
    #[clap(short = 'd', default_value = ".")]
    pub output_directory: PathBuf,
    /// Write one standalone html document per file instead of separate html, css and js files
    #[clap(long)]
    pub bundle: bool,
    /// Fail on any error in the source, even ones that could be recovered from
    #[clap(long)]
    pub strict: bool,
    /// The largest source file, in bytes, that will be compiled
    #[clap(long, env = "FROBOC_MAX_SIZE", default_value_t = 100_000)]
    pub max_size: usize,
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::Path;
    use test_log::test;

    #[test]
    fn test_args_parsing() {
        let test = "froboc file.frobo";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.files[0], Path::new("file.frobo"));
        assert_eq!(args.output_directory, Path::new("."));
        assert!(!args.bundle);
        assert!(!args.strict);
    }

    #[test]
    fn test_many_files_and_flags() {
        let test = "froboc a.frobo b.frobo -d out --bundle --strict --max-size 10 -vv";
        let args = Args::try_parse_from(test.split(" ")).expect("could not parse test string");
        assert_eq!(args.files, vec![PathBuf::from("a.frobo"), PathBuf::from("b.frobo")]);
        assert_eq!(args.output_directory, Path::new("out"));
        assert!(args.bundle);
        assert!(args.strict);
        assert_eq!(args.max_size, 10);
        assert_eq!(args.logging().verbosity(), 2);
    }

    #[test]
    fn test_files_are_required() {
        assert!(Args::try_parse_from(["froboc"]).is_err());
    }
}
