use crate::args::Args;
use crate::emit::{compile_file, EmitOptions};
use clap::Parser;
use eyre::eyre;
use froboc::Compiler;
use std::io;
use std::io::{stderr, stdout, Stderr, StderrLock, Stdout, StdoutLock};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::metadata::LevelFilter;
use tracing::{debug, error, error_span, info, trace, Instrument, Level, Metadata};
use tracing_error::ErrorLayer;
use tracing_subscriber::fmt::{format, MakeWriter};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{Layer, Registry};

mod args;
mod emit;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.logging().log_level_filter())?;
    trace!("starting froboc with args: {args:?}");
    debug!("froboc version: {}", env!("CARGO_PKG_VERSION"));

    let compiler = Arc::new(
        Compiler::builder()
            .strict(args.strict)
            .max_size(args.max_size)
            .build()?,
    );
    let options = Arc::new(EmitOptions {
        output_directory: args.output_directory.clone(),
        bundle: args.bundle,
    });
    tokio::fs::create_dir_all(&options.output_directory).await?;

    let mut join_set = JoinSet::new();
    for path in args.files.iter().cloned() {
        let compiler = compiler.clone();
        let options = options.clone();
        let path_clone = path.clone();
        join_set.spawn(
            async move { compile_file(&compiler, &path_clone, &options).await }
                .instrument(error_span!("compile", path=?path)),
        );
    }

    let mut failed = 0_usize;
    while let Some(joined) = join_set.join_next().await {
        match joined? {
            Ok(written) => debug!("wrote {written:?}"),
            Err(e) => {
                error!("{e:?}");
                failed += 1;
            }
        }
    }
    if failed > 0 {
        return Err(eyre!(
            "{failed} of {} files failed to compile",
            args.files.len()
        ));
    }
    info!("compiled {} files", args.files.len());

    Ok(())
}

struct MyWriter {
    stdout: Stdout,
    stderr: Stderr,
}

enum StdioLock<'a> {
    Stdout(StdoutLock<'a>),
    Stderr(StderrLock<'a>),
}

impl<'a> io::Write for StdioLock<'a> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            StdioLock::Stdout(stdout) => stdout.write(buf),
            StdioLock::Stderr(stderr) => stderr.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            StdioLock::Stdout(stdout) => stdout.flush(),
            StdioLock::Stderr(stderr) => stderr.flush(),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            StdioLock::Stdout(stdout) => stdout.write_all(buf),
            StdioLock::Stderr(stderr) => stderr.write_all(buf),
        }
    }
}

impl<'a> MakeWriter<'a> for MyWriter {
    type Writer = StdioLock<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        StdioLock::Stdout(self.stdout.lock())
    }

    /// warnings and errors go to stderr
    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        if meta.level() <= &Level::WARN {
            StdioLock::Stderr(self.stderr.lock())
        } else {
            StdioLock::Stdout(self.stdout.lock())
        }
    }
}

fn init_logging(level_filter: LevelFilter) -> eyre::Result<()> {
    let registry = Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format().with_thread_ids(true))
                .with_writer(MyWriter {
                    stdout: stdout(),
                    stderr: stderr(),
                })
                .with_filter(level_filter),
        )
        .with(ErrorLayer::default());

    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}
