//! Compiles one source file and writes what it produced

use eyre::{eyre, WrapErr};
use frobo_tokens::snippet::{render_diagnostic, Severity};
use froboc::{Compiler, FroboCErrorKind, SourceDiagnostic};
use owo_colors::{OwoColorize, Stream};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where and how compiled files are written
#[derive(Debug, Clone)]
pub struct EmitOptions {
    pub output_directory: PathBuf,
    pub bundle: bool,
}

/// Compiles the file at `path`, returning the paths that were written
pub async fn compile_file(
    compiler: &Compiler,
    path: &Path,
    options: &EmitOptions,
) -> eyre::Result<Vec<PathBuf>> {
    let source = tokio::fs::read_to_string(path)
        .await
        .wrap_err_with(|| format!("could not read {path:?}"))?;
    let origin = path.display().to_string();

    let compilation = match compiler.compile(&source) {
        Ok(compilation) => compilation,
        Err(error) => {
            if let FroboCErrorKind::Diagnostics(diagnostics) = error.kind() {
                report(&source, &origin, Severity::Error, diagnostics);
            }
            return Err(error).wrap_err_with(|| format!("could not compile {path:?}"));
        }
    };
    report(&source, &origin, Severity::Warning, &compilation.diagnostics);

    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| eyre!("{path:?} has no file name"))?;
    let output = compilation.output;

    let written = if options.bundle {
        vec![(
            options.output_directory.join(format!("{name}.html")),
            output.to_document(name),
        )]
    } else {
        vec![
            (
                options.output_directory.join(format!("{name}.html")),
                output.markup,
            ),
            (
                options.output_directory.join(format!("{name}.css")),
                output.styles,
            ),
            (
                options.output_directory.join(format!("{name}.js")),
                output.script,
            ),
        ]
    };

    let mut paths = vec![];
    for (target, contents) in written {
        debug!("writing {} bytes to {target:?}", contents.len());
        tokio::fs::write(&target, contents)
            .await
            .wrap_err_with(|| format!("could not write {target:?}"))?;
        paths.push(target);
    }
    info!("compiled {path:?}");
    Ok(paths)
}

/// Prints diagnostics to stderr against the source they were found in
fn report(source: &str, origin: &str, severity: Severity, diagnostics: &[SourceDiagnostic]) {
    for diagnostic in diagnostics {
        let rendered = render_diagnostic(source, origin, severity, diagnostic);
        match severity {
            Severity::Error => eprintln!(
                "{}",
                rendered.if_supports_color(Stream::Stderr, |text| text.red())
            ),
            Severity::Warning => eprintln!(
                "{}",
                rendered.if_supports_color(Stream::Stderr, |text| text.yellow())
            ),
        }
    }
}
