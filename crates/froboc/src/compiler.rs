//! Responsible with compiling frobo source into markup, styles and script

use crate::codegen::{generate, CompiledOutput};
use frobo_ast_parsing::{parse_source, Parsed};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info_span, warn};

pub mod error;

/// Prelude that can be used in inner modules.
mod prelude {
    use super::*;
    pub use error::{FroboCError, FroboCErrorKind, FroboCResult, SourceDiagnostic};
}

pub use prelude::*;

/// The output of a compilation along with every problem that was recovered from
#[derive(Debug, Clone)]
pub struct Compilation {
    pub output: CompiledOutput,
    pub diagnostics: Vec<SourceDiagnostic>,
}

impl Compilation {
    /// Checks if the source compiled without any problems
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Responsible with compiling frobo source.
///
/// Must be configured using a [CompilerBuilder].
#[derive(Debug, Clone)]
pub struct Compiler {
    strict: bool,
    max_size: Option<usize>,
}

impl Compiler {
    /// Creates the default CompilerBuilder
    #[inline]
    pub fn builder() -> CompilerBuilder {
        CompilerBuilder::new()
    }

    /// Compiles source text.
    ///
    /// Problems in the source are recovered from where possible and returned with the output.
    /// Compilation fails when nothing could be recovered, or on any problem at all if this compiler
    /// is strict.
    pub fn compile(&self, source: &str) -> FroboCResult<Compilation> {
        let _enter = info_span!("compile", strict = self.strict).entered();
        if let Some(max) = self.max_size {
            if source.len() > max {
                return Err(FroboCErrorKind::TooLarge {
                    size: source.len(),
                    max,
                }
                .into());
            }
        }

        let Parsed {
            program,
            lex_errors,
            syntax_errors,
        } = parse_source(source);
        let diagnostics = lex_errors
            .into_iter()
            .map(SourceDiagnostic::from)
            .chain(syntax_errors.into_iter().map(SourceDiagnostic::from))
            .collect::<Vec<_>>();

        if !diagnostics.is_empty() {
            if self.strict || program.is_empty() {
                debug!(
                    "failing with {} diagnostics and {} recovered declarations",
                    diagnostics.len(),
                    program.children.len()
                );
                return Err(diagnostics.into());
            }
            for diagnostic in &diagnostics {
                warn!("recovered from: {diagnostic}");
            }
        }

        let output = generate(&program);
        Ok(Compilation {
            output,
            diagnostics,
        })
    }

    /// Compiles the file at a given path
    pub async fn compile_file(&self, path: &Path) -> FroboCResult<Compilation> {
        let source = tokio::fs::read_to_string(path).await?;
        self.compile(&source)
    }
}

/// Compiles source text with the default configuration, discarding recovered diagnostics
#[inline]
pub fn compile(source: &str) -> FroboCResult<CompiledOutput> {
    Compiler::default()
        .compile(source)
        .map(|compilation| compilation.output)
}

impl Default for Compiler {
    fn default() -> Self {
        Self {
            strict: false,
            max_size: None,
        }
    }
}

/// Builder for creating a [Compiler] instance.
#[derive(Debug, Default)]
pub struct CompilerBuilder {
    /// Fail on any diagnostic
    pub strict: bool,
    /// The largest source, in bytes, that will be compiled
    pub max_size: Option<usize>,
}

impl CompilerBuilder {
    /// Creates a CompilerBuilder with default settings
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether any recovered problem fails compilation
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the largest source, in bytes, that will be compiled
    pub fn max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Builds a [Compiler] instance from this builder
    pub fn build(self) -> Result<Compiler, BuildCompilerError> {
        if self.max_size == Some(0) {
            return Err(BuildCompilerError::ZeroMaxSize);
        }
        Ok(Compiler {
            strict: self.strict,
            max_size: self.max_size,
        })
    }
}

/// An error occurred while building a [Compiler] instance
#[derive(Debug, Error)]
pub enum BuildCompilerError {
    #[error("Compilation can't occur if the maximum source size is 0")]
    ZeroMaxSize,
}
