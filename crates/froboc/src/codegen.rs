//! Turns a parsed program into markup, styles and script.
//!
//! Generation never fails. Problems the parser can't see, such as an instance of a missing
//! component, are written into the markup as comments, and everything else surfaces only when the
//! script runs.

use crate::codegen::markup::MarkupWriter;
use crate::codegen::script::ScriptWriter;
use frobo_ast::Program;
use tracing::{debug, instrument};

mod condition;
mod escape;
mod markup;
mod props;
mod rewrite;
pub mod runtime;
mod script;
pub mod styles;

pub use escape::escape_html;

/// The three artifacts of a compiled program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledOutput {
    pub markup: String,
    pub styles: String,
    pub script: String,
}

impl CompiledOutput {
    /// Wraps the artifacts into one standalone html document
    pub fn to_document(&self, title: &str) -> String {
        format!(
            "<!DOCTYPE html>
<html lang=\"en\">
<head>
  <meta charset=\"UTF-8\">
  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">
  <title>{}</title>
  <style>
body {{ margin: 0; padding: 16px; font-family: system-ui, sans-serif; }}
{}
  </style>
</head>
<body>
{}
<script>
{}
</script>
</body>
</html>
",
            escape_html(title),
            self.styles,
            self.markup,
            self.script
        )
    }
}

/// Generates the artifacts of one program
#[derive(Debug)]
pub struct CodeGenerator<'p> {
    program: &'p Program,
}

impl<'p> CodeGenerator<'p> {
    pub fn new(program: &'p Program) -> Self {
        Self { program }
    }

    #[instrument(name = "generate", skip_all)]
    pub fn generate(&self) -> CompiledOutput {
        let markup = MarkupWriter::new(self.program).program();
        let script = ScriptWriter::new(self.program).program();
        debug!(
            "generated {} bytes of markup and {} bytes of script",
            markup.len(),
            script.len()
        );
        CompiledOutput {
            markup,
            styles: styles::STYLESHEET.to_string(),
            script,
        }
    }
}

/// Generates the artifacts of a program
#[inline]
pub fn generate(program: &Program) -> CompiledOutput {
    CodeGenerator::new(program).generate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use frobo_ast_parsing::parse_source;
    use test_log::test;

    #[test]
    fn test_generate() {
        let parsed = parse_source("component App {\n  text \"Hi\"\n}");
        let output = generate(&parsed.program);
        assert!(output.markup.contains("<p>Hi</p>"));
        assert!(!output.styles.is_empty());
        assert!(output.script.contains("const Frobo"));
    }

    #[test]
    fn test_empty_program() {
        let output = generate(&Program::default());
        assert!(output.markup.is_empty());
        assert!(output.script.contains("Frobo.createState({})"));
    }

    #[test]
    fn test_document() {
        let output = generate(&parse_source("component App {\n  text \"Hi\"\n}").program);
        let document = output.to_document("a <demo>");
        assert!(document.starts_with("<!DOCTYPE html>"));
        assert!(document.contains("<title>a &lt;demo&gt;</title>"));
        assert!(document.contains("<p>Hi</p>"));
        assert!(document.find("<style>") < document.find("<script>"));
    }
}
