use frobo_ast::Node;
use frobo_ast_parsing::parse_source;
use froboc::{compile, Compiler};
use frobo_tokens::location::Located;
use test_log::test;

#[test]
fn test_minimal_component() -> eyre::Result<()> {
    let output = compile("component App { text \"Hi\" }")?;
    assert!(output.markup.contains("<p>Hi</p>"));
    assert!(!output.styles.is_empty());
    assert!(output.script.contains("const Frobo = {"));
    assert!(output.script.contains("console.log(\"Frobo app loaded!\");"));
    Ok(())
}

#[test]
fn test_text_is_escaped() -> eyre::Result<()> {
    let output = compile("component App {\n  text \"<script>alert(1)</script>\"\n}")?;
    assert!(output.markup.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!output.markup.contains("<script>"));
    Ok(())
}

#[test]
fn test_state_literals() -> eyre::Result<()> {
    let output = compile(
        "component App {\n  state count = 0\n  state name = \"x\"\n  state flag = true\n  state user = null\n}",
    )?;
    for expected in ["count: 0", "name: \"x\"", "flag: true", "user: null"] {
        assert!(output.script.contains(expected), "missing {expected}");
    }
    Ok(())
}

#[test]
fn test_condition_references_state() -> eyre::Result<()> {
    let output = compile(
        "component App {\n  state a = true\n  state b = true\n  if a && b {\n    text \"both\"\n  }\n}",
    )?;
    assert!(output.markup.contains("data-condition=\"(state.a &amp;&amp; state.b)\""));
    Ok(())
}

#[test]
fn test_negated_and_or_conditions() -> eyre::Result<()> {
    let output = compile(
        "component App {\n  state a = true\n  state b = false\n  state isDisabled = false\n  if a || b {\n    text \"one\"\n  }\n  if !isDisabled {\n    text \"enabled\"\n  }\n}",
    )?;
    assert!(output.markup.contains("(state.a || state.b)"));
    assert!(output.markup.contains("!(state.isDisabled)"));
    Ok(())
}

#[test]
fn test_parameters_shadow_state() -> eyre::Result<()> {
    let output = compile(
        "component App {\n  state value = 10\n}\n\nfunction setValue(value) {\n  result = value\n}",
    )?;
    assert!(output.script.contains("function setValue(value) {"));
    assert!(output.script.contains("state.result = value"));
    assert!(!output.script.contains("state.value"));
    Ok(())
}

#[test]
fn test_reads_in_strings_expressions() -> eyre::Result<()> {
    let output = compile(
        "component App {\n  state name = \"Ann\"\n  state age = 3\n  state message = \"\"\n}\n\nfunction describe() {\n  message = name + \" is \" + age\n}",
    )?;
    assert!(output
        .script
        .contains("state.message = state.name + \" is \" + state.age"));
    Ok(())
}

#[test]
fn test_prop_substitution() -> eyre::Result<()> {
    let output = compile(
        "component Card {\n  props title\n  heading \"{title}\"\n  text \"About {title}\"\n}\n\ncomponent App {\n  Card title=\"Hi\"\n}",
    )?;
    assert!(output.markup.contains("<h1>Hi</h1>"));
    assert!(output.markup.contains("<p>About Hi</p>"));
    assert!(!output.markup.contains("{title}"));
    Ok(())
}

#[test]
fn test_recovery_boundary() -> eyre::Result<()> {
    let source = "state = \n\ncomponent App {\n  text \"Hi\"\n}";
    let parsed = parse_source(source);
    assert_eq!(parsed.syntax_errors.len(), 1);
    assert_eq!(parsed.syntax_errors[0].location().line(), 1);
    assert!(matches!(parsed.program.children.as_slice(), [Node::Component(c)] if c.name == "App"));

    let compilation = Compiler::default().compile(source)?;
    assert_eq!(compilation.diagnostics.len(), 1);
    assert!(compilation.output.markup.contains("<p>Hi</p>"));
    Ok(())
}

#[test]
fn test_button_arguments_are_not_doubled() -> eyre::Result<()> {
    let output = compile(
        "component App {\n  button \"Add\" onClick=add(5)\n  button \"Sum\" onClick=addNumbers(5, 3)\n}",
    )?;
    assert!(output.markup.contains("onclick=\"add(5)\""));
    assert!(output.markup.contains("onclick=\"addNumbers(5, 3)\""));
    Ok(())
}

#[test]
fn test_member_interpolation() -> eyre::Result<()> {
    let output = compile(
        "component App {\n  state user = { name: \"Ann\", age: 3 }\n  state count = 0\n  text \"Count: {count}\"\n  if user.age > 2 {\n    text \"{user.name}\"\n  }\n}",
    )?;
    assert!(output.markup.contains("Count: {count}"));
    assert!(output.markup.contains("data-condition=\"state.user?.age &gt; 2\""));
    assert!(output.script.contains("user: {\"name\":\"Ann\",\"age\":3}"));
    Ok(())
}

#[test]
fn test_strict_mode() {
    let compiler = Compiler::builder().strict(true).build().unwrap();
    let error = compiler
        .compile("component App {\n  text \"Hi\" @\n}")
        .unwrap_err();
    assert_eq!(error.diagnostics().len(), 1);
    assert!(Compiler::default()
        .compile("component App {\n  text \"Hi\" @\n}")
        .is_ok());
}
