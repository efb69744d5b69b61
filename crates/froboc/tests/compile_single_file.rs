use froboc::reactive::ReactiveState;
use froboc::Compiler;
use frobo_ast_parsing::parse_source;
use serde_json::json;
use test_log::test;
use tracing::info;

mod common;

#[test]
fn test_compile_counter() -> eyre::Result<()> {
    let compilation = Compiler::builder()
        .strict(true)
        .build()?
        .compile(&common::fixture("counter.frobo"))?;
    let output = compilation.output;
    info!("markup:\n{}", output.markup);

    assert!(output.markup.starts_with("<div id=\"Counter\" class=\"frobo-component\">"));
    assert!(output.markup.contains("<h2>Counter</h2>"));
    assert!(output.markup.contains("data-template=\"Count: {count}\" data-vars=\"count\""));
    assert!(output.markup.contains("data-vars=\"doubled\""));
    assert!(output.markup.contains(
        "<button onclick=\"increment()\" style=\"background: #4caf50; color: white\">+</button>"
    ));
    assert!(output.markup.contains("<button onclick=\"add(5)\">+5</button>"));

    assert!(output.script.contains("Frobo.createState({ count: 0 });"));
    assert!(output.script.contains("get() { return state.count * 2; }"));
    assert!(output.script.contains("function add(amount) {\n  state.count = state.count + amount\n}"));
    assert!(output.script.contains("function increment() {\n  state.count = state.count + 1\n}"));
    Ok(())
}

#[test]
fn test_compile_todo() -> eyre::Result<()> {
    let output = froboc::compile(&common::fixture("todo.frobo"))?;

    assert!(output.markup.contains(
        "<input type=\"text\" id=\"input-newTodo\" placeholder=\"What needs doing?\" data-bind=\"newTodo\" />"
    ));
    assert!(output.markup.contains("data-condition=\"state.isLoading\""));
    assert!(output.markup.contains("-else\" style=\"display: none;\">"));
    assert!(output.markup.contains("data-loop=\"todos\" data-item=\"todo\""));
    assert!(output.markup.contains("<p class=\"loop-item\">{{LOOP_ITEM}}</p>"));

    assert!(output.script.contains("todos: [\"Buy milk\",\"Walk dog\"]"));
    assert!(output.script.contains("newTodo: \"\""));
    assert!(output.script.contains("isLoading: false"));
    assert!(output
        .script
        .contains("state.todos = state.todos.concat([state.newTodo]);\n  state.newTodo = \"\""));
    Ok(())
}

#[test]
fn test_compile_profile() -> eyre::Result<()> {
    let output = froboc::compile(&common::fixture("profile.frobo"))?;

    assert!(output
        .markup
        .contains("<!-- Component Card defined with props: title, body -->"));
    assert!(output.markup.contains("<h3>Welcome</h3>"));
    assert!(output.markup.contains("<p>Glad you are here</p>"));
    assert!(output.markup.contains(
        "style=\"padding: 16px; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); display: flex; flex-direction: column; gap: 16px;\""
    ));
    assert!(output
        .markup
        .contains("data-condition=\"(state.user?.age &gt;= 18 &amp;&amp; state.isActive)\""));
    assert!(output.markup.contains("id=\"text-user-name\""));
    assert!(output.markup.contains("data-vars=\"user.name\""));
    assert!(output.markup.contains("data-dynamic-class="));

    assert!(output.script.contains("async function froboFetch("));
    assert!(output
        .script
        .contains("froboFetch(\"/api/user\", \"user\", \"isLoading\", \"error\");"));
    assert!(output.script.contains("Frobo.addWatcher('user', (newVal, oldVal) => {"));
    assert!(output.script.contains("// onMount lifecycle\n  console.log(\"mounted\")"));
    Ok(())
}

#[test]
fn test_reactive_state_of_fixture() {
    let parsed = parse_source(&common::fixture("todo.frobo"));
    let mut state = ReactiveState::from_program(&parsed.program);
    assert_eq!(state.get("todos"), Some(&json!(["Buy milk", "Walk dog"])));
    state.set("newTodo", "Call mom");
    assert_eq!(state.flush(), vec!["newTodo"]);
}
