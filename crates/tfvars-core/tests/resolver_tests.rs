//! Load order and conflict tests for the resolver, against real files.

use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use tfvars_core::{Error, NoJobs, Resolver, VariableDefinition, VariableValue};
use tfvars_test_utils::TestWorkspace;

/// Workspace with `a` set by every source below `-var`.
fn layered(with_tfvars: bool, with_auto: bool) -> TestWorkspace {
    let ws = TestWorkspace::new();
    ws.write("main.tf", "variable \"a\" {}\n");
    if with_tfvars {
        ws.write("terraform.tfvars", "a = \"2\"\n");
    }
    if with_auto {
        ws.write("x.auto.tfvars", "a = \"3\"\n");
    }
    ws
}

#[rstest]
#[case(true, true, true, "4")]
#[case(true, true, false, "3")]
#[case(true, false, false, "2")]
#[case(false, false, false, "1")]
#[case(false, true, false, "3")]
fn test_later_sources_win(
    #[case] with_tfvars: bool,
    #[case] with_auto: bool,
    #[case] with_var: bool,
    #[case] expected: &str,
) {
    let ws = layered(with_tfvars, with_auto);
    let mut context = ws.context().with_environment([("TF_VAR_a", "1")]);
    if with_var {
        context = context.with_args(["plan", "-var=a=4"]);
    }

    let resolver = Resolver::new(context, &NoJobs);

    assert_eq!(resolver.get("a", "test").unwrap(), json!(expected));
}

#[test]
fn test_value_sources_are_recorded() {
    let ws = layered(true, true);
    let context = ws
        .context()
        .with_environment([("TF_VAR_b", "env")])
        .with_args(["-var=c=cli"]);

    let resolver = Resolver::new(context, &NoJobs);

    assert_eq!(resolver.value("a").unwrap().unwrap().source(), "x.auto.tfvars");
    assert_eq!(resolver.value("b").unwrap().unwrap().source(), "TF_VAR_b");
    assert_eq!(resolver.value("c").unwrap().unwrap().source(), "-var=c=cli");
    assert_eq!(resolver.definition("a").unwrap().unwrap().source(), "main.tf");
}

#[test]
fn test_auto_files_in_lexical_order() {
    let ws = TestWorkspace::new();
    ws.write("b.auto.tfvars", "x = \"b\"\n")
        .write("a.auto.tfvars", "x = \"a\"\n")
        .write("a.auto.tfvars.json", r#"{"y": "json"}"#);

    let resolver = Resolver::new(ws.context(), &NoJobs);

    assert_eq!(resolver.get("x", "test").unwrap(), json!("b"));
    assert_eq!(resolver.get("y", "test").unwrap(), json!("json"));
}

#[test]
fn test_tfvars_json_beats_tfvars() {
    let ws = TestWorkspace::new();
    ws.write("terraform.tfvars", "x = 1\n")
        .write("terraform.tfvars.json", r#"{"x": 2}"#);

    let resolver = Resolver::new(ws.context(), &NoJobs);

    assert_eq!(resolver.get("x", "test").unwrap(), json!(2));
}

#[test]
fn test_command_line_in_given_order() {
    let ws = TestWorkspace::new();
    ws.write("one.tfvars", "x = \"file\"\n");
    let context = ws
        .context()
        .with_args(["apply", "-var=x=flag", "-var-file=one.tfvars"]);

    let resolver = Resolver::new(context, &NoJobs);

    let value = resolver.value("x").unwrap().unwrap();
    assert_eq!(value.value(), &json!("file"));
    assert_eq!(value.source(), "one.tfvars");
}

#[test]
fn test_quoted_var_value() {
    let ws = TestWorkspace::new();
    let context = ws.context().with_args(["-var='motd=hello world'"]);

    let resolver = Resolver::new(context, &NoJobs);

    assert_eq!(resolver.get("motd", "test").unwrap(), json!("hello world"));
}

#[test]
fn test_defaults_and_missing_names() {
    let ws = TestWorkspace::new();
    ws.write(
        "variables.tf",
        r#"
variable "with_default" {
  type    = number
  default = 10
}

variable "required" {
  type = string
  validation {
    condition     = length(var.required) > 0
    error_message = "Must not be empty."
  }
}
"#,
    );

    let resolver = Resolver::new(ws.context(), &NoJobs);

    assert_eq!(resolver.get("with_default", "test").unwrap(), json!(10));
    assert!(matches!(
        resolver.get("required", "test"),
        Err(Error::NotPopulated { .. })
    ));
    assert!(matches!(
        resolver.get("unknown", "test"),
        Err(Error::NotDefined { .. })
    ));
    assert!(resolver.contains("with_default").unwrap());
    assert!(!resolver.contains("required").unwrap());
}

#[test]
fn test_duplicate_declaration_fails_in_file_order() {
    let ws = TestWorkspace::new();
    ws.write("a.tf", "variable \"x\" {}\n")
        .write("b.tf.json", r#"{"variable": {"x": {}}}"#);

    let resolver = Resolver::new(ws.context(), &NoJobs);

    let err = resolver.load().unwrap_err();
    assert_eq!(
        err.to_string(),
        "b.tf.json cannot define var.x because a.tf already defined it"
    );
}

#[test]
fn test_protected_add_rejects_change() {
    let ws = TestWorkspace::new();
    let context = ws.context().with_args(["-var=size=small"]);
    let resolver = Resolver::new(context, &NoJobs);

    // An equal value is accepted and becomes the recorded source.
    let same = VariableValue::new("size", "small", "size.tfvars.py");
    resolver.add(same, false).unwrap();
    assert_eq!(
        resolver.value("size").unwrap().unwrap().source(),
        "size.tfvars.py"
    );

    let changed = VariableValue::new("size", "large", "other.tfvars.py");
    let err = resolver.add(changed, false).unwrap_err();
    assert_eq!(
        err.to_string(),
        "other.tfvars.py cannot set var.size=\"large\" because size.tfvars.py set var.size=\"small\""
    );
    assert_eq!(resolver.get("size", "test").unwrap(), json!("small"));
}

#[test]
fn test_unprotected_add_replaces() {
    let ws = TestWorkspace::new();
    let context = ws.context().with_args(["-var=size=small"]);
    let resolver = Resolver::new(context, &NoJobs);

    resolver
        .add(VariableValue::new("size", "large", "override"), true)
        .unwrap();

    assert_eq!(resolver.get("size", "test").unwrap(), json!("large"));
}

#[test]
fn test_add_loads_first() {
    let ws = TestWorkspace::new();
    ws.write("main.tf", "variable \"x\" {}\n");
    let resolver = Resolver::new(ws.context(), &NoJobs);

    let err = resolver
        .add(VariableDefinition::new("x", "late.tf.json"), true)
        .unwrap_err();

    assert!(matches!(err, Error::AlreadyDefined { ref old, .. } if old.source() == "main.tf"));
}

#[test]
fn test_null_default_is_a_value() {
    let ws = TestWorkspace::new();
    ws.write("main.tf", "variable \"x\" {\n  default = null\n}\n");

    let resolver = Resolver::new(ws.context(), &NoJobs);

    assert_eq!(resolver.get("x", "test").unwrap(), Value::Null);
}

#[test]
fn test_proxy_attributes_errors() {
    let ws = TestWorkspace::new();
    let resolver = Resolver::new(ws.context(), &NoJobs);
    let vars = resolver.proxy("main.tf.py");

    let err = vars.get("region").unwrap_err();

    assert_eq!(
        err.to_string(),
        "main.tf.py cannot access var.region because it has not been defined"
    );
}

#[test]
fn test_parse_error_names_file() {
    let ws = TestWorkspace::new();
    ws.write("terraform.tfvars", "a = \n");

    let resolver = Resolver::new(ws.context(), &NoJobs);

    let err = resolver.load().unwrap_err();
    assert!(matches!(err, Error::Extract { ref path, .. } if path.ends_with("terraform.tfvars")));
}

#[test]
fn test_failed_load_is_reported_to_every_caller() {
    let ws = TestWorkspace::new();
    ws.write("a.tf", "variable \"x\" {}\n")
        .write("b.tf", "variable \"x\" {}\n")
        .write("c.tf", "variable \"y\" {\n  default = 1\n}\n")
        .write("terraform.tfvars", "y = 2\n");
    let context = ws.context().with_args(["plan", "-var=y=4"]);
    let resolver = Resolver::new(context, &NoJobs);

    let first = resolver.get("y", "test").unwrap_err();
    assert!(matches!(first, Error::AlreadyDefined { .. }));

    let second = resolver.get("y", "test").unwrap_err();
    match second {
        Error::LoadFailed { ref message } => assert_eq!(message, &first.to_string()),
        other => panic!("expected LoadFailed, got {other:?}"),
    }
    assert!(matches!(resolver.contains("y"), Err(Error::LoadFailed { .. })));
    assert!(matches!(resolver.load(), Err(Error::LoadFailed { .. })));
}
