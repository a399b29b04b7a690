//! Unit tests for registration, lookup and precedence.

use std::fs;
use std::path::PathBuf;

use rstest::{fixture, rstest};
use serde_json::json;
use tempfile::TempDir;

use super::Parameters;
use crate::sources::EnvironmentSnapshot;
use crate::{Action, CrumbsError, EnvPrefix, Parameter, Provenance, Source, ValueType};

#[fixture]
fn parameters() -> Parameters {
    let mut parameters = Parameters::new("crumbs");
    parameters
        .add_parameter(Parameter::new(["--foo"]).default("bar"))
        .expect("register foo");
    parameters
}

fn write(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("crumbs.toml");
    fs::write(&path, contents).expect("write configuration file");
    path
}

/// Parse `args` and substitute a fixed environment for the process one.
fn parse_with(parameters: &mut Parameters, args: &[&str], vars: &[(&str, &str)]) {
    parameters.parse_from(args.iter().copied()).expect("parse");
    parameters.environment = EnvironmentSnapshot::from_pairs(vars.iter().copied());
    parameters.reset();
}

#[rstest]
#[case(&["crumbs", "--foo=cli1"], true, &[("CRUMBS_FOO", "env1")], "cli1", Provenance::Argument)]
#[case(&["crumbs"], true, &[("CRUMBS_FOO", "env1")], "file1", Provenance::Configuration)]
#[case(&["crumbs"], false, &[("CRUMBS_FOO", "env1")], "env1", Provenance::Environment)]
#[case(&["crumbs"], false, &[], "bar", Provenance::Default)]
fn precedence(
    mut parameters: Parameters,
    #[case] args: &[&str],
    #[case] in_file: bool,
    #[case] vars: &[(&str, &str)],
    #[case] expected: &str,
    #[case] provenance: Provenance,
) {
    let dir = tempfile::tempdir().expect("temporary directory");
    let contents = if in_file { "[default]\nfoo = \"file1\"\n" } else { "" };
    parameters
        .add_configuration_file(write(&dir, contents))
        .expect("configuration file");
    parse_with(&mut parameters, args, vars);

    let resolved = parameters.resolve_with_provenance("foo").expect("resolve");
    assert_eq!(resolved.value, json!(expected));
    assert_eq!(resolved.provenance, provenance);
}

#[rstest]
fn duplicate_names_are_rejected(mut parameters: Parameters) {
    let err = parameters
        .add_parameter(Parameter::new(["--other"]).dest("foo"))
        .expect_err("duplicate");
    assert!(matches!(err, CrumbsError::DuplicateParameter { ref name } if name == "default.foo"));
}

#[rstest]
#[case(Parameter::new(["--foo"]).dest("other"))]
#[case(Parameter::new(["--other", "-h"]))]
#[case(Parameter::new(["--help"]).dest("assist"))]
fn conflicting_flags_are_rejected(mut parameters: Parameters, #[case] parameter: Parameter) {
    let err = parameters.add_parameter(parameter).expect_err("conflict");
    assert!(matches!(err, CrumbsError::InvalidParameter { .. }));
}

#[test]
fn version_flags_are_reserved_when_versioned() {
    let mut parameters = Parameters::builder("crumbs").version("1.0.0").build();
    assert!(parameters.add_parameter(Parameter::new(["-V"]).dest("verbose")).is_err());

    let mut unversioned = Parameters::new("crumbs");
    assert!(unversioned.add_parameter(Parameter::new(["-V"]).dest("verbose")).is_ok());
}

#[test]
fn positionals_cannot_follow_open_positionals() {
    let mut parameters = Parameters::new("crumbs");
    parameters
        .add_parameter(Parameter::new(["inputs"]).nargs(crate::Nargs::OneOrMore))
        .expect("first positional");
    let err = parameters
        .add_parameter(Parameter::new(["output"]))
        .expect_err("ambiguous positional");
    assert!(matches!(err, CrumbsError::InvalidParameter { .. }));
}

#[test]
fn grouped_flags_do_not_collide() {
    let mut parameters = Parameters::new("crumbs");
    parameters
        .add_parameter(Parameter::new(["--bar"]).group("foo"))
        .expect("foo.bar");
    parameters
        .add_parameter(Parameter::new(["--bar"]))
        .expect("default.bar");
    assert_eq!(
        parameters.names().collect::<Vec<_>>(),
        vec!["foo.bar", "default.bar"]
    );
    assert_eq!(
        parameters.groups().collect::<Vec<_>>(),
        vec!["default", "foo"]
    );
}

#[rstest]
#[case("foo")]
#[case("default.foo")]
fn lookups_normalise_names(parameters: Parameters, #[case] name: &str) {
    assert!(parameters.contains(name));
}

#[rstest]
fn unknown_names_are_errors(parameters: Parameters) {
    assert!(!parameters.contains("missing"));
    let err = parameters.resolve("missing").expect_err("unknown");
    assert!(matches!(err, CrumbsError::UnknownParameter { ref name } if name == "missing"));
}

#[test]
fn hyphenated_names_resolve_with_either_separator() {
    let mut parameters = Parameters::new("crumbs");
    parameters
        .add_parameter(Parameter::new(["--log-level"]).group("my-group").default("info"))
        .expect("register");
    parse_with(&mut parameters, &["crumbs", "--my-group-log-level", "debug"], &[]);

    for name in ["my_group.log_level", "my-group.log-level", "my_group.log-level"] {
        assert_eq!(parameters.resolve(name).expect("resolve"), json!("debug"), "{name}");
    }
}

#[rstest]
fn resolution_is_cached_until_reset(mut parameters: Parameters) {
    parse_with(&mut parameters, &["crumbs"], &[("CRUMBS_FOO", "first")]);
    assert_eq!(parameters.resolve("foo").expect("resolve"), json!("first"));

    parameters.environment = EnvironmentSnapshot::from_pairs([("CRUMBS_FOO", "second")]);
    assert_eq!(parameters.resolve("foo").expect("cached"), json!("first"));

    parameters.reset();
    assert_eq!(parameters.resolve("foo").expect("fresh"), json!("second"));
}

#[rstest]
fn parse_known_leaves_store_unparsed(mut parameters: Parameters) {
    parameters
        .parse_known_from(["crumbs", "--foo", "early", "--later", "value", "--help"])
        .expect("partial parse");
    assert!(!parameters.is_parsed());
    assert_eq!(parameters.resolve("foo").expect("resolve"), json!("early"));

    parameters.parse_from(["crumbs"]).expect("full parse");
    assert!(parameters.is_parsed());
}

#[test]
fn only_restricts_sources() {
    let mut parameters = Parameters::new("crumbs");
    parameters
        .add_parameter(
            Parameter::new(["--token"])
                .only([Source::Environment])
                .default("none"),
        )
        .expect("register");
    let dir = tempfile::tempdir().expect("temporary directory");
    parameters
        .add_configuration_file(write(&dir, "[default]\ntoken = \"file\"\n"))
        .expect("configuration file");

    parse_with(&mut parameters, &["crumbs"], &[("CRUMBS_TOKEN", "secret")]);
    assert_eq!(parameters.resolve("token").expect("resolve"), json!("secret"));
    assert!(
        parameters
            .parse_from(["crumbs", "--token", "cli"])
            .is_err()
    );
}

#[rstest]
#[case(EnvPrefix::Program, "CRUMBS_PORT")]
#[case(EnvPrefix::Custom(String::from("svc")), "SVC_PORT")]
#[case(EnvPrefix::None, "PORT")]
fn environment_prefixes(#[case] prefix: EnvPrefix, #[case] variable: &str) {
    let mut parameters = Parameters::builder("crumbs").env_prefix(prefix).build();
    parameters
        .add_parameter(
            Parameter::new(["--port"])
                .value_type(ValueType::Integer)
                .default(80),
        )
        .expect("register");
    parse_with(&mut parameters, &["crumbs"], &[(variable, "8080")]);
    assert_eq!(parameters.get::<u16>("port").expect("port"), 8080);
}

#[test]
fn defaults_follow_actions() {
    let mut parameters = Parameters::new("crumbs");
    for parameter in [
        Parameter::new(["--debug"]).action(Action::StoreTrue),
        Parameter::new(["--no-color"]).action(Action::StoreFalse),
        Parameter::new(["--tag"]).action(Action::Append),
        Parameter::new(["--verbose", "-v"]).action(Action::Count),
    ] {
        parameters.add_parameter(parameter).expect("register");
    }
    parse_with(&mut parameters, &["crumbs", "-vv"], &[("CRUMBS_TAG", "a, b")]);

    assert_eq!(parameters.resolve("debug").expect("debug"), json!(false));
    assert_eq!(parameters.resolve("no_color").expect("no_color"), json!(true));
    assert_eq!(parameters.resolve("tag").expect("tag"), json!(["a", "b"]));
    assert_eq!(parameters.resolve("verbose").expect("verbose"), json!(2));
}

#[rstest]
fn coercion_failures_name_the_parameter(mut parameters: Parameters) {
    parameters
        .add_parameter(Parameter::new(["--port"]).value_type(ValueType::Integer))
        .expect("register");
    parse_with(&mut parameters, &["crumbs", "--port", "eighty"], &[]);
    let err = parameters.resolve("port").expect_err("not an integer");
    assert!(matches!(err, CrumbsError::Coercion { ref name, ref value, .. }
        if name == "default.port" && value == "eighty"));
}

#[rstest]
fn extraction_failures_are_reported(mut parameters: Parameters) {
    parse_with(&mut parameters, &["crumbs"], &[]);
    let err = parameters.get::<u32>("foo").expect_err("not a number");
    assert!(matches!(err, CrumbsError::Extraction { ref name, .. } if name == "default.foo"));
}

#[rstest]
fn registration_after_parse_is_allowed(mut parameters: Parameters) {
    parse_with(&mut parameters, &["crumbs"], &[("CRUMBS_LATE", "env")]);
    parameters
        .add_parameter(Parameter::new(["--late"]))
        .expect("late registration");
    assert_eq!(parameters.resolve("late").expect("resolve"), json!("env"));
}

#[test]
fn default_parameters_named_after_groups_fall_through() {
    let mut parameters = Parameters::new("crumbs");
    parameters
        .add_parameter(Parameter::new(["--server"]).default("primary"))
        .expect("default.server");
    parameters
        .add_parameter(Parameter::new(["--port"]).group("server"))
        .expect("server.port");
    let dir = tempfile::tempdir().expect("temporary directory");
    parameters
        .add_configuration_file(write(&dir, "[server]\nport = 1\n"))
        .expect("configuration file");
    parse_with(&mut parameters, &["crumbs"], &[]);

    assert_eq!(parameters.resolve("server.port").expect("port"), json!("1"));
    let server = parameters.resolve_with_provenance("server").expect("server");
    assert_eq!(server.value, json!("primary"));
    assert_eq!(server.provenance, Provenance::Default);
}

#[test]
fn failed_rereads_leave_resolution_consistent() {
    let mut parameters = Parameters::new("crumbs");
    for name in ["--x", "--y"] {
        parameters
            .add_parameter(Parameter::new([name]))
            .expect("register");
    }
    let dir = tempfile::tempdir().expect("temporary directory");
    let values = dir.path().join("values.toml");
    let broken = dir.path().join("broken.toml");
    fs::write(&values, "[default]\nx = \"old\"\ny = \"old\"\n").expect("write values");
    fs::write(&broken, "").expect("write broken");
    parameters.add_configuration_file(&values).expect("values");
    parameters.add_configuration_file(&broken).expect("broken");
    parse_with(&mut parameters, &["crumbs"], &[]);
    assert_eq!(parameters.resolve("x").expect("x"), json!("old"));

    fs::write(&values, "[default]\nx = \"new\"\ny = \"new\"\n").expect("rewrite values");
    fs::write(&broken, "[default\n").expect("break file");
    assert!(parameters.read_configuration_files().is_err());

    assert_eq!(parameters.resolve("x").expect("x"), json!("old"));
    assert_eq!(parameters.resolve("y").expect("y"), json!("old"));
}
