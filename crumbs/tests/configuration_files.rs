//! Configuration file discovery, layering and re-reading.

use anyhow::{Result, anyhow, ensure};
use crumbs::{CrumbsError, Parameter, Parameters, Provenance};
use rstest::{fixture, rstest};
use serial_test::serial;
use test_helpers::{env, files::ConfigDir, jail::with_jail};

#[fixture]
fn dir() -> ConfigDir {
    ConfigDir::new().unwrap_or_else(|err| panic!("configuration directory: {err}"))
}

fn server_parameters() -> Result<Parameters> {
    let mut parameters = Parameters::new("crumbs");
    parameters.add_parameter(Parameter::new(["--host"]).group("server").default("localhost"))?;
    parameters.add_parameter(Parameter::new(["--port"]).group("server").default("80"))?;
    parameters.add_parameter(Parameter::new(["--log-level"]).default("info"))?;
    Ok(parameters)
}

#[rstest]
#[serial]
fn later_files_override_earlier_files(dir: ConfigDir) -> Result<()> {
    let _scope = env::isolate("CRUMBS_");
    let system = dir.write(
        "system.toml",
        "[default]\nlog-level = \"warn\"\n\n[server]\nhost = \"0.0.0.0\"\nport = 8080\n",
    )?;
    let user = dir.write("user.toml", "[server]\nport = 9090\n")?;

    let mut parameters = server_parameters()?;
    parameters.add_configuration_file(&system)?;
    parameters.add_configuration_file(&user)?;
    parameters.parse_from(["crumbs"])?;

    ensure!(
        parameters.configuration_files().collect::<Vec<_>>() == [system.as_path(), user.as_path()],
        "files are kept in registration order"
    );
    ensure!(parameters.resolve("server.port")? == "9090", "user file wins");
    ensure!(parameters.resolve("server.host")? == "0.0.0.0", "system file fills gaps");
    ensure!(parameters.resolve("log_level")? == "warn", "hyphenated file key");
    Ok(())
}

#[rstest]
#[serial]
fn rereading_picks_up_edits(dir: ConfigDir) -> Result<()> {
    let _scope = env::isolate("CRUMBS_");
    let path = dir.write("crumbs.toml", "[server]\nport = 1000\n")?;
    let mut parameters = server_parameters()?;
    parameters.add_configuration_file(&path)?;
    parameters.parse_from(["crumbs"])?;
    ensure!(parameters.resolve("server.port")? == "1000", "initial value");

    dir.write("crumbs.toml", "[server]\nport = 2000\n")?;
    ensure!(parameters.resolve("server.port")? == "1000", "cached until re-read");
    parameters.read_configuration_files()?;
    ensure!(parameters.resolve("server.port")? == "2000", "re-read value");

    dir.remove("crumbs.toml")?;
    parameters.read_configuration_files()?;
    let port = parameters.resolve_with_provenance("server.port")?;
    ensure!(port.provenance == Provenance::Default, "removed file falls back");
    Ok(())
}

#[rstest]
fn malformed_files_are_reported(dir: ConfigDir) -> Result<()> {
    let path = dir.write("broken.toml", "[server\nport = ")?;
    let mut parameters = server_parameters()?;
    match parameters.add_configuration_file(&path) {
        Err(CrumbsError::File { path: reported, .. }) => {
            ensure!(reported == path, "error names {}", reported.display());
            Ok(())
        }
        other => Err(anyhow!("expected a file error, got {other:?}")),
    }
}

#[rstest]
#[serial]
fn known_arguments_locate_the_configuration_file(dir: ConfigDir) -> Result<()> {
    let _scope = env::isolate("CRUMBS_");
    let path = dir.write("custom.toml", "[server]\nport = 4242\n")?;
    let path_text = path.to_string_lossy().into_owned();
    let args = ["crumbs", "--config", path_text.as_str(), "--server-port-offset", "1", "--help"];

    let mut parameters = Parameters::new("crumbs");
    let fallback = dir.path("missing.toml").to_string_lossy().into_owned();
    parameters.add_parameter(Parameter::new(["--config", "-c"]).default(fallback))?;
    parameters.parse_known_from(args)?;
    ensure!(!parameters.is_parsed(), "partial parses leave the store unparsed");

    let config: String = parameters.get("config")?;
    parameters.add_configuration_file(config)?;
    parameters.add_parameter(Parameter::new(["--port"]).group("server").default("80"))?;

    let err = parameters
        .parse_from(args)
        .err()
        .ok_or_else(|| anyhow!("unknown flags fail a full parse"))?;
    ensure!(!err.is_display_request(), "unexpected display request: {err}");

    parameters.parse_from(["crumbs", "--config", path_text.as_str()])?;
    ensure!(parameters.resolve("server.port")? == "4242", "port from located file");
    Ok(())
}

#[rstest]
#[serial]
fn relative_paths_resolve_against_the_working_directory() -> Result<()> {
    with_jail(|jail| {
        jail.create_file("crumbs.toml", "[default]\nname = \"jailed\"\n")?;
        let mut parameters = Parameters::new("crumbs");
        parameters.add_parameter(Parameter::new(["--name"]).default("free"))?;
        parameters.add_configuration_file("crumbs.toml")?;
        parameters.parse_from(["crumbs"])?;
        ensure!(parameters.resolve("name")? == "jailed", "relative file read");
        Ok(())
    })
}

#[rstest]
fn tables_cannot_be_values(dir: ConfigDir) -> Result<()> {
    let path = dir.write("crumbs.toml", "[default.name]\nfirst = \"a\"\n")?;
    let mut parameters = Parameters::new("crumbs");
    parameters.add_parameter(Parameter::new(["--name"]))?;
    parameters.add_configuration_file(&path)?;
    ensure!(
        matches!(parameters.resolve("name"), Err(CrumbsError::Coercion { .. })),
        "tables are rejected"
    );
    Ok(())
}
