use anyhow::Result;

use crate::CliTest;

const GAME_UNIT: &str = r#"{
    "modules": [
        { "name": "Alpha", "publicDependencies": ["Core"] },
        { "name": "Beta", "privateDependencies": ["Core"] },
        { "name": "Gamma", "publicDependencies": ["Core"], "supportedPlatforms": ["PS5"] }
    ]
}"#;

#[test]
fn test_end_to_end_example() -> Result<()> {
    let test = CliTest::with_unit("Game", GAME_UNIT)?;

    let output = test.graph_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(output.status.success());
    assert!(stdout.contains("Wrote 2 edges from 2 modules (1 unit scanned)"));
    assert!(stderr.contains(
        "warning: failed to build module 'Gamma': platform 'Win64' is not supported (supported: PS5)"
    ));
    assert_eq!(test.read_file("ModuleDependency.txt")?, "Alpha-->Core\nBeta-.->Core\n");

    Ok(())
}

#[test]
fn test_artifact_is_byte_identical_across_runs() -> Result<()> {
    let test = CliTest::with_unit("Game", GAME_UNIT)?;

    assert!(test.graph_command().output()?.status.success());
    let first = test.read_file("ModuleDependency.txt")?;

    assert!(test.graph_command().output()?.status.success());
    let second = test.read_file("ModuleDependency.txt")?;

    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_skip_prefixed_unit_is_never_parsed() -> Result<()> {
    let test = CliTest::with_unit("Game", r#"{ "modules": [{ "name": "Alpha", "publicDependencies": ["Core"] }] }"#)?;

    // Invalid JSON: proves the skipped unit is not even read.
    test.write_unit("System.Foo", "{ not json at all")?;

    let output = test.graph_command().output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(output.status.success());
    assert!(!stderr.contains("System.Foo"));
    assert_eq!(test.read_file("ModuleDependency.txt")?, "Alpha-->Core\n");

    Ok(())
}

#[test]
fn test_exclude_module_flag() -> Result<()> {
    let test = CliTest::with_unit(
        "Game",
        r#"{
            "modules": [
                { "name": "ModuleGraph", "publicDependencies": ["Core"] },
                { "name": "Alpha", "publicDependencies": ["Core"] }
            ]
        }"#,
    )?;

    let output = test
        .graph_command()
        .args(["--exclude-module", "ModuleGraph"])
        .output()?;

    assert!(output.status.success());
    assert_eq!(test.read_file("ModuleDependency.txt")?, "Alpha-->Core\n");

    Ok(())
}

#[test]
fn test_empty_definitions_directory_writes_empty_artifact() -> Result<()> {
    let test = CliTest::new()?;
    std::fs::create_dir(test.root().join("modules"))?;

    let output = test.graph_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("Wrote 0 edges from 0 modules (0 units scanned)"));
    assert_eq!(test.read_file("ModuleDependency.txt")?, "");

    Ok(())
}

#[test]
fn test_missing_definitions_directory_is_fatal() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.graph_command().output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(!output.status.success());
    assert!(stderr.contains("Definitions directory"));

    Ok(())
}

#[test]
fn test_malformed_unit_is_a_warning_not_a_failure() -> Result<()> {
    let test = CliTest::with_unit("Game", r#"{ "modules": [{ "name": "Alpha", "publicDependencies": ["Core"] }] }"#)?;
    test.write_unit("Broken", "{ not json")?;

    let output = test.graph_command().output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(output.status.success());
    assert!(stderr.contains("warning: failed to scan unit 'Broken'"));
    assert_eq!(test.read_file("ModuleDependency.txt")?, "Alpha-->Core\n");

    Ok(())
}

#[test]
fn test_config_file_sets_roots_and_output() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".modgraphrc.json",
        r#"{
            "definitionsRoot": "./build/units",
            "output": "./docs/graph.mmd"
        }"#,
    )?;
    test.write_file(
        "build/units/Game.modules.json",
        r#"{ "modules": [{ "name": "Alpha", "publicDependencies": ["Core"] }] }"#,
    )?;
    std::fs::create_dir(test.root().join("docs"))?;

    let output = test.graph_command().output()?;

    assert!(output.status.success());
    assert_eq!(test.read_file("docs/graph.mmd")?, "Alpha-->Core\n");

    Ok(())
}

#[test]
fn test_output_flag_overrides_config() -> Result<()> {
    let test = CliTest::with_unit("Game", r#"{ "modules": [{ "name": "Alpha", "publicDependencies": ["Core"] }] }"#)?;
    test.write_file(".modgraphrc.json", r#"{ "output": "./ignored.txt" }"#)?;

    let output = test.graph_command().args(["--output", "chosen.txt"]).output()?;

    assert!(output.status.success());
    assert_eq!(test.read_file("chosen.txt")?, "Alpha-->Core\n");
    assert!(test.read_file("ignored.txt").is_err());

    Ok(())
}

#[test]
fn test_program_entries_contribute_nothing() -> Result<()> {
    let test = CliTest::with_unit(
        "Tools",
        r#"{
            "modules": [
                { "name": "BuildTool", "kind": "program", "publicDependencies": ["Core"] }
            ]
        }"#,
    )?;

    let output = test.graph_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(output.status.success());
    assert!(stdout.contains("Wrote 0 edges from 0 modules"));
    assert!(!stderr.contains("warning:"));
    assert_eq!(test.read_file("ModuleDependency.txt")?, "");

    Ok(())
}

#[test]
fn test_platform_flag_reaches_descriptors() -> Result<()> {
    let test = CliTest::with_unit(
        "Game",
        r#"{
            "modules": [
                { "name": "ServerOnly", "publicDependencies": ["Net"], "supportedPlatforms": ["Linux"] }
            ]
        }"#,
    )?;

    let output = test.graph_command().args(["--platform", "Linux"]).output()?;

    assert!(output.status.success());
    assert_eq!(test.read_file("ModuleDependency.txt")?, "ServerOnly-->Net\n");

    Ok(())
}

#[test]
fn test_units_discovered_in_name_order() -> Result<()> {
    let test = CliTest::new()?;
    test.write_unit("Zeta", r#"{ "modules": [{ "name": "Z", "publicDependencies": ["A"] }] }"#)?;
    test.write_unit("Alpha", r#"{ "modules": [{ "name": "A", "publicDependencies": ["B"] }] }"#)?;

    let output = test.graph_command().output()?;

    assert!(output.status.success());
    assert_eq!(test.read_file("ModuleDependency.txt")?, "A-->B\nZ-->A\n");

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("graph"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("init"));

    Ok(())
}
