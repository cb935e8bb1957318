use anyhow::Result;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("Created .modgraphrc.json"));

    let config = test.read_file(".modgraphrc.json")?;
    assert!(config.contains("definitionsRoot"));
    assert!(config.contains("skipUnits"));

    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".modgraphrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(!output.status.success());
    assert!(stderr.contains("already exists"));

    Ok(())
}
