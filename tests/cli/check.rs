use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_check_summarizes_store() -> Result<()> {
    let test = CliTest::with_locales()?;

    let out = run(test.check_command())?;

    out.assert_code(0);
    assert_eq!(
        out.stdout,
        "\u{2713} Loaded 2 resource files: 2 locales, 4 keys\n"
    );

    Ok(())
}

#[test]
fn test_check_verbose_lists_locales_and_files() -> Result<()> {
    let test = CliTest::with_locales()?;

    let out = run({
        let mut cmd = test.check_command();
        cmd.arg("--verbose");
        cmd
    })?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("de"));
    assert!(out.stdout.contains("3 keys"));
    assert!(out.stderr.contains("en.yml"));
    assert!(out.stderr.contains("No .locbakerc.json found"));

    Ok(())
}

#[test]
fn test_check_missing_resource_directory() -> Result<()> {
    let test = CliTest::new()?;

    let out = run(test.check_command())?;

    out.assert_code(2);
    assert!(out.stderr.starts_with("Error: Failed to load locale resources"));
    assert!(out.stderr.contains("does not exist"));

    Ok(())
}

#[test]
fn test_check_malformed_file() -> Result<()> {
    let test = CliTest::with_locales()?;
    test.write_file("locales/fr.yml", "fr:\n  title: [unclosed\n")?;

    let out = run(test.check_command())?;

    out.assert_code(2);
    assert!(out.stderr.contains("fr.yml"), "stderr: {}", out.stderr);

    Ok(())
}

#[test]
fn test_check_unreadable_file() -> Result<()> {
    let test = CliTest::with_locales()?;
    std::fs::write(test.root().join("locales/fr.yml"), [0xff, 0xfe])?;

    let out = run(test.check_command())?;

    out.assert_code(2);
    assert!(out.stderr.contains("failed to read locale resource"), "stderr: {}", out.stderr);
    assert!(out.stderr.contains("fr.yml"));

    Ok(())
}

#[test]
fn test_check_mixed_array_is_a_type_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/en.yml", "en:\n  values: [1, two]\n")?;

    let out = run(test.check_command())?;

    out.assert_code(2);
    assert!(out.stderr.contains("values"), "stderr: {}", out.stderr);

    Ok(())
}

#[test]
fn test_check_uses_configured_roots() -> Result<()> {
    let test = CliTest::new()?;
    test.write_config(r#"{ "resourceRoots": ["i18n"], "defaultLocale": "de" }"#)?;
    test.write_file("i18n/de.yaml", crate::DE_YAML)?;

    let out = run(test.check_command())?;

    out.assert_code(0);
    assert!(out.stdout.contains("1 resource file: 1 locale, 1 key"));

    Ok(())
}

#[test]
fn test_check_flag_overrides_config() -> Result<()> {
    let test = CliTest::with_locales()?;
    test.write_config(r#"{ "resourceRoots": ["missing"] }"#)?;

    let out = run({
        let mut cmd = test.check_command();
        cmd.args(["--resource-root", "locales"]);
        cmd
    })?;

    out.assert_code(0);

    Ok(())
}

#[test]
fn test_check_default_locale_without_keys() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("locales/de.yml", crate::DE_YAML)?;

    let out = run(test.check_command())?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("default locale 'en' has no keys"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let out = run({
        let mut cmd = test.command();
        cmd.arg("--help");
        cmd
    })?;

    assert_eq!(out.code, Some(0));
    for command in ["check", "get", "init"] {
        assert!(out.stdout.contains(command), "missing {command} in help");
    }

    Ok(())
}
