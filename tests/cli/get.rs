use anyhow::Result;

use crate::{CliTest, run};

#[test]
fn test_get_exact_key() -> Result<()> {
    let test = CliTest::with_locales()?;

    let out = run(test.get_command("Greeting.title"))?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_eq!(out.stdout, "Hello\n");

    Ok(())
}

#[test]
fn test_get_falls_back_to_base_language() -> Result<()> {
    let test = CliTest::with_locales()?;

    let out = run({
        let mut cmd = test.get_command("Greeting.farewell");
        cmd.args(["--locale", "en-GB", "--verbose"]);
        cmd
    })?;

    assert_eq!(out.code, Some(0));
    assert_eq!(out.stdout, "Bye\n");
    assert!(out.stderr.contains("via base language"), "stderr: {}", out.stderr);

    Ok(())
}

#[test]
fn test_get_regional_locale_prefers_its_own_language() -> Result<()> {
    let test = CliTest::with_locales()?;

    let out = run({
        let mut cmd = test.get_command("Greeting.title");
        cmd.args(["--locale", "de_AT"]);
        cmd
    })?;

    assert_eq!(out.stdout, "Hallo\n");

    Ok(())
}

#[test]
fn test_get_array_and_element() -> Result<()> {
    let test = CliTest::with_locales()?;

    let all = run(test.get_command("Menu.items"))?;
    assert_eq!(all.stdout, "One\nTwo\nThree\n");

    let third = run({
        let mut cmd = test.get_command("Menu.items");
        cmd.args(["--index", "2"]);
        cmd
    })?;
    assert_eq!(third.stdout, "Three\n");

    Ok(())
}

#[test]
fn test_get_miss_is_a_failure() -> Result<()> {
    let test = CliTest::with_locales()?;

    let out = run({
        let mut cmd = test.get_command("Menu.items");
        cmd.args(["--index", "9"]);
        cmd
    })?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.is_empty());
    assert!(out.stderr.contains("no value for 'Menu.items[9]' in locale 'en'"));

    Ok(())
}
