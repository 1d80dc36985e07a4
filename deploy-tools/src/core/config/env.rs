// Copyright 2026, SolDisc Developers
// For licensing, see licenses/COPYRIGHT.md at the repository root

//! Environment handling for project configuration: `.env` loading and `${VAR}` interpolation.

use std::{io::ErrorKind, path::Path};

use super::ConfigError;

/// Name of the dotenv file loaded from the project root.
pub const DOTENV_FILENAME: &str = ".env";

/// Loads `.env` from the project root into the process environment.
///
/// Variables already present in the environment take precedence. A missing file is not an error.
pub fn hydrate(root: impl AsRef<Path>) -> Result<(), ConfigError> {
    let path = root.as_ref().join(DOTENV_FILENAME);
    match dotenvy::from_path(&path) {
        Ok(()) => {
            debug!(@grey, "loaded environment from {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(ConfigError::Dotenv(err)),
    }
}

/// Replaces every string in a TOML document with its interpolated form.
pub fn interpolate_value(
    value: &mut toml::Value,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<(), ConfigError> {
    match value {
        toml::Value::String(s) => *s = interpolate(s, lookup)?,
        toml::Value::Array(items) => {
            for item in items {
                interpolate_value(item, lookup)?;
            }
        }
        toml::Value::Table(table) => {
            for (_, item) in table.iter_mut() {
                interpolate_value(item, lookup)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Expands `${NAME}`, `${NAME:-default}` and `$$` in `text`.
///
/// Unset and empty variables are equivalent. A `$` not followed by `{` or `$` is kept as is.
pub fn interpolate(
    text: &str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(after) = after.strip_prefix('$') {
            out.push('$');
            rest = after;
            continue;
        }
        let Some(body) = after.strip_prefix('{') else {
            out.push('$');
            rest = after;
            continue;
        };
        let end = body
            .find('}')
            .ok_or_else(|| ConfigError::UnterminatedVar(text.to_string()))?;
        let (name, default) = match body[..end].split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (&body[..end], None),
        };
        if !is_var_name(name) {
            return Err(ConfigError::InvalidVarName(name.to_string()));
        }

        match lookup(name).filter(|value| !value.is_empty()) {
            Some(value) => out.push_str(&value),
            None => match default {
                Some(default) => out.push_str(default),
                None => return Err(ConfigError::MissingVar(name.to_string())),
            },
        }
        rest = &body[end + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

fn is_var_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn expands_required_and_optional() {
        let lookup = env(&[("PROVIDER_RINKEBY", "https://rinkeby.example/v3/abc")]);
        assert_eq!(
            interpolate("${PROVIDER_RINKEBY}", &lookup).unwrap(),
            "https://rinkeby.example/v3/abc"
        );
        assert_eq!(interpolate("${ETHERSCAN_KEY:-}", &lookup).unwrap(), "");
        assert_eq!(
            interpolate("key=${ETHERSCAN_KEY:-none};", &lookup).unwrap(),
            "key=none;"
        );
    }

    #[test]
    fn empty_variable_uses_default() {
        let lookup = env(&[("PRIVATE_KEY", "")]);
        assert_eq!(interpolate("${PRIVATE_KEY:-0x01}", &lookup).unwrap(), "0x01");
        assert!(matches!(
            interpolate("${PRIVATE_KEY}", &lookup),
            Err(ConfigError::MissingVar(name)) if name == "PRIVATE_KEY"
        ));
    }

    #[test]
    fn dollar_escapes_and_literals() {
        let lookup = env(&[]);
        assert_eq!(interpolate("$$HOME", &lookup).unwrap(), "$HOME");
        assert_eq!(interpolate("cost: 5$", &lookup).unwrap(), "cost: 5$");
        assert_eq!(interpolate("$HOME", &lookup).unwrap(), "$HOME");
    }

    #[test]
    fn rejects_malformed_references() {
        let lookup = env(&[]);
        assert!(matches!(
            interpolate("${UNCLOSED", &lookup),
            Err(ConfigError::UnterminatedVar(_))
        ));
        assert!(matches!(
            interpolate("${1BAD}", &lookup),
            Err(ConfigError::InvalidVarName(_))
        ));
        assert!(matches!(
            interpolate("${}", &lookup),
            Err(ConfigError::InvalidVarName(_))
        ));
    }

    #[test]
    fn interpolates_nested_values_only() {
        let lookup = env(&[("KEY", "abc")]);
        let mut value: toml::Value = toml::from_str(
            r#"
            plain = 3
            [networks.main]
            url = "https://node/${KEY}"
            accounts = ["${KEY}", "literal"]
            "#,
        )
        .unwrap();
        interpolate_value(&mut value, &lookup).unwrap();

        let network = &value["networks"]["main"];
        assert_eq!(network["url"].as_str(), Some("https://node/abc"));
        assert_eq!(network["accounts"][0].as_str(), Some("abc"));
        assert_eq!(network["accounts"][1].as_str(), Some("literal"));
        assert_eq!(value["plain"].as_integer(), Some(3));
    }

    #[test]
    fn hydrate_reads_dotenv_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DOTENV_FILENAME),
            "DEPLOY_TOOLS_HYDRATE_TEST=loaded\n",
        )
        .unwrap();
        hydrate(dir.path()).unwrap();
        assert_eq!(
            std::env::var("DEPLOY_TOOLS_HYDRATE_TEST").as_deref(),
            Ok("loaded")
        );
    }

    #[test]
    fn hydrate_without_dotenv_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        hydrate(dir.path()).unwrap();
    }
}
