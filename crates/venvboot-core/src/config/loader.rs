//! Environment variable loading with alias fallback chains.
//!
//! The fallback logic lives here so callers never repeat `or_else` chains.
//! Each helper has a `*_in` twin taking an explicit lookup function, which is
//! what the schema structs and the tests use.

use std::env;
use std::path::Path;

/// Load `.env` from the current directory into the process environment.
/// Existing variables are never overridden. Runs at most once per process.
pub fn load_dotenv() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let dir = env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
        load_dotenv_from_dir(&dir);
    });
}

/// Load `<dir>/.env` into the process environment without overriding
/// variables that are already set. Returns how many variables were applied;
/// a missing file applies none.
///
/// Runs before tracing is initialised, so it does not log. Must be called
/// before any other thread is spawned.
pub fn load_dotenv_from_dir(dir: &Path) -> usize {
    let Ok(content) = std::fs::read_to_string(dir.join(".env")) else {
        return 0;
    };
    let mut applied = 0usize;
    for (key, value) in parse_dotenv(&content) {
        if env::var_os(&key).is_none() {
            env::set_var(&key, &value);
            applied += 1;
        }
    }
    applied
}

/// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped, an
/// unquoted trailing `# comment` is stripped, and matching outer quotes are
/// removed. An optional leading `export ` is accepted.
pub fn parse_dotenv(content: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some(eq_pos) = line.find('=') else {
            continue;
        };
        let key = line[..eq_pos].trim();
        let mut value = line[eq_pos + 1..].trim();
        if let Some(hash_pos) = value.find('#') {
            let before_hash = value[..hash_pos].trim_end();
            if !before_hash.contains('"') && !before_hash.contains('\'') {
                value = before_hash;
            }
        }
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value = &value[1..value.len() - 1];
        }
        if !key.is_empty() {
            out.push((key.to_string(), value.to_string()));
        }
    }
    out
}

fn first_set<F>(lookup: &F, primary: &str, aliases: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(primary).or_else(|| aliases.iter().find_map(|a| lookup(a)))
}

/// Read the primary key or the first set alias; fall back to `default`.
/// Empty values count as unset.
pub fn env_or<F>(primary: &str, aliases: &[&str], default: F) -> String
where
    F: FnOnce() -> String,
{
    env_or_in(&|k: &str| env::var(k).ok(), primary, aliases, default)
}

pub fn env_or_in<L, F>(lookup: &L, primary: &str, aliases: &[&str], default: F) -> String
where
    L: Fn(&str) -> Option<String>,
    F: FnOnce() -> String,
{
    env_optional_in(lookup, primary, aliases).unwrap_or_else(default)
}

/// Like [`env_or`] but returns `None` when nothing (non-empty) is set.
pub fn env_optional(primary: &str, aliases: &[&str]) -> Option<String> {
    env_optional_in(&|k: &str| env::var(k).ok(), primary, aliases)
}

pub fn env_optional_in<L>(lookup: &L, primary: &str, aliases: &[&str]) -> Option<String>
where
    L: Fn(&str) -> Option<String>,
{
    // An empty primary does not fall through to the aliases.
    first_set(lookup, primary, aliases).and_then(|s| {
        let s = s.trim();
        if s.is_empty() {
            None
        } else {
            Some(s.to_string())
        }
    })
}

/// Parse a boolean: 0/false/no/off are false, anything else set is true.
pub fn env_bool(primary: &str, aliases: &[&str], default: bool) -> bool {
    env_bool_in(&|k: &str| env::var(k).ok(), primary, aliases, default)
}

pub fn env_bool_in<L>(lookup: &L, primary: &str, aliases: &[&str], default: bool) -> bool
where
    L: Fn(&str) -> Option<String>,
{
    match first_set(lookup, primary, aliases).as_deref() {
        Some(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn test_parse_dotenv_quotes_and_comments() {
        let parsed = parse_dotenv(concat!(
            "# header\n\n",
            "VENV_DIR=.venv # local\n",
            "export PYTHON=\"python3.12\"\n",
            "NAME='a # b'\n",
            "broken line\n",
        ));
        assert_eq!(
            parsed,
            vec![
                ("VENV_DIR".to_string(), ".venv".to_string()),
                ("PYTHON".to_string(), "python3.12".to_string()),
                ("NAME".to_string(), "a # b".to_string()),
            ]
        );
    }

    #[test]
    fn test_load_dotenv_from_dir_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(load_dotenv_from_dir(tmp.path()), 0);
    }

    #[test]
    fn test_env_optional_alias_fallback() {
        let lookup = source(&[("ALIAS_B", "from-b")]);
        assert_eq!(
            env_optional_in(&lookup, "PRIMARY", &["ALIAS_A", "ALIAS_B"]),
            Some("from-b".to_string())
        );
        let lookup = source(&[("PRIMARY", "p"), ("ALIAS_A", "a")]);
        assert_eq!(
            env_optional_in(&lookup, "PRIMARY", &["ALIAS_A"]),
            Some("p".to_string())
        );
    }

    #[test]
    fn test_env_or_empty_is_unset() {
        let lookup = source(&[("PRIMARY", "  ")]);
        assert_eq!(
            env_or_in(&lookup, "PRIMARY", &[], || "default".to_string()),
            "default"
        );
    }

    #[test]
    fn test_env_bool_values() {
        let lookup = source(&[("ON", "yes"), ("OFF", "Off"), ("ZERO", "0")]);
        assert!(env_bool_in(&lookup, "ON", &[], false));
        assert!(!env_bool_in(&lookup, "OFF", &[], true));
        assert!(!env_bool_in(&lookup, "ZERO", &[], true));
        assert!(env_bool_in(&lookup, "MISSING", &[], true));
    }

    #[test]
    fn test_load_dotenv_from_dir_does_not_override() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(".env"),
            "VENVBOOT_TEST_DOTENV_NEW=fresh\nVENVBOOT_TEST_DOTENV_SET=from-file\n",
        )
        .unwrap();
        env::set_var("VENVBOOT_TEST_DOTENV_SET", "from-env");
        assert_eq!(load_dotenv_from_dir(tmp.path()), 1);
        assert_eq!(env::var("VENVBOOT_TEST_DOTENV_NEW").unwrap(), "fresh");
        assert_eq!(env::var("VENVBOOT_TEST_DOTENV_SET").unwrap(), "from-env");
    }
}
