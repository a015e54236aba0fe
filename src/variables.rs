//! Caller-side named values (the calculator "memory").
//!
//! Bindings can be seeded from a TOML file:
//!
//! ```toml
//! [variables]
//! M = 5.0
//! ```
//!
//! and from `NAME=VALUE` pairs on the command line, which win over the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::model::Variables;

#[derive(Debug, thiserror::Error)]
pub enum VariablesError {
    #[error("Cannot read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Expected NAME=VALUE, got '{0}'")]
    Assignment(String),
    #[error("Invalid value for {name}: '{value}'")]
    Value { name: String, value: String },
}

#[derive(Debug, Deserialize)]
struct VariablesFile {
    #[serde(default)]
    variables: Variables,
}

/// Load bindings from a TOML file
pub fn load(path: &Path) -> Result<Variables, VariablesError> {
    let content = std::fs::read_to_string(path).map_err(|source| VariablesError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&content).map_err(|source| VariablesError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse(content: &str) -> Result<Variables, toml::de::Error> {
    let file: VariablesFile = toml::from_str(content)?;
    Ok(file.variables)
}

/// Parse a `NAME=VALUE` pair
pub fn parse_assignment(text: &str) -> Result<(String, f64), VariablesError> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| VariablesError::Assignment(text.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(VariablesError::Assignment(text.to_string()));
    }
    let value = value.trim();
    let parsed = value.parse::<f64>().map_err(|_| VariablesError::Value {
        name: name.to_string(),
        value: value.to_string(),
    })?;
    Ok((name.to_string(), parsed))
}

/// Bindings from an optional file overlaid with command-line assignments
pub fn resolve(file: Option<&Path>, assignments: &[String]) -> Result<Variables, VariablesError> {
    let mut variables = match file {
        Some(path) => load(path)?,
        None => Variables::new(),
    };
    for assignment in assignments {
        let (name, value) = parse_assignment(assignment)?;
        variables.insert(name, value);
    }
    Ok(variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file() {
        let variables = parse("[variables]\nM = 5\nrate = 0.25\n").unwrap();
        assert_eq!(variables["M"], 5.0);
        assert_eq!(variables["rate"], 0.25);
    }

    #[test]
    fn test_parse_empty_file() {
        assert!(parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        assert!(parse("[variables]\nM = \"five\"\n").is_err());
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("M=5").unwrap(), ("M".to_string(), 5.0));
        assert_eq!(parse_assignment(" x = -1.5 ").unwrap(), ("x".to_string(), -1.5));
        assert!(matches!(
            parse_assignment("M"),
            Err(VariablesError::Assignment(_))
        ));
        assert!(matches!(
            parse_assignment("=3"),
            Err(VariablesError::Assignment(_))
        ));
        assert!(matches!(
            parse_assignment("M=abc"),
            Err(VariablesError::Value { .. })
        ));
    }

    #[test]
    fn test_resolve_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vars.toml");
        std::fs::write(&path, "[variables]\nM = 1\nN = 2\n").unwrap();

        let variables = resolve(Some(&path), &["M=10".to_string()]).unwrap();
        assert_eq!(variables["M"], 10.0);
        assert_eq!(variables["N"], 2.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, VariablesError::Read { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }
}
