//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand `${VAR}` references in a config value.
///
/// Values without `${` are returned as-is, so bare `$VAR` text is left alone.
/// `field` names the config key in the error when a variable is unset.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env_with_context(value, |name| {
        std::env::var(name)
            .map(Some)
            .map_err(|_| UnsetVar(name.to_owned()))
    })
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.0),
    })?;
    Ok(expanded.into_owned())
}

/// Name of a referenced variable that is not set.
struct UnsetVar(String);
