//! `${VAR}` expansion for string settings.
//!
//! - `${VAR}` expands to the value of VAR and fails when VAR is unset
//! - `${VAR:-default}` falls back to `default` when VAR is unset
//!
//! Only braced references are expanded: bare `$VAR` outside `${...}` is
//! copied through, even when the same value also holds a braced reference,
//! so URLs containing `$` survive as-is. An unterminated `${` is kept literally.

use crate::ConfigError;

/// Expand environment variable references in `value`.
///
/// `field` is the dotted config key, used only for error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(len) = reference_len(tail) else {
            out.push_str(tail);
            return Ok(out);
        };

        let expanded =
            shellexpand::env_with_context(&tail[..len], |name| std::env::var(name).map(Some))
                .map_err(|e| ConfigError::EnvVar {
                    field: field.to_owned(),
                    message: format!("${{{}}} not set", e.var_name),
                })?;
        out.push_str(&expanded);
        rest = &tail[len..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Byte length of the `${...}` reference at the start of `s`, including
/// nested braces in a default value.
fn reference_len(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in s.bytes().enumerate() {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}
