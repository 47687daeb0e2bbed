//! Zero-copy field splitting for one line.

use crate::config::ImporterConfig;

/// Why a line could not be split into the expected fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitError {
    /// Field count did not match the schema
    FieldCount { found: usize },
    /// A trailing separator was required but the line does not end in one
    MissingTerminator,
}

/// Split `line` into exactly `N` field views.
///
/// Views borrow from `line`; empty fields between consecutive separators are
/// kept. With `trailing_separator` set, the line must end in one separator,
/// which is dropped before splitting. Nothing is trimmed or unescaped.
pub fn split_fields<'a, const N: usize>(
    line: &'a str,
    config: &ImporterConfig,
) -> Result<[&'a str; N], SplitError> {
    let body = if config.trailing_separator {
        line.strip_suffix(config.separator).ok_or(SplitError::MissingTerminator)?
    } else {
        line
    };

    let mut fields = [""; N];
    let mut found = 0;
    for field in body.split(config.separator) {
        if found < N {
            fields[found] = field;
        }
        found += 1;
    }

    if found != N {
        return Err(SplitError::FieldCount { found });
    }
    Ok(fields)
}
