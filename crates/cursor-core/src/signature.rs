//! Function signatures: `name(codes)` strings identifying factory overloads.
//!
//! Each argument is one type code character:
//!
//! | code | type        |
//! |------|-------------|
//! | `b`  | `BOOLEAN`   |
//! | `i`  | `INT`       |
//! | `l`  | `LONG`      |
//! | `d`  | `DOUBLE`    |
//! | `s`  | `STRING`    |
//! | `t`  | `TIMESTAMP` |
//!
//! So `long_sequence(l)` names a one-argument function taking a long.

use crate::function::FunctionError;
use crate::types::ColumnType;
use std::fmt;

/// Parsed, normalized function signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    name: String,
    arg_types: Vec<ColumnType>,
}

impl Signature {
    /// Parse a signature string such as `"long_sequence(l)"`.
    ///
    /// The name is lowercased; whitespace around the name and between
    /// argument codes is ignored.
    pub fn parse(signature: &str) -> Result<Self, FunctionError> {
        let invalid = |reason: &str| FunctionError::InvalidSignature {
            signature: signature.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = signature.trim();
        let open = trimmed.find('(').ok_or_else(|| invalid("missing '('"))?;
        let body = trimmed[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| invalid("missing closing ')'"))?;

        let name = trimmed[..open].trim();
        if name.is_empty() {
            return Err(invalid("empty function name"));
        }
        if !is_valid_name(name) {
            return Err(invalid("function name must be alphanumeric or '_'"));
        }

        let arg_types = body
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|code| {
                ColumnType::from_type_code(code)
                    .ok_or_else(|| invalid(&format!("unknown type code '{code}'")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: name.to_lowercase(),
            arg_types,
        })
    }

    /// Normalized (lowercase) function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared argument types.
    pub fn arg_types(&self) -> &[ColumnType] {
        &self.arg_types
    }

    /// Number of declared arguments.
    pub fn arity(&self) -> usize {
        self.arg_types.len()
    }

    /// Whether arguments of the given types can be passed to this overload.
    pub fn accepts(&self, args: &[ColumnType]) -> bool {
        self.arg_types.len() == args.len()
            && self
                .arg_types
                .iter()
                .zip(args)
                .all(|(expected, actual)| expected.accepts(*actual))
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for ty in &self.arg_types {
            write!(f, "{}", ty.type_code())?;
        }
        f.write_str(")")
    }
}
