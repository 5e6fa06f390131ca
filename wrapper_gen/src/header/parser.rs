/* Statement parsers for the plain and extended declaration grammars */

use super::{Argument, Function};
use crate::error::{GenError, GenResult};
use regex::Regex;
use std::sync::LazyLock;

static P11_FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\A_CK_DECLARE_FUNCTION\s*\(C_(\w+), \((.*)\)\);").expect("valid function regex")
});

/* Type is everything up to the last whitespace run and pointer markers */
static P11_ARGUMENT_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s*([^,]+\s+\**)([^, ]+)").expect("valid argument regex"));

static P11_X_FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\Atypedef CK_RV \(\* CK_X_(\w+)\)\s*\((.*)\);").expect("valid function regex")
});

static P11_X_ARGUMENT_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\s*([^,]+)").expect("valid argument regex"));

/// Parse a `_CK_DECLARE_FUNCTION (C_Name, (type name, ...));` statement.
pub fn parse_function_line(line: &str) -> GenResult<Function> {
  let caps = P11_FUNCTION_RE
    .captures(line)
    .ok_or_else(|| GenError::MalformedDeclaration {
      grammar: "pkcs11.h",
      statement: line.to_string(),
    })?;

  let args = P11_ARGUMENT_RE
    .captures_iter(&caps[2])
    .map(|arg| Argument::new(&arg[2], arg[1].trim()))
    .collect();

  Ok(Function::new(&caps[1], args))
}

/// Parse a `typedef CK_RV (* CK_X_Name) (type, ...);` statement.
///
/// The extended grammar declares types only, so every argument starts unnamed.
pub fn parse_x_function_line(line: &str) -> GenResult<Function> {
  let caps = P11_X_FUNCTION_RE
    .captures(line)
    .ok_or_else(|| GenError::MalformedDeclaration {
      grammar: "pkcs11i.h",
      statement: line.to_string(),
    })?;

  let args = P11_X_ARGUMENT_RE
    .captures_iter(&caps[2])
    .map(|arg| Argument::unnamed(arg[1].trim()))
    .collect();

  Ok(Function::new(&caps[1], args))
}
