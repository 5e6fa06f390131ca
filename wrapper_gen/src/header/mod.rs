/* Header model - functions and arguments read from the pkcs11.h / pkcs11i.h pair */

pub mod parser;
pub mod scanner;

use serde_derive::Serialize;

pub use parser::{parse_function_line, parse_x_function_line};
pub use scanner::{scan_pkcs11_h, scan_pkcs11i_h, ScannedHeader};

/// One parameter of a declared function.
///
/// `arg_type` keeps the raw C spelling, including trailing pointer markers.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Argument {
  pub name: String,
  #[serde(rename = "type")]
  pub arg_type: String,
}

impl Argument {
  pub fn new(name: impl Into<String>, arg_type: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      arg_type: arg_type.into(),
    }
  }

  /* Parameter declared with a type only (extended grammar) */
  pub fn unnamed(arg_type: impl Into<String>) -> Self {
    Self::new(String::new(), arg_type)
  }
}

/// A function signature without its `C_` prefix, e.g. `GetSlotList`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Function {
  pub name: String,
  pub args: Vec<Argument>,
}

impl Function {
  pub fn new(name: impl Into<String>, args: Vec<Argument>) -> Self {
    Self {
      name: name.into(),
      args,
    }
  }
}
