/* Header pipeline: scan -> parse -> reconcile -> order */

use crate::error::GenResult;
use crate::header::{
  parse_function_line, parse_x_function_line, scan_pkcs11_h, scan_pkcs11i_h, Function,
};
use crate::order::sort_by_layout;
use crate::reconcile::reconcile;
use serde_derive::Serialize;
use std::io::BufRead;
use tracing::debug;

/// Reconciled signatures of both headers, each in function list slot order.
///
/// Built once per run; every code generation template renders from the same set.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet {
  /* Plain `C_*` functions, ordered by `struct ck_function_list` */
  pub functions: Vec<Function>,
  /* Extended `CK_X_*` functions, ordered by `struct _CK_X_FUNCTION_LIST` */
  pub x_functions: Vec<Function>,
}

impl HeaderSet {
  /// Read both headers to the end and build the reconciled signature sets.
  pub fn parse<P: BufRead, X: BufRead>(pkcs11_h: P, pkcs11i_h: X) -> GenResult<Self> {
    let plain = scan_pkcs11_h(pkcs11_h)?;
    let extended = scan_pkcs11i_h(pkcs11i_h)?;

    let mut functions = plain
      .statements
      .iter()
      .map(|line| parse_function_line(line))
      .collect::<GenResult<Vec<_>>>()?;
    let mut x_functions = extended
      .statements
      .iter()
      .map(|line| parse_x_function_line(line))
      .collect::<GenResult<Vec<_>>>()?;
    debug!(
      "parsed {} plain and {} extended function(s)",
      functions.len(),
      x_functions.len()
    );

    reconcile(&mut functions, &mut x_functions)?;

    sort_by_layout(&mut functions, &plain.order, "ck_function_list")?;
    sort_by_layout(&mut x_functions, &extended.order, "_CK_X_FUNCTION_LIST")?;

    Ok(Self {
      functions,
      x_functions,
    })
  }

  /* Look up a plain function by name */
  pub fn function(&self, name: &str) -> Option<&Function> {
    self.functions.iter().find(|f| f.name == name)
  }

  /* Look up an extended function by name */
  pub fn x_function(&self, name: &str) -> Option<&Function> {
    self.x_functions.iter().find(|f| f.name == name)
  }
}
