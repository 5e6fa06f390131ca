/* Signature reconciliation between the plain and extended declarations.
 *
 * pkcs11.h names every parameter, pkcs11i.h has the authoritative types.
 * Types flow extended -> plain, names flow plain -> extended, matched by
 * position with the extended receiver skipped. */

use crate::error::{GenError, GenResult};
use crate::header::Function;
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Name given to the leading receiver argument of every extended function.
pub const SELF_ARG: &str = "self";

/// Merge names and types across both signature sets in place.
///
/// A function present on only one side is left as parsed. A function present
/// on both sides must have exactly one more extended argument than plain
/// arguments.
pub fn reconcile(functions: &mut [Function], x_functions: &mut [Function]) -> GenResult<()> {
  /* Snapshot both sides as parsed so each pass reads unmodified input */
  let plain_args: IndexMap<String, Vec<_>> = functions
    .iter()
    .map(|f| (f.name.clone(), f.args.clone()))
    .collect();
  let x_args: IndexMap<String, Vec<_>> = x_functions
    .iter()
    .map(|f| (f.name.clone(), f.args.clone()))
    .collect();

  for function in functions.iter_mut() {
    let Some(args) = x_args.get(&function.name) else {
      debug!("plain function '{}' has no extended counterpart", function.name);
      continue;
    };
    check_arity(&function.name, function.args.len(), args.len())?;
    for (arg, x_arg) in function.args.iter_mut().zip(&args[1..]) {
      arg.arg_type = x_arg.arg_type.clone();
    }
  }

  for function in x_functions.iter_mut() {
    let Some(receiver) = function.args.first_mut() else {
      return Err(GenError::ArityMismatch {
        function: function.name.clone(),
        plain: plain_args.get(&function.name).map_or(0, Vec::len),
        extended: 0,
      });
    };
    receiver.name = SELF_ARG.to_string();

    let Some(args) = plain_args.get(&function.name) else {
      if function.args.len() > 1 {
        warn!(
          "extended function '{}' has no plain counterpart; its arguments stay unnamed",
          function.name
        );
      }
      continue;
    };
    check_arity(&function.name, args.len(), function.args.len())?;
    for (x_arg, arg) in function.args[1..].iter_mut().zip(args) {
      x_arg.name = arg.name.clone();
    }
  }

  Ok(())
}

fn check_arity(function: &str, plain: usize, extended: usize) -> GenResult<()> {
  if extended == plain + 1 {
    Ok(())
  } else {
    Err(GenError::ArityMismatch {
      function: function.to_string(),
      plain,
      extended,
    })
  }
}
