/* Sort parsed functions into function list slot order */

use crate::error::{GenError, GenResult};
use crate::header::Function;
use indexmap::IndexSet;

/// Stable-sort `functions` by each name's position in `order`.
///
/// `table` names the layout block in errors. A function without a slot is
/// fatal: dropping it would shift every later initializer entry.
pub fn sort_by_layout(
  functions: &mut [Function],
  order: &IndexSet<String>,
  table: &'static str,
) -> GenResult<()> {
  /* Every slot is resolved before anything moves */
  if let Some(missing) = functions.iter().find(|f| !order.contains(&f.name)) {
    return Err(GenError::MissingOrderEntry {
      function: missing.name.clone(),
      table,
    });
  }

  functions.sort_by_cached_key(|function| order.get_index_of(&function.name));
  Ok(())
}
