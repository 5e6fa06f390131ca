/* Common utilities shared between analyze and generate commands */

use anyhow::Context;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;
use wrapper_gen::HeaderSet;

/* Open both headers and run them through the parsing pipeline */
pub fn load_headers(pkcs11: &Path, pkcs11i: &Path) -> anyhow::Result<HeaderSet> {
  let pkcs11_h = File::open(pkcs11).with_context(|| format!("failed to open {}", pkcs11.display()))?;
  let pkcs11i_h =
    File::open(pkcs11i).with_context(|| format!("failed to open {}", pkcs11i.display()))?;

  let headers = HeaderSet::parse(BufReader::new(pkcs11_h), BufReader::new(pkcs11i_h))
    .with_context(|| format!("failed to process {} and {}", pkcs11.display(), pkcs11i.display()))?;

  info!(
    "[✓] Loaded {} plain and {} extended function(s)",
    headers.functions.len(),
    headers.x_functions.len()
  );
  Ok(headers)
}
