/* Analyze command - dump the reconciled signature sets */

use super::common::load_headers;
use clap::ValueEnum;
use std::path::PathBuf;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum OutputFormat {
  Json,
  Yaml,
}

/* Execute the analyze command */
pub fn run(pkcs11: PathBuf, pkcs11i: PathBuf, format: OutputFormat) -> anyhow::Result<()> {
  let headers = load_headers(&pkcs11, &pkcs11i)?;

  let dump = match format {
    OutputFormat::Json => serde_json::to_string_pretty(&headers)?,
    OutputFormat::Yaml => serde_yml::to_string(&headers)?,
  };
  println!("{}", dump);

  Ok(())
}
