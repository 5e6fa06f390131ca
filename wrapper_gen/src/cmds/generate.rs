/* Generate command - render wrapper functions for one template */

use super::common::load_headers;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;
use wrapper_gen::{GeneratorConfig, TemplateKind, render};

/* Execute the generate command */
pub fn run(
  template: Option<TemplateKind>,
  pkcs11: PathBuf,
  pkcs11i: PathBuf,
  exclude: Vec<String>,
  config_path: Option<PathBuf>,
  output: Option<PathBuf>,
) -> anyhow::Result<()> {
  let config = resolve_config(template, exclude, config_path.as_deref())?;

  info!("[~] Template: {:?}", config.template);
  for name in &config.exclude {
    info!("    - excluding {}", name);
  }

  let headers = load_headers(&pkcs11, &pkcs11i)?;
  let code = output_text(&render(&headers, &config));

  match output {
    Some(path) => {
      std::fs::write(&path, &code)
        .with_context(|| format!("failed to write {}", path.display()))?;
      info!("[✓] Wrote {}", path.display());
    }
    None => print!("{}", code),
  }

  Ok(())
}

/* Generated text plus the trailing blank line, on stdout and in files alike */
fn output_text(code: &str) -> String {
  format!("{}\n", code)
}

/* Merge the config file with command line overrides.
 *
 * A template given on the command line wins over the file's; `-x` names are
 * added to the file's exclusions. */
pub fn resolve_config(
  template: Option<TemplateKind>,
  exclude: Vec<String>,
  config_path: Option<&Path>,
) -> anyhow::Result<GeneratorConfig> {
  let config = match config_path {
    Some(path) => GeneratorConfig::load(path)
      .with_context(|| format!("failed to load generator config {}", path.display()))?,
    None => GeneratorConfig::default(),
  };
  let template = template.unwrap_or(config.template);

  Ok(GeneratorConfig {
    template,
    ..config
  }
  .with_excluded(exclude))
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  fn config_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
  }

  #[test]
  fn test_config_template_used_without_flag() {
    let file = config_file("template: stack\nexclude: [Initialize]\n");
    let config = resolve_config(None, vec!["Finalize".to_string()], Some(file.path())).unwrap();

    assert_eq!(config.template, TemplateKind::Stack);
    assert!(config.exclude.contains("Initialize"));
    assert!(config.exclude.contains("Finalize"));
  }

  #[test]
  fn test_flag_overrides_config_template() {
    let file = config_file("template: stack\n");
    let config = resolve_config(Some(TemplateKind::Base), Vec::new(), Some(file.path())).unwrap();
    assert_eq!(config.template, TemplateKind::Base);
  }

  #[test]
  fn test_output_ends_with_blank_line() {
    let text = output_text("CK_X_FUNCTION_LIST p11_virtual_base = {\n\tNULL\n};\n");
    assert!(text.ends_with("};\n\n"));
  }

  #[test]
  fn test_defaults_to_base_without_config() {
    let config = resolve_config(None, Vec::new(), None).unwrap();
    assert_eq!(config.template, TemplateKind::Base);
    assert!(config.exclude.is_empty());
  }
}
