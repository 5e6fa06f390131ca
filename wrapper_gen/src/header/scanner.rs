/* Line scanner for the two header grammars.
 *
 * Collects complete declaration statements (joining continuation lines) and
 * the member order of the function list layout block. */

use crate::error::GenResult;
use indexmap::IndexSet;
use regex::Regex;
use std::io::BufRead;
use std::sync::LazyLock;
use tracing::debug;

static P11_FUNCTION_LIST_MEMBER_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\A\s*CK_C_(\S+)\s+.*;").expect("valid member regex"));

static P11_X_FUNCTION_LIST_MEMBER_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\A\s*CK_X_(\S+)\s+.*;").expect("valid member regex"));

/// Raw statements and function list order read from one header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedHeader {
  /* Single-line statements, in the order they appear */
  pub statements: Vec<String>,
  /* Member names of the function list, first occurrence wins */
  pub order: IndexSet<String>,
}

/* Which lines start a statement and which start the layout block */
struct HeaderGrammar {
  statement_prefix: &'static str,
  block_prefix: &'static str,
  member_re: &'static LazyLock<Regex>,
}

static PKCS11_H: HeaderGrammar = HeaderGrammar {
  statement_prefix: "_CK_DECLARE_FUNCTION",
  block_prefix: "struct ck_function_list",
  member_re: &P11_FUNCTION_LIST_MEMBER_RE,
};

static PKCS11I_H: HeaderGrammar = HeaderGrammar {
  statement_prefix: "typedef CK_RV (* CK_X_",
  block_prefix: "struct _CK_X_FUNCTION_LIST",
  member_re: &P11_X_FUNCTION_LIST_MEMBER_RE,
};

enum ScanState {
  Idle,
  Statement(String),
  Block,
}

/// Scan the plain header (`_CK_DECLARE_FUNCTION` statements, `struct ck_function_list`).
pub fn scan_pkcs11_h<R: BufRead>(reader: R) -> GenResult<ScannedHeader> {
  scan(reader, &PKCS11_H)
}

/// Scan the extended header (`CK_X_` typedefs, `struct _CK_X_FUNCTION_LIST`).
pub fn scan_pkcs11i_h<R: BufRead>(reader: R) -> GenResult<ScannedHeader> {
  scan(reader, &PKCS11I_H)
}

fn scan<R: BufRead>(reader: R, grammar: &HeaderGrammar) -> GenResult<ScannedHeader> {
  let mut scanned = ScannedHeader::default();
  let mut state = ScanState::Idle;

  for line in reader.lines() {
    let line = line?;
    state = match state {
      ScanState::Idle => start_line(&line, grammar, &mut scanned),
      ScanState::Statement(mut text) => {
        text.push(' ');
        text.push_str(line.trim());
        finish_statement(text, &mut scanned)
      }
      ScanState::Block => {
        if line.trim_start().starts_with('}') {
          ScanState::Idle
        } else {
          if let Some(caps) = grammar.member_re.captures(&line) {
            scanned.order.insert(caps[1].to_string());
          }
          ScanState::Block
        }
      }
    };
  }

  match state {
    ScanState::Statement(text) => debug!("input ended inside statement '{}'", text),
    ScanState::Block => debug!("input ended inside '{}' block", grammar.block_prefix),
    ScanState::Idle => {}
  }

  debug!(
    "scanned {} '{}' statement(s), {} function list member(s)",
    scanned.statements.len(),
    grammar.statement_prefix,
    scanned.order.len()
  );
  Ok(scanned)
}

fn start_line(line: &str, grammar: &HeaderGrammar, scanned: &mut ScannedHeader) -> ScanState {
  if line.starts_with(grammar.statement_prefix) {
    finish_statement(line.trim().to_string(), scanned)
  } else if line.starts_with(grammar.block_prefix) {
    /* Forward declarations and empty blocks close on the same line */
    if line.trim_end().ends_with(';') {
      ScanState::Idle
    } else {
      ScanState::Block
    }
  } else {
    ScanState::Idle
  }
}

fn finish_statement(text: String, scanned: &mut ScannedHeader) -> ScanState {
  if text.ends_with(';') {
    scanned.statements.push(text);
    ScanState::Idle
  } else {
    ScanState::Statement(text)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_joins_continuation_lines() {
    let src = "_CK_DECLARE_FUNCTION (C_GetSlotList,\n\t\t      (unsigned char token_present, CK_SLOT_ID *slot_list,\n\t\t       unsigned long *count));\n";
    let scanned = scan_pkcs11_h(src.as_bytes()).unwrap();
    assert_eq!(
      scanned.statements,
      vec![
        "_CK_DECLARE_FUNCTION (C_GetSlotList, (unsigned char token_present, CK_SLOT_ID *slot_list, unsigned long *count));"
      ]
    );
  }

  #[test]
  fn test_collects_function_list_members() {
    let src = "struct ck_function_list;\n\
               struct ck_function_list\n{\n  struct ck_version version;\n  CK_C_Initialize C_Initialize;\n  CK_C_Finalize C_Finalize;\n};\n\
               CK_C_Stray C_Stray;\n";
    let scanned = scan_pkcs11_h(src.as_bytes()).unwrap();
    let order: Vec<&str> = scanned.order.iter().map(String::as_str).collect();
    assert_eq!(order, vec!["Initialize", "Finalize"]);
  }

  #[test]
  fn test_forward_declaration_collects_nothing() {
    let src = "struct _CK_X_FUNCTION_LIST;\n  CK_X_Initialize C_Initialize;\n";
    let scanned = scan_pkcs11i_h(src.as_bytes()).unwrap();
    assert!(scanned.order.is_empty());
  }

  #[test]
  fn test_empty_block_on_one_line_collects_nothing() {
    let src = "struct _CK_X_FUNCTION_LIST { };\n  CK_X_Initialize C_Initialize;\n";
    let scanned = scan_pkcs11i_h(src.as_bytes()).unwrap();
    assert!(scanned.order.is_empty());
    assert!(scanned.statements.is_empty());
  }

  #[test]
  fn test_unclosed_block_keeps_members_read_so_far() {
    let src = "struct ck_function_list\n{\n  CK_C_Initialize C_Initialize;\n";
    let scanned = scan_pkcs11_h(src.as_bytes()).unwrap();
    let order: Vec<&str> = scanned.order.iter().map(String::as_str).collect();
    assert_eq!(order, vec!["Initialize"]);
    assert!(scanned.statements.is_empty());
  }

  #[test]
  fn test_repeated_members_keep_first_position() {
    let src = "struct ck_function_list {\n  CK_C_Initialize C_Initialize;\n  CK_C_Finalize C_Finalize;\n};\n\
               struct ck_function_list_3_0 {\n  CK_C_Initialize C_Initialize;\n  CK_C_GetInterfaceList C_GetInterfaceList;\n};\n";
    let scanned = scan_pkcs11_h(src.as_bytes()).unwrap();
    let order: Vec<&str> = scanned.order.iter().map(String::as_str).collect();
    assert_eq!(order, vec!["Initialize", "Finalize", "GetInterfaceList"]);
  }

  #[test]
  fn test_unterminated_statement_is_dropped() {
    let src = "typedef CK_RV (* CK_X_Initialize) (CK_X_FUNCTION_LIST *,\n CK_VOID_PTR";
    let scanned = scan_pkcs11i_h(src.as_bytes()).unwrap();
    assert!(scanned.statements.is_empty());
  }

  #[test]
  fn test_ignores_other_grammar() {
    let src = "typedef CK_RV (* CK_X_Finalize) (CK_X_FUNCTION_LIST *, CK_VOID_PTR);\n";
    let scanned = scan_pkcs11_h(src.as_bytes()).unwrap();
    assert!(scanned.statements.is_empty());
    let scanned = scan_pkcs11i_h(src.as_bytes()).unwrap();
    assert_eq!(scanned.statements.len(), 1);
  }
}
