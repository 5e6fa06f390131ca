pub mod base;
pub mod format;
pub mod stack;

use crate::config::{GeneratorConfig, TemplateKind};
use crate::header::Function;
use crate::pipeline::HeaderSet;
use format::format_arglist;
use std::collections::BTreeSet;
use std::fmt::Write;
use tracing::debug;

pub use base::BaseTemplate;
pub use stack::StackTemplate;

/// Placeholder written into the initializer table for excluded functions.
pub const NULL_ENTRY: &str = "NULL";

/// How a generated wrapper forwards its call to the lower module.
///
/// Implementations differ only in wrapper naming, the lower table type, the
/// forwarded argument list and the name of the emitted table.
pub trait WrapperTemplate {
    /// Name of the emitted `CK_X_FUNCTION_LIST` variable.
    fn table_name(&self) -> &'static str;

    /// C type of `virt->lower_module`.
    fn lower_table_type(&self) -> &'static str;

    fn wrapper_function_name(&self, function: &Function) -> String;

    /// Argument expressions passed to `funcs->C_<name>`.
    fn forwarded_args(&self, function: &Function) -> Vec<String>;

    fn emit_wrapper(&self, function: &Function) -> String {
        let wrapper_function_name = self.wrapper_function_name(function);
        let mut output = String::new();
        writeln!(output, "static CK_RV").unwrap();
        writeln!(
            output,
            "{} ({})",
            wrapper_function_name,
            format_arglist(function, &wrapper_function_name)
        )
        .unwrap();
        writeln!(output, "{{").unwrap();
        writeln!(output, "\tp11_virtual *virt = (p11_virtual *)self;").unwrap();
        writeln!(
            output,
            "\t{} *funcs = virt->lower_module;",
            self.lower_table_type()
        )
        .unwrap();
        writeln!(
            output,
            "\treturn funcs->C_{} ({});",
            function.name,
            self.forwarded_args(function).join(", ")
        )
        .unwrap();
        writeln!(output, "}}").unwrap();
        output
    }
}

/* Argument names after the receiver */
pub(crate) fn args_after_self(function: &Function) -> impl Iterator<Item = String> + '_ {
    function
        .args
        .iter()
        .skip(1)
        .map(|arg| arg.name.clone())
}

/// Renders wrapper functions and the initializer table for one template.
pub struct FileGenerator<'a> {
    template: &'a dyn WrapperTemplate,
    functions: &'a [Function],
    exclude: &'a BTreeSet<String>,
}

impl<'a> FileGenerator<'a> {
    pub fn new(
        template: &'a dyn WrapperTemplate,
        functions: &'a [Function],
        exclude: &'a BTreeSet<String>,
    ) -> Self {
        Self {
            template,
            functions,
            exclude,
        }
    }

    fn is_excluded(&self, function: &Function) -> bool {
        self.exclude.contains(&function.name)
    }

    /// Wrapper definitions for every non-excluded function, in slot order.
    pub fn function_list(&self) -> String {
        self.functions
            .iter()
            .filter(|function| !self.is_excluded(function))
            .map(|function| self.template.emit_wrapper(function))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// One table entry per function; excluded functions keep their slot as `NULL`.
    pub fn initializer_list(&self) -> String {
        self.functions
            .iter()
            .map(|function| {
                if self.is_excluded(function) {
                    format!("\t{}", NULL_ENTRY)
                } else {
                    format!("\t{}", self.template.wrapper_function_name(function))
                }
            })
            .collect::<Vec<_>>()
            .join(",\n")
    }

    pub fn emit_code(&self) -> String {
        for name in self.exclude {
            if !self.functions.iter().any(|function| &function.name == name) {
                debug!("excluded function '{}' is not declared", name);
            }
        }

        let mut output = self.function_list();
        output.push_str("\n\n");
        writeln!(output, "CK_X_FUNCTION_LIST {} = {{", self.template.table_name()).unwrap();
        writeln!(
            output,
            "\t{{ CRYPTOKI_VERSION_MAJOR, CRYPTOKI_VERSION_MINOR }},  /* version */"
        )
        .unwrap();
        writeln!(output, "{}", self.initializer_list()).unwrap();
        writeln!(output, "}};").unwrap();
        output
    }
}

/// Render the extended functions of `headers` with the configured template.
pub fn render(headers: &HeaderSet, config: &GeneratorConfig) -> String {
    let template: &dyn WrapperTemplate = match config.template {
        TemplateKind::Base => &BaseTemplate,
        TemplateKind::Stack => &StackTemplate,
    };
    debug!(
        "rendering {} with {} function(s), {} excluded",
        template.table_name(),
        headers.x_functions.len(),
        config.exclude.len()
    );
    FileGenerator::new(template, &headers.x_functions, &config.exclude).emit_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Argument;
    use crate::reconcile::SELF_ARG;

    fn functions() -> Vec<Function> {
        ["Initialize", "Finalize", "GetInfo"]
            .into_iter()
            .map(|name| {
                Function::new(
                    name,
                    vec![
                        Argument::new(SELF_ARG, "CK_X_FUNCTION_LIST *"),
                        Argument::new("arg", "CK_VOID_PTR"),
                    ],
                )
            })
            .collect()
    }

    #[test]
    fn test_excluded_functions_keep_their_slot() {
        let functions = functions();
        let exclude: BTreeSet<String> = ["Finalize".to_string()].into_iter().collect();
        let generator = FileGenerator::new(&BaseTemplate, &functions, &exclude);

        assert_eq!(
            generator.initializer_list(),
            "\tbase_C_Initialize,\n\tNULL,\n\tbase_C_GetInfo"
        );
        let wrappers = generator.function_list();
        assert!(wrappers.contains("base_C_Initialize ("));
        assert!(!wrappers.contains("base_C_Finalize"));
        assert!(wrappers.contains("base_C_GetInfo ("));
    }

    #[test]
    fn test_unknown_exclusion_has_no_effect() {
        let functions = functions();
        let exclude: BTreeSet<String> = ["Bogus".to_string()].into_iter().collect();
        let with_unknown = FileGenerator::new(&StackTemplate, &functions, &exclude).emit_code();
        let empty = BTreeSet::new();
        let without = FileGenerator::new(&StackTemplate, &functions, &empty).emit_code();
        assert_eq!(with_unknown, without);
    }

    #[test]
    fn test_table_layout() {
        let functions = functions();
        let exclude = BTreeSet::new();
        let output = FileGenerator::new(&StackTemplate, &functions[..1], &exclude).emit_code();
        assert!(output.ends_with(
            "}\n\n\nCK_X_FUNCTION_LIST p11_virtual_stack = {\n\t{ CRYPTOKI_VERSION_MAJOR, CRYPTOKI_VERSION_MINOR },  /* version */\n\tstack_C_Initialize\n};\n"
        ));
    }
}
