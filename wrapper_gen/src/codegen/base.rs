/* Base template: wrappers that call straight into a plain CK_FUNCTION_LIST */

use super::{args_after_self, WrapperTemplate};
use crate::header::Function;

pub struct BaseTemplate;

impl WrapperTemplate for BaseTemplate {
    fn table_name(&self) -> &'static str {
        "p11_virtual_base"
    }

    fn lower_table_type(&self) -> &'static str {
        "CK_FUNCTION_LIST"
    }

    fn wrapper_function_name(&self, function: &Function) -> String {
        format!("base_C_{}", function.name)
    }

    /* The plain module takes no receiver */
    fn forwarded_args(&self, function: &Function) -> Vec<String> {
        args_after_self(function).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Argument;

    #[test]
    fn test_base_wrapper() {
        let function = Function::new(
            "Foo",
            vec![
                Argument::new("self", "void*"),
                Argument::new("a", "CK_ULONG"),
                Argument::new("b", "CK_BYTE*"),
            ],
        );

        assert_eq!(
            BaseTemplate.emit_wrapper(&function),
            "static CK_RV\n\
             base_C_Foo (void*self,\n\t    CK_ULONG a,\n\t    CK_BYTE*b)\n\
             {\n\
             \tp11_virtual *virt = (p11_virtual *)self;\n\
             \tCK_FUNCTION_LIST *funcs = virt->lower_module;\n\
             \treturn funcs->C_Foo (a, b);\n\
             }\n"
        );
    }
}
