/* Stack template: wrappers that call the next CK_X_FUNCTION_LIST in a stack */

use super::{args_after_self, WrapperTemplate};
use crate::header::Function;

pub struct StackTemplate;

impl WrapperTemplate for StackTemplate {
    fn table_name(&self) -> &'static str {
        "p11_virtual_stack"
    }

    fn lower_table_type(&self) -> &'static str {
        "CK_X_FUNCTION_LIST"
    }

    fn wrapper_function_name(&self, function: &Function) -> String {
        format!("stack_C_{}", function.name)
    }

    /* The lower extended table is its own receiver */
    fn forwarded_args(&self, function: &Function) -> Vec<String> {
        std::iter::once("funcs".to_string())
            .chain(args_after_self(function))
            .collect()
    }
}
