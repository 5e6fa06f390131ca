use crate::header::Function;

/// Pad a C type with one space unless it already ends in `*` or whitespace.
pub fn format_type(arg_type: &str) -> String {
    if arg_type.ends_with('*') || arg_type.ends_with(' ') {
        arg_type.to_string()
    } else {
        format!("{} ", arg_type)
    }
}

/// Continuation indent that lines parameters up after `<wrapper> (`.
///
/// Every run of 8 spaces becomes one tab.
pub fn arg_indent(wrapper_function_name: &str) -> String {
    let width = wrapper_function_name.len() + 2;
    format!("{}{}", "\t".repeat(width / 8), " ".repeat(width % 8))
}

/// Render the parameter list of a wrapper, one parameter per line.
pub fn format_arglist(function: &Function, wrapper_function_name: &str) -> String {
    let indent = arg_indent(wrapper_function_name);
    function
        .args
        .iter()
        .map(|arg| format!("{}{}{}", indent, format_type(&arg.arg_type), arg.name))
        .collect::<Vec<_>>()
        .join(",\n")
        .trim()
        .to_string()
}
