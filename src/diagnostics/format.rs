/// Format error message by replacing `{}` placeholders with values, in order.
///
/// # Example
/// ```
/// use yammm::diagnostics::format_message;
/// let msg = format_message("Expected {}, found {}.", &["`{`", "end of file"]);
/// assert_eq!(msg, "Expected `{`, found end of file.");
/// ```
pub fn format_message(template: &str, values: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    let mut values = values.iter();
    while let Some(at) = rest.find("{}") {
        result.push_str(&rest[..at]);
        match values.next() {
            Some(value) => result.push_str(value),
            None => result.push_str("{}"),
        }
        rest = &rest[at + 2..];
    }
    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_are_not_rescanned() {
        assert_eq!(format_message("a {} b {}", &["{}", "x"]), "a {} b x");
    }

    #[test]
    fn missing_values_leave_placeholders() {
        assert_eq!(format_message("{} and {}", &["one"]), "one and {}");
    }
}
