//! Go visibility rule: a name starting with an uppercase letter is exported.

/// Whether `name` is exported from its package.
///
/// The blank identifier and names starting with `_` or a lowercase
/// letter are unexported.
#[must_use]
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::is_exported;

    #[rstest]
    #[case("Exported", true)]
    #[case("X", true)]
    #[case("Ärger", true)]
    #[case("name", false)]
    #[case("_", false)]
    #[case("_Hidden", false)]
    #[case("", false)]
    #[case("école", false)]
    fn classifies_names(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(is_exported(name), expected);
    }
}
