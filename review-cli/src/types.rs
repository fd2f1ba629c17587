//! Common types used across CLI modules

use std::fmt;

/// Project named by its numeric id or by (a prefix of) its name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRef {
    /// Backend id
    Id(i64),
    /// Name or unambiguous name prefix
    Name(String),
}

impl ProjectRef {
    /// Parse a string into a ProjectRef
    ///
    /// Anything that parses as an integer is an id, otherwise it is a name
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<i64>() {
            Ok(id) => ProjectRef::Id(id),
            Err(_) => ProjectRef::Name(input.to_string()),
        }
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectRef::Id(id) => write!(f, "#{}", id),
            ProjectRef::Name(name) => write!(f, "'{}'", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_is_id() {
        assert_eq!(ProjectRef::parse("42"), ProjectRef::Id(42));
        assert_eq!(ProjectRef::parse(" 7 "), ProjectRef::Id(7));
    }

    #[test]
    fn test_text_is_name() {
        assert_eq!(
            ProjectRef::parse("billing-api"),
            ProjectRef::Name("billing-api".to_string())
        );
        assert_eq!(ProjectRef::parse("v2"), ProjectRef::Name("v2".to_string()));
    }
}
