//! Category kind and name


use super::validation::bounded_text;
use super::ValidationError;

const MAX_CATEGORY_NAME_LEN: usize = 50;
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Whether a category collects income or expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    Income,
    Expense,
}

impl CategoryKind {
    /// Parse the stored/requested form (`income` or `expense`, exact match).
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(ValidationError::InvalidVariant {
                field: "category type",
                value: other.to_owned(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

/// Validated category name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryName(String);

impl CategoryName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text("category name", s, MAX_CATEGORY_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!(CategoryKind::parse("income").unwrap(), CategoryKind::Income);
        assert_eq!(CategoryKind::parse("expense").unwrap(), CategoryKind::Expense);
        assert_eq!(CategoryKind::Expense.as_str(), "expense");
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = CategoryKind::parse("savings").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { .. }));

        // case-sensitive, like the stored values
        assert!(CategoryKind::parse("Income").is_err());
    }

    #[test]
    fn category_name_limits() {
        assert_eq!(CategoryName::new(" Food ").unwrap().as_str(), "Food");
        assert!(CategoryName::new(&"f".repeat(51)).is_err());
    }
}
