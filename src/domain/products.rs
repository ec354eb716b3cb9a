//! Product write invariants.

use super::error::DomainError;
use super::types::ProductCategory;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 100;
const DESCRIPTION_MAX_CHARS: usize = 500;
const PRICE_MIN: f64 = 0.01;
const PRICE_MAX: f64 = 999_999.99;

/// Unvalidated product fields as received from a caller.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
    pub category: String,
}

/// Product fields that satisfy every write invariant.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: ProductCategory,
}

impl ProductDraft {
    /// Validate every field, collecting all failures rather than stopping at the first.
    pub fn validate(input: ProductInput) -> Result<Self, DomainError> {
        let mut messages = Vec::new();

        let name = input.name.trim().to_string();
        let name_len = name.chars().count();
        if name.is_empty() {
            messages.push("Product name cannot be blank".to_string());
        } else if !(NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&name_len) {
            messages.push(format!(
                "Product name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"
            ));
        }

        let description = input.description.trim().to_string();
        if description.is_empty() {
            messages.push("Product description cannot be blank".to_string());
        } else if description.chars().count() > DESCRIPTION_MAX_CHARS {
            messages.push(format!(
                "Description cannot exceed {DESCRIPTION_MAX_CHARS} characters"
            ));
        }

        let price = match input.price {
            None => {
                messages.push("Product price cannot be null".to_string());
                None
            }
            Some(price) if !price.is_finite() || price < PRICE_MIN => {
                messages.push("Price must be greater than 0".to_string());
                None
            }
            Some(price) if price > PRICE_MAX => {
                messages.push("Price cannot exceed $999,999.99".to_string());
                None
            }
            Some(price) => Some(price),
        };

        let category = input.category.trim();
        let category = if category.is_empty() {
            messages.push("Product category cannot be blank".to_string());
            None
        } else {
            match category.parse::<ProductCategory>() {
                Ok(category) => Some(category),
                Err(DomainError::Validation { messages: inner }) => {
                    messages.extend(inner);
                    None
                }
                Err(other) => return Err(other),
            }
        };

        match (price, category) {
            (Some(price), Some(category)) if messages.is_empty() => Ok(Self {
                name,
                description,
                price,
                category,
            }),
            _ => Err(DomainError::validation_all(messages)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, description: &str, price: Option<f64>, category: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: description.to_string(),
            price,
            category: category.to_string(),
        }
    }

    #[test]
    fn valid_input_is_trimmed_and_typed() {
        let draft = ProductDraft::validate(input("  Book A ", " A book ", Some(10.0), "BOOKS"))
            .expect("valid draft");
        assert_eq!(draft.name, "Book A");
        assert_eq!(draft.description, "A book");
        assert_eq!(draft.category, ProductCategory::Books);
    }

    #[test]
    fn every_failing_field_is_reported() {
        let err = ProductDraft::validate(input("A", "", None, "TOYS")).expect_err("invalid");
        match err {
            DomainError::Validation { messages } => {
                assert_eq!(messages.len(), 4);
                assert!(messages[0].contains("between 2 and 100"));
                assert!(messages[1].contains("description cannot be blank"));
                assert!(messages[2].contains("cannot be null"));
                assert!(messages[3].starts_with("Category must be one of"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn price_bounds_are_enforced() {
        assert!(ProductDraft::validate(input("Pen", "Blue", Some(0.0), "HOME")).is_err());
        assert!(ProductDraft::validate(input("Pen", "Blue", Some(1_000_000.0), "HOME")).is_err());
        assert!(ProductDraft::validate(input("Pen", "Blue", Some(f64::NAN), "HOME")).is_err());
        assert!(ProductDraft::validate(input("Pen", "Blue", Some(0.01), "HOME")).is_ok());
    }
}
