//! Shared domain enumerations for catalog products.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Categories a product may be stored under.
///
/// Listings filter on the raw category string, so an unknown category in a
/// read request simply matches nothing; writes must use one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    Electronics,
    Clothing,
    Food,
    Books,
    Home,
    Premium,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 6] = [
        ProductCategory::Electronics,
        ProductCategory::Clothing,
        ProductCategory::Food,
        ProductCategory::Books,
        ProductCategory::Home,
        ProductCategory::Premium,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProductCategory::Electronics => "ELECTRONICS",
            ProductCategory::Clothing => "CLOTHING",
            ProductCategory::Food => "FOOD",
            ProductCategory::Books => "BOOKS",
            ProductCategory::Home => "HOME",
            ProductCategory::Premium => "PREMIUM",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| {
                DomainError::validation(
                    "Category must be one of: ELECTRONICS, CLOTHING, FOOD, BOOKS, HOME, PREMIUM",
                )
            })
    }
}

/// Whitelisted sort fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortField {
    #[serde(alias = "name")]
    Name,
    #[serde(alias = "price")]
    Price,
}

impl SortField {
    /// Storage attribute the field orders by.
    pub fn attribute(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Price => "price",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    #[serde(alias = "asc")]
    Asc,
    #[serde(alias = "desc")]
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortField {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "NAME" => Ok(SortField::Name),
            "PRICE" => Ok(SortField::Price),
            _ => Err(DomainError::validation("Sort field must be one of: NAME, PRICE")),
        }
    }
}

impl FromStr for SortDirection {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(DomainError::validation("Sort direction must be one of: ASC, DESC")),
        }
    }
}
