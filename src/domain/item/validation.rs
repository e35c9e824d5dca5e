//! Item validation utilities

use thiserror::Error;

/// Errors that can occur during item validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ItemValidationError {
    #[error("Item ID cannot be empty")]
    EmptyId,

    #[error("Item ID exceeds maximum length of {0} characters")]
    IdTooLong(usize),

    #[error("Item ID contains invalid character: '{0}'. Only alphanumeric characters and hyphens are allowed")]
    InvalidIdCharacter(char),

    #[error("Item name cannot be empty")]
    EmptyName,

    #[error("Item name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Category cannot be empty")]
    EmptyCategory,

    #[error("Price must be greater than zero, got {0}")]
    InvalidPrice(i64),

    #[error("Stock cannot be negative, got {0}")]
    InvalidStock(i64),

    #[error("Quantity must be greater than zero")]
    InvalidQuantity(i64),
}

const MAX_ITEM_ID_LENGTH: usize = 50;
const MAX_ITEM_NAME_LENGTH: usize = 100;

/// Validate an item ID (uuid shaped)
pub fn validate_item_id(id: &str) -> Result<(), ItemValidationError> {
    if id.is_empty() {
        return Err(ItemValidationError::EmptyId);
    }

    if id.len() > MAX_ITEM_ID_LENGTH {
        return Err(ItemValidationError::IdTooLong(MAX_ITEM_ID_LENGTH));
    }

    for c in id.chars() {
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(ItemValidationError::InvalidIdCharacter(c));
        }
    }

    Ok(())
}

/// Validate an item name
pub fn validate_item_name(name: &str) -> Result<(), ItemValidationError> {
    if name.trim().is_empty() {
        return Err(ItemValidationError::EmptyName);
    }

    if name.len() > MAX_ITEM_NAME_LENGTH {
        return Err(ItemValidationError::NameTooLong(MAX_ITEM_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a category
pub fn validate_category(category: &str) -> Result<(), ItemValidationError> {
    if category.trim().is_empty() {
        return Err(ItemValidationError::EmptyCategory);
    }

    Ok(())
}

/// Validate a price in cents. Free items are not a thing here.
pub fn validate_price(price_cents: i64) -> Result<(), ItemValidationError> {
    if price_cents <= 0 {
        return Err(ItemValidationError::InvalidPrice(price_cents));
    }

    Ok(())
}

/// Validate a stock level
pub fn validate_stock(stock: i64) -> Result<(), ItemValidationError> {
    if stock < 0 {
        return Err(ItemValidationError::InvalidStock(stock));
    }

    Ok(())
}

/// Validate a purchase quantity
pub fn validate_quantity(quantity: i64) -> Result<(), ItemValidationError> {
    if quantity <= 0 {
        return Err(ItemValidationError::InvalidQuantity(quantity));
    }

    Ok(())
}
