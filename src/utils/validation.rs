//! Validation utilities

use crate::traits::*;
use crate::types::*;
use bigdecimal::BigDecimal;

/// Validate that a document amount is positive
pub fn validate_document_amount(amount: &BigDecimal) -> ReconcileResult<()> {
    if *amount <= BigDecimal::from(0) {
        Err(ReconcileError::Validation(
            "Document amount must be positive".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Validate that a currency code has the ISO 4217 shape
pub fn validate_currency_code(currency: &str) -> ReconcileResult<()> {
    if currency.trim().is_empty() {
        return Err(ReconcileError::Validation(
            "Currency code cannot be empty".to_string(),
        ));
    }

    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ReconcileError::Validation(format!(
            "Currency code must be three letters, got '{}'",
            currency
        )));
    }

    Ok(())
}

/// Validate that a transaction ID is valid
pub fn validate_transaction_id(transaction_id: &str) -> ReconcileResult<()> {
    if transaction_id.trim().is_empty() {
        return Err(ReconcileError::Validation(
            "Transaction ID cannot be empty".to_string(),
        ));
    }

    if transaction_id.len() > 50 {
        return Err(ReconcileError::Validation(
            "Transaction ID cannot exceed 50 characters".to_string(),
        ));
    }

    // Check for valid characters (alphanumeric, dashes, underscores)
    if !transaction_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ReconcileError::Validation(
            "Transaction ID can only contain alphanumeric characters, dashes, and underscores"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validate that a statement description is within bounds.
/// Empty descriptions are allowed; absent text is modeled as ""
pub fn validate_description(description: &str) -> ReconcileResult<()> {
    if description.len() > 500 {
        return Err(ReconcileError::Validation(
            "Transaction description cannot exceed 500 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validate that an issuer name is within bounds
pub fn validate_issuer_name(issuer_name: &str) -> ReconcileResult<()> {
    if issuer_name.len() > 200 {
        return Err(ReconcileError::Validation(
            "Issuer name cannot exceed 200 characters".to_string(),
        ));
    }

    Ok(())
}

/// Enhanced document validator with detailed checks
pub struct EnhancedDocumentValidator;

impl DocumentValidator for EnhancedDocumentValidator {
    fn validate_document(&self, document: &ExtractedDocument) -> ReconcileResult<()> {
        validate_document_amount(&document.amount)?;
        validate_currency_code(&document.currency)?;
        validate_issuer_name(&document.issuer_name)?;

        Ok(())
    }
}
