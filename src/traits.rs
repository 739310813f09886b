//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::types::*;

/// Storage abstraction for the reconciliation system
///
/// This trait allows the reconciliation core to work with any storage
/// backend (PostgreSQL, MySQL, SQLite, in-memory, etc.) by implementing
/// these methods.
#[async_trait]
pub trait ReconciliationStorage: Send + Sync {
    /// Save a ledger transaction to storage
    async fn save_transaction(&mut self, transaction: &LedgerTransaction) -> ReconcileResult<()>;

    /// Get a transaction by ID
    async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> ReconcileResult<Option<LedgerTransaction>>;

    /// List all transactions within a date range
    async fn get_transactions(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> ReconcileResult<Vec<LedgerTransaction>>;

    /// Update a transaction
    async fn update_transaction(&mut self, transaction: &LedgerTransaction) -> ReconcileResult<()>;

    /// Save an accepted document link
    async fn save_link(&mut self, link: &DocumentLink) -> ReconcileResult<()>;

    /// Get a link by ID
    async fn get_link(&self, link_id: &Uuid) -> ReconcileResult<Option<DocumentLink>>;

    /// List all links attached to a transaction
    async fn get_transaction_links(
        &self,
        transaction_id: &str,
    ) -> ReconcileResult<Vec<DocumentLink>>;

    /// Delete a link
    async fn delete_link(&mut self, link_id: &Uuid) -> ReconcileResult<()>;
}

/// Trait for implementing custom document validation rules
pub trait DocumentValidator: Send + Sync {
    /// Validate an extracted document before it is used for matching
    fn validate_document(&self, document: &ExtractedDocument) -> ReconcileResult<()>;
}

/// Default document validator with basic rules
pub struct DefaultDocumentValidator;

impl DocumentValidator for DefaultDocumentValidator {
    fn validate_document(&self, document: &ExtractedDocument) -> ReconcileResult<()> {
        if document.amount <= BigDecimal::from(0) {
            return Err(ReconcileError::Validation(
                "Document amount must be positive".to_string(),
            ));
        }

        if document.currency.trim().is_empty() {
            return Err(ReconcileError::Validation(
                "Document currency cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
