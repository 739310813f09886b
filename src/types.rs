//! Core types and data structures for the reconciliation system

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Qualitative confidence that a proposed document-to-transaction link is
/// correct, used to gate how much confirmation friction is shown before
/// committing the link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    /// Amount and date both line up - extremely likely the correct match
    Low,
    /// Some signals agree - worth a human check before linking
    Medium,
    /// No signals agree - linking is a deliberate override
    High,
}

impl RiskLevel {
    /// Human-readable explanation shown alongside the risk level
    pub fn message(&self) -> &'static str {
        match self {
            RiskLevel::Low => {
                "Amount and date both match, this transaction is extremely likely the correct one."
            }
            RiskLevel::Medium => {
                "This transaction has some similarities, verify the details before linking."
            }
            RiskLevel::High => {
                "This transaction has nothing in common with the document, confirm this is a deliberate override."
            }
        }
    }
}

/// Structured fields derived from an uploaded invoice or receipt file.
/// Produced by an upstream extraction step and immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Document total, always positive
    pub amount: BigDecimal,
    /// ISO 4217 currency code (e.g. "GBP")
    pub currency: String,
    /// Name of the party that issued the document; empty when extraction
    /// could not determine one, never null
    pub issuer_name: String,
    /// Date printed on the document
    pub document_date: NaiveDate,
}

impl ExtractedDocument {
    /// Create a new extracted document from already-typed fields
    pub fn new(
        amount: BigDecimal,
        currency: String,
        issuer_name: String,
        document_date: NaiveDate,
    ) -> Self {
        Self {
            amount,
            currency,
            issuer_name,
            document_date,
        }
    }

    /// Build a document from raw extracted strings.
    ///
    /// Dates must be ISO 8601 (`YYYY-MM-DD`). Fails with
    /// [`ReconcileError::InvalidInput`] when the amount or date cannot be
    /// parsed - a caller bug, not a retryable condition.
    pub fn parse(
        amount: &str,
        currency: &str,
        issuer_name: &str,
        document_date: &str,
    ) -> ReconcileResult<Self> {
        let amount = parse_amount(amount)?;
        let document_date = parse_date(document_date)?;

        Ok(Self {
            amount,
            currency: currency.trim().to_string(),
            issuer_name: issuer_name.trim().to_string(),
            document_date,
        })
    }
}

/// A bank-account movement record owned by the reconciliation subsystem,
/// read here only for comparison against extracted documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerTransaction {
    /// Unique identifier for the transaction
    pub id: String,
    /// Signed amount; negative values are outflows
    pub amount: BigDecimal,
    /// ISO 4217 currency code
    pub currency: String,
    /// Bank statement description line; may be empty, never null
    pub description: String,
    /// Date the movement was recorded by the bank
    pub date: NaiveDate,
    /// Number of documents already linked to this transaction
    pub existing_attachment_count: u32,
}

impl LedgerTransaction {
    /// Create a new ledger transaction with no attachments
    pub fn new(
        id: String,
        amount: BigDecimal,
        currency: String,
        description: String,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            amount,
            currency,
            description,
            date,
            existing_attachment_count: 0,
        }
    }

    /// Build a transaction from raw statement strings.
    ///
    /// Fails with [`ReconcileError::InvalidInput`] when the amount or date
    /// cannot be parsed, and with [`ReconcileError::Validation`] when the
    /// description exceeds the storage bound.
    pub fn parse(
        id: &str,
        amount: &str,
        currency: &str,
        description: &str,
        date: &str,
    ) -> ReconcileResult<Self> {
        let amount = parse_amount(amount)?;
        let date = parse_date(date)?;
        crate::utils::validation::validate_description(description)?;

        Ok(Self::new(
            id.trim().to_string(),
            amount,
            currency.trim().to_string(),
            description.trim().to_string(),
            date,
        ))
    }

    /// Unsigned magnitude of the movement
    pub fn magnitude(&self) -> BigDecimal {
        self.amount.abs()
    }

    /// Whether this movement is money leaving the account
    pub fn is_outflow(&self) -> bool {
        self.amount < BigDecimal::from(0)
    }
}

/// Result of comparing one extracted document against one candidate
/// transaction. Transient - computed on demand and discarded once the user
/// accepts or rejects the link.
///
/// The three booleans are exposed individually so a UI can render a
/// breakdown of why a match was suggested, not just the final level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchAssessment {
    /// Overall confidence classification
    pub risk_level: RiskLevel,
    /// Document amount equals the transaction magnitude (within tolerance)
    pub amount_matches: bool,
    /// Dates fall within the proximity window
    pub date_is_close: bool,
    /// Issuer name and statement description overlap
    pub description_matches: bool,
    /// Human-readable explanation for the risk level
    pub message: String,
}

impl MatchAssessment {
    /// Whether the match is worth surfacing without an override warning
    pub fn is_plausible(&self) -> bool {
        self.risk_level != RiskLevel::High
    }
}

/// An accepted document-to-transaction link, persisted once a human
/// confirms the match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLink {
    /// Unique identifier for the link record
    pub id: Uuid,
    /// Transaction the document was attached to
    pub transaction_id: String,
    /// Snapshot of the document at the time of linking
    pub document: ExtractedDocument,
    /// Risk level the evaluator reported when the link was accepted
    pub risk_level: RiskLevel,
    /// When the link was created
    pub linked_at: NaiveDateTime,
}

impl DocumentLink {
    /// Create a new link record with a fresh identifier
    pub fn new(transaction_id: String, document: ExtractedDocument, risk_level: RiskLevel) -> Self {
        Self {
            id: Uuid::new_v4(),
            transaction_id,
            document,
            risk_level,
            linked_at: chrono::Utc::now().naive_utc(),
        }
    }
}

fn parse_amount(raw: &str) -> ReconcileResult<BigDecimal> {
    raw.trim()
        .parse()
        .map_err(|_| ReconcileError::InvalidInput(format!("unparseable amount: '{}'", raw)))
}

fn parse_date(raw: &str) -> ReconcileResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ReconcileError::InvalidInput(format!("unparseable date: '{}'", raw)))
}

/// Errors that can occur in the reconciliation system
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Link not found: {0}")]
    LinkNotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for reconciliation operations
pub type ReconcileResult<T> = Result<T, ReconcileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_parse_valid() {
        let doc = ExtractedDocument::parse("150.00", "GBP", "Acme Ltd", "2024-03-01").unwrap();
        assert_eq!(doc.amount, "150.00".parse::<BigDecimal>().unwrap());
        assert_eq!(doc.currency, "GBP");
        assert_eq!(doc.issuer_name, "Acme Ltd");
        assert_eq!(
            doc.document_date,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_document_parse_bad_date() {
        let result = ExtractedDocument::parse("150.00", "GBP", "Acme Ltd", "01/03/2024");
        assert!(matches!(result, Err(ReconcileError::InvalidInput(_))));
    }

    #[test]
    fn test_document_parse_bad_amount() {
        let result = ExtractedDocument::parse("one fifty", "GBP", "Acme Ltd", "2024-03-01");
        assert!(matches!(result, Err(ReconcileError::InvalidInput(_))));
    }

    #[test]
    fn test_transaction_parse_oversized_description() {
        let oversized = "X".repeat(1000);
        let result = LedgerTransaction::parse("tx1", "-1.00", "GBP", &oversized, "2024-01-01");
        assert!(matches!(result, Err(ReconcileError::Validation(_))));
    }

    #[test]
    fn test_transaction_magnitude_and_direction() {
        let tx =
            LedgerTransaction::parse("tx1", "-150.00", "GBP", "ACME LTD", "2024-03-03").unwrap();
        assert!(tx.is_outflow());
        assert_eq!(tx.magnitude(), "150.00".parse::<BigDecimal>().unwrap());

        let deposit =
            LedgerTransaction::parse("tx2", "75.25", "GBP", "Refund", "2024-03-03").unwrap();
        assert!(!deposit.is_outflow());
    }

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }
}
