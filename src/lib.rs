//! # Reconciliation Core
//!
//! A bank-reconciliation library providing match confidence scoring between
//! uploaded financial documents and ledger transactions, plus link
//! management for accepted matches.
//!
//! ## Features
//!
//! - **Match confidence scoring**: Deterministic risk classification (Low,
//!   Medium, High) from amount, date-proximity, and description signals
//! - **Signal breakdown**: Each assessment carries the individual boolean
//!   signals so a UI can explain why a match was suggested
//! - **Candidate search and ranking**: Fetch transactions around a document
//!   date and rank them by match quality
//! - **Link management**: Record and release accepted document links with
//!   attachment tracking on the transaction
//! - **Storage abstraction**: Database-agnostic design with trait-based
//!   storage
//!
//! ## Quick Start
//!
//! ```rust
//! use reconciliation_core::{ExtractedDocument, LedgerTransaction, MatchEvaluator, RiskLevel};
//!
//! let doc = ExtractedDocument::parse("150.00", "GBP", "Acme Ltd", "2024-03-01").unwrap();
//! let tx = LedgerTransaction::parse("tx1", "-150.00", "GBP", "ACME LTD PAYMENT", "2024-03-03")
//!     .unwrap();
//!
//! let assessment = MatchEvaluator::new().assess(&doc, &tx);
//! assert_eq!(assessment.risk_level, RiskLevel::Low);
//! ```

pub mod matching;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use matching::*;
pub use traits::*;
pub use types::*;
