//! Candidate search, ranking, and document linking

use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::MatchEvaluator;
use crate::traits::*;
use crate::types::*;

/// A candidate transaction paired with its match assessment, ready for a
/// human accept/reject decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    /// The candidate ledger transaction
    pub transaction: LedgerTransaction,
    /// How well the document fits this transaction
    pub assessment: MatchAssessment,
}

/// Reconciliation service that finds candidate transactions for an
/// extracted document and records accepted links
///
/// All I/O lives here; the underlying [`MatchEvaluator`] stays pure.
pub struct Reconciler<S: ReconciliationStorage> {
    storage: S,
    evaluator: MatchEvaluator,
    validator: Box<dyn DocumentValidator>,
    search_window_days: i64,
}

impl<S: ReconciliationStorage> Reconciler<S> {
    /// Create a reconciler with the standard evaluator and a 90-day
    /// candidate search window either side of the document date
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            evaluator: MatchEvaluator::new(),
            validator: Box::new(DefaultDocumentValidator),
            search_window_days: 90,
        }
    }

    /// Create a reconciler with a custom evaluator
    pub fn with_evaluator(storage: S, evaluator: MatchEvaluator) -> Self {
        Self {
            storage,
            evaluator,
            validator: Box::new(DefaultDocumentValidator),
            search_window_days: 90,
        }
    }

    /// Replace the document validator
    pub fn with_validator(mut self, validator: Box<dyn DocumentValidator>) -> Self {
        self.validator = validator;
        self
    }

    /// Set how many days either side of the document date to search for
    /// candidate transactions
    pub fn with_search_window(mut self, days: i64) -> Self {
        self.search_window_days = days;
        self
    }

    /// The evaluator in use
    pub fn evaluator(&self) -> &MatchEvaluator {
        &self.evaluator
    }

    /// Fetch candidate transactions around the document date and assess
    /// each one.
    ///
    /// Candidates are returned in a deterministic order: risk level
    /// ascending, then day distance from the document date, then
    /// transaction id. Repeated calls with unchanged storage render
    /// identically.
    pub async fn find_matches(
        &self,
        document: &ExtractedDocument,
    ) -> ReconcileResult<Vec<CandidateMatch>> {
        self.validator.validate_document(document)?;

        let window = Duration::days(self.search_window_days);
        let start = document.document_date - window;
        let end = document.document_date + window;

        let transactions = self.storage.get_transactions(Some(start), Some(end)).await?;

        let mut candidates: Vec<CandidateMatch> = transactions
            .into_iter()
            .map(|transaction| {
                let assessment = self.evaluator.assess(document, &transaction);
                CandidateMatch {
                    transaction,
                    assessment,
                }
            })
            .collect();

        candidates.sort_by(|a, b| {
            let a_days = day_distance(document, &a.transaction);
            let b_days = day_distance(document, &b.transaction);
            a.assessment
                .risk_level
                .cmp(&b.assessment.risk_level)
                .then(a_days.cmp(&b_days))
                .then(a.transaction.id.cmp(&b.transaction.id))
        });

        Ok(candidates)
    }

    /// The strongest candidate, if any candidate is plausible at all
    pub async fn best_match(
        &self,
        document: &ExtractedDocument,
    ) -> ReconcileResult<Option<CandidateMatch>> {
        let candidates = self.find_matches(document).await?;
        Ok(candidates
            .into_iter()
            .find(|candidate| candidate.assessment.is_plausible()))
    }

    /// Record an accepted link between a document and a transaction.
    ///
    /// Called only after a human has accepted the match; the evaluator
    /// itself never links. The assessment is recomputed here so the stored
    /// link carries the risk level that was actually in force at
    /// acceptance time, and the transaction's attachment count is bumped.
    pub async fn link_document(
        &mut self,
        document: &ExtractedDocument,
        transaction_id: &str,
    ) -> ReconcileResult<DocumentLink> {
        self.validator.validate_document(document)?;
        crate::utils::validation::validate_transaction_id(transaction_id)?;

        let mut transaction = self.get_transaction_required(transaction_id).await?;
        let assessment = self.evaluator.assess(document, &transaction);

        let link = DocumentLink::new(
            transaction.id.clone(),
            document.clone(),
            assessment.risk_level,
        );
        self.storage.save_link(&link).await?;

        transaction.existing_attachment_count += 1;
        self.storage.update_transaction(&transaction).await?;

        Ok(link)
    }

    /// Remove a link and release the attachment on its transaction
    pub async fn unlink(&mut self, link_id: &Uuid) -> ReconcileResult<()> {
        let link = self
            .storage
            .get_link(link_id)
            .await?
            .ok_or_else(|| ReconcileError::LinkNotFound(link_id.to_string()))?;

        self.storage.delete_link(link_id).await?;

        // The transaction may have been deleted out from under the link
        if let Some(mut transaction) = self.storage.get_transaction(&link.transaction_id).await? {
            transaction.existing_attachment_count =
                transaction.existing_attachment_count.saturating_sub(1);
            self.storage.update_transaction(&transaction).await?;
        }

        Ok(())
    }

    /// List the links already attached to a transaction
    pub async fn transaction_links(
        &self,
        transaction_id: &str,
    ) -> ReconcileResult<Vec<DocumentLink>> {
        self.storage.get_transaction_links(transaction_id).await
    }

    async fn get_transaction_required(
        &self,
        transaction_id: &str,
    ) -> ReconcileResult<LedgerTransaction> {
        self.storage
            .get_transaction(transaction_id)
            .await?
            .ok_or_else(|| ReconcileError::TransactionNotFound(transaction_id.to_string()))
    }
}

fn day_distance(document: &ExtractedDocument, transaction: &LedgerTransaction) -> i64 {
    document
        .document_date
        .signed_duration_since(transaction.date)
        .num_days()
        .abs()
}
