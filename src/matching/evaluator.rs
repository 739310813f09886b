//! Match confidence scoring between extracted documents and ledger transactions

use bigdecimal::BigDecimal;

use crate::types::{ExtractedDocument, LedgerTransaction, MatchAssessment, RiskLevel};

/// Similarity score between a statement description and an issuer name.
///
/// Case-insensitive substring containment in either direction: 100 when
/// either lowercased string contains the other, otherwise 0. Binary by
/// design - no partial or fuzzy matching is performed. Blank text on either
/// side scores 0; a blank issuer would otherwise vacuously match every
/// description.
pub fn description_score(description: &str, issuer_name: &str) -> u32 {
    let description = description.trim().to_lowercase();
    let issuer = issuer_name.trim().to_lowercase();

    if description.is_empty() || issuer.is_empty() {
        return 0;
    }

    if description.contains(&issuer) || issuer.contains(&description) {
        100
    } else {
        0
    }
}

/// Evaluates whether an uploaded financial document should be linked to an
/// existing ledger transaction.
///
/// The evaluator is a pure function of its two inputs: synchronous,
/// stateless and re-entrant, with no I/O. It never auto-links; it only
/// produces a [`MatchAssessment`] for a human to accept or reject.
#[derive(Debug, Clone)]
pub struct MatchEvaluator {
    /// Absolute difference below which amounts are considered equal
    amount_tolerance: BigDecimal,
    /// Maximum day distance (inclusive) for dates to count as close
    date_window_days: i64,
    /// Description score above which descriptions count as matching
    description_threshold: u32,
}

impl Default for MatchEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchEvaluator {
    /// Create an evaluator with the standard thresholds: amounts within
    /// 0.01, dates within 10 days, description score above 40
    pub fn new() -> Self {
        Self {
            amount_tolerance: BigDecimal::from(1) / BigDecimal::from(100),
            date_window_days: 10,
            description_threshold: 40,
        }
    }

    /// Create an evaluator with custom thresholds
    pub fn with_thresholds(
        amount_tolerance: BigDecimal,
        date_window_days: i64,
        description_threshold: u32,
    ) -> Self {
        Self {
            amount_tolerance,
            date_window_days,
            description_threshold,
        }
    }

    /// Compare a document against a candidate transaction.
    ///
    /// Amounts are compared by magnitude since ledger amounts are signed;
    /// only the size of the movement matters. Dates are compared by
    /// absolute day distance - documents are commonly issued a few days
    /// before or after the matching bank movement.
    pub fn assess(
        &self,
        doc: &ExtractedDocument,
        tx: &LedgerTransaction,
    ) -> MatchAssessment {
        let amount_matches = (&doc.amount - tx.magnitude()).abs() < self.amount_tolerance;

        let days_diff = doc
            .document_date
            .signed_duration_since(tx.date)
            .num_days()
            .abs();
        let date_is_close = days_diff <= self.date_window_days;

        let description_matches =
            description_score(&tx.description, &doc.issuer_name) > self.description_threshold;

        // First matching rule wins
        let risk_level = if amount_matches && date_is_close {
            RiskLevel::Low
        } else if amount_matches || (date_is_close && description_matches) {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        };

        MatchAssessment {
            risk_level,
            amount_matches,
            date_is_close,
            description_matches,
            message: risk_level.message().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn doc(amount: &str, issuer: &str, date: (i32, u32, u32)) -> ExtractedDocument {
        ExtractedDocument::new(
            amount.parse().unwrap(),
            "GBP".to_string(),
            issuer.to_string(),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        )
    }

    fn tx(amount: &str, description: &str, date: (i32, u32, u32)) -> LedgerTransaction {
        LedgerTransaction::new(
            "tx1".to_string(),
            amount.parse().unwrap(),
            "GBP".to_string(),
            description.to_string(),
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        )
    }

    #[test]
    fn test_amount_and_date_match_is_low_risk() {
        let evaluator = MatchEvaluator::new();
        let assessment = evaluator.assess(
            &doc("150.00", "Acme Ltd", (2024, 3, 1)),
            &tx("-150.00", "ACME LTD PAYMENT", (2024, 3, 3)),
        );

        assert!(assessment.amount_matches);
        assert!(assessment.date_is_close);
        assert!(assessment.description_matches);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
        assert_eq!(assessment.message, RiskLevel::Low.message());
    }

    #[test]
    fn test_nothing_in_common_is_high_risk() {
        let evaluator = MatchEvaluator::new();
        let assessment = evaluator.assess(
            &doc("150.00", "Acme Ltd", (2024, 3, 1)),
            &tx("-149.50", "Unrelated transfer", (2024, 3, 3)),
        );

        assert!(!assessment.amount_matches);
        assert!(assessment.date_is_close);
        assert!(!assessment.description_matches);
        assert_eq!(assessment.risk_level, RiskLevel::High);
    }

    #[test]
    fn test_amount_alone_is_medium_risk() {
        let evaluator = MatchEvaluator::new();
        let assessment = evaluator.assess(
            &doc("500.00", "Zenith Corp", (2024, 1, 1)),
            &tx("-500.00", "random", (2024, 2, 15)),
        );

        assert!(assessment.amount_matches);
        assert!(!assessment.date_is_close);
        assert_eq!(assessment.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_amount_and_description_but_distant_date_is_medium_risk() {
        // Low risk needs amount AND date; a matching description cannot
        // substitute for date proximity
        let evaluator = MatchEvaluator::new();
        let assessment = evaluator.assess(
            &doc("250.00", "Acme Ltd", (2024, 1, 1)),
            &tx("-250.00", "ACME LTD STANDING ORDER", (2024, 2, 10)),
        );

        assert!(assessment.amount_matches);
        assert!(!assessment.date_is_close);
        assert!(assessment.description_matches);
        assert_eq!(assessment.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_date_window_boundary() {
        let evaluator = MatchEvaluator::new();

        // 10 days apart is inside the window
        let at_boundary = evaluator.assess(
            &doc("99.99", "Acme Ltd", (2024, 3, 1)),
            &tx("-99.99", "ACME LTD", (2024, 3, 11)),
        );
        assert!(at_boundary.date_is_close);
        assert_eq!(at_boundary.risk_level, RiskLevel::Low);

        // 11 days apart is outside
        let past_boundary = evaluator.assess(
            &doc("99.99", "Acme Ltd", (2024, 3, 1)),
            &tx("-99.99", "ACME LTD", (2024, 3, 12)),
        );
        assert!(!past_boundary.date_is_close);
        assert_eq!(past_boundary.risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_amount_tolerance_boundary() {
        let evaluator = MatchEvaluator::new();

        // 0.009 below the document amount still matches
        let inside = evaluator.assess(
            &doc("150.009", "Acme Ltd", (2024, 3, 1)),
            &tx("-150.00", "Unrelated", (2024, 3, 2)),
        );
        assert!(inside.amount_matches);

        // exactly 0.01 apart does not (strict comparison)
        let at_tolerance = evaluator.assess(
            &doc("150.01", "Acme Ltd", (2024, 3, 1)),
            &tx("-150.00", "Unrelated", (2024, 3, 2)),
        );
        assert!(!at_tolerance.amount_matches);
    }

    #[test]
    fn test_amount_compare_ignores_sign() {
        let evaluator = MatchEvaluator::new();
        let document = doc("150.00", "Acme Ltd", (2024, 3, 1));

        let outflow = evaluator.assess(&document, &tx("-150.00", "x", (2024, 3, 1)));
        let inflow = evaluator.assess(&document, &tx("150.00", "x", (2024, 3, 1)));

        assert!(outflow.amount_matches);
        assert!(inflow.amount_matches);
    }

    #[test]
    fn test_assessment_is_deterministic() {
        let evaluator = MatchEvaluator::new();
        let document = doc("150.00", "Acme Ltd", (2024, 3, 1));
        let transaction = tx("-150.00", "ACME LTD PAYMENT", (2024, 3, 3));

        let first = evaluator.assess(&document, &transaction);
        let second = evaluator.assess(&document, &transaction);
        assert_eq!(first, second);
    }

    #[test]
    fn test_description_score_containment() {
        assert_eq!(description_score("ACME LTD PAYMENT", "Acme Ltd"), 100);
        assert_eq!(description_score("acme", "ACME LTD"), 100);
        assert_eq!(description_score("Unrelated transfer", "Acme Ltd"), 0);
    }

    #[test]
    fn test_description_score_blank_text() {
        assert_eq!(description_score("", "Acme Ltd"), 0);
        assert_eq!(description_score("ACME LTD", ""), 0);
        assert_eq!(description_score("  ", "  "), 0);
    }

    #[test]
    fn test_custom_thresholds() {
        // Widen the tolerance to a pound and the window to 30 days
        let evaluator = MatchEvaluator::with_thresholds(BigDecimal::from(1), 30, 40);
        let assessment = evaluator.assess(
            &doc("150.00", "Acme Ltd", (2024, 3, 1)),
            &tx("-149.50", "Unrelated", (2024, 3, 20)),
        );

        assert!(assessment.amount_matches);
        assert!(assessment.date_is_close);
        assert_eq!(assessment.risk_level, RiskLevel::Low);
    }
}
