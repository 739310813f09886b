//! Basic invoice matching example

use reconciliation_core::utils::MemoryStorage;
use reconciliation_core::{
    ExtractedDocument, LedgerTransaction, Reconciler, ReconciliationStorage,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧾 Reconciliation Core - Invoice Matching Example\n");

    // 1. Seed some bank transactions into in-memory storage
    println!("🏦 Loading ledger transactions...");
    let mut storage = MemoryStorage::new();

    let statement = [
        ("tx001", "-150.00", "ACME LTD PAYMENT", "2024-03-03"),
        ("tx002", "-1200.00", "MONTHLY RENT MARCH", "2024-03-01"),
        ("tx003", "-150.00", "CARD PURCHASE 4421", "2024-04-18"),
        ("tx004", "-4.20", "COFFEE SHOP", "2024-03-02"),
    ];
    for (id, amount, description, date) in statement {
        let tx = LedgerTransaction::parse(id, amount, "GBP", description, date)?;
        println!("  ✓ {} {} {}", tx.date, tx.amount, tx.description);
        storage.save_transaction(&tx).await?;
    }
    println!();

    // 2. An invoice arrives, already extracted upstream
    let invoice = ExtractedDocument::parse("150.00", "GBP", "Acme Ltd", "2024-03-01")?;
    println!(
        "📄 Uploaded invoice: {} {} from '{}' dated {}\n",
        invoice.amount, invoice.currency, invoice.issuer_name, invoice.document_date
    );

    // 3. Rank the candidate transactions
    let mut reconciler = Reconciler::new(storage);
    println!("🔍 Candidate matches:");
    for candidate in reconciler.find_matches(&invoice).await? {
        let a = &candidate.assessment;
        println!(
            "  [{:?}] {} - amount: {}, date: {}, description: {}",
            a.risk_level,
            candidate.transaction.id,
            a.amount_matches,
            a.date_is_close,
            a.description_matches
        );
        println!("         {}", a.message);
    }
    println!();

    // 4. A human accepts the top suggestion
    let best = reconciler
        .best_match(&invoice)
        .await?
        .expect("at least one plausible candidate");
    let link = reconciler.link_document(&invoice, &best.transaction.id).await?;
    println!(
        "🔗 Linked invoice to {} (risk at acceptance: {:?}, link id {})",
        link.transaction_id, link.risk_level, link.id
    );

    let links = reconciler.transaction_links(&link.transaction_id).await?;
    println!(
        "   Transaction now has {} attached document(s)",
        links.len()
    );

    Ok(())
}
