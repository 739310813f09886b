//! In-memory storage implementation for testing

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::traits::*;
use crate::types::*;

/// In-memory storage implementation for testing and development
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    transactions: Arc<RwLock<HashMap<String, LedgerTransaction>>>,
    links: Arc<RwLock<HashMap<Uuid, DocumentLink>>>,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    /// Create a new memory storage instance
    pub fn new() -> Self {
        Self {
            transactions: Arc::new(RwLock::new(HashMap::new())),
            links: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.transactions.write().unwrap().clear();
        self.links.write().unwrap().clear();
    }
}

#[async_trait]
impl ReconciliationStorage for MemoryStorage {
    async fn save_transaction(&mut self, transaction: &LedgerTransaction) -> ReconcileResult<()> {
        self.transactions
            .write()
            .unwrap()
            .insert(transaction.id.clone(), transaction.clone());
        Ok(())
    }

    async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> ReconcileResult<Option<LedgerTransaction>> {
        Ok(self
            .transactions
            .read()
            .unwrap()
            .get(transaction_id)
            .cloned())
    }

    async fn get_transactions(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> ReconcileResult<Vec<LedgerTransaction>> {
        let transactions = self.transactions.read().unwrap();
        let filtered: Vec<LedgerTransaction> = transactions
            .values()
            .filter(|txn| {
                if let Some(start) = start_date {
                    if txn.date < start {
                        return false;
                    }
                }
                if let Some(end) = end_date {
                    if txn.date > end {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect();
        Ok(filtered)
    }

    async fn update_transaction(&mut self, transaction: &LedgerTransaction) -> ReconcileResult<()> {
        if self
            .transactions
            .read()
            .unwrap()
            .contains_key(&transaction.id)
        {
            self.transactions
                .write()
                .unwrap()
                .insert(transaction.id.clone(), transaction.clone());
            Ok(())
        } else {
            Err(ReconcileError::TransactionNotFound(transaction.id.clone()))
        }
    }

    async fn save_link(&mut self, link: &DocumentLink) -> ReconcileResult<()> {
        self.links.write().unwrap().insert(link.id, link.clone());
        Ok(())
    }

    async fn get_link(&self, link_id: &Uuid) -> ReconcileResult<Option<DocumentLink>> {
        Ok(self.links.read().unwrap().get(link_id).cloned())
    }

    async fn get_transaction_links(
        &self,
        transaction_id: &str,
    ) -> ReconcileResult<Vec<DocumentLink>> {
        let links = self.links.read().unwrap();
        let mut filtered: Vec<DocumentLink> = links
            .values()
            .filter(|link| link.transaction_id == transaction_id)
            .cloned()
            .collect();
        filtered.sort_by(|a, b| a.linked_at.cmp(&b.linked_at));
        Ok(filtered)
    }

    async fn delete_link(&mut self, link_id: &Uuid) -> ReconcileResult<()> {
        if self.links.write().unwrap().remove(link_id).is_some() {
            Ok(())
        } else {
            Err(ReconcileError::LinkNotFound(link_id.to_string()))
        }
    }
}
