use std::sync::Arc;

use log::error;
use tokio::sync::watch;

use crate::errors::CoreError;
use crate::models::chart::ChartSlice;
use crate::models::summary::{CategoryTotal, Summary};
use crate::models::transaction::{RecordsTab, Transaction, TransactionInput};
use crate::services::chart_service::ChartService;
use crate::services::summary_service::SummaryService;
use crate::services::transaction_store::TransactionStore;

/// Read-through cache over a [`TransactionStore`] for display code.
///
/// The cached list only changes on `refresh`, on a successful `add` /
/// `remove` through this view, or on `sync` picking up a change published
/// by the store. A failed mutation keeps the previous view.
pub struct TransactionsView {
    store: Arc<TransactionStore>,
    updates: watch::Receiver<Vec<Transaction>>,
    transactions: Vec<Transaction>,
    loading: bool,
    error: Option<String>,
    summary_service: SummaryService,
    chart_service: ChartService,
}

impl std::fmt::Debug for TransactionsView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionsView")
            .field("transactions", &self.transactions.len())
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish()
    }
}

impl TransactionsView {
    /// Create an empty view in the loading state. Call `refresh` to fill it.
    pub fn new(store: Arc<TransactionStore>) -> Self {
        let updates = store.subscribe();
        Self {
            store,
            updates,
            transactions: Vec::new(),
            loading: true,
            error: None,
            summary_service: SummaryService::new(),
            chart_service: ChartService::new(),
        }
    }

    /// Create a view and load it immediately.
    pub async fn load(store: Arc<TransactionStore>) -> Self {
        let mut view = Self::new(store);
        view.refresh().await;
        view
    }

    // ── Store round-trips ───────────────────────────────────────────

    /// Reload from the store. On failure the list is emptied and
    /// `error()` reports a generic message.
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.store.try_list().await {
            Ok(transactions) => {
                self.transactions = transactions;
                self.error = None;
            }
            Err(e) => {
                error!("Failed to load transactions: {e}");
                self.transactions.clear();
                self.error = Some("Failed to load transactions".into());
            }
        }
        self.updates.borrow_and_update();
        self.loading = false;
    }

    pub async fn add(&mut self, input: TransactionInput) -> Result<&[Transaction], CoreError> {
        let updated = self.store.add(input).await?;
        self.replace(updated);
        Ok(self.transactions.as_slice())
    }

    pub async fn remove(&mut self, id: &str) -> Result<&[Transaction], CoreError> {
        let updated = self.store.remove(id).await?;
        self.replace(updated);
        Ok(self.transactions.as_slice())
    }

    /// Pull in a change published by the store (e.g., made through another
    /// view). Returns `true` if the cached list was replaced.
    pub fn sync(&mut self) -> bool {
        if !self.updates.has_changed().unwrap_or(false) {
            return false;
        }
        self.transactions = self.updates.borrow_and_update().clone();
        self.error = None;
        true
    }

    // ── Cached state ────────────────────────────────────────────────

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Transactions visible on a records tab, keeping collection order.
    pub fn filtered(&self, tab: RecordsTab) -> Vec<&Transaction> {
        self.transactions.iter().filter(|t| tab.matches(t)).collect()
    }

    // ── Derived views ───────────────────────────────────────────────

    pub fn summary(&self) -> Summary {
        self.summary_service.summarize(&self.transactions)
    }

    pub fn category_breakdown(&self) -> Vec<CategoryTotal> {
        self.summary_service.category_breakdown(&self.transactions)
    }

    pub fn pie_chart(&self) -> Vec<ChartSlice> {
        self.chart_service.pie_chart(&self.summary())
    }

    pub fn category_chart(&self) -> Vec<ChartSlice> {
        self.chart_service.category_chart(&self.category_breakdown())
    }

    fn replace(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
        self.error = None;
        self.updates.borrow_and_update();
    }
}
