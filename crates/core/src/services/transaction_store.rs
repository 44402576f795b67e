use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::sync::{watch, Mutex};

use crate::errors::CoreError;
use crate::models::settings::DEFAULT_TRANSACTIONS_KEY;
use crate::models::summary::{CategoryTotal, Summary};
use crate::models::transaction::{new_id, Transaction, TransactionInput};
use crate::services::summary_service::SummaryService;
use crate::storage::seed::seed_transactions;
use crate::storage::traits::KeyValueStore;

/// Owns the persisted transaction collection.
///
/// The value stored under `key` is the single source of truth: every
/// operation reads it, and every mutation overwrites it in full. The
/// collection is kept most-recent-first.
///
/// Read-modify-write sequences run under an internal async mutex, so
/// overlapping `add`/`remove` calls on one store are applied one after
/// the other instead of overwriting each other.
pub struct TransactionStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    write_lock: Mutex<()>,
    updates: watch::Sender<Vec<Transaction>>,
    summary_service: SummaryService,
}

impl std::fmt::Debug for TransactionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionStore")
            .field("storage", &self.storage.name())
            .field("key", &self.key)
            .field("subscribers", &self.updates.receiver_count())
            .finish()
    }
}

impl TransactionStore {
    /// Store using the default `farmer_transactions` key.
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_key(storage, DEFAULT_TRANSACTIONS_KEY)
    }

    pub fn with_key(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let (updates, _) = watch::channel(Vec::new());
        Self {
            storage,
            key: key.into(),
            write_lock: Mutex::new(()),
            updates,
            summary_service: SummaryService::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Receive the full collection after every successful list, add or remove.
    pub fn subscribe(&self) -> watch::Receiver<Vec<Transaction>> {
        self.updates.subscribe()
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// All transactions, most-recent-first.
    ///
    /// On first use (nothing stored yet) the seed set is persisted and
    /// returned. Never fails: storage errors are logged and an empty list
    /// is returned instead.
    pub async fn list(&self) -> Vec<Transaction> {
        match self.try_list().await {
            Ok(transactions) => transactions,
            Err(e) => {
                error!("Error getting transactions from {} storage: {e}", self.storage.name());
                Vec::new()
            }
        }
    }

    /// Like [`list`](Self::list) but reports storage failures to the caller.
    pub async fn try_list(&self) -> Result<Vec<Transaction>, CoreError> {
        let _guard = self.write_lock.lock().await;
        let transactions = self.load_or_seed().await?;
        self.publish(&transactions);
        Ok(transactions)
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Validate `input`, prepend it and persist the whole collection.
    ///
    /// Returns the updated collection. Invalid input fails with
    /// `ValidationError` before storage is touched; a caller-supplied id
    /// that already exists is also a `ValidationError`. Storage failures
    /// surface as `PersistenceError` and leave the stored data unchanged.
    pub async fn add(&self, input: TransactionInput) -> Result<Vec<Transaction>, CoreError> {
        input.validate()?;

        let _guard = self.write_lock.lock().await;
        let mut transactions = self.load_or_seed().await?;

        if let Some(id) = input.id.as_deref() {
            if transactions.iter().any(|t| t.id == id) {
                return Err(CoreError::ValidationError(format!(
                    "Transaction id already exists: {id}"
                )));
            }
        }

        let transaction = input.into_transaction();
        info!(
            "Adding {} transaction {} ({} {})",
            transaction.transaction_type, transaction.id, transaction.amount, transaction.category
        );
        transactions.insert(0, transaction);

        self.persist(&transactions).await?;
        self.publish(&transactions);
        Ok(transactions)
    }

    /// Remove the transaction with `id` and persist the result.
    ///
    /// An unknown id is a no-op, not an error; the unchanged collection is
    /// still written back and returned.
    pub async fn remove(&self, id: &str) -> Result<Vec<Transaction>, CoreError> {
        let _guard = self.write_lock.lock().await;
        let mut transactions = self.load_or_seed().await?;

        let before = transactions.len();
        transactions.retain(|t| t.id != id);
        if transactions.len() == before {
            debug!("Remove requested for unknown transaction {id}");
        } else {
            info!("Removing transaction {id}");
        }

        self.persist(&transactions).await?;
        self.publish(&transactions);
        Ok(transactions)
    }

    // ── Aggregation (pure) ──────────────────────────────────────────

    pub fn summarize(&self, transactions: &[Transaction]) -> Summary {
        self.summary_service.summarize(transactions)
    }

    pub fn category_breakdown(&self, transactions: &[Transaction]) -> Vec<CategoryTotal> {
        self.summary_service.category_breakdown(transactions)
    }

    // ── Internals (caller holds `write_lock`) ───────────────────────

    async fn load_or_seed(&self) -> Result<Vec<Transaction>, CoreError> {
        match self.load().await? {
            Some(mut transactions) => {
                if assign_missing_ids(&mut transactions) > 0 {
                    // Written back right away so the ids stay stable across reads.
                    if let Err(e) = self.persist(&transactions).await {
                        warn!("Could not save ids assigned to stored transactions: {e}");
                    }
                }
                Ok(transactions)
            }
            None => {
                info!("No stored transactions under '{}', writing seed data", self.key);
                let seed = seed_transactions();
                self.persist(&seed).await?;
                Ok(seed)
            }
        }
    }

    async fn load(&self) -> Result<Option<Vec<Transaction>>, CoreError> {
        let bytes = self
            .storage
            .get(&self.key)
            .await
            .map_err(CoreError::into_persistence)?;

        match bytes {
            None => Ok(None),
            Some(bytes) => serde_json::from_slice(&bytes).map(Some).map_err(|e| {
                CoreError::PersistenceError(format!(
                    "Stored transactions under '{}' are unreadable: {e}",
                    self.key
                ))
            }),
        }
    }

    async fn persist(&self, transactions: &[Transaction]) -> Result<(), CoreError> {
        let bytes = serde_json::to_vec(transactions)
            .map_err(|e| CoreError::PersistenceError(format!("Failed to serialize transactions: {e}")))?;

        self.storage
            .set(&self.key, &bytes)
            .await
            .map_err(|e| {
                let e = e.into_persistence();
                error!("Error saving transactions to {} storage: {e}", self.storage.name());
                e
            })
    }

    fn publish(&self, transactions: &[Transaction]) {
        self.updates.send_replace(transactions.to_vec());
    }
}

/// Give every entry stored without an id a fresh one. Returns how many
/// entries were changed.
fn assign_missing_ids(transactions: &mut [Transaction]) -> usize {
    let mut assigned = 0;
    for t in transactions.iter_mut().filter(|t| t.id.trim().is_empty()) {
        t.id = new_id();
        assigned += 1;
    }
    if assigned > 0 {
        info!("Assigned ids to {assigned} stored transactions");
    }
    assigned
}
