pub mod errors;
pub mod models;
pub mod remote;
pub mod services;
pub mod storage;

use std::sync::Arc;

use models::{
    farmer::{AuthResponse, Farmer, SignupForm},
    settings::Settings,
    summary::{CategoryTotal, Summary},
    transaction::{Transaction, TransactionInput},
};
use remote::{supabase::SupabaseBackend, traits::FarmerBackend};
use services::{
    auth_service::AuthService, display_service::DisplayService,
    transaction_store::TransactionStore, transactions_view::TransactionsView,
};
use storage::{memory::MemoryStore, traits::KeyValueStore};

use errors::CoreError;

/// Main entry point for the Farm Ledger core library.
///
/// Wires one storage backend into the transaction store and (when a
/// backend is configured) the auth service. Cheap to share: clone the
/// `Arc<TransactionStore>` from [`store`](Self::store) into views.
#[must_use]
pub struct FarmLedger {
    settings: Settings,
    storage: Arc<dyn KeyValueStore>,
    store: Arc<TransactionStore>,
    auth: Option<AuthService>,
    display: DisplayService,
}

impl std::fmt::Debug for FarmLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FarmLedger")
            .field("storage", &self.storage.name())
            .field("transactions_key", &self.settings.transactions_key)
            .field("backend", &self.settings.backend.as_ref().map(|b| &b.url))
            .finish()
    }
}

impl FarmLedger {
    /// Build from settings. A configured backend gets a Supabase client.
    pub fn new(settings: Settings, storage: Arc<dyn KeyValueStore>) -> Self {
        let backend = settings
            .backend
            .as_ref()
            .map(|b| Arc::new(SupabaseBackend::new(b)) as Arc<dyn FarmerBackend>);
        Self::build(settings, storage, backend)
    }

    /// Build with an explicit backend implementation (tests, alternative hosts).
    pub fn with_backend(
        settings: Settings,
        storage: Arc<dyn KeyValueStore>,
        backend: Arc<dyn FarmerBackend>,
    ) -> Self {
        Self::build(settings, storage, Some(backend))
    }

    /// Offline ledger over volatile memory with default settings.
    pub fn in_memory() -> Self {
        Self::new(Settings::default(), Arc::new(MemoryStore::new()))
    }

    /// Ledger persisted as files under `dir` (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn open_dir(settings: Settings, dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(settings, Arc::new(storage::file::FileStore::new(dir)))
    }

    fn build(
        settings: Settings,
        storage: Arc<dyn KeyValueStore>,
        backend: Option<Arc<dyn FarmerBackend>>,
    ) -> Self {
        let store = Arc::new(TransactionStore::with_key(
            Arc::clone(&storage),
            settings.transactions_key.clone(),
        ));
        let auth = backend.map(|backend| {
            AuthService::with_session_key(backend, Arc::clone(&storage), settings.session_key.clone())
        });
        let display = DisplayService::new(settings.currency_symbol.clone());
        Self {
            settings,
            storage,
            store,
            auth,
            display,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Shared handle to the transaction store.
    pub fn store(&self) -> Arc<TransactionStore> {
        Arc::clone(&self.store)
    }

    /// A fresh display view over the store, loaded once.
    pub async fn view(&self) -> TransactionsView {
        TransactionsView::load(self.store()).await
    }

    pub fn display(&self) -> &DisplayService {
        &self.display
    }

    // ── Transactions ────────────────────────────────────────────────

    /// All transactions, most-recent-first (seeded on first use).
    pub async fn list_transactions(&self) -> Vec<Transaction> {
        self.store.list().await
    }

    pub async fn add_transaction(&self, input: TransactionInput) -> Result<Vec<Transaction>, CoreError> {
        self.store.add(input).await
    }

    pub async fn remove_transaction(&self, id: &str) -> Result<Vec<Transaction>, CoreError> {
        self.store.remove(id).await
    }

    /// Totals over the current persisted collection.
    pub async fn summary(&self) -> Summary {
        let transactions = self.store.list().await;
        self.store.summarize(&transactions)
    }

    /// Expense totals per category over the current persisted collection.
    pub async fn category_breakdown(&self) -> Vec<CategoryTotal> {
        let transactions = self.store.list().await;
        self.store.category_breakdown(&transactions)
    }

    // ── Account ─────────────────────────────────────────────────────

    pub fn has_backend(&self) -> bool {
        self.auth.is_some()
    }

    pub async fn signup(&self, form: SignupForm) -> Result<AuthResponse, CoreError> {
        self.auth()?.signup(form).await
    }

    pub async fn login(&self, mobile_number: &str, password: &str) -> Result<AuthResponse, CoreError> {
        self.auth()?.login(mobile_number, password).await
    }

    pub async fn current_farmer(&self) -> Option<Farmer> {
        match &self.auth {
            Some(auth) => auth.current_farmer().await,
            None => None,
        }
    }

    pub async fn logout(&self) -> Result<AuthResponse, CoreError> {
        Ok(self.auth()?.logout().await)
    }

    fn auth(&self) -> Result<&AuthService, CoreError> {
        self.auth.as_ref().ok_or_else(|| CoreError::RemoteError {
            function: "auth".into(),
            message: "No backend configured".into(),
        })
    }
}
