//! The presentation controller that sits between a user interface and a
//! [TransactionStore].
//!
//! The controller owns everything a view needs to show: the transactions
//! loaded most recently and the figures derived from them. Views read that
//! state and forward user actions (add, delete, refresh) to the controller.

use std::collections::BTreeMap;

use crate::{
    Error,
    amount::Amount,
    database_id::TransactionId,
    stores::TransactionStore,
    summary::Summary,
    transaction::{Transaction, TransactionBuilder, TransactionForm, TransactionType},
};

/// The total expense per category, ordered by category name.
pub type ExpenseBreakdown = BTreeMap<String, Amount>;

/// Presentation state for the budget manager.
#[derive(Debug)]
pub struct Budget<S> {
    store: S,
    transactions: Vec<Transaction>,
}

impl<S: TransactionStore> Budget<S> {
    /// Create a controller, making sure the store's schema exists and loading
    /// the current transactions.
    ///
    /// # Errors
    /// Returns any error from [TransactionStore::ensure_schema] or
    /// [TransactionStore::list_all].
    pub fn open(store: S) -> Result<Self, Error> {
        store.ensure_schema()?;

        let mut budget = Self {
            store,
            transactions: Vec::new(),
        };
        budget.load()?;

        Ok(budget)
    }

    /// The transactions from the last load, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Replace the loaded transactions with the current contents of the store.
    ///
    /// On error the previously loaded transactions are kept.
    pub fn load(&mut self) -> Result<(), Error> {
        self.transactions = self.store.list_all()?;
        tracing::debug!("loaded {} transactions", self.transactions.len());

        Ok(())
    }

    /// Validate and store the transaction from `form`, then reload.
    ///
    /// Once the store has accepted the transaction the ID is returned, even if
    /// the reload fails. The failure is logged and the previously loaded
    /// transactions are kept.
    ///
    /// # Errors
    /// Returns an [Error::WriteError] if the form is invalid, otherwise any
    /// error from the store. Nothing is stored when an error is returned.
    pub fn add(&mut self, form: TransactionForm) -> Result<TransactionId, Error> {
        let builder = TransactionBuilder::try_from(form)?;
        let id = self.store.add(builder)?;
        tracing::info!("added transaction {id}");

        self.reload_after_write();

        Ok(id)
    }

    /// Delete the transaction with the ID `id`, then reload.
    ///
    /// Returns `false` if there was no such transaction. Once the store has
    /// run the delete its result is returned, even if the reload fails.
    ///
    /// # Errors
    /// Returns any error from the store. Nothing is deleted when an error is
    /// returned.
    pub fn delete(&mut self, id: TransactionId) -> Result<bool, Error> {
        let deleted = self.store.delete(id)?;

        if deleted {
            tracing::info!("deleted transaction {id}");
        } else {
            tracing::warn!("transaction {id} was not found, nothing was deleted");
        }

        self.reload_after_write();

        Ok(deleted)
    }

    /// Reload after a committed write.
    ///
    /// The write cannot be undone at this point, so a failed reload is logged
    /// and the previously loaded transactions are kept until the next
    /// successful [Budget::load].
    fn reload_after_write(&mut self) {
        if let Err(error) = self.load() {
            tracing::error!(
                "the change was saved but the transactions could not be reloaded: {error}"
            );
        }
    }

    /// Get the income and expense totals from the store.
    pub fn summary(&self) -> Result<Summary, Error> {
        self.store.summarize()
    }

    /// Sum the loaded expenses by category, for the expense chart.
    pub fn expenses_by_category(&self) -> ExpenseBreakdown {
        expenses_by_category(&self.transactions)
    }
}

/// Sum the amounts of the expense transactions in `transactions` by category.
///
/// Income is ignored. Categories without expenses are left out.
pub fn expenses_by_category(transactions: &[Transaction]) -> ExpenseBreakdown {
    let mut totals = ExpenseBreakdown::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionType::Expense)
    {
        let total = totals
            .entry(transaction.category.clone())
            .or_insert(Amount::ZERO);
        *total = *total + transaction.amount;
    }

    totals
}
