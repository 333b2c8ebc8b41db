//! Transactions, budgets, and finance statistics.
//!
//! Updates to both record kinds try a full `PUT` first. When the server
//! refuses it, the changed fields alone are sent with `PATCH`; if that is
//! refused as well, the `PUT` failure is what the caller sees.

use serde_json::{Map, Value, json};
use uni_auth::CredentialProvider;
use uni_core::entities::{Budget, Transaction};
use uni_forms::{BudgetForm, FormController, TransactionForm};
use uni_records::{FinanceSummary, normalize_record};

use crate::http::decode_record;
use crate::{ApiClient, ApiFailure, ApiListing, ListQuery};

const TRANSACTIONS: &str = "finance/transactions/";
const BUDGETS: &str = "finance/budgets/";
const STATISTICS: &str = "finance/statistics/";

impl<C: CredentialProvider> ApiClient<C> {
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn list_transactions(&self, query: &ListQuery) -> ApiListing<Transaction> {
        self.list(TRANSACTIONS, query).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn transaction(&self, id: i64) -> Result<Transaction, ApiFailure> {
        self.fetch(&format!("{TRANSACTIONS}{id}/")).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn create_transaction(
        &self,
        form: &TransactionForm,
    ) -> Result<Transaction, ApiFailure> {
        self.create_from(TRANSACTIONS, form).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid, or when the server
    /// refuses both the `PUT` and the `PATCH` fallback.
    pub async fn update_transaction(
        &self,
        id: i64,
        form: &TransactionForm,
    ) -> Result<Transaction, ApiFailure> {
        let full = form.submit()?;
        let changes = Value::Object(form.changes());
        let body = self
            .put_or_patch(&format!("{TRANSACTIONS}{id}/"), &full, &changes)
            .await?;
        decode_record(&body)
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn delete_transaction(&self, id: i64) -> Result<(), ApiFailure> {
        self.delete(&format!("{TRANSACTIONS}{id}/")).await
    }

    // -- budgets -----------------------------------------------------------

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn list_budgets(&self, query: &ListQuery) -> ApiListing<Budget> {
        self.list(BUDGETS, query).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn budget(&self, id: i64) -> Result<Budget, ApiFailure> {
        self.fetch(&format!("{BUDGETS}{id}/")).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid or the request fails.
    pub async fn create_budget(&self, form: &BudgetForm) -> Result<Budget, ApiFailure> {
        self.create_from(BUDGETS, form).await
    }

    /// Merge the form over the stored record and `PUT` the result.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] when the form is invalid, the stored record
    /// cannot be read, or the server refuses both the `PUT` and the `PATCH`
    /// fallback.
    pub async fn update_budget(&self, id: i64, form: &BudgetForm) -> Result<Budget, ApiFailure> {
        let path = format!("{BUDGETS}{id}/");
        let Value::Object(payload) = form.submit()? else {
            return Err(ApiFailure::unexpected("budget form produced no object"));
        };
        let current = self.get(&path, &ListQuery::new()).await?;
        let mut merged = match normalize_record(&current) {
            Some(Value::Object(record)) => record,
            _ => Map::new(),
        };
        merged.extend(payload);

        let changes = Value::Object(form.changes());
        let body = self
            .put_or_patch(&path, &Value::Object(merged), &changes)
            .await?;
        decode_record(&body)
    }

    /// Turn a budget on or off without touching anything else.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn set_budget_active(&self, id: i64, active: bool) -> Result<Budget, ApiFailure> {
        let body = self
            .patch(&format!("{BUDGETS}{id}/"), &json!({ "is_active": active }))
            .await?;
        decode_record(&body)
    }

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn delete_budget(&self, id: i64) -> Result<(), ApiFailure> {
        self.delete(&format!("{BUDGETS}{id}/")).await
    }

    // -- statistics --------------------------------------------------------

    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the request fails.
    pub async fn finance_statistics(&self) -> Result<Value, ApiFailure> {
        self.statistics(STATISTICS).await
    }

    /// Headline finance figures.
    ///
    /// Server statistics are preferred figure by figure; any figure the
    /// server reports as zero, or every figure when the statistics call
    /// fails, is computed from the transaction list instead.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiFailure`] if the transaction list cannot be fetched.
    pub async fn finance_summary(&self) -> Result<FinanceSummary, ApiFailure> {
        let transactions = self.list_transactions(&ListQuery::new()).await?;
        let local = FinanceSummary::from_transactions(&transactions.items);

        match self.get(STATISTICS, &ListQuery::new()).await {
            Ok(body) => Ok(FinanceSummary::from_statistics(&body).filled_from(&local)),
            Err(failure) => {
                tracing::warn!(error = %failure, status = ?failure.status, "finance statistics unavailable, using local figures");
                Ok(local)
            }
        }
    }
}
