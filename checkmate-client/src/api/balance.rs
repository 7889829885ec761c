//! Balance API (test-mode wallet)

use crate::{ClientError, ClientResult, HttpClient};
use shared::client::BalanceResponse;

impl HttpClient {
    /// Current wallet balance
    pub async fn balance(&self) -> ClientResult<f64> {
        let user_id = self.user_id()?.to_string();
        let response: BalanceResponse = self.get("balance", &[("userId", user_id)]).await?;
        Self::balance_from(response)
    }

    /// Add funds (test mode only)
    pub async fn add_balance(&self, amount: f64) -> ClientResult<f64> {
        self.mutate_balance("balance/add", amount).await
    }

    /// Cash out funds
    pub async fn cash_out(&self, amount: f64) -> ClientResult<f64> {
        self.mutate_balance("balance/cashout", amount).await
    }

    async fn mutate_balance(&self, path: &str, amount: f64) -> ClientResult<f64> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ClientError::Validation(
                "Amount must be positive".to_string(),
            ));
        }
        let user_id = self.user_id()?.to_string();
        let response: BalanceResponse = self
            .post_empty(path, &[("userId", user_id), ("amount", amount.to_string())])
            .await?;
        Self::balance_from(response)
    }

    fn balance_from(response: BalanceResponse) -> ClientResult<f64> {
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        response
            .balance
            .ok_or_else(|| ClientError::InvalidResponse("Missing balance".to_string()))
    }
}
