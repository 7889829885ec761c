//! Auth API

use crate::{ClientError, ClientResult, HttpClient};
use shared::client::{Ack, LoginRequest, LoginResponse, SignupRequest};
use validator::Validate;

impl HttpClient {
    /// Login with email or phone number
    pub async fn login(&self, email_or_phone: &str, password: &str) -> ClientResult<LoginResponse> {
        if email_or_phone.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "Email/phone and password are required".to_string(),
            ));
        }

        let request = LoginRequest {
            email_or_phone: email_or_phone.trim().to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.post("auth/login", &[], &request).await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        Ok(response)
    }

    /// Create an account; the request is validated locally first
    pub async fn signup(&self, request: &SignupRequest) -> ClientResult<()> {
        request
            .validate()
            .map_err(|e| ClientError::Validation(e.to_string()))?;

        let response: Ack = self.post("auth/signup", &[], request).await?;
        if !response.success {
            return Err(ClientError::rejected(response.message));
        }
        Ok(())
    }
}
