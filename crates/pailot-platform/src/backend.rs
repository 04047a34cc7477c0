//! PailotPH Backend Client
//!
//! Mirrors wallet results to the PailotPH backend and reads the
//! backend-owned resources (orders, profile, deliveries).

use crate::error::PlatformError;
use crate::models::{
    AcceptDeliveryRequest, CompleteDeliveryRequest, Delivery, PaymentRecordRequest,
    PaymentStatusResponse, SignInRequest,
};
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default backend for local development
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

// ==================== REQUEST TYPES ====================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTxRequest {
    pub payment_id: String,
    pub txid: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelPaymentRequest {
    pub payment_id: String,
}

// ==================== BACKEND TRAIT ====================

/// One method per backend endpoint
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// `POST /api/auth/signin`
    async fn sign_in(&self, request: &SignInRequest) -> Result<Value>;

    /// `POST /api/payments/create`
    async fn record_payment(&self, request: &PaymentRecordRequest) -> Result<Value>;

    /// `POST /api/payments/approve`
    async fn approve_payment(&self, request: &PaymentTxRequest) -> Result<Value>;

    /// `POST /api/payments/complete`
    async fn complete_payment(&self, request: &PaymentTxRequest) -> Result<Value>;

    /// `POST /api/payments/cancel`
    async fn cancel_payment(&self, request: &CancelPaymentRequest) -> Result<Value>;

    /// `GET /api/payments/status/:id`
    async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatusResponse>;

    /// `POST /api/orders/create`
    async fn create_order(&self, order: &Value) -> Result<Value>;

    /// `GET /api/orders/status/:id`
    async fn order_status(&self, order_id: &str) -> Result<Value>;

    /// `GET /api/user/profile`
    async fn user_profile(&self) -> Result<Value>;

    /// `PUT /api/user/profile`
    async fn update_user_profile(&self, profile: &Value) -> Result<Value>;

    /// `GET /api/transactions/history`
    async fn transaction_history(&self) -> Result<Value>;

    /// `GET /api/deliveries/history`
    async fn delivery_history(&self) -> Result<Vec<Delivery>>;

    /// `POST /api/deliveries/:id/accept`
    async fn accept_delivery(
        &self,
        delivery_id: &str,
        request: &AcceptDeliveryRequest,
    ) -> Result<Delivery>;

    /// `POST /api/deliveries/:id/complete`
    async fn complete_delivery(
        &self,
        delivery_id: &str,
        request: &CompleteDeliveryRequest,
    ) -> Result<Delivery>;
}

// ==================== HTTP BACKEND ====================

pub struct HttpBackend {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: Option<&str>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: base_url
                .unwrap_or(DEFAULT_BACKEND_URL)
                .trim_end_matches('/')
                .to_string(),
            access_token: None,
        })
    }

    /// Send the Pi access token as a bearer token on every request
    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let request = match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlatformError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!("GET {}", path);
        self.send(self.client.get(self.url(path))).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        debug!("POST {}", path);
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    async fn put<B: Serialize + Sync, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        debug!("PUT {}", path);
        self.send(self.client.put(self.url(path)).json(body)).await
    }
}

#[async_trait]
impl BackendApi for HttpBackend {
    async fn sign_in(&self, request: &SignInRequest) -> Result<Value> {
        self.post("/api/auth/signin", request).await
    }

    async fn record_payment(&self, request: &PaymentRecordRequest) -> Result<Value> {
        self.post("/api/payments/create", request).await
    }

    async fn approve_payment(&self, request: &PaymentTxRequest) -> Result<Value> {
        self.post("/api/payments/approve", request).await
    }

    async fn complete_payment(&self, request: &PaymentTxRequest) -> Result<Value> {
        self.post("/api/payments/complete", request).await
    }

    async fn cancel_payment(&self, request: &CancelPaymentRequest) -> Result<Value> {
        self.post("/api/payments/cancel", request).await
    }

    async fn payment_status(&self, payment_id: &str) -> Result<PaymentStatusResponse> {
        self.get(&format!("/api/payments/status/{}", payment_id)).await
    }

    async fn create_order(&self, order: &Value) -> Result<Value> {
        self.post("/api/orders/create", order).await
    }

    async fn order_status(&self, order_id: &str) -> Result<Value> {
        self.get(&format!("/api/orders/status/{}", order_id)).await
    }

    async fn user_profile(&self) -> Result<Value> {
        self.get("/api/user/profile").await
    }

    async fn update_user_profile(&self, profile: &Value) -> Result<Value> {
        self.put("/api/user/profile", profile).await
    }

    async fn transaction_history(&self) -> Result<Value> {
        self.get("/api/transactions/history").await
    }

    async fn delivery_history(&self) -> Result<Vec<Delivery>> {
        self.get("/api/deliveries/history").await
    }

    async fn accept_delivery(
        &self,
        delivery_id: &str,
        request: &AcceptDeliveryRequest,
    ) -> Result<Delivery> {
        self.post(&format!("/api/deliveries/{}/accept", delivery_id), request)
            .await
    }

    async fn complete_delivery(
        &self,
        delivery_id: &str,
        request: &CompleteDeliveryRequest,
    ) -> Result<Delivery> {
        self.post(&format!("/api/deliveries/{}/complete", delivery_id), request)
            .await
    }
}
