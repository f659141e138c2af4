use crate::client::traits::VoucherBackend;
use crate::client::types::{
    ChargeData, CheckoutData, FunctionResponse, PaymentLink, PaymentVerification,
    VerifyPaymentRequest,
};
use crate::config::BackendConfig;
use crate::error::{Result, UnilinkError};
use crate::voucher::{PurchaseRequest, Voucher};
use reqwest::{Client as HttpClient, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;

const TRANSACTIONS_TABLE: &str = "transactions";

/// Client for the hosted backend: serverless payment functions plus the
/// REST view over the voucher table
#[derive(Clone)]
pub struct SupabaseClient {
    client: HttpClient,
    config: BackendConfig,
}

impl SupabaseClient {
    pub fn new(config: BackendConfig) -> Self {
        install_crypto_provider();
        Self {
            client: HttpClient::builder()
                .user_agent(concat!("unilink/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_else(|_| HttpClient::new()),
            config,
        }
    }

    fn function_url(&self, name: &str) -> String {
        format!("{}/functions/v1/{}", self.config.url, name)
    }

    fn table_url(&self, table: &str, params: &[(&str, String)]) -> Result<Url> {
        let base = format!("{}/rest/v1/{}", self.config.url, table);
        Url::parse_with_params(&base, params)
            .map_err(|e| UnilinkError::config(format!("Invalid backend URL {}: {}", base, e)))
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&self.config.anon_key)
    }

    async fn call_function<B, T>(&self, name: &str, body: &B) -> Result<FunctionResponse<T>>
    where
        B: serde::Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .authorized(self.client.post(self.function_url(name)))
            .json(body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    async fn select_vouchers(&self, params: &[(&str, String)]) -> Result<Vec<Voucher>> {
        let url = self.table_url(TRANSACTIONS_TABLE, params)?;
        let response = self.authorized(self.client.get(url)).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }
}

/// rustls refuses to pick a provider when more than one is compiled in
fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Turn a non-2xx response into `HttpFailed`, keeping the body as the message
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::debug!("Backend responded {}: {}", status, body);
    Err(UnilinkError::http_failed(status.as_u16(), body))
}

#[async_trait::async_trait]
impl VoucherBackend for SupabaseClient {
    async fn initiate_payment(&self, request: &PurchaseRequest) -> Result<PaymentLink> {
        let response: FunctionResponse<CheckoutData> =
            self.call_function("initiate-payment", request).await?;

        let link = response.data.and_then(|data| data.link);
        match (response.status.as_str(), link) {
            ("success", Some(link)) => Ok(PaymentLink { link }),
            _ => Err(UnilinkError::payment_rejected(response.message.unwrap_or_else(
                || "Something went wrong. Please try again.".to_string(),
            ))),
        }
    }

    async fn verify_payment(&self, transaction_id: &str) -> Result<PaymentVerification> {
        let response: FunctionResponse<ChargeData> = self
            .call_function("verify-payment", &VerifyPaymentRequest { transaction_id })
            .await?;

        let charge = response.data;
        let verified = response.status == "success"
            && charge
                .as_ref()
                .and_then(|c| c.status.as_deref())
                .is_some_and(|s| s == "successful");

        Ok(PaymentVerification {
            transaction_id: transaction_id.to_string(),
            verified,
            amount: charge.as_ref().and_then(|c| c.amount),
            tx_ref: charge.and_then(|c| c.tx_ref),
            message: response.message,
        })
    }

    async fn vouchers_for_device(&self, device_id: &str) -> Result<Vec<Voucher>> {
        self.select_vouchers(&[
            ("select", "*".to_string()),
            ("purchase_device_id", format!("eq.{}", device_id)),
            ("order", "created_at.desc".to_string()),
        ])
        .await
    }

    async fn voucher_by_transaction(&self, transaction_ref: &str) -> Result<Option<Voucher>> {
        let mut vouchers = self
            .select_vouchers(&[
                ("select", "*".to_string()),
                ("transaction_ref", format!("eq.{}", transaction_ref)),
                ("limit", "1".to_string()),
            ])
            .await?;
        Ok(vouchers.pop())
    }
}
