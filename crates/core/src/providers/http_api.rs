use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::{AnalysisSource, RecordSource};
use crate::errors::CoreError;
use crate::models::analytics::{CategoryTotal, FinancialSummary, MonthlyTrend, YearMonth};
use crate::models::record::{Record, RecordDraft, RecordKind, WireRecord};
use crate::models::settings::ClientSettings;

/// Longest slice of an error body echoed back in `CoreError::Api`.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// URL layout of the finance API.
///
/// - **Records**: `/gastos/`, `/inversiones/`, `/{collection}/{id}`
/// - **Analysis**: `/analisis/resumen-general`, `/analisis/resumen-mensual`,
///   `/analisis/{gastos|inversiones}-por-tipo`, `/analisis/tendencia-mensual`
///
/// Monthly variants take `mes` (1-12) and `anio` query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// List / create URL. The trailing slash matters to the backend router.
    pub fn collection(&self, kind: RecordKind) -> String {
        format!("{}/{}/", self.base, kind.collection())
    }

    /// Get / update / delete URL.
    pub fn item(&self, kind: RecordKind, id: i64) -> String {
        format!("{}/{}/{id}", self.base, kind.collection())
    }

    pub fn summary(&self, month: Option<YearMonth>) -> String {
        match month {
            None => format!("{}/analisis/resumen-general", self.base),
            Some(ym) => format!(
                "{}/analisis/resumen-mensual?mes={}&anio={}",
                self.base,
                ym.month(),
                ym.year()
            ),
        }
    }

    pub fn breakdown(&self, kind: RecordKind, month: Option<YearMonth>) -> String {
        let url = format!("{}/analisis/{}-por-tipo", self.base, kind.collection());
        match month {
            None => url,
            Some(ym) => format!("{url}?mes={}&anio={}", ym.month(), ym.year()),
        }
    }

    pub fn trend(&self, months: u32) -> String {
        format!("{}/analisis/tendencia-mensual?meses={months}", self.base)
    }
}

/// HTTP client for the finance API (records CRUD + analysis aggregates).
///
/// - **Auth**: bearer token from [`ClientSettings::auth_token`]; a 401 maps to
///   `CoreError::Unauthorized` so the shell can send the user back to login.
/// - **Errors**: 404 on a single record maps to `CoreError::RecordNotFound`;
///   any other non-2xx becomes `CoreError::Api` with the server's `detail`.
/// - **Timeout**: `request_timeout_secs` on native targets; the browser's
///   fetch has no per-request timeout knob.
pub struct HttpFinanceApi {
    client: Client,
    endpoints: Endpoints,
    token: Option<String>,
}

impl HttpFinanceApi {
    pub fn new(settings: &ClientSettings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            endpoints: Endpoints::new(settings.base_url()),
            token: settings.auth_token.clone(),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, resource: &str) -> Result<Response, CoreError> {
        let response = self.authorized(request).send().await?;
        check_status(response, resource).await
    }

    /// Like `send`, but a 404 means the record itself is gone.
    async fn send_item(
        &self,
        request: RequestBuilder,
        kind: RecordKind,
        id: i64,
    ) -> Result<Response, CoreError> {
        let response = self.authorized(request).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(CoreError::RecordNotFound { kind, id });
        }
        check_status(response, kind.collection()).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, resource: &str) -> Result<T, CoreError> {
        tracing::debug!(%url, "GET");
        let response = self.send(self.client.get(url), resource).await?;
        parse_json(response, resource).await
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response, resource: &str) -> Result<T, CoreError> {
    response.json().await.map_err(|e| CoreError::Api {
        resource: resource.to_string(),
        message: format!("Failed to parse response: {e}"),
    })
}

async fn check_status(response: Response, resource: &str) -> Result<Response, CoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(CoreError::Unauthorized);
    }

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            tracing::debug!(%resource, status = status.as_u16(), error = %e, "could not read error body");
            String::new()
        }
    };
    Err(CoreError::Api {
        resource: resource.to_string(),
        message: format!("HTTP {}: {}", status.as_u16(), api_error_detail(&body)),
    })
}

/// Human-readable part of an error body: the `detail` field the backend puts
/// in its JSON errors, else the raw body (truncated).
pub fn api_error_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value.get("detail") {
            Some(serde_json::Value::String(detail)) => return detail.clone(),
            Some(other) => return other.to_string(),
            None => {}
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl RecordSource for HttpFinanceApi {
    fn name(&self) -> &str {
        "Finance API"
    }

    async fn list_records(&self, kind: RecordKind) -> Result<Vec<Record>, CoreError> {
        let url = self.endpoints.collection(kind);
        let wire: Vec<WireRecord> = self.get_json(&url, kind.collection()).await?;
        Ok(wire.into_iter().map(|w| w.into_record(kind)).collect())
    }

    async fn get_record(&self, kind: RecordKind, id: i64) -> Result<Record, CoreError> {
        let url = self.endpoints.item(kind, id);
        tracing::debug!(%url, "GET");
        let response = self.send_item(self.client.get(&url), kind, id).await?;
        let wire: WireRecord = parse_json(response, kind.collection()).await?;
        Ok(wire.into_record(kind))
    }

    async fn create_record(&self, kind: RecordKind, draft: &RecordDraft) -> Result<(), CoreError> {
        let url = self.endpoints.collection(kind);
        tracing::debug!(%url, "POST");
        let request = self.client.post(&url).json(&draft.to_payload(kind));
        self.send(request, kind.collection()).await?;
        Ok(())
    }

    async fn update_record(
        &self,
        kind: RecordKind,
        id: i64,
        draft: &RecordDraft,
    ) -> Result<(), CoreError> {
        let url = self.endpoints.item(kind, id);
        tracing::debug!(%url, "PUT");
        let request = self.client.put(&url).json(&draft.to_payload(kind));
        self.send_item(request, kind, id).await?;
        Ok(())
    }

    async fn delete_record(&self, kind: RecordKind, id: i64) -> Result<(), CoreError> {
        let url = self.endpoints.item(kind, id);
        tracing::debug!(%url, "DELETE");
        self.send_item(self.client.delete(&url), kind, id).await?;
        Ok(())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AnalysisSource for HttpFinanceApi {
    async fn summary(&self, month: Option<YearMonth>) -> Result<FinancialSummary, CoreError> {
        let url = self.endpoints.summary(month);
        self.get_json(&url, "analisis/resumen").await
    }

    async fn category_breakdown(
        &self,
        kind: RecordKind,
        month: Option<YearMonth>,
    ) -> Result<Vec<CategoryTotal>, CoreError> {
        let url = self.endpoints.breakdown(kind, month);
        self.get_json(&url, "analisis/por-tipo").await
    }

    async fn monthly_trend(&self, months: u32) -> Result<Vec<MonthlyTrend>, CoreError> {
        let url = self.endpoints.trend(months);
        self.get_json(&url, "analisis/tendencia-mensual").await
    }
}
