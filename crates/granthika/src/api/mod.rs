//! REST client for the generation backend.
//!
//! One function per endpoint; each performs a single HTTP call and returns
//! the decoded body or an [`ApiError`]. No retries, no caching, no local
//! state — the backend is the single source of truth.
//!
//! The HTTP client is pooled for connection reuse. reqwest works on both
//! native and WASM platforms: hyper with rustls on native, the browser
//! fetch() API on the web.

use dioxus::logger::tracing::{error, warn};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;

use granthika_core::payload::{group_rows_by_file, BatchSaveRequest, SaveRowPayload};
use granthika_core::types::{
    Ack, BatchStarted, DetailedProcessStatus, FileInfo, GeneratedQa, ProcessStatus, ResultRow,
    RowDetail, RowSummary, SaveOutcome,
};

use crate::config;
use crate::error::ApiError;

/// Page size used when aggregating all rows of a file client-side.
const ROW_PAGE_LIMIT: usize = 100;

/// Global HTTP client for connection pooling.
///
/// Reusing one client across requests keeps connections to the backend
/// alive between polls instead of reconnecting every 2 seconds.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(build_client);

#[cfg(not(target_arch = "wasm32"))]
fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("Granthika/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(30))
        .pool_max_idle_per_host(4)
        .build()
        .expect("failed to build HTTP client")
}

#[cfg(target_arch = "wasm32")]
fn build_client() -> reqwest::Client {
    // The browser owns timeouts, pooling, and the user agent.
    reqwest::Client::new()
}

/// Client bound to one backend base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

#[derive(Serialize)]
struct GenerateBody {
    qa_count: usize,
}

#[derive(Serialize)]
struct StartBatchBody<'a> {
    file_ids: &'a [String],
    qa_count: usize,
}

impl ApiClient {
    /// Client for the configured base URL (see [`crate::config`]).
    pub fn from_env() -> Self {
        Self::new(config::api_base_url())
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Export URL for a file, usable directly as a download link.
    pub fn download_url(&self, file_id: &str) -> String {
        self.url(&format!("/files/{file_id}/download"))
    }

    // ------------------------------------------------------------------
    // Request helpers
    // ------------------------------------------------------------------

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = HTTP_CLIENT.get(self.url(path)).send().await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = HTTP_CLIENT.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = HTTP_CLIENT.post(self.url(path)).send().await?;
        decode(response).await
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    /// Backend reachability probe for the app-bar status pill.
    pub async fn health(&self) -> Result<Ack, ApiError> {
        self.get_json("/health").await
    }

    pub async fn list_files(&self) -> Result<Vec<FileInfo>, ApiError> {
        self.get_json("/files").await
    }

    /// Upload one CSV file as multipart form data.
    pub async fn upload_file(&self, filename: &str, contents: Vec<u8>) -> Result<FileInfo, ApiError> {
        let part = reqwest::multipart::Part::bytes(contents)
            .file_name(filename.to_string())
            .mime_str("text/csv")
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = HTTP_CLIENT
            .post(self.url("/files/upload"))
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete_file(&self, file_id: &str) -> Result<Ack, ApiError> {
        let response = HTTP_CLIENT
            .delete(self.url(&format!("/files/{file_id}")))
            .send()
            .await?;
        decode(response).await
    }

    /// Raw CSV bytes of a file's export artifact.
    pub async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, ApiError> {
        let response = HTTP_CLIENT.get(self.download_url(file_id)).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(bytes.to_vec())
    }

    // ------------------------------------------------------------------
    // Rows
    // ------------------------------------------------------------------

    /// One page of a file's rows, optionally filtered server-side by `query`.
    pub async fn list_rows(
        &self,
        file_id: &str,
        skip: usize,
        limit: usize,
        query: &str,
    ) -> Result<Vec<RowSummary>, ApiError> {
        let response = HTTP_CLIENT
            .get(self.url(&format!("/files/{file_id}/rows")))
            .query(&[
                ("skip", skip.to_string()),
                ("limit", limit.to_string()),
                ("q", query.to_string()),
            ])
            .send()
            .await?;
        decode(response).await
    }

    /// Every row of a file, aggregated client-side over the paginated
    /// listing (the backend exposes no bulk endpoint).
    pub async fn fetch_all_rows(&self, file_id: &str) -> Result<Vec<RowSummary>, ApiError> {
        let mut all = Vec::new();
        let mut skip = 0;
        loop {
            let page = self.list_rows(file_id, skip, ROW_PAGE_LIMIT, "").await?;
            let fetched = page.len();
            all.extend(page);
            if fetched < ROW_PAGE_LIMIT {
                break;
            }
            skip += fetched;
        }
        Ok(all)
    }

    pub async fn get_row(&self, file_id: &str, row_id: usize) -> Result<RowDetail, ApiError> {
        self.get_json(&format!("/files/{file_id}/row/{row_id}")).await
    }

    /// Generate `qa_count` Q&A pairs for one row.
    pub async fn generate_row(
        &self,
        file_id: &str,
        row_id: usize,
        qa_count: usize,
    ) -> Result<GeneratedQa, ApiError> {
        self.post_json(
            &format!("/files/{file_id}/generate/{row_id}"),
            &GenerateBody { qa_count },
        )
        .await
    }

    pub async fn save_row(
        &self,
        file_id: &str,
        row_id: usize,
        payload: &SaveRowPayload,
    ) -> Result<Ack, ApiError> {
        self.post_json(&format!("/files/{file_id}/save/{row_id}"), payload)
            .await
    }

    /// Widen a file's CSV schema to hold `count` Q&A pairs per language.
    pub async fn ensure_headers(&self, file_id: &str, count: usize) -> Result<Ack, ApiError> {
        self.post_empty(&format!("/files/{file_id}/ensure_headers/{count}"))
            .await
    }

    // ------------------------------------------------------------------
    // Batch jobs
    // ------------------------------------------------------------------

    pub async fn start_batch(
        &self,
        file_ids: &[String],
        qa_count: usize,
    ) -> Result<BatchStarted, ApiError> {
        self.post_json("/process/batch", &StartBatchBody { file_ids, qa_count })
            .await
    }

    pub async fn start_batch_detailed(
        &self,
        file_ids: &[String],
        qa_count: usize,
    ) -> Result<BatchStarted, ApiError> {
        self.post_json(
            "/process/batch/detailed",
            &StartBatchBody { file_ids, qa_count },
        )
        .await
    }

    pub async fn batch_status(&self, process_id: &str) -> Result<ProcessStatus, ApiError> {
        self.get_json(&format!("/process/status/{process_id}")).await
    }

    pub async fn batch_status_detailed(
        &self,
        process_id: &str,
    ) -> Result<DetailedProcessStatus, ApiError> {
        self.get_json(&format!("/process/detailed/status/{process_id}"))
            .await
    }

    /// Persist selected batch rows.
    ///
    /// Posts the versioned `{process_id, rows}` shape; when the backend
    /// reports that endpoint unsupported (404/405), retries once with the
    /// legacy per-job shape carrying the same process id and the grouped
    /// raw results. Any other failure — and a failed fallback — surfaces
    /// the original error.
    pub async fn save_batch_results(
        &self,
        process_id: &str,
        rows: Vec<ResultRow>,
    ) -> Result<SaveOutcome, ApiError> {
        let request = BatchSaveRequest::new(process_id, rows);
        let grouped = group_rows_by_file(&request.rows);
        let legacy_path = format!("/process/save/{process_id}");

        with_legacy_fallback(
            self.post_json("/process/save", &request),
            self.post_json(&legacy_path, &grouped),
        )
        .await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

/// Run `primary`; if it fails because the endpoint is unsupported, run
/// `fallback` once. The fallback future is never polled otherwise, and the
/// original error wins when both fail.
async fn with_legacy_fallback<T, P, F>(primary: P, fallback: F) -> Result<T, ApiError>
where
    P: Future<Output = Result<T, ApiError>>,
    F: Future<Output = Result<T, ApiError>>,
{
    match primary.await {
        Ok(value) => Ok(value),
        Err(original) if original.is_unsupported_endpoint() => {
            warn!("Versioned save endpoint unsupported, retrying with the per-job shape");
            match fallback.await {
                Ok(value) => Ok(value),
                Err(fallback_err) => {
                    error!("Legacy save fallback failed too: {fallback_err}");
                    Err(original)
                }
            }
        }
        Err(original) => Err(original),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::Cell;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("http://localhost:8000/");
        assert_eq!(client.url("/files"), "http://localhost:8000/files");

        let client = ApiClient::new("  http://api:9000  ");
        assert_eq!(client.url("/health"), "http://api:9000/health");
    }

    #[test]
    fn download_url_targets_the_export_endpoint() {
        let client = ApiClient::new("http://localhost:8000");
        assert_eq!(
            client.download_url("abc"),
            "http://localhost:8000/files/abc/download"
        );
    }

    #[test]
    fn primary_success_never_touches_the_fallback() {
        let fallback_ran = Cell::new(false);
        let result: Result<u32, ApiError> = block_on(with_legacy_fallback(
            async { Ok(1) },
            async {
                fallback_ran.set(true);
                Ok(2)
            },
        ));
        assert_eq!(result.unwrap(), 1);
        assert!(!fallback_ran.get());
    }

    #[test]
    fn unsupported_endpoint_invokes_the_fallback() {
        let fallback_ran = Cell::new(false);
        let result: Result<u32, ApiError> = block_on(with_legacy_fallback(
            async {
                Err(ApiError::Status {
                    status: 404,
                    message: "Not Found".into(),
                })
            },
            async {
                fallback_ran.set(true);
                Ok(7)
            },
        ));
        assert_eq!(result.unwrap(), 7);
        assert!(fallback_ran.get());
    }

    #[test]
    fn other_errors_skip_the_fallback() {
        let fallback_ran = Cell::new(false);
        let result: Result<u32, ApiError> = block_on(with_legacy_fallback(
            async {
                Err(ApiError::Status {
                    status: 500,
                    message: "boom".into(),
                })
            },
            async {
                fallback_ran.set(true);
                Ok(7)
            },
        ));
        assert!(matches!(result, Err(ApiError::Status { status: 500, .. })));
        assert!(!fallback_ran.get());
    }

    #[test]
    fn original_error_survives_a_failed_fallback() {
        let result: Result<u32, ApiError> = block_on(with_legacy_fallback(
            async {
                Err(ApiError::Status {
                    status: 405,
                    message: "Method Not Allowed".into(),
                })
            },
            async { Err(ApiError::Transport("offline".into())) },
        ));
        assert_eq!(
            result,
            Err(ApiError::Status {
                status: 405,
                message: "Method Not Allowed".into(),
            })
        );
    }
}
