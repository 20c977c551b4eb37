//! 解析APIクライアント
//!
//! `/analyze` へのmultipart送信、`/contact-message` へのJSON送信、
//! `/` のヘルスチェックを行う。レスポンスの解釈は共通ライブラリに任せる。
//!
//! 解析とお問い合わせはそれぞれ同時に1件まで。処理中に呼ばれた場合は
//! ネットワークに出ずに `DispatchError::Busy` を返す。

use crate::error::Result;
use deepfake_detector_common::response::transport_message;
use deepfake_detector_common::{
    interpret_analysis_response, interpret_contact_response, prepare_analysis, transport_failure,
    AnalysisRequest, AnalysisResult, ApiConfig, BusyFlag, BusyGuard, ContactMessage, ContactOutcome,
    DetectionMethod, DispatchError, Prepared, UploadState,
};
use log::{debug, error, info};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

/// `GET /` のレスポンス
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HealthStatus {
    pub message: Option<String>,
    pub basic_model_status: Option<String>,
    pub tensorflow_status: Option<String>,
    pub google_doc_integration: Option<String>,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct DetectorClient {
    http: reqwest::Client,
    api: ApiConfig,
    analysis_busy: BusyFlag,
    contact_busy: BusyFlag,
}

impl DetectorClient {
    /// タイムアウトは設定しない（トランスポートの既定に任せる）
    pub fn new(api: ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("deepfake-detector/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http_client(http, api))
    }

    pub fn with_http_client(http: reqwest::Client, api: ApiConfig) -> Self {
        Self {
            http,
            api,
            analysis_busy: BusyFlag::new(),
            contact_busy: BusyFlag::new(),
        }
    }

    pub fn api(&self) -> &ApiConfig {
        &self.api
    }

    pub fn is_analyzing(&self) -> bool {
        self.analysis_busy.is_busy()
    }

    pub fn is_submitting_contact(&self) -> bool {
        self.contact_busy.is_busy()
    }

    /// 保持中の画像を解析する
    ///
    /// 画像がなければ検証エラー（送信しない）。Data URIが戻せなければ
    /// `internal encoding error` の失敗結果（送信しない）。
    pub async fn analyze(
        &self,
        upload: &UploadState,
        method: DetectionMethod,
    ) -> std::result::Result<AnalysisResult, DispatchError> {
        let _guard = self.reserve_analysis()?;

        match prepare_analysis(upload, method)? {
            Prepared::Ready(request) => Ok(self.send_analysis(&request).await),
            Prepared::Aborted(result) => Ok(result),
        }
    }

    /// 準備済みのペイロードを送信する
    pub async fn dispatch(
        &self,
        request: &AnalysisRequest,
    ) -> std::result::Result<AnalysisResult, DispatchError> {
        let _guard = self.reserve_analysis()?;
        Ok(self.send_analysis(request).await)
    }

    /// 解析の送信枠を先に確保する
    ///
    /// ガードを保持している間は他の解析呼び出しが `Busy` になる。
    pub fn reserve_analysis(&self) -> std::result::Result<BusyGuard, DispatchError> {
        self.analysis_busy.try_acquire().ok_or(DispatchError::Busy)
    }

    /// 確保済みの枠で送信する（呼び出し側が `reserve_analysis` のガードを保持する）
    pub(crate) async fn send_analysis(&self, request: &AnalysisRequest) -> AnalysisResult {
        let url = self.api.analyze_url();
        info!(
            "Sending analysis request to: {} with method: {} ({}, {} bytes)",
            url,
            request.method,
            request.file_name,
            request.bytes.len()
        );

        let image_part = match Part::bytes(request.bytes.clone())
            .file_name(request.file_name.clone())
            .mime_str(&request.mime_type)
        {
            Ok(part) => part,
            Err(e) => {
                error!("invalid MIME type {}: {}", request.mime_type, e);
                return AnalysisResult::failure(
                    deepfake_detector_common::request::ENCODING_ERROR_MESSAGE,
                );
            }
        };

        let form = Form::new()
            .part("image", image_part)
            .text("method", request.method.as_str());

        let response = match self.http.post(&url).multipart(form).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("analysis request failed: {}", e);
                return transport_failure(&describe_transport_error(&e));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!("failed to read analysis response: {}", e);
                return transport_failure(&describe_transport_error(&e));
            }
        };
        debug!("analysis response status: {}", status);

        interpret_analysis_response(status.as_u16(), status.canonical_reason().unwrap_or(""), &body)
    }

    /// お問い合わせを送信する
    ///
    /// 入力値の検証は行わない（空欄もそのまま送る）。
    pub async fn submit_contact(
        &self,
        message: &ContactMessage,
    ) -> std::result::Result<ContactOutcome, DispatchError> {
        let _guard = self.contact_busy.try_acquire().ok_or(DispatchError::Busy)?;

        let url = self.api.contact_url();
        info!("Submitting contact form to: {}", url);

        let response = match self.http.post(&url).json(message).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("contact request failed: {}", e);
                return Ok(Err(transport_message(&describe_transport_error(&e))));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!("failed to read contact response: {}", e);
                return Ok(Err(transport_message(&describe_transport_error(&e))));
            }
        };
        debug!("contact response status: {}", status);

        Ok(interpret_contact_response(
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            &body,
        ))
    }

    /// バックエンドの状態を取得する
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.api.health_url();
        info!("Checking backend status at: {}", url);
        let status = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<HealthStatus>()
            .await?;
        Ok(status)
    }
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("Request timed out ({})", e)
    } else if e.is_connect() {
        format!("Server is unreachable ({})", e)
    } else {
        e.to_string()
    }
}
