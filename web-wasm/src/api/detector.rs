//! 解析APIとの通信（fetch）
//!
//! `/analyze` へFormData、`/contact-message` へJSONを送る。
//! レスポンスの解釈は共通ライブラリに任せる。

use deepfake_detector_common::request::DEFAULT_API_BASE_URL;
use deepfake_detector_common::response::transport_message;
use deepfake_detector_common::{
    interpret_analysis_response, interpret_contact_response, transport_failure, AnalysisRequest,
    AnalysisResult, ApiConfig, ContactMessage, ContactOutcome,
};
use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

/// ビルド時に `DEEPFAKE_API_BASE_URL` で上書きできる接続先
const API_BASE_URL: &str = match option_env!("DEEPFAKE_API_BASE_URL") {
    Some(url) => url,
    None => DEFAULT_API_BASE_URL,
};

pub fn api_config() -> ApiConfig {
    ApiConfig::new(API_BASE_URL)
}

/// fetchの結果（ステータス, 理由句, 本文）
struct RawResponse {
    status: u16,
    reason: String,
    body: String,
}

/// multipartのフォームを組み立てる
///
/// # Arguments
/// * `request` - 送信ペイロード（`image` と `method` の2フィールドになる）
pub fn build_form(request: &AnalysisRequest) -> Result<FormData, JsValue> {
    let form = FormData::new()?;

    let bytes = Uint8Array::from(request.bytes.as_slice());
    let parts = Array::of1(&bytes);
    let bag = BlobPropertyBag::new();
    bag.set_type(&request.mime_type);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &bag)?;

    form.append_with_blob_and_filename("image", &blob, &request.file_name)?;
    form.append_with_str("method", request.method.as_str())?;
    Ok(form)
}

async fn post(url: &str, body: &JsValue, content_type: Option<&str>) -> Result<RawResponse, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(body);

    let request = Request::new_with_str_and_init(url, &opts)?;
    if let Some(content_type) = content_type {
        request.headers().set("Content-Type", content_type)?;
    }

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?).await?;
    Ok(RawResponse {
        status: resp.status(),
        reason: resp.status_text(),
        body: text.as_string().unwrap_or_default(),
    })
}

fn describe_js_error(err: &JsValue) -> String {
    match err.dyn_ref::<js_sys::Error>() {
        Some(e) => String::from(e.message()),
        None => err.as_string().unwrap_or_default(),
    }
}

/// 画像を解析APIへ送る
///
/// 通信失敗も含めて必ず `AnalysisResult` を返す。
pub async fn send_analysis(api: &ApiConfig, request: &AnalysisRequest) -> AnalysisResult {
    let url = api.analyze_url();
    gloo::console::log!(format!(
        "Sending analysis request to: {} with method: {}",
        url, request.method
    ));

    let form = match build_form(request) {
        Ok(form) => form,
        Err(e) => {
            gloo::console::error!(format!("failed to build form: {}", describe_js_error(&e)));
            return AnalysisResult::failure(deepfake_detector_common::request::ENCODING_ERROR_MESSAGE);
        }
    };

    // Content-Typeはboundary付きでブラウザが設定する
    match post(&url, &form, None).await {
        Ok(raw) => interpret_analysis_response(raw.status, &raw.reason, &raw.body),
        Err(e) => {
            let text = describe_js_error(&e);
            gloo::console::error!(format!("analysis request failed: {}", text));
            transport_failure(&text)
        }
    }
}

/// お問い合わせを送る
pub async fn send_contact(api: &ApiConfig, message: &ContactMessage) -> ContactOutcome {
    let url = api.contact_url();
    gloo::console::log!(format!("Submitting contact form to: {}", url));

    let body = serde_json::to_string(message).map_err(|e| transport_message(&e.to_string()))?;

    match post(&url, &JsValue::from_str(&body), Some("application/json")).await {
        Ok(raw) => interpret_contact_response(raw.status, &raw.reason, &raw.body),
        Err(e) => {
            let text = describe_js_error(&e);
            gloo::console::error!(format!("contact request failed: {}", text));
            Err(transport_message(&text))
        }
    }
}
