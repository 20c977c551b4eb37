//! APIレスポンスの解釈
//!
//! ステータスコードに関係なくまずJSONとしてデコードし、
//! 失敗時は `detail` を、なければステータス行をメッセージにする。
//! 成功時のフィールドは検証せずにそのまま写す。

use crate::types::{AnalysisResult, ContactOutcome};
use serde_json::Value;

/// 通信失敗時のメッセージ接頭辞
pub const TRANSPORT_ERROR_PREFIX: &str = "Network/Fetch Error";

/// お問い合わせ成功時の既定メッセージ
pub const CONTACT_SUCCESS_MESSAGE: &str = "Message sent successfully!";

/// 通信レベルの失敗（DNS、接続拒否、タイムアウト、JSONでない本文）
pub fn transport_failure(error_text: &str) -> AnalysisResult {
    AnalysisResult::failure(transport_message(error_text))
}

pub fn transport_message(error_text: &str) -> String {
    let error_text = error_text.trim();
    if error_text.is_empty() {
        format!("{}: Network error or server is unreachable.", TRANSPORT_ERROR_PREFIX)
    } else {
        format!("{}: {}", TRANSPORT_ERROR_PREFIX, error_text)
    }
}

/// レスポンス本文から人が読める `detail` を取り出す
///
/// - 文字列: そのまま
/// - FastAPIの検証エラー配列: 各要素の `msg` を `"; "` で連結
/// - その他のnull以外の値: コンパクトなJSON
///
/// 空白だけの文字列は `None`（呼び出し側の既定文言を使う）。
pub fn extract_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) if items.is_empty() => None,
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                return Some(Value::Array(items.clone()).to_string());
            }
            let messages: Vec<&str> = messages
                .into_iter()
                .filter(|msg| !msg.trim().is_empty())
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        other => Some(other.to_string()),
    }
}

fn status_line(prefix: &str, status: u16, reason: &str) -> String {
    format!("{}: {} ({})", prefix, reason, status)
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// `/analyze` のレスポンスを解釈する
///
/// # Arguments
/// * `status` - HTTPステータスコード
/// * `reason` - ステータス行の理由句（例: "Internal Server Error"）
/// * `body` - レスポンス本文
pub fn interpret_analysis_response(status: u16, reason: &str, body: &str) -> AnalysisResult {
    let data: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            log::error!("analysis response is not JSON (status {}): {}", status, e);
            return transport_failure(&format!("invalid response body ({})", e));
        }
    };

    if !is_success(status) {
        let message = extract_detail(&data)
            .unwrap_or_else(|| status_line("Request failed", status, reason));
        log::error!("analysis failed: status={}, body={}", status, data);
        return AnalysisResult::Failure { message };
    }

    let is_ai = data.get("isAi").and_then(Value::as_bool).unwrap_or(false);
    let confidence_percent = data
        .get("confidence")
        .and_then(Value::as_f64)
        .map(|c| c.round() as i64)
        .unwrap_or(0);
    let source_tag = data
        .get("source")
        .and_then(Value::as_str)
        .map(str::to_string);

    AnalysisResult::Success {
        is_ai,
        confidence_percent,
        source_tag,
    }
}

/// `/contact-message` のレスポンスを解釈する
pub fn interpret_contact_response(status: u16, reason: &str, body: &str) -> ContactOutcome {
    let data: Value = serde_json::from_str(body).map_err(|e| {
        log::error!("contact response is not JSON (status {}): {}", status, e);
        transport_message(&format!("invalid response body ({})", e))
    })?;

    let detail = extract_detail(&data);
    if is_success(status) {
        Ok(detail.unwrap_or_else(|| CONTACT_SUCCESS_MESSAGE.to_string()))
    } else {
        log::error!("contact failed: status={}, body={}", status, data);
        Err(detail.unwrap_or_else(|| status_line("Failed", status, reason)))
    }
}
