//! お問い合わせフォームの対話入力

use crate::error::{DetectorError, Result};
use deepfake_detector_common::ContactMessage;
use dialoguer::Input;

/// 未指定の項目だけ対話で入力してもらう
///
/// 空欄もそのまま受け付ける（検証はサーバ側）。
pub fn collect_contact_message(
    name: Option<String>,
    email: Option<String>,
    subject: Option<String>,
    message: Option<String>,
) -> Result<ContactMessage> {
    let name = match name {
        Some(v) => v,
        None => prompt("Name")?,
    };
    let email = match email {
        Some(v) => v,
        None => prompt("Email")?,
    };
    let subject = match subject {
        Some(v) => v,
        None => prompt("Subject (optional)")?,
    };
    let message = match message {
        Some(v) => v,
        None => prompt("Message")?,
    };

    Ok(build_contact_message(name, email, subject, message))
}

/// 件名が空なら件名なしとして扱う
pub fn build_contact_message(
    name: String,
    email: String,
    subject: String,
    message: String,
) -> ContactMessage {
    let subject = if subject.trim().is_empty() {
        None
    } else {
        Some(subject)
    };
    ContactMessage {
        name,
        email,
        subject,
        message,
    }
}

fn prompt(label: &str) -> Result<String> {
    Input::new()
        .with_prompt(label)
        .allow_empty(true)
        .interact_text()
        .map_err(|e| DetectorError::Prompt(e.to_string()))
}
