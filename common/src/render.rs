//! 解析結果の表示モデル
//!
//! AnalysisResultを3種類のパネル（本物/AI判定/エラー）に写す純粋関数。
//! 画面描画は各フロントエンドが行う。

use crate::types::AnalysisResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// ソースタグ → 表示ラベルの組み込み表
const BUILTIN_SOURCE_LABELS: &[(&str, &str)] = &[
    ("basic_model_gradio", "Basic (Gradio)"),
    ("advanced_model_sightengine", "Advanced (Sightengine)"),
];

/// 汎用変換で取り除く部分文字列
const STRIPPED_SOURCE_WORD: &str = "model";

/// パネルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Authentic,
    Flagged,
    Error,
}

impl PanelKind {
    /// CSSクラス名
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelKind::Authentic => "authentic",
            PanelKind::Flagged => "flagged",
            PanelKind::Error => "error",
        }
    }
}

/// 結果パネルの表示内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub kind: PanelKind,
    pub heading: String,
    /// 確信度バッジ（例: "87% AI Likelihood"）。エラー時はなし
    pub badge: Option<String>,
    /// 説明文。エラー時はサーバ/通信のメッセージそのもの
    pub description: String,
    /// モデル表示名。タグがなければ省略
    pub source_label: Option<String>,
}

/// ソースタグの表示名テーブル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLabels {
    labels: BTreeMap<String, String>,
}

impl Default for SourceLabels {
    fn default() -> Self {
        Self {
            labels: BUILTIN_SOURCE_LABELS
                .iter()
                .map(|(tag, label)| (tag.to_string(), label.to_string()))
                .collect(),
        }
    }
}

impl SourceLabels {
    /// 組み込み表に設定の上書きを重ねる
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::default();
        for (tag, label) in overrides {
            table.labels.insert(tag.into(), label.into());
        }
        table
    }

    /// タグの表示名（未知のタグは汎用変換）
    pub fn label_for(&self, tag: &str) -> String {
        self.labels
            .get(tag)
            .cloned()
            .unwrap_or_else(|| humanize_source_tag(tag))
    }
}

/// 未知のソースタグを読める形にする
///
/// 区切り文字を空白にし、最初の "model" を取り除き、各単語の先頭を大文字にする。
///
/// # Examples
/// ```
/// use deepfake_detector_common::render::humanize_source_tag;
///
/// assert_eq!(humanize_source_tag("local_model_keras"), "Local Keras");
/// assert_eq!(humanize_source_tag("basic_model"), "Basic");
/// ```
pub fn humanize_source_tag(tag: &str) -> String {
    let spaced = tag.replace(['_', '-'], " ");
    let stripped = spaced.replacen(STRIPPED_SOURCE_WORD, "", 1);
    stripped
        .split_whitespace()
        .map(title_case_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 結果をパネルに写す
pub fn render(result: &AnalysisResult, labels: &SourceLabels) -> ResultView {
    match result {
        AnalysisResult::Failure { message } => ResultView {
            kind: PanelKind::Error,
            heading: "Analysis Error".to_string(),
            badge: None,
            description: message.clone(),
            source_label: None,
        },
        AnalysisResult::Success {
            is_ai,
            confidence_percent,
            source_tag,
        } => {
            let source_label = source_tag.as_deref().map(|tag| labels.label_for(tag));
            if *is_ai {
                ResultView {
                    kind: PanelKind::Flagged,
                    heading: "Likely AI-generated or Deepfake".to_string(),
                    badge: Some(format!("{}% AI Likelihood", confidence_percent)),
                    description: "Our analysis suggests patterns consistent with AI generation or manipulation."
                        .to_string(),
                    source_label,
                }
            } else {
                ResultView {
                    kind: PanelKind::Authentic,
                    heading: "Likely Authentic".to_string(),
                    badge: Some(format!("{}% Authentic Likelihood", confidence_percent)),
                    description: "Our analysis did not find significant indicators of AI manipulation."
                        .to_string(),
                    source_label,
                }
            }
        }
    }
}
