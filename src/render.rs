//! 結果パネルの端末表示

use deepfake_detector_common::{PanelKind, ResultView};

fn icon(kind: PanelKind) -> &'static str {
    match kind {
        PanelKind::Authentic => "✅",
        PanelKind::Flagged => "⚠️",
        PanelKind::Error => "❌",
    }
}

/// パネルを複数行のテキストにする
pub fn format_view(view: &ResultView) -> String {
    let mut lines = vec![format!("{} {}", icon(view.kind), view.heading)];

    if let Some(badge) = &view.badge {
        lines.push(format!("   {}", badge));
    }
    if let Some(label) = &view.source_label {
        lines.push(format!("   Model: {}", label));
    }
    lines.push(format!("   {}", view.description));

    if view.kind != PanelKind::Error {
        lines.push(
            "   Detailed analysis breakdown is not provided by the current detection methods."
                .to_string(),
        );
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use deepfake_detector_common::{render, AnalysisResult, SourceLabels};

    #[test]
    fn test_flagged_output() {
        let view = render(
            &AnalysisResult::Success {
                is_ai: true,
                confidence_percent: 87,
                source_tag: Some("advanced_model_sightengine".into()),
            },
            &SourceLabels::default(),
        );
        let text = format_view(&view);
        assert!(text.starts_with("⚠️ Likely AI-generated or Deepfake"));
        assert!(text.contains("87% AI Likelihood"));
        assert!(text.contains("Model: Advanced (Sightengine)"));
    }

    #[test]
    fn test_error_output_has_no_badge() {
        let view = render(&AnalysisResult::failure("model unavailable"), &SourceLabels::default());
        let text = format_view(&view);
        assert_eq!(text, "❌ Analysis Error\n   model unavailable");
    }

    #[test]
    fn test_authentic_output_without_source() {
        let view = render(
            &AnalysisResult::Success {
                is_ai: false,
                confidence_percent: 70,
                source_tag: None,
            },
            &SourceLabels::default(),
        );
        let text = format_view(&view);
        assert!(text.contains("70% Authentic Likelihood"));
        assert!(!text.contains("Model:"));
    }
}
