//! 解析結果パネル

use deepfake_detector_common::{render, PanelKind, SourceLabels, Workflow};
use leptos::prelude::*;

#[component]
pub fn ResultPanel(workflow: RwSignal<Workflow>, labels: SourceLabels) -> impl IntoView {
    let result_view = move || workflow.with(|w| w.result().map(|result| render(result, &labels)));

    move || {
        result_view().map(|panel| {
            let class = format!("result-panel {}", panel.kind.as_str());
            let badge = panel.badge.map(|badge| view! { <span class="badge">{badge}</span> });
            let source = panel
                .source_label
                .map(|label| view! { <p class="result-source">{format!("Model: {}", label)}</p> });
            let note = (panel.kind != PanelKind::Error).then(|| view! {
                <p class="text-muted">
                    "Detailed analysis breakdown is not provided by the current detection methods."
                </p>
            });

            view! {
                <div class=class>
                    <h2>{panel.heading}</h2>
                    {badge}
                    {source}
                    <p class="result-description">{panel.description}</p>
                    {note}
                </div>
            }
        })
    }
}
