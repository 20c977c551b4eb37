//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Deepfake Detector"</h1>
            <p class="text-muted">
                "Upload an image to check whether it is likely AI-generated or authentic."
            </p>
        </header>
    }
}
