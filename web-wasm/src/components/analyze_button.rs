//! 解析ボタン

use leptos::prelude::*;

/// 画像があり結果がまだないときだけ表示する
#[component]
pub fn AnalyzeButton<FA>(
    can_analyze: Signal<bool>,
    is_analyzing: Signal<bool>,
    on_analyze: FA,
) -> impl IntoView
where
    FA: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <Show when=move || can_analyze.get() || is_analyzing.get()>
            <div class="analyze-actions">
                <button
                    class="btn btn-primary"
                    disabled=move || is_analyzing.get()
                    on:click={
                        let on_analyze = on_analyze.clone();
                        move |_| on_analyze(())
                    }
                >
                    {move || if is_analyzing.get() { "Analyzing..." } else { "Analyze Image" }}
                </button>
            </div>
        </Show>
    }
}
