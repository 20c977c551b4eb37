//! 検出方式の選択

use deepfake_detector_common::DetectionMethod;
use leptos::prelude::*;

#[component]
pub fn MethodSelector<F>(
    method: Signal<DetectionMethod>,
    is_analyzing: Signal<bool>,
    on_change: F,
) -> impl IntoView
where
    F: Fn(DetectionMethod) + 'static + Clone,
{
    view! {
        <div class="method-selector">
            <label>"Detection Method"</label>
            <div class="method-options">
                {DetectionMethod::all()
                    .into_iter()
                    .map(|option| {
                        let on_change = on_change.clone();
                        view! {
                            <button
                                class=move || {
                                    if method.get() == option {
                                        "btn btn-primary btn-small"
                                    } else {
                                        "btn btn-secondary btn-small"
                                    }
                                }
                                disabled=move || is_analyzing.get()
                                on:click=move |_| on_change(option)
                            >
                                {option.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
