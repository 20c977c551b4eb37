//! メインアプリケーションコンポーネント

use crate::api::detector::{api_config, send_analysis};
use crate::components::{
    analyze_button::AnalyzeButton, contact_form::ContactForm, header::Header,
    method_selector::MethodSelector, result_panel::ResultPanel, upload_area::UploadArea,
};
use deepfake_detector_common::{
    DetectionMethod, IntakeLimits, Prepared, SelectedFile, SourceLabels, ValidationError,
    Workflow,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let workflow = RwSignal::new(Workflow::new(
        IntakeLimits::default(),
        DetectionMethod::default(),
    ));
    // 受付時の検証エラー（結果パネルとは別に表示）
    let (intake_error, set_intake_error) = signal(None::<String>);

    let on_file_selected = move |file: Result<SelectedFile, ValidationError>| {
        let file = match file {
            Ok(file) => file,
            Err(e) => {
                set_intake_error.set(Some(e.to_string()));
                return;
            }
        };
        match workflow.try_update(|w| w.select_file(&file)) {
            Some(Ok(upload)) => {
                gloo::console::log!(format!("selected {}", upload.file_name));
                set_intake_error.set(None);
            }
            Some(Err(e)) => set_intake_error.set(Some(e.to_string())),
            None => {}
        }
    };

    let on_clear = move |_: ()| {
        if workflow.try_update(|w| w.clear()).is_some() {
            set_intake_error.set(None);
        }
    };

    let on_method_change = move |method: DetectionMethod| {
        if let Some(Err(e)) = workflow.try_update(|w| w.set_method(method)) {
            gloo::console::warn!(format!("method not changed: {}", e));
        }
    };

    let on_analyze = move |_: ()| {
        let prepared = match workflow.try_update(|w| w.begin_analysis()) {
            Some(Ok(prepared)) => prepared,
            Some(Err(e)) => {
                set_intake_error.set(Some(e.to_string()));
                return;
            }
            None => return,
        };

        // Abortedの場合は送信せずに結果が確定済み
        if let Prepared::Ready(request) = prepared {
            spawn_local(async move {
                let result = send_analysis(&api_config(), &request).await;
                workflow.update(|w| {
                    if let Err(e) = w.complete_analysis(result) {
                        gloo::console::error!(format!("result dropped: {}", e));
                    }
                });
            });
        }
    };

    let is_analyzing = Signal::derive(move || workflow.with(|w| w.is_analyzing()));

    view! {
        <div class="container">
            <Header />

            <UploadArea
                workflow=workflow
                intake_error=intake_error
                on_file_selected=on_file_selected
                on_clear=on_clear
            />

            <MethodSelector
                method=Signal::derive(move || workflow.with(|w| w.method()))
                is_analyzing=is_analyzing
                on_change=on_method_change
            />

            <AnalyzeButton
                can_analyze=Signal::derive(move || workflow.with(|w| w.can_analyze()))
                is_analyzing=is_analyzing
                on_analyze=on_analyze
            />

            <ResultPanel workflow=workflow labels=SourceLabels::default() />

            <ContactForm />
        </div>
    }
}
