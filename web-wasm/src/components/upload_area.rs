//! アップロードエリアコンポーネント
//!
//! 1枚だけ受け付ける。クリックまたはドラッグ&ドロップで選択し、
//! 同じファイルを選び直せるよう選択後にinputの値を空に戻す。

use deepfake_detector_common::{
    format_size_limit, validate_metadata, IntakeLimits, SelectedFile, ValidationError, Workflow,
};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileList, FileReader, HtmlInputElement};

#[component]
pub fn UploadArea<F, C>(
    workflow: RwSignal<Workflow>,
    intake_error: ReadSignal<Option<String>>,
    on_file_selected: F,
    on_clear: C,
) -> impl IntoView
where
    F: Fn(Result<SelectedFile, ValidationError>) + 'static + Clone,
    C: Fn(()) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref: NodeRef<leptos::html::Input> = NodeRef::new();

    let limits = workflow.with_untracked(|w| w.limits().clone());
    let accept = limits.accept_attribute();
    let max_size = format_size_limit(limits.max_bytes);
    let is_analyzing = move || workflow.with(|w| w.is_analyzing());
    let preview = move || workflow.with(|w| w.upload().and_then(|u| u.image_data_uri.clone()));
    let file_name = move || {
        workflow.with(|w| w.upload().map(|u| u.file_name.clone()).unwrap_or_default())
    };

    let handle_files = move |files: FileList| {
        let Some(file) = files.get(0) else {
            return;
        };
        // 中身を読む前にサイズと種類で弾く
        if let Err(e) = check_before_read(&file, &limits) {
            on_file_selected(Err(e));
            return;
        }
        read_file(file, on_file_selected.clone());
    };

    let on_drop = {
        let handle_files = handle_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if is_analyzing() {
                return;
            }

            if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
                handle_files(files);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !is_analyzing() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_click = move |_: web_sys::MouseEvent| {
        if is_analyzing() {
            return;
        }
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(files) = input.files() {
            handle_files(files);
        }
        input.set_value("");
    };

    view! {
        <div class="upload-section">
            <input
                type="file"
                accept=accept
                style="display: none"
                node_ref=input_ref
                on:change=on_change
            />
            <div
                class=move || {
                    let mut classes = vec!["upload-area"];
                    if is_dragover.get() {
                        classes.push("dragover");
                    }
                    if is_analyzing() {
                        classes.push("disabled");
                    }
                    classes.join(" ")
                }
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=on_dragleave
                on:click=on_click
            >
                <Show
                    when=move || preview().is_some()
                    fallback=move || view! {
                        <div class="upload-icon">"🖼️"</div>
                        <p>"Drag & drop an image here, or click to select"</p>
                        <p class="text-muted">
                            {format!("Supported: JPG, PNG, WEBP (max {})", max_size)}
                        </p>
                    }
                >
                    <img class="preview" src=move || preview().unwrap_or_default() alt=file_name />
                    <p class="file-name">{file_name}</p>
                </Show>
            </div>

            <Show when=move || preview().is_some() && !is_analyzing()>
                <button
                    class="btn btn-tertiary btn-small"
                    on:click={
                        let on_clear = on_clear.clone();
                        move |_| on_clear(())
                    }
                >
                    "Remove Image"
                </button>
            </Show>

            {move || intake_error.get().map(|message| view! {
                <p class="error-message">{message}</p>
            })}
        </div>
    }
}

/// `File` のメタデータだけで受付可否を判定する
fn check_before_read(file: &File, limits: &IntakeLimits) -> Result<(), ValidationError> {
    validate_metadata(file.size() as u64, &file.type_(), limits)
}

fn read_error(file_name: &str, err: &JsValue) -> ValidationError {
    let reason = err
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| err.as_string())
        .unwrap_or_default();
    if reason.is_empty() {
        ValidationError::ReadFailure(file_name.to_string())
    } else {
        ValidationError::ReadFailure(format!("{}: {}", file_name, reason))
    }
}

fn read_file<F>(file: File, on_file_selected: F)
where
    F: Fn(Result<SelectedFile, ValidationError>) + 'static + Clone,
{
    let file_name = file.name();
    let mime_type = file.type_();

    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            on_file_selected(Err(read_error(&file_name, &e)));
            return;
        }
    };

    let reader_clone = reader.clone();
    let on_loaded = on_file_selected.clone();
    let loaded_name = file_name.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let selected = match reader_clone.result() {
            Ok(buffer) if buffer.is_instance_of::<js_sys::ArrayBuffer>() => {
                let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
                Ok(SelectedFile::new(loaded_name.clone(), mime_type.clone(), bytes))
            }
            _ => Err(ValidationError::ReadFailure(loaded_name.clone())),
        };
        on_loaded(selected);
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    reader.set_onerror(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_array_buffer(&file) {
        gloo::console::error!(e.clone());
        on_file_selected(Err(read_error(&file_name, &e)));
    }
}
