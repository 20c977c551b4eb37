//! お問い合わせフォーム
//!
//! 入力値はクライアント側で検証せずにそのまま送る。
//! 送信中は再送信を受け付けない。

use crate::api::detector::{api_config, send_contact};
use deepfake_detector_common::{BusyFlag, ContactMessage, ContactOutcome};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ContactForm() -> impl IntoView {
    let (name, set_name) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (subject, set_subject) = signal(String::new());
    let (message, set_message) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (outcome, set_outcome) = signal(None::<ContactOutcome>);
    let busy = BusyFlag::new();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let Some(guard) = busy.try_acquire() else {
            return;
        };

        let subject = subject.get_untracked();
        let contact = ContactMessage {
            name: name.get_untracked(),
            email: email.get_untracked(),
            subject: if subject.trim().is_empty() { None } else { Some(subject) },
            message: message.get_untracked(),
        };

        set_is_submitting.set(true);
        set_outcome.set(None);
        spawn_local(async move {
            let result = send_contact(&api_config(), &contact).await;
            if result.is_ok() {
                set_name.set(String::new());
                set_email.set(String::new());
                set_subject.set(String::new());
                set_message.set(String::new());
            }
            set_outcome.set(Some(result));
            set_is_submitting.set(false);
            drop(guard);
        });
    };

    view! {
        <section class="contact-section">
            <h2>"Contact Us"</h2>
            <form class="contact-form" on:submit=on_submit>
                <div class="form-group">
                    <label for="contact-name">"Name"</label>
                    <input
                        type="text"
                        id="contact-name"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="contact-email">"Email"</label>
                    <input
                        type="email"
                        id="contact-email"
                        prop:value=move || email.get()
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="contact-subject">"Subject (optional)"</label>
                    <input
                        type="text"
                        id="contact-subject"
                        prop:value=move || subject.get()
                        on:input=move |ev| set_subject.set(event_target_value(&ev))
                    />
                </div>

                <div class="form-group">
                    <label for="contact-message">"Message"</label>
                    <textarea
                        id="contact-message"
                        rows="5"
                        prop:value=move || message.get()
                        on:input=move |ev| set_message.set(event_target_value(&ev))
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                    {move || if is_submitting.get() { "Sending..." } else { "Send Message" }}
                </button>
            </form>

            {move || outcome.get().map(|outcome| match outcome {
                Ok(text) => view! { <p class="contact-status success">{text}</p> }.into_any(),
                Err(text) => view! { <p class="contact-status error">{text}</p> }.into_any(),
            })}
        </section>
    }
}
