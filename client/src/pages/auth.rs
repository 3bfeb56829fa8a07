//! Auth landing page: sign in with an email and display name.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;

use crate::net::types::LoginRequest;

/// Normalize the sign-in form; errors are user-facing messages.
pub(crate) fn validate_login_input(email: &str, name: &str) -> Result<(String, String), &'static str> {
    let request = LoginRequest { email: email.to_owned(), name: name.to_owned() }.normalized()?;
    Ok((request.email, request.name))
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let name = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, name_value) = match validate_login_input(&email.get(), &name.get()) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::login(&email_value, &name_value).await {
                Ok(_) => {
                    if let Some(window) = web_sys::window() {
                        let _ = window.location().set_href("/dashboard");
                    }
                }
                Err(e) => {
                    info.set(format!("Sign-in failed: {e}"));
                    busy.set(false);
                }
            }
        });

        #[cfg(not(feature = "hydrate"))]
        let _ = (email_value, name_value);
    };

    view! {
        <div class="auth-page">
            <section class="auth-page__pitch">
                <a class="auth-page__brand" href="/">"Aura"</a>
                <h1>"Join 500+ D2C brands growing with Aura"</h1>
                <p>
                    "Connect your data sources, chat with AI, and get intelligent insights to optimize your campaigns."
                </p>
            </section>
            <div class="auth-card">
                <h2>"Get Started with Aura"</h2>
                <p class="auth-card__subtitle">"Sign in or create your account"</p>
                <form class="auth-form" on:submit=on_submit>
                    <input
                        class="auth-input"
                        type="email"
                        placeholder="you@brand.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="auth-input"
                        type="text"
                        placeholder="Your name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                    <button class="auth-button" type="submit" disabled=move || busy.get()>
                        "Continue"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="auth-message">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
