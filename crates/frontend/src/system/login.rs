use contracts::system::auth::{LoginRequest, LoginResponse};
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_utils::api_url;
use crate::shared::session::use_session;

#[component]
#[allow(non_snake_case)]
pub fn LoginPage() -> impl IntoView {
    let session = use_session();
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (busy, set_busy) = signal(false);

    let submit = move || {
        let request = LoginRequest {
            username: username.get(),
            password: password.get(),
        };
        if request.username.trim().is_empty() || request.password.is_empty() {
            set_error.set(Some("Enter username and password".into()));
            return;
        }
        set_busy.set(true);
        set_error.set(None);
        spawn_local(async move {
            let built = match Request::post(&api_url("/api/system/auth/login")).json(&request) {
                Ok(b) => b,
                Err(e) => {
                    set_error.set(Some(format!("Request error: {}", e)));
                    set_busy.set(false);
                    return;
                }
            };
            match built.send().await {
                Ok(response) if response.ok() => match response.json::<LoginResponse>().await {
                    Ok(login) => session.login(login.access_token, login.user),
                    Err(e) => set_error.set(Some(format!("Bad response: {}", e))),
                },
                Ok(response) if response.status() == 401 => {
                    set_error.set(Some("Invalid username or password".into()))
                }
                Ok(response) => set_error.set(Some(format!("HTTP {}", response.status()))),
                Err(e) => set_error.set(Some(format!("Network error: {}", e))),
            }
            set_busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1 class="login-card__title">"Garment Admin"</h1>

                {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

                <div class="form-group">
                    <label for="username">"Username"</label>
                    <input
                        type="text"
                        id="username"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input
                        type="password"
                        id="password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" {
                                submit();
                            }
                        }
                    />
                </div>

                <button
                    class="btn btn-primary login-card__submit"
                    disabled=move || busy.get()
                    on:click=move |_| submit()
                >
                    {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                </button>
            </div>
        </div>
    }
}
