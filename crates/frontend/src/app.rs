use crate::layout::app_shell::AppShell;
use crate::shared::session::SessionStore;
use crate::system::login::LoginPage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Session state is provided to the whole app via context; route guarding
    // is just this one Show.
    let session = SessionStore::new();
    provide_context(session);

    view! {
        <Show
            when=move || session.token.get().is_some()
            fallback=|| view! { <LoginPage /> }
        >
            <AppShell />
        </Show>
    }
}
