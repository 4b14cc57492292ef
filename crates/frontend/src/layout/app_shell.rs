use crate::domain::a001_cost_sheet::ui::list::CostSheetList;
use crate::domain::a002_tna_schedule::ui::list::TnaScheduleList;
use crate::shared::icons::icon;
use crate::shared::session::use_session;
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    CostSheets,
    TnaSchedules,
}

/// Application shell: sidebar navigation plus the active page
#[component]
#[allow(non_snake_case)]
pub fn AppShell() -> impl IntoView {
    let session = use_session();
    let (page, set_page) = signal(Page::CostSheets);

    let nav_class = move |p: Page| {
        if page.get() == p {
            "sidebar__item sidebar__item--active"
        } else {
            "sidebar__item"
        }
    };

    view! {
        <div class="app-shell">
            <aside class="sidebar">
                <div class="sidebar__brand">
                    <span class="sidebar__brand-title">"Garment Admin"</span>
                </div>
                <nav class="sidebar__nav">
                    <button
                        class=move || nav_class(Page::CostSheets)
                        on:click=move |_| set_page.set(Page::CostSheets)
                    >
                        {icon("sheets")}
                        <span>"Cost sheets"</span>
                    </button>
                    <button
                        class=move || nav_class(Page::TnaSchedules)
                        on:click=move |_| set_page.set(Page::TnaSchedules)
                    >
                        {icon("calendar")}
                        <span>"TNA schedules"</span>
                    </button>
                </nav>
                <div class="sidebar__footer">
                    <span class="sidebar__user">{move || session.username()}</span>
                    <button
                        class="button button--subtle"
                        on:click=move |_| session.logout()
                        title="Log out"
                    >
                        {icon("logout")}
                    </button>
                </div>
            </aside>
            <main class="app-shell__content">
                {move || match page.get() {
                    Page::CostSheets => view! { <CostSheetList /> }.into_any(),
                    Page::TnaSchedules => view! { <TnaScheduleList /> }.into_any(),
                }}
            </main>
        </div>
    }
}
