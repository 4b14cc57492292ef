use chrono::Utc;
use contracts::domain::a002_tna_schedule::aggregate::{MilestoneStatus, TnaScheduleDto};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

use super::details::TnaScheduleDetails;
use crate::shared::api_utils::api_url;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::icons::icon;
use crate::shared::request_guard::RequestGuard;

#[derive(Debug, Serialize)]
struct ListParams {
    page: usize,
    limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TnaListResponse {
    items: Vec<TnaScheduleDto>,
    page: usize,
    total_pages: usize,
    #[allow(dead_code)]
    has_next_page: bool,
}

async fn fetch_schedules(params: &ListParams) -> Result<TnaListResponse, String> {
    let query = serde_qs::to_string(params).map_err(|e| format!("Bad query: {}", e))?;
    let url = api_url(&format!("/api/tna-schedules?{}", query));
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    response
        .json::<TnaListResponse>()
        .await
        .map_err(|e| format!("Bad response: {}", e))
}

async fn delete_schedule(id: &str) -> Result<(), String> {
    let response = Request::delete(&api_url(&format!("/api/tna-schedules/{}", id)))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}

/// "3/8 done, 1 late" progress summary for a schedule row
fn progress_summary(dto: &TnaScheduleDto) -> String {
    let today = Utc::now().date_naive();
    let total = dto.milestones.len();
    let done = dto
        .milestones
        .iter()
        .filter(|m| m.status(today) == MilestoneStatus::Done)
        .count();
    let late = dto
        .milestones
        .iter()
        .filter(|m| m.status(today) == MilestoneStatus::Late)
        .count();
    if late > 0 {
        format!("{}/{} done, {} late", done, total, late)
    } else {
        format!("{}/{} done", done, total)
    }
}

#[component]
#[allow(non_snake_case)]
pub fn TnaScheduleList() -> impl IntoView {
    let (items, set_items) = signal(Vec::<TnaScheduleDto>::new());
    let (page, set_page) = signal(1usize);
    let (page_size, set_page_size) = signal(10usize);
    let (total_pages, set_total_pages) = signal(0usize);
    let (search, set_search) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let editing = RwSignal::new(None::<Option<String>>); // None = closed, Some(id?) = editor open
    let guard = RequestGuard::new();
    let search_epoch = RwSignal::new(0u64);

    let fetch_page = {
        let guard = guard.clone();
        move |target_page: usize| {
            let ticket = guard.begin();
            let guard = guard.clone();
            let params = ListParams {
                page: target_page,
                limit: page_size.get_untracked(),
                search: Some(search.get_untracked().trim().to_string()).filter(|s| !s.is_empty()),
            };
            spawn_local(async move {
                let result = fetch_schedules(&params).await;
                if !guard.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(response) => {
                        set_items.set(response.items);
                        set_page.set(response.page);
                        set_total_pages.set(response.total_pages);
                        set_error.set(None);
                    }
                    Err(e) => set_error.set(Some(e)),
                }
            });
        }
    };

    let refetch = {
        let fetch_page = fetch_page.clone();
        move || fetch_page(page.get_untracked())
    };

    let on_search_input = {
        let fetch_page = fetch_page.clone();
        move |value: String| {
            set_search.set(value);
            let ticket = search_epoch.get_untracked() + 1;
            search_epoch.set(ticket);
            let fetch_page = fetch_page.clone();
            spawn_local(async move {
                TimeoutFuture::new(300).await;
                if search_epoch.get_untracked() == ticket {
                    fetch_page(1);
                }
            });
        }
    };

    let handle_delete = {
        let refetch = refetch.clone();
        move |id: String, order_no: String| {
            let confirmed = web_sys::window()
                .map(|w| {
                    w.confirm_with_message(&format!("Delete TNA schedule {}?", order_no))
                        .unwrap_or(false)
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let refetch = refetch.clone();
            spawn_local(async move {
                match delete_schedule(&id).await {
                    Ok(()) => refetch(),
                    Err(e) => set_error.set(Some(format!("Delete failed: {}", e))),
                }
            });
        }
    };

    {
        let fetch_page = fetch_page.clone();
        fetch_page(1);
    }

    let fetch_for_pagination = fetch_page.clone();
    let fetch_for_page_size = fetch_page.clone();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"TNA schedules"</h1>
                </div>
                <div class="header__actions">
                    <input
                        type="search"
                        class="header__search"
                        placeholder="Search order, style or buyer..."
                        prop:value=move || search.get()
                        on:input={
                            let on_search_input = on_search_input.clone();
                            move |ev| on_search_input(event_target_value(&ev))
                        }
                    />
                    <button
                        class="button button--primary"
                        on:click=move |_| editing.set(Some(None))
                    >
                        {icon("plus")}
                        "New schedule"
                    </button>
                    <button
                        class="button button--secondary"
                        on:click={
                            let refetch = refetch.clone();
                            move |_| refetch()
                        }
                    >
                        {icon("refresh")}
                        "Refresh"
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <Show when=move || editing.get().is_some()>
                {
                    let refetch = refetch.clone();
                    move || {
                        let id = editing.get().flatten();
                        let on_saved: Rc<dyn Fn(())> = Rc::new({
                            let refetch = refetch.clone();
                            move |_| {
                                editing.set(None);
                                refetch();
                            }
                        });
                        let on_cancel: Rc<dyn Fn(())> = Rc::new(move |_| editing.set(None));
                        view! {
                            <TnaScheduleDetails id=id on_saved=on_saved on_cancel=on_cancel />
                        }
                    }
                }
            </Show>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Order no"</th>
                            <th class="table__header-cell">"Style"</th>
                            <th class="table__header-cell">"Buyer"</th>
                            <th class="table__header-cell">"Order date"</th>
                            <th class="table__header-cell">"Shipment"</th>
                            <th class="table__header-cell">"Progress"</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let handle_delete = handle_delete.clone();
                            items.get().into_iter().map(|dto| {
                                let progress = progress_summary(&dto);
                                let id = dto.id.clone().unwrap_or_default();
                                let id_for_edit = id.clone();
                                let id_for_delete = id.clone();
                                let order_for_delete = dto.order_no.clone();
                                let handle_delete = handle_delete.clone();
                                view! {
                                    <tr
                                        class="table__row"
                                        on:click=move |_| editing.set(Some(Some(id_for_edit.clone())))
                                    >
                                        <td class="table__cell">{dto.order_no.clone()}</td>
                                        <td class="table__cell">{dto.style.clone()}</td>
                                        <td class="table__cell">{dto.buyer.clone()}</td>
                                        <td class="table__cell">{dto.order_date.clone()}</td>
                                        <td class="table__cell">{dto.shipment_date.clone()}</td>
                                        <td class="table__cell">{progress}</td>
                                        <td class="table__cell table__cell--actions" on:click=|e| e.stop_propagation()>
                                            <button
                                                class="button button--icon"
                                                title="Delete"
                                                on:click=move |_| handle_delete(id_for_delete.clone(), order_for_delete.clone())
                                            >
                                                {icon("delete")}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()
                        }}
                    </tbody>
                </table>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || page.get())
                total_pages=Signal::derive(move || total_pages.get())
                page_size=Signal::derive(move || page_size.get())
                on_page_change=Callback::new(move |target: usize| fetch_for_pagination(target))
                on_page_size_change=Callback::new(move |size: usize| {
                    set_page_size.set(size);
                    fetch_for_page_size(1);
                })
            />
        </div>
    }
}
