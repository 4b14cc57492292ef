pub mod state;

use contracts::domain::a001_cost_sheet::aggregate::CostSheetListResponse;
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::Serialize;
use std::sync::Arc;

use super::details::CostSheetDetails;
use super::SheetMode;
use crate::shared::api_utils::api_url;
use crate::shared::components::number_format::{format_money, format_price};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::icons::icon;
use crate::shared::request_guard::RequestGuard;
use state::create_state;

#[derive(Debug, Serialize)]
struct ListParams {
    page: usize,
    limit: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
}

async fn fetch_cost_sheets(params: &ListParams) -> Result<CostSheetListResponse, String> {
    let query = serde_qs::to_string(params).map_err(|e| format!("Bad query: {}", e))?;
    let url = api_url(&format!("/api/cost-sheets?{}", query));
    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    response
        .json::<CostSheetListResponse>()
        .await
        .map_err(|e| format!("Bad response: {}", e))
}

async fn delete_cost_sheet(id: &str) -> Result<(), String> {
    let response = Request::delete(&api_url(&format!("/api/cost-sheets/{}", id)))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}

fn format_timestamp(dt: chrono::DateTime<chrono::Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

#[component]
#[allow(non_snake_case)]
pub fn CostSheetList() -> impl IntoView {
    let state = create_state();
    let (error, set_error) = signal(None::<String>);
    // collapsed -> expanded(show) -> expanded(edit, inside details) -> collapsed
    let expanded = RwSignal::new(None::<String>);
    let show_create = RwSignal::new(false);
    let guard = RequestGuard::new();
    // ticket counter for the debounced search box
    let search_epoch = RwSignal::new(0u64);

    let fetch_page = {
        let guard = guard.clone();
        move |page: usize| {
            let ticket = guard.begin();
            let guard = guard.clone();
            let current = state.get_untracked();
            let params = ListParams {
                page,
                limit: current.page_size,
                search: Some(current.search_query.trim().to_string())
                    .filter(|s| !s.is_empty()),
            };
            spawn_local(async move {
                let result = fetch_cost_sheets(&params).await;
                // a response superseded by a newer request is dropped
                if !guard.is_current(ticket) {
                    return;
                }
                match result {
                    Ok(response) => {
                        state.update(|s| {
                            s.items = response.sanitized;
                            s.page = response.page;
                            s.total_pages = response.total_pages;
                            s.has_next_page = response.has_next_page;
                            s.is_loaded = true;
                        });
                        set_error.set(None);
                    }
                    Err(e) => set_error.set(Some(e)),
                }
            });
        }
    };

    let refetch = {
        let fetch_page = fetch_page.clone();
        move || fetch_page(state.get_untracked().page)
    };

    let on_search_input = {
        let fetch_page = fetch_page.clone();
        move |value: String| {
            state.update(|s| s.search_query = value);
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
        move |id: String, style: String| {
            let confirmed = web_sys::window()
                .map(|w| {
                    w.confirm_with_message(&format!("Delete cost sheet {}?", style))
                        .unwrap_or(false)
                })
                .unwrap_or(false);
            if !confirmed {
                return;
            }
            let refetch = refetch.clone();
            spawn_local(async move {
                match delete_cost_sheet(&id).await {
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
    let refetch_for_create = refetch.clone();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">"Cost sheets"</h1>
                </div>
                <div class="header__actions">
                    <input
                        type="search"
                        class="header__search"
                        placeholder="Search style or item..."
                        prop:value=move || state.get().search_query
                        on:input={
                            let on_search_input = on_search_input.clone();
                            move |ev| on_search_input(event_target_value(&ev))
                        }
                    />
                    <button
                        class="button button--primary"
                        on:click=move |_| {
                            expanded.set(None);
                            show_create.set(true);
                        }
                    >
                        {icon("plus")}
                        "New cost sheet"
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

            <Show when=move || show_create.get()>
                {
                    let refetch = refetch_for_create.clone();
                    move || {
                        let on_saved: Arc<dyn Fn(contracts::domain::a001_cost_sheet::aggregate::CostSheetRecord) + Send + Sync> = Arc::new({
                            let refetch = refetch.clone();
                            move |_record| {
                                show_create.set(false);
                                refetch();
                            }
                        });
                        let on_close: Arc<dyn Fn(()) + Send + Sync> = Arc::new(move |_| show_create.set(false));
                        view! {
                            <CostSheetDetails
                                id=None
                                mode=SheetMode::Create
                                on_saved=on_saved
                                on_close=on_close
                            />
                        }
                    }
                }
            </Show>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Style"</th>
                            <th class="table__header-cell">"Item"</th>
                            <th class="table__header-cell">"Qty"</th>
                            <th class="table__header-cell cost-table__num">"FOB / dzn"</th>
                            <th class="table__header-cell cost-table__num">"Price / pc"</th>
                            <th class="table__header-cell">"Created by"</th>
                            <th class="table__header-cell">"Created"</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let refetch = refetch.clone();
                            let handle_delete = handle_delete.clone();
                            state.get().items.into_iter().map(|record| {
                                let chain = record.summary_chain();
                                let id = record.id.clone();
                                let id_for_row = id.clone();
                                let id_for_when = id.clone();
                                let id_for_details = id.clone();
                                let id_for_delete = id.clone();
                                let style_for_delete = record.style_info.style.clone();
                                let is_expanded = expanded.get().as_deref() == Some(id.as_str());
                                let refetch = refetch.clone();
                                let handle_delete = handle_delete.clone();
                                view! {
                                    <tr
                                        class="table__row"
                                        class:table__row--selected=is_expanded
                                        on:click=move |_| {
                                            show_create.set(false);
                                            // clicking an open row collapses it
                                            if expanded.get().as_deref() == Some(id_for_row.as_str()) {
                                                expanded.set(None);
                                            } else {
                                                expanded.set(Some(id_for_row.clone()));
                                            }
                                        }
                                    >
                                        <td class="table__cell">{record.style_info.style.clone()}</td>
                                        <td class="table__cell">{record.style_info.item.clone()}</td>
                                        <td class="table__cell">{record.style_info.quantity.clone()}</td>
                                        <td class="table__cell cost-table__num">{format_money(chain.fob_price)}</td>
                                        <td class="table__cell cost-table__num">{format_price(chain.price_per_piece)}</td>
                                        <td class="table__cell">{record.created_by.clone()}</td>
                                        <td class="table__cell">{format_timestamp(record.created_at)}</td>
                                        <td class="table__cell table__cell--actions" on:click=|e| e.stop_propagation()>
                                            <button
                                                class="button button--icon"
                                                title="Delete"
                                                on:click=move |_| handle_delete(id_for_delete.clone(), style_for_delete.clone())
                                            >
                                                {icon("delete")}
                                            </button>
                                        </td>
                                    </tr>
                                    <Show when=move || expanded.get().as_deref() == Some(id_for_when.as_str())>
                                        {
                                            let id_for_details = id_for_details.clone();
                                            let refetch = refetch.clone();
                                            move || {
                                                let on_saved: Arc<dyn Fn(contracts::domain::a001_cost_sheet::aggregate::CostSheetRecord) + Send + Sync> = Arc::new({
                                                    let refetch = refetch.clone();
                                                    move |_record| {
                                                        expanded.set(None);
                                                        refetch();
                                                    }
                                                });
                                                let on_close: Arc<dyn Fn(()) + Send + Sync> = Arc::new(move |_| expanded.set(None));
                                                view! {
                                                    <tr class="table__row table__row--details">
                                                        <td colspan="8">
                                                            <CostSheetDetails
                                                                id=Some(id_for_details.clone())
                                                                mode=SheetMode::Show
                                                                on_saved=on_saved
                                                                on_close=on_close
                                                            />
                                                        </td>
                                                    </tr>
                                                }
                                            }
                                        }
                                    </Show>
                                }
                            }).collect_view()
                        }}
                    </tbody>
                </table>

                {move || {
                    let s = state.get();
                    (s.is_loaded && s.items.is_empty()).then(|| view! {
                        <div class="empty-state">"No cost sheets yet"</div>
                    })
                }}
            </div>

            <PaginationControls
                current_page=Signal::derive(move || state.get().page)
                total_pages=Signal::derive(move || state.get().total_pages)
                page_size=Signal::derive(move || state.get().page_size)
                on_page_change=Callback::new(move |page: usize| fetch_for_pagination(page))
                on_page_size_change=Callback::new(move |size: usize| {
                    state.update(|s| s.page_size = size);
                    fetch_for_page_size(1);
                })
            />
        </div>
    }
}
