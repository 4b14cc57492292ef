use chrono::Utc;
use contracts::domain::a002_tna_schedule::aggregate::{Milestone, MilestoneStatus, TnaScheduleDto};
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use thaw::*;

use crate::shared::api_utils::api_url;
use crate::shared::icons::icon;

async fn fetch_by_id(id: &str) -> Result<TnaScheduleDto, String> {
    let response = Request::get(&api_url(&format!("/api/tna-schedules/{}", id)))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    response
        .json::<TnaScheduleDto>()
        .await
        .map_err(|e| format!("Bad response: {}", e))
}

async fn save_form(dto: &TnaScheduleDto) -> Result<(), String> {
    let request = Request::post(&api_url("/api/tna-schedules"))
        .json(dto)
        .map_err(|e| format!("Request error: {}", e))?;
    let response = request
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;
    if !response.ok() {
        return Err(format!("HTTP {}", response.status()));
    }
    Ok(())
}

fn status_badge(milestone: &Milestone) -> (&'static str, &'static str) {
    let today = Utc::now().date_naive();
    match milestone.status(today) {
        MilestoneStatus::Done => ("badge badge--success", "Done"),
        MilestoneStatus::Late => ("badge badge--error", "Late"),
        MilestoneStatus::Pending => ("badge badge--secondary", "Pending"),
    }
}

/// TNA schedule editor; creating when no id is given
#[component]
#[allow(non_snake_case)]
pub fn TnaScheduleDetails(
    id: Option<String>,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let form = RwSignal::new(TnaScheduleDto {
        milestones: Milestone::default_template(),
        ..Default::default()
    });
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    if let Some(existing_id) = id {
        spawn_local(async move {
            match fetch_by_id(&existing_id).await {
                Ok(dto) => form.set(dto),
                Err(e) => error.set(Some(format!("Failed to load: {}", e))),
            }
        });
    }

    let is_edit_mode = move || form.get().id.is_some();
    let is_form_valid = move || {
        let f = form.get();
        !f.order_no.trim().is_empty() && !f.style.trim().is_empty()
    };

    let save = {
        let on_saved = on_saved.clone();
        move || {
            let current = form.get_untracked();
            if current.order_no.trim().is_empty() || current.style.trim().is_empty() {
                error.set(Some("Order no and style are required".into()));
                return;
            }
            let on_saved = on_saved.clone();
            saving.set(true);
            error.set(None);
            spawn_local(async move {
                match save_form(&current).await {
                    Ok(()) => (on_saved)(()),
                    Err(e) => error.set(Some(format!("Save failed: {}", e))),
                }
                saving.set(false);
            });
        }
    };

    let update_milestone = move |id: String, apply: Rc<dyn Fn(&mut Milestone)>| {
        form.update(|f| {
            if let Some(m) = f.milestones.iter_mut().find(|m| m.id == id) {
                apply(m);
            }
        });
    };

    view! {
        <div class="details-container tna-details">
            <div class="details-header">
                <h3>
                    {move || if is_edit_mode() { "Edit TNA schedule" } else { "New TNA schedule" }}
                </h3>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <div class="details-form form-grid">
                <div class="form-group">
                    <label>"Order no"</label>
                    <input
                        type="text"
                        prop:value=move || form.get().order_no
                        on:input=move |ev| form.update(|f| f.order_no = event_target_value(&ev))
                        placeholder="e.g. PO-7791"
                    />
                </div>
                <div class="form-group">
                    <label>"Style"</label>
                    <input
                        type="text"
                        prop:value=move || form.get().style
                        on:input=move |ev| form.update(|f| f.style = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label>"Buyer"</label>
                    <input
                        type="text"
                        prop:value=move || form.get().buyer
                        on:input=move |ev| form.update(|f| f.buyer = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label>"Order date"</label>
                    <input
                        type="date"
                        prop:value=move || form.get().order_date
                        on:input=move |ev| form.update(|f| f.order_date = event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label>"Shipment date"</label>
                    <input
                        type="date"
                        prop:value=move || form.get().shipment_date
                        on:input=move |ev| form.update(|f| f.shipment_date = event_target_value(&ev))
                    />
                </div>
            </div>

            <Card>
                <div class="section">
                    <div class="section__header">
                        <h4 class="section__title">"Milestones"</h4>
                        <button
                            class="button button--secondary"
                            on:click=move |_| form.update(|f| f.milestones.push(Milestone::new("")))
                        >
                            {icon("plus")}
                            "Add milestone"
                        </button>
                    </div>
                    <table class="table__data cost-table">
                        <thead>
                            <tr>
                                <th>"Milestone"</th>
                                <th>"Planned"</th>
                                <th>"Actual"</th>
                                <th>"Status"</th>
                                <th>"Remarks"</th>
                                <th class="cost-table__actions"></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || form.get().milestones.into_iter().map(|milestone| {
                                let (badge_class, badge_label) = status_badge(&milestone);
                                let id_name = milestone.id.clone();
                                let id_planned = milestone.id.clone();
                                let id_actual = milestone.id.clone();
                                let id_remarks = milestone.id.clone();
                                let id_delete = milestone.id.clone();
                                view! {
                                    <tr>
                                        <td>
                                            <input
                                                type="text"
                                                prop:value=milestone.name.clone()
                                                on:input=move |ev| {
                                                    let value = event_target_value(&ev);
                                                    update_milestone(id_name.clone(), Rc::new(move |m| m.name = value.clone()));
                                                }
                                            />
                                        </td>
                                        <td>
                                            <input
                                                type="date"
                                                prop:value=milestone.planned.clone()
                                                on:input=move |ev| {
                                                    let value = event_target_value(&ev);
                                                    update_milestone(id_planned.clone(), Rc::new(move |m| m.planned = value.clone()));
                                                }
                                            />
                                        </td>
                                        <td>
                                            <input
                                                type="date"
                                                prop:value=milestone.actual.clone().unwrap_or_default()
                                                on:input=move |ev| {
                                                    let value = event_target_value(&ev);
                                                    update_milestone(id_actual.clone(), Rc::new(move |m| {
                                                        m.actual = if value.is_empty() { None } else { Some(value.clone()) };
                                                    }));
                                                }
                                            />
                                        </td>
                                        <td><span class=badge_class>{badge_label}</span></td>
                                        <td>
                                            <input
                                                type="text"
                                                prop:value=milestone.remarks.clone()
                                                on:input=move |ev| {
                                                    let value = event_target_value(&ev);
                                                    update_milestone(id_remarks.clone(), Rc::new(move |m| m.remarks = value.clone()));
                                                }
                                            />
                                        </td>
                                        <td class="cost-table__actions">
                                            <button
                                                class="button button--icon"
                                                title="Delete milestone"
                                                on:click=move |_| form.update(|f| f.milestones.retain(|m| m.id != id_delete))
                                            >
                                                {icon("delete")}
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                </div>
            </Card>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click={
                        let save = save.clone();
                        move |_| save()
                    }
                    disabled=move || !is_form_valid() || saving.get()
                >
                    {icon("save")}
                    {move || if is_edit_mode() { "Save" } else { "Create" }}
                </button>
                <button
                    class="btn btn-secondary"
                    on:click=move |_| (on_cancel)(())
                >
                    {icon("cancel")}
                    "Cancel"
                </button>
            </div>
        </div>
    }
}
