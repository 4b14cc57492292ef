use contracts::domain::a001_cost_sheet::aggregate::CostSheetRecord;
use contracts::domain::a001_cost_sheet::rows::FabricSegment;
use leptos::prelude::*;
use std::sync::Arc;
use thaw::*;

use super::super::SheetMode;
use super::view_model::{CostSheetDetailsViewModel, StyleCheck};
use crate::shared::components::number_format::{format_money, format_price};
use crate::shared::icons::icon;
use crate::shared::print::print_element;
use crate::shared::session::use_session;

/// One cost sheet rendered in create, edit or show mode. All three modes
/// share the same sections and the same computation.
#[component]
#[allow(non_snake_case)]
pub fn CostSheetDetails(
    id: Option<String>,
    mode: SheetMode,
    on_saved: Arc<dyn Fn(CostSheetRecord) + Send + Sync>,
    on_close: Arc<dyn Fn(()) + Send + Sync>,
) -> impl IntoView {
    let vm = CostSheetDetailsViewModel::new(mode);
    vm.load_if_needed(id.clone());
    let session = use_session();

    let print_id = StoredValue::new(format!(
        "cost-sheet-print-{}",
        id.unwrap_or_else(|| "new".to_string())
    ));

    let title = move || match vm.mode.get() {
        SheetMode::Create => "New cost sheet".to_string(),
        _ => {
            let info = vm.style_info.get();
            if info.style.is_empty() {
                "Cost sheet".to_string()
            } else {
                format!("Cost sheet {}", info.style)
            }
        }
    };

    let handle_save = {
        let on_saved = on_saved.clone();
        move || vm.save_command(&session, on_saved.clone())
    };

    view! {
        <div class="details-container cost-sheet-details">
            <div class="details-header">
                <h3>{title}</h3>
                <div class="details-header__actions">
                    <Show when=move || vm.mode.get() == SheetMode::Show>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| vm.enter_edit()
                        >
                            {icon("edit")}
                            " Edit"
                        </Button>
                    </Show>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| {
                            print_element(&print_id.get_value(), "Cost sheet");
                        }
                    >
                        {icon("print")}
                        " Print"
                    </Button>
                    <Show when=move || vm.editable()>
                        {
                            let handle_save = handle_save.clone();
                            view! {
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    on_click=move |_| handle_save()
                                    disabled=Signal::derive(move || !vm.can_save())
                                >
                                    {icon("save")}
                                    {move || if vm.saving.get() { " Saving..." } else { " Save" }}
                                </Button>
                            }
                        }
                    </Show>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click={
                            let on_close = on_close.clone();
                            move |_| (on_close)(())
                        }
                    >
                        {icon("cancel")}
                        " Close"
                    </Button>
                </div>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            {move || {
                if vm.loading.get() {
                    return view! {
                        <Flex gap=FlexGap::Small style="align-items:center;justify-content:center;padding:var(--spacing-4xl);">
                            <Spinner />
                            <span>"Loading..."</span>
                        </Flex>
                    }.into_any();
                }
                view! {
                    <div class="cost-sheet-sections" id=print_id.get_value()>
                        <StyleInfoSection vm=vm />
                        <Show when=move || vm.sections_visible()>
                            <CadSection vm=vm />
                            <FabricSection vm=vm />
                            <TrimsSection vm=vm />
                            <OthersSection vm=vm />
                            <SummarySection vm=vm />
                        </Show>
                    </div>
                }.into_any()
            }}
        </div>
    }
}

// ============================================================================
// Style info
// ============================================================================

#[component]
#[allow(non_snake_case)]
fn StyleTextField(
    vm: CostSheetDetailsViewModel,
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="form-group">
            <label>{label}</label>
            <input
                type="text"
                prop:value=move || value.get()
                disabled=move || !vm.editable()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
#[allow(non_snake_case)]
fn StyleInfoSection(vm: CostSheetDetailsViewModel) -> impl IntoView {
    view! {
        <Card>
            <div class="section">
                <h4 class="section__title">"Style information"</h4>

                <div class="form-grid">
                    <div class="form-group">
                        <label>"Style"</label>
                        <input
                            type="text"
                            prop:value=move || vm.style_info.get().style
                            disabled=move || vm.mode.get() != SheetMode::Create
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                vm.update_style_field(|f| f.style = value);
                                vm.style_check.set(StyleCheck::Unchecked);
                            }
                            on:blur=move |_| vm.run_style_check()
                            placeholder="e.g. ST-1024"
                        />
                    </div>
                    <StyleTextField
                        vm=vm
                        label="Item"
                        value=Signal::derive(move || vm.style_info.get().item)
                        on_input=Callback::new(move |v: String| vm.update_style_field(|f| f.item = v))
                    />
                    <StyleTextField
                        vm=vm
                        label="Group"
                        value=Signal::derive(move || vm.style_info.get().group)
                        on_input=Callback::new(move |v: String| vm.update_style_field(|f| f.group = v))
                    />
                    <StyleTextField
                        vm=vm
                        label="Size"
                        value=Signal::derive(move || vm.style_info.get().size)
                        on_input=Callback::new(move |v: String| vm.update_style_field(|f| f.size = v))
                    />
                    <StyleTextField
                        vm=vm
                        label="Fabric type"
                        value=Signal::derive(move || vm.style_info.get().fabric_type)
                        on_input=Callback::new(move |v: String| vm.update_style_field(|f| f.fabric_type = v))
                    />
                    <StyleTextField
                        vm=vm
                        label="GSM"
                        value=Signal::derive(move || vm.style_info.get().gsm)
                        on_input=Callback::new(move |v: String| vm.update_style_field(|f| f.gsm = v))
                    />
                    <StyleTextField
                        vm=vm
                        label="Color"
                        value=Signal::derive(move || vm.style_info.get().color)
                        on_input=Callback::new(move |v: String| vm.update_style_field(|f| f.color = v))
                    />
                    <StyleTextField
                        vm=vm
                        label="Quantity (pcs)"
                        value=Signal::derive(move || vm.style_info.get().quantity)
                        on_input=Callback::new(move |v: String| vm.update_style_field(|f| f.quantity = v))
                    />
                </div>

                {move || match vm.style_check.get() {
                    StyleCheck::Checking => Some(view! {
                        <div class="info-box">"Checking style..."</div>
                    }.into_any()),
                    StyleCheck::Taken { creator_name } => Some(view! {
                        <div class="warning-box">
                            <span class="warning-box__icon">"⚠"</span>
                            <span class="warning-box__text">
                                {format!("This style is already registered by {}. Open it from the list to view or edit.", creator_name)}
                            </span>
                        </div>
                    }.into_any()),
                    StyleCheck::Available => Some(view! {
                        <div class="info-box info-box--ok">"Style is available"</div>
                    }.into_any()),
                    StyleCheck::Unchecked => None,
                }}
            </div>
        </Card>
    }
}

// ============================================================================
// CAD consumption
// ============================================================================

#[component]
#[allow(non_snake_case)]
fn CadSection(vm: CostSheetDetailsViewModel) -> impl IntoView {
    view! {
        <Card>
            <div class="section">
                <div class="section__header">
                    <h4 class="section__title">"CAD consumption (per dzn)"</h4>
                    <Show when=move || vm.editable()>
                        <button class="button button--secondary" on:click=move |_| vm.cad_add_row()>
                            {icon("plus")}
                            "Add row"
                        </button>
                    </Show>
                </div>

                <table class="table__data cost-table">
                    <thead>
                        <tr>
                            <th>"Part"</th>
                            <th class="cost-table__num">"Weight (kg)"</th>
                            <th class="cost-table__num">"Wastage %"</th>
                            <th class="cost-table__num">"Value"</th>
                            <th class="cost-table__actions"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let editable = vm.editable();
                            vm.cad.get().rows.into_iter().map(|row| {
                                let id_name = row.id.clone();
                                let id_weight = row.id.clone();
                                let id_percent = row.id.clone();
                                let id_delete = row.id.clone();
                                view! {
                                    <tr>
                                        <td>
                                            <input
                                                type="text"
                                                prop:value=row.field_name.clone()
                                                disabled=!editable
                                                on:input=move |ev| vm.cad_update_field(&id_name, "fieldName", &event_target_value(&ev))
                                            />
                                        </td>
                                        <td class="cost-table__num">
                                            <input
                                                type="text"
                                                inputmode="decimal"
                                                prop:value=row.weight.clone()
                                                disabled=!editable
                                                on:input=move |ev| vm.cad_update_field(&id_weight, "weight", &event_target_value(&ev))
                                            />
                                        </td>
                                        <td class="cost-table__num">
                                            <input
                                                type="text"
                                                inputmode="decimal"
                                                prop:value=row.percent.clone()
                                                disabled=!editable
                                                on:input=move |ev| vm.cad_update_field(&id_percent, "percent", &event_target_value(&ev))
                                            />
                                        </td>
                                        <td class="cost-table__num cost-table__value">{format_money(row.value)}</td>
                                        <td class="cost-table__actions">
                                            <Show when=move || vm.editable()>
                                                {
                                                    let id_delete = id_delete.clone();
                                                    view! {
                                                        <button
                                                            class="button button--icon"
                                                            title="Delete row"
                                                            on:click=move |_| vm.cad_delete_row(&id_delete)
                                                        >
                                                            {icon("delete")}
                                                        </button>
                                                    }
                                                }
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()
                        }}
                    </tbody>
                    <tfoot>
                        <tr class="cost-table__totals">
                            <td>"Total"</td>
                            <td class="cost-table__num">{move || format_money(vm.cad.get().total_weight())}</td>
                            <td></td>
                            <td class="cost-table__num">{move || format_money(vm.cad.get().subtotal())}</td>
                            <td></td>
                        </tr>
                    </tfoot>
                </table>
            </div>
        </Card>
    }
}

// ============================================================================
// Fabric cost
// ============================================================================

#[component]
#[allow(non_snake_case)]
fn FabricSection(vm: CostSheetDetailsViewModel) -> impl IntoView {
    let segments = [
        (FabricSegment::Yarn, "Yarn"),
        (FabricSegment::Knitting, "Knitting"),
        (FabricSegment::Dyeing, "Dyeing"),
        (FabricSegment::PrintEmb, "Print / Embroidery"),
    ];

    view! {
        <Card>
            <div class="section">
                <h4 class="section__title">"Fabric cost (per dzn)"</h4>

                {segments.into_iter().map(|(segment, label)| view! {
                    <div class="fabric-segment">
                        <div class="section__header">
                            <h5 class="fabric-segment__title">{label}</h5>
                            <Show when=move || vm.editable()>
                                <button
                                    class="button button--secondary"
                                    on:click=move |_| vm.fabric_add_row(segment)
                                >
                                    {icon("plus")}
                                    "Add row"
                                </button>
                            </Show>
                        </div>
                        <table class="table__data cost-table">
                            <thead>
                                <tr>
                                    <th>"Description"</th>
                                    <th class="cost-table__num">"Qty"</th>
                                    <th class="cost-table__num">"Rate"</th>
                                    <th class="cost-table__num">"Value"</th>
                                    <th class="cost-table__actions"></th>
                                </tr>
                            </thead>
                            <tbody>
                                {move || {
                                    let editable = vm.editable();
                                    vm.fabric.get().rows.into_iter()
                                        .filter(|r| r.segment == segment)
                                        .map(|row| {
                                            let id_desc = row.id.clone();
                                            let id_unit = row.id.clone();
                                            let id_rate = row.id.clone();
                                            let id_delete = row.id.clone();
                                            view! {
                                                <tr>
                                                    <td>
                                                        <input
                                                            type="text"
                                                            prop:value=row.description.clone()
                                                            disabled=!editable
                                                            on:input=move |ev| vm.fabric_update_field(&id_desc, "description", &event_target_value(&ev))
                                                        />
                                                    </td>
                                                    <td class="cost-table__num">
                                                        <input
                                                            type="text"
                                                            inputmode="decimal"
                                                            prop:value=row.unit.clone()
                                                            disabled=!editable
                                                            on:input=move |ev| vm.fabric_update_field(&id_unit, "unit", &event_target_value(&ev))
                                                        />
                                                    </td>
                                                    <td class="cost-table__num">
                                                        <input
                                                            type="text"
                                                            inputmode="decimal"
                                                            prop:value=row.rate.clone()
                                                            disabled=!editable
                                                            on:input=move |ev| vm.fabric_update_field(&id_rate, "rate", &event_target_value(&ev))
                                                        />
                                                    </td>
                                                    <td class="cost-table__num cost-table__value">{format_money(row.value)}</td>
                                                    <td class="cost-table__actions">
                                                        <Show when=move || vm.editable()>
                                                            {
                                                                let id_delete = id_delete.clone();
                                                                view! {
                                                                    <button
                                                                        class="button button--icon"
                                                                        title="Delete row"
                                                                        on:click=move |_| vm.fabric_delete_row(&id_delete)
                                                                    >
                                                                        {icon("delete")}
                                                                    </button>
                                                                }
                                                            }
                                                        </Show>
                                                    </td>
                                                </tr>
                                            }
                                        }).collect_view()
                                }}
                            </tbody>
                            <tfoot>
                                <tr class="cost-table__totals">
                                    <td>{format!("{} total", label)}</td>
                                    <td></td>
                                    <td></td>
                                    <td class="cost-table__num">
                                        {move || format_money(vm.fabric.get().segment_total(segment))}
                                    </td>
                                    <td></td>
                                </tr>
                            </tfoot>
                        </table>
                    </div>
                }).collect_view()}

                <div class="section__grand-total">
                    <span>"Total fabric cost"</span>
                    // print/emb is shown above but does not participate here
                    <strong>{move || format_money(vm.fabric.get().total_fabric_cost())}</strong>
                </div>
            </div>
        </Card>
    }
}

// ============================================================================
// Trims & accessories
// ============================================================================

#[component]
#[allow(non_snake_case)]
fn TrimsSection(vm: CostSheetDetailsViewModel) -> impl IntoView {
    view! {
        <Card>
            <div class="section">
                <div class="section__header">
                    <h4 class="section__title">"Trims & accessories (per dzn)"</h4>
                    <Show when=move || vm.editable()>
                        <button class="button button--secondary" on:click=move |_| vm.trims_add_row()>
                            {icon("plus")}
                            "Add row"
                        </button>
                    </Show>
                </div>

                <table class="table__data cost-table">
                    <thead>
                        <tr>
                            <th>"Description"</th>
                            <th class="cost-table__num">"Cost"</th>
                            <th class="cost-table__num">"Value"</th>
                            <th class="cost-table__actions"></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let editable = vm.editable();
                            vm.trims.get().rows.into_iter().map(|row| {
                                let id_desc = row.id.clone();
                                let id_cost = row.id.clone();
                                let id_delete = row.id.clone();
                                view! {
                                    <tr>
                                        <td>
                                            <input
                                                type="text"
                                                prop:value=row.description.clone()
                                                disabled=!editable
                                                on:input=move |ev| vm.trims_update_field(&id_desc, "description", &event_target_value(&ev))
                                            />
                                        </td>
                                        <td class="cost-table__num">
                                            <input
                                                type="text"
                                                inputmode="decimal"
                                                prop:value=row.cost.clone()
                                                disabled=!editable
                                                on:input=move |ev| vm.trims_update_field(&id_cost, "cost", &event_target_value(&ev))
                                            />
                                        </td>
                                        <td class="cost-table__num cost-table__value">{format_money(row.value)}</td>
                                        <td class="cost-table__actions">
                                            <Show when=move || vm.editable()>
                                                {
                                                    let id_delete = id_delete.clone();
                                                    view! {
                                                        <button
                                                            class="button button--icon"
                                                            title="Delete row"
                                                            on:click=move |_| vm.trims_delete_row(&id_delete)
                                                        >
                                                            {icon("delete")}
                                                        </button>
                                                    }
                                                }
                                            </Show>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()
                        }}
                    </tbody>
                    <tfoot>
                        <tr class="cost-table__totals">
                            <td>"Subtotal"</td>
                            <td></td>
                            <td class="cost-table__num">{move || format_money(vm.trims.get().subtotal())}</td>
                            <td></td>
                        </tr>
                        <tr>
                            <td>
                                "Adjustment %"
                                <input
                                    type="text"
                                    inputmode="decimal"
                                    class="cost-table__percent-input"
                                    prop:value=move || vm.trims.get().adjustment_percent
                                    disabled=move || !vm.editable()
                                    on:input=move |ev| vm.trims_update_adjustment(&event_target_value(&ev))
                                />
                            </td>
                            <td></td>
                            <td class="cost-table__num">{move || format_money(vm.trims.get().adjustment())}</td>
                            <td></td>
                        </tr>
                        <tr class="cost-table__totals">
                            <td>"Total accessories cost"</td>
                            <td></td>
                            <td class="cost-table__num">{move || format_money(vm.trims.get().total())}</td>
                            <td></td>
                        </tr>
                    </tfoot>
                </table>
            </div>
        </Card>
    }
}

// ============================================================================
// Others
// ============================================================================

#[component]
#[allow(non_snake_case)]
fn OthersSection(vm: CostSheetDetailsViewModel) -> impl IntoView {
    view! {
        <Card>
            <div class="section">
                <div class="section__header">
                    <h4 class="section__title">"Others (per dzn)"</h4>
                    <Show when=move || vm.editable()>
                        <button class="button button--secondary" on:click=move |_| vm.others_add_row()>
                            {icon("plus")}
                            "Add row"
                        </button>
                    </Show>
                </div>

                {move || {
                    if vm.others.get().is_empty() {
                        return view! {
                            <div class="empty-state">"No other charges. Use \"Add row\" to add one."</div>
                        }.into_any();
                    }
                    let editable = vm.editable();
                    view! {
                        <table class="table__data cost-table">
                            <thead>
                                <tr>
                                    <th>"Description"</th>
                                    <th class="cost-table__num">"Cost"</th>
                                    <th class="cost-table__num">"Value"</th>
                                    <th class="cost-table__actions"></th>
                                </tr>
                            </thead>
                            <tbody>
                                {vm.others.get().rows.into_iter().map(|row| {
                                    let id_desc = row.id.clone();
                                    let id_cost = row.id.clone();
                                    let id_delete = row.id.clone();
                                    view! {
                                        <tr>
                                            <td>
                                                <input
                                                    type="text"
                                                    prop:value=row.description.clone()
                                                    disabled=!editable
                                                    on:input=move |ev| vm.others_update_field(&id_desc, "description", &event_target_value(&ev))
                                                />
                                            </td>
                                            <td class="cost-table__num">
                                                <input
                                                    type="text"
                                                    inputmode="decimal"
                                                    prop:value=row.cost.clone()
                                                    disabled=!editable
                                                    on:input=move |ev| vm.others_update_field(&id_cost, "cost", &event_target_value(&ev))
                                                />
                                            </td>
                                            <td class="cost-table__num cost-table__value">{format_money(row.value)}</td>
                                            <td class="cost-table__actions">
                                                <Show when=move || vm.editable()>
                                                    {
                                                        let id_delete = id_delete.clone();
                                                        view! {
                                                            <button
                                                                class="button button--icon"
                                                                title="Delete row"
                                                                on:click=move |_| vm.others_delete_row(&id_delete)
                                                            >
                                                                {icon("delete")}
                                                            </button>
                                                        }
                                                    }
                                                </Show>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()}
                            </tbody>
                            <tfoot>
                                <tr class="cost-table__totals">
                                    <td>"Subtotal"</td>
                                    <td></td>
                                    <td class="cost-table__num">{move || format_money(vm.others.get().subtotal())}</td>
                                    <td></td>
                                </tr>
                            </tfoot>
                        </table>
                    }.into_any()
                }}
            </div>
        </Card>
    }
}

// ============================================================================
// Summary
// ============================================================================

#[component]
#[allow(non_snake_case)]
fn SummarySection(vm: CostSheetDetailsViewModel) -> impl IntoView {
    let scalar_input = move |label: &'static str, signal: RwSignal<String>| {
        view! {
            <tr>
                <td>{label}</td>
                <td class="cost-table__num">
                    <input
                        type="text"
                        inputmode="decimal"
                        prop:value=move || signal.get()
                        disabled=move || !vm.editable()
                        on:input=move |ev| vm.update_scalar(signal, &event_target_value(&ev))
                    />
                </td>
            </tr>
        }
    };

    view! {
        <Card>
            <div class="section">
                <h4 class="section__title">"Summary (per dzn)"</h4>

                <table class="table__data cost-table summary-table">
                    <tbody>
                        <tr>
                            <td>"Total fabric cost"</td>
                            <td class="cost-table__num">{move || format_money(vm.chain().fabric_cost)}</td>
                        </tr>
                        <tr>
                            <td>"Total accessories cost"</td>
                            <td class="cost-table__num">{move || format_money(vm.chain().accessories_cost)}</td>
                        </tr>
                        {scalar_input("Factory CM", vm.factory_cm)}
                        <tr>
                            <td>"Others"</td>
                            <td class="cost-table__num">{move || format_money(vm.chain().others_total)}</td>
                        </tr>
                        <tr class="cost-table__totals">
                            <td>"Total cost"</td>
                            <td class="cost-table__num">{move || format_money(vm.chain().total_cost)}</td>
                        </tr>
                        {scalar_input("Commercial %", vm.commercial_percent)}
                        <tr>
                            <td>"Commercial cost"</td>
                            <td class="cost-table__num">{move || format_money(vm.chain().commercial_cost)}</td>
                        </tr>
                        <tr class="cost-table__totals">
                            <td>"Total cost incl. commercial"</td>
                            <td class="cost-table__num">{move || format_money(vm.chain().total_cost_with_commercial)}</td>
                        </tr>
                        {scalar_input("Profit %", vm.profit_percent)}
                        <tr>
                            <td>"Profit"</td>
                            <td class="cost-table__num">{move || format_money(vm.chain().profit_cost)}</td>
                        </tr>
                        <tr class="cost-table__totals cost-table__totals--fob">
                            <td>"FOB price / dzn"</td>
                            <td class="cost-table__num">{move || format_money(vm.chain().fob_price)}</td>
                        </tr>
                        <tr class="cost-table__totals cost-table__totals--fob">
                            <td>"Price / pc"</td>
                            <td class="cost-table__num">{move || format_price(vm.chain().price_per_piece)}</td>
                        </tr>
                    </tbody>
                </table>
            </div>
        </Card>
    }
}
