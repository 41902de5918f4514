use crate::catalog::load_selected;
use crate::model::{DetailsAction, DetailsState, Product, Side};
use crate::util::{capitalize, clog};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ProductDetailsProps {
    pub to_list: Callback<()>,
}

/// Details page: reads the product the listing handed over through storage.
#[function_component(ProductDetails)]
pub fn product_details(props: &ProductDetailsProps) -> Html {
    let selected = use_state(|| match load_selected() {
        Ok(p) => Some(p),
        Err(e) => {
            clog(&format!("details: {}", e));
            None
        }
    });
    let back_cb = {
        let cb = props.to_list.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let body = match &*selected {
        Some(p) => html! { <DetailsPanel product={p.clone()} /> },
        None => html! { <p style="opacity:0.7;">{"No product selected."}</p> },
    };
    html! {
        <div style="padding:16px; display:flex; flex-direction:column; gap:12px;">
            <div><button onclick={back_cb}>{"Back to Shirts"}</button></div>
            { body }
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
struct DetailsPanelProps {
    product: Product,
}

#[function_component(DetailsPanel)]
fn details_panel(props: &DetailsPanelProps) -> Html {
    let product = props.product.clone();
    let state = use_reducer(move || DetailsState::new(product));
    let side_cb = |side: Side| {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| state.dispatch(DetailsAction::SelectSide(side)))
    };
    let color_buttons = state
        .product
        .colors
        .iter()
        .map(|c| {
            let name = c.name.clone();
            let onclick = {
                let state = state.clone();
                let name = name.clone();
                Callback::from(move |_: MouseEvent| {
                    state.dispatch(DetailsAction::SelectColor(name.clone()))
                })
            };
            let selected = state.color.as_deref() == Some(name.as_str());
            let border = if selected { "2px solid #1f6feb" } else { "1px solid black" };
            html! {
                <button key={name.clone()} class="color-button" {onclick}
                    style={format!("border:{}; color:black; background-color:{};", border, name)}>
                    { capitalize(&name) }
                </button>
            }
        })
        .collect::<Html>();

    html! {
        <div style="display:flex; gap:24px; flex-wrap:wrap;">
            <div id="shirt-image" style="width:360px;">
                <img src={state.image_src()} alt={state.image_alt()} style="width:100%;" />
            </div>
            <div style="display:flex; flex-direction:column; gap:8px; max-width:420px;">
                <h2 id="shirt-name" style="margin:0;">{ state.product.display_name() }</h2>
                <p id="shirt-price" style="margin:0; font-weight:600;">{ state.product.price_label() }</p>
                <p id="shirt-description" style="margin:0;">{ state.product.display_description() }</p>
                <div style="display:flex; gap:6px;">
                    <button id="front-side" onclick={side_cb(Side::Front)}>{"Front"}</button>
                    <button id="back-side" onclick={side_cb(Side::Back)}>{"Back"}</button>
                </div>
                <div id="color-options" style="display:flex; gap:6px; flex-wrap:wrap;">{ color_buttons }</div>
            </div>
        </div>
    }
}
