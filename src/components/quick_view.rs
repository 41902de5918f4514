use crate::model::Product;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct QuickViewProps {
    pub product: Option<Product>,
    pub on_close: Callback<()>,
}

#[function_component(QuickView)]
pub fn quick_view(props: &QuickViewProps) -> Html {
    let Some(p) = &props.product else {
        return html! {};
    };
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div id="quick-view" style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:40;">
            <div id="quick-view-content" style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; max-width:420px; display:flex; flex-direction:column; gap:8px;">
                <img src={p.card_image()} alt={p.display_name().to_string()} style="width:100%; border-radius:6px;" />
                <h3 style="margin:0;">{ p.display_name() }</h3>
                <p style="margin:0;">{ p.display_description() }</p>
                <p style="margin:0; font-weight:600;">{ p.price_label() }</p>
                <button id="close-quick-view" onclick={close_cb}>{"Close"}</button>
            </div>
        </div>
    }
}
