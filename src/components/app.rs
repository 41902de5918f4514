use super::{lab_view::LabView, product_details::ProductDetails, product_list::ProductList};
use crate::catalog::{Catalog, store_selected};
use crate::model::Product;
use crate::util::clog;
use std::rc::Rc;
use yew::prelude::*;

#[derive(PartialEq, Clone, Copy)]
enum View {
    Shirts,
    Details,
    Lab,
}

#[function_component(App)]
pub fn app() -> Html {
    let view = use_state(|| View::Shirts);
    let catalog = use_memo((), |_| Catalog::builtin());

    let goto = |target: View| {
        let view = view.clone();
        Callback::from(move |_: MouseEvent| view.set(target))
    };
    let to_list = {
        let view = view.clone();
        Callback::from(move |_| view.set(View::Shirts))
    };
    // "See Page": hand the product over through storage, then open the details page
    let see_page = {
        let view = view.clone();
        Callback::from(move |p: Product| {
            if let Err(e) = store_selected(&p) {
                clog(&format!("handoff failed: {}", e));
            }
            view.set(View::Details);
        })
    };

    let content = match *view {
        View::Shirts => html! { <ProductList catalog={Rc::clone(&catalog)} on_see_page={see_page} /> },
        View::Details => html! { <ProductDetails {to_list} /> },
        View::Lab => html! { <LabView /> },
    };
    let nav_style = |target: View| {
        if *view == target {
            "background:#1f6feb; color:#fff;"
        } else {
            ""
        }
    };

    html! {
        <div style="min-height:100vh; background:#0d1117; color:#c9d1d9; font-family:sans-serif;">
            <nav style="position:relative; z-index:60; display:flex; gap:6px; padding:8px 12px; border-bottom:1px solid #30363d; background:#161b22;">
                <button style={nav_style(View::Shirts)} onclick={goto(View::Shirts)}>{"Shirts"}</button>
                <button style={nav_style(View::Details)} onclick={goto(View::Details)}>{"Details"}</button>
                <button style={nav_style(View::Lab)} onclick={goto(View::Lab)}>{"Drag Lab"}</button>
            </nav>
            { content }
        </div>
    }
}
