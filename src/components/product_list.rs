use super::quick_view::QuickView;
use crate::catalog::Catalog;
use crate::model::Product;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ProductCardProps {
    pub product: Product,
    pub on_quick_view: Callback<Product>,
    pub on_see_page: Callback<Product>,
}

#[function_component(ProductCard)]
pub fn product_card(props: &ProductCardProps) -> Html {
    let p = &props.product;
    let quick_cb = {
        let cb = props.on_quick_view.clone();
        let p = p.clone();
        Callback::from(move |_| cb.emit(p.clone()))
    };
    let page_cb = {
        let cb = props.on_see_page.clone();
        let p = p.clone();
        Callback::from(move |_| cb.emit(p.clone()))
    };
    html! {
        <div class="product-card" style="background:#161b22; border:1px solid #30363d; border-radius:8px; padding:12px; width:220px; display:flex; flex-direction:column; gap:6px;">
            <img src={p.card_image()} alt={p.display_name().to_string()} style="width:100%; border-radius:6px;" />
            <h3 style="margin:4px 0 0 0;">{ p.display_name() }</h3>
            <p style="margin:0; opacity:0.85;">{ p.display_description() }</p>
            <p style="margin:0; font-weight:600;">{ p.price_label() }</p>
            <div style="display:flex; gap:6px;">
                <button onclick={quick_cb}>{"Quick View"}</button>
                <button onclick={page_cb}>{"See Page"}</button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct ProductListProps {
    pub catalog: Rc<Catalog>,
    pub on_see_page: Callback<Product>,
}

#[function_component(ProductList)]
pub fn product_list(props: &ProductListProps) -> Html {
    // id of the product shown in the quick view
    let quick_view = use_state(|| None::<String>);

    let open_quick = {
        let quick_view = quick_view.clone();
        Callback::from(move |p: Product| quick_view.set(Some(p.id)))
    };
    let close_quick = {
        let quick_view = quick_view.clone();
        Callback::from(move |_| quick_view.set(None))
    };

    let cards = props
        .catalog
        .products
        .iter()
        .map(|p| {
            html! { <ProductCard key={p.id.clone()} product={p.clone()}
                on_quick_view={open_quick.clone()} on_see_page={props.on_see_page.clone()} /> }
        })
        .collect::<Html>();

    let quick_product = quick_view
        .as_deref()
        .and_then(|id| props.catalog.get(id))
        .cloned();

    html! {
        <div style="padding:16px;">
            <h2>{"T-Shirts"}</h2>
            if props.catalog.products.is_empty() {
                <p style="opacity:0.7;">{"No products available."}</p>
            }
            <div id="products" style="display:flex; flex-wrap:wrap; gap:12px;">{ cards }</div>
            <QuickView product={quick_product} on_close={close_quick} />
        </div>
    }
}
