use crate::state::{LabConfig, ScaleMode, StickyTracking};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LabSettingsProps {
    pub show: bool,
    pub config: LabConfig,
    pub on_change: Callback<LabConfig>,
    pub on_reset_board: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn LabSettings(props: &LabSettingsProps) -> Html {
    if !props.show {
        return html! {};
    }

    // Emit a copy of the config with one field changed
    let edit = |f: fn(&mut LabConfig)| {
        let cfg = props.config.clone();
        let cb = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = cfg.clone();
            f(&mut next);
            cb.emit(next);
        })
    };
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_board_cb = {
        let cb = props.on_reset_board.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let defaults_cb = {
        let cb = props.on_change.clone();
        Callback::from(move |_| cb.emit(LabConfig::default()))
    };

    let cfg = &props.config;
    let tracking_btn = |label: &'static str, tracking: StickyTracking, f: fn(&mut LabConfig)| {
        let active = cfg.sticky_tracking == tracking;
        let style = if active {
            "flex:1; background:#1f6feb; color:#fff;"
        } else {
            "flex:1;"
        };
        html! { <button style={style} onclick={edit(f)}>{ label }</button> }
    };

    html! {<div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:340px; max-width:480px; display:flex; flex-direction:column; gap:14px; color:#c9d1d9;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Lab Settings"}</h3>
                <button onclick={close_cb.clone()} style="padding:4px 8px;">{"Close"}</button>
            </div>
            <div style="display:flex; flex-direction:column; gap:6px;">
                <span>{"Sticky box follows the pointer by"}</span>
                <div style="display:flex; gap:6px;">
                    { tracking_btn("Press offset", StickyTracking::Offset, |c| c.sticky_tracking = StickyTracking::Offset) }
                    { tracking_btn("Top-left", StickyTracking::TopLeft, |c| c.sticky_tracking = StickyTracking::TopLeft) }
                    { tracking_btn("Center", StickyTracking::Center, |c| c.sticky_tracking = StickyTracking::Center) }
                </div>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px;">
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={cfg.scale_mode == ScaleMode::PreserveAspect}
                        onclick={edit(|c| c.scale_mode = match c.scale_mode {
                            ScaleMode::Independent => ScaleMode::PreserveAspect,
                            ScaleMode::PreserveAspect => ScaleMode::Independent,
                        })} />
                    <span>{"Keep aspect ratio while pinching"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={cfg.two_finger_scale} onclick={edit(|c| c.two_finger_scale = !c.two_finger_scale)} />
                    <span>{"Two-finger scale (off: a second finger cancels the drag)"}</span>
                </label>
                <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
                    <input type="checkbox" checked={cfg.wheel_resize} onclick={edit(|c| c.wheel_resize = !c.wheel_resize)} />
                    <span>{"Mouse wheel resizes the box under the cursor"}</span>
                </label>
            </div>
            <div style="font-size:11px; opacity:0.7;">
                { format!("Sizes stay within {}-{}px. Double activation window {}ms.", cfg.min_size, cfg.max_size, cfg.double_activation_ms) }
            </div>
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                <button onclick={reset_board_cb} style="flex:1;">{"Reset Boxes"}</button>
                <button onclick={defaults_cb} style="flex:1;">{"Restore Defaults"}</button>
                <button onclick={close_cb} style="flex:0 0 auto;">{"Done"}</button>
            </div>
        </div>
    </div>}
}
