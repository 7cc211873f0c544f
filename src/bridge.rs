//! Functions exported to the host page's JavaScript glue.
//!
//! The face tracker runs in JS; it reads its options from
//! `tracker_options()` and forwards every head pose to `push_head_pose`.
//! Everything funnels into the same single-threaded cells the frame loop
//! polls.

use crate::input;
use parallax_core::{Command, HeadPoseScale, Inbox, LatestCursor, TrackerConfig};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

struct Bridge {
    head: Option<LatestCursor>,
    commands: Inbox<Command>,
    tracker_config: TrackerConfig,
}

thread_local! {
    static BRIDGE: RefCell<Option<Bridge>> = const { RefCell::new(None) };
}

pub fn install(head: Option<LatestCursor>, commands: Inbox<Command>, tracker_config: TrackerConfig) {
    BRIDGE.with(|b| {
        *b.borrow_mut() = Some(Bridge {
            head,
            commands,
            tracker_config,
        })
    });
}

fn with_bridge<R>(f: impl FnOnce(&Bridge) -> R) -> Option<R> {
    BRIDGE.with(|b| b.borrow().as_ref().map(f))
}

/// Raw head pose from the face tracker. With the default `auto` source the
/// first pose switches the viewer from pointer to head tracking; `pointer`,
/// `synthetic` and `none` ignore it.
#[wasm_bindgen]
pub fn push_head_pose(x: f32, y: f32, z: f32) {
    with_bridge(|b| {
        if let Some(head) = &b.head {
            head.publish(HeadPoseScale::default().apply(x, y, z));
        }
    });
}

#[wasm_bindgen]
pub fn tracker_options() -> Result<js_sys::Object, JsValue> {
    let cfg = with_bridge(|b| b.tracker_config).unwrap_or_default();
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"smoothDist".into(), &cfg.smooth_dist.into())?;
    js_sys::Reflect::set(&obj, &"defaultDist".into(), &cfg.default_dist.into())?;
    js_sys::Reflect::set(&obj, &"threshold".into(), &cfg.threshold.into())?;
    Ok(obj)
}

/// Commit settings given as `name=value&...` (`x_threshold`, `y_threshold`,
/// `strength`, `image`). Nothing is applied if any pair is rejected.
#[wasm_bindgen]
pub fn set_settings(query: &str) -> Result<(), JsValue> {
    let commands = input::commands_from_query(query).map_err(|e| JsValue::from_str(&e))?;
    with_bridge(|b| {
        for cmd in commands {
            b.commands.push(cmd);
        }
    })
    .ok_or_else(|| JsValue::from_str("viewer not started"))
}

#[wasm_bindgen]
pub fn next_image() {
    with_bridge(|b| b.commands.push(Command::NextImage));
}
