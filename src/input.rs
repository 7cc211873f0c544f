use parallax_core::settings::query_pairs;
use parallax_core::{Command, CursorSignal, HeadPoseScale, SettingsEdit};

/// Commands for a `name=value&...` settings string from the JS bridge.
/// Unknown names and unparsable values are reported together.
pub fn commands_from_query(query: &str) -> Result<Vec<Command>, String> {
    let mut out = Vec::new();
    let mut rejected = Vec::new();
    for (k, v) in query_pairs(query) {
        match SettingsEdit::from_pair(k, &v) {
            Some(Ok(edit)) => out.push(Command::Edit(edit)),
            Some(Err(e)) => rejected.push(e.to_string()),
            None => rejected.push(format!("unknown setting '{}'", k)),
        }
    }
    if rejected.is_empty() {
        Ok(out)
    } else {
        Err(rejected.join("; "))
    }
}

/// Pointer position relative to an element, clamped to [0,1]. A collapsed
/// element reads as centered.
#[inline]
pub fn client_to_uv(client: [f32; 2], rect_origin: [f32; 2], rect_size: [f32; 2]) -> [f32; 2] {
    let [w, h] = rect_size;
    if w > 0.0 && h > 0.0 {
        let u = ((client[0] - rect_origin[0]) / w).clamp(0.0, 1.0);
        let v = ((client[1] - rect_origin[1]) / h).clamp(0.0, 1.0);
        [u, v]
    } else {
        [0.5, 0.5]
    }
}

/// Cursor signal for a pointer sample in element uv space.
#[inline]
pub fn pointer_sample(uv: [f32; 2]) -> CursorSignal {
    parallax_core::pointer_signal(uv, &HeadPoseScale::default())
}
