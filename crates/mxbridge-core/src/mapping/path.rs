//! Dotted-path access over JSON value trees
//!
//! Mapping tables address source and target locations with dotted paths
//! ("fi_to_fi_cstmr_cdt_trf.grp_hdr.msg_id"). Numeric segments index into
//! arrays ("pmt_inf.0.reqd_exctn_dt").

use serde_json::{Map, Value};

/// Reads the value at a dotted path. Returns `None` when any segment is
/// missing or the shape along the way does not match.
pub fn get_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => {
                let idx: usize = segment.parse().ok()?;
                items.get(idx)?
            }
            _ => return None,
        };
    }
    Some(current)
}

/// Writes a value at a dotted path, creating intermediate objects as needed.
/// Numeric segments only traverse existing arrays; this function never
/// fabricates array elements.
pub fn set_path(target: &mut Value, path: &str, new_value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let mut current = target;
    for (i, segment) in segments.iter().enumerate() {
        let last = i == segments.len() - 1;
        if last {
            match current {
                Value::Object(map) => {
                    map.insert((*segment).to_string(), new_value);
                }
                Value::Array(items) => {
                    if let Ok(idx) = segment.parse::<usize>() {
                        if idx < items.len() {
                            items[idx] = new_value;
                        }
                    }
                }
                _ => {}
            }
            return;
        }
        current = match current {
            Value::Object(map) => map
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Object(Map::new())),
            Value::Array(items) => match segment.parse::<usize>() {
                Ok(idx) if idx < items.len() => &mut items[idx],
                _ => return,
            },
            _ => return,
        };
    }
}
