//! Deep merge of extracted branches.

use serde_json::Value;

use crate::Object;

/// Merges `source` into `target`.
///
/// Objects at the same key merge key by key and arrays at the same key are
/// concatenated. Any other collision is won by the value from `source`.
/// Nested objects are merged from a worklist, so overlap depth does not
/// grow the call stack.
pub(crate) fn merge_into(target: &mut Object, source: Object) {
    let mut pending = vec![(target, source)];

    while let Some((target, source)) = pending.pop() {
        let mut overlapping = Object::new();
        for (key, incoming) in source {
            if target.contains_key(&key) {
                overlapping.insert(key, incoming);
            } else {
                target.insert(key, incoming);
            }
        }
        if overlapping.is_empty() {
            continue;
        }

        for (key, existing) in target.iter_mut() {
            let Some(incoming) = overlapping.remove(key) else {
                continue;
            };
            match incoming {
                Value::Object(incoming) => match existing {
                    Value::Object(existing) => pending.push((existing, incoming)),
                    other => *other = Value::Object(incoming),
                },
                Value::Array(incoming) => match existing {
                    Value::Array(existing) => existing.extend(incoming),
                    other => *other = Value::Array(incoming),
                },
                incoming => *existing = incoming,
            }
        }
    }
}
