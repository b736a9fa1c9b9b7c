// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! JSON merge patch computation (RFC 7386)

use serde_json::{Map, Value};

/// Compute the merge patch that turns `old` into `new`.
///
/// Returns `None` when both documents are equal. Objects are diffed key by
/// key, keys missing from `new` become `null`, and any other change
/// (scalars, arrays, type changes) replaces the old value wholesale.
pub fn merge_patch(old: &Value, new: &Value) -> Option<Value> {
    if old == new {
        return None;
    }

    match (old, new) {
        (Value::Object(old_map), Value::Object(new_map)) => {
            let mut patch = Map::new();

            for (key, new_value) in new_map {
                match old_map.get(key) {
                    Some(old_value) => {
                        if let Some(change) = merge_patch(old_value, new_value) {
                            patch.insert(key.clone(), change);
                        }
                    }
                    None => {
                        patch.insert(key.clone(), new_value.clone());
                    }
                }
            }

            for key in old_map.keys() {
                if !new_map.contains_key(key) {
                    patch.insert(key.clone(), Value::Null);
                }
            }

            Some(Value::Object(patch))
        }
        _ => Some(new.clone()),
    }
}
