//! Comparison policy - language-agnostic verdict logic
//!
//! Pure function over JSON values: knows nothing about processes, drivers,
//! or HTTP. Exact equality first; for two sequences, an order-insensitive
//! fallback handles exercises with multiple valid orderings of the same
//! answer (e.g. "return the two indices" in either order).
use serde_json::Value;
use std::cmp::Ordering;

/// Decide whether a produced value matches an expected value.
pub fn outputs_match(output: &Value, expected: &Value) -> bool {
    if let (Value::Array(got), Value::Array(want)) = (output, expected) {
        if sequences_equal(got, want) {
            return true;
        }
        match (try_sorted(got), try_sorted(want)) {
            (Some(got_sorted), Some(want_sorted)) => sequences_equal(&got_sorted, &want_sorted),
            // elements not mutually orderable: positional equality already failed
            _ => false,
        }
    } else {
        values_equal(output, expected)
    }
}

/// Value equality with numbers compared numerically, so 5 == 5.0 as it
/// would under the comparison the driver runs in-process.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => a == b,
        },
        (Value::Array(x), Value::Array(y)) => sequences_equal(x, y),
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(key, value)| {
                    y.get(key).map_or(false, |other| values_equal(value, other))
                })
        }
        _ => a == b,
    }
}

fn sequences_equal(a: &[Value], b: &[Value]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
}

/// Sort a copy of the sequence, or None when any compared pair has no
/// defined order (mixed kinds, objects, nulls).
fn try_sorted(items: &[Value]) -> Option<Vec<Value>> {
    let mut orderable = true;
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        compare_values(a, b).unwrap_or_else(|| {
            orderable = false;
            Ordering::Equal
        })
    });
    orderable.then_some(sorted)
}

fn compare_values(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        (Value::Array(x), Value::Array(y)) => {
            for (left, right) in x.iter().zip(y) {
                match compare_values(left, right)? {
                    Ordering::Equal => continue,
                    other => return Some(other),
                }
            }
            Some(x.len().cmp(&y.len()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exact_equality() {
        assert!(outputs_match(&json!(5), &json!(5)));
        assert!(outputs_match(&json!("abc"), &json!("abc")));
        assert!(outputs_match(&json!(true), &json!(true)));
        assert!(outputs_match(&json!(null), &json!(null)));
        assert!(!outputs_match(&json!(5), &json!(6)));
        assert!(!outputs_match(&json!("abc"), &json!("abd")));
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert!(outputs_match(&json!(5), &json!(5.0)));
        assert!(outputs_match(&json!(-1.5), &json!(-1.5)));
        assert!(!outputs_match(&json!(5), &json!(5.1)));
    }

    #[test]
    fn test_positional_sequence_equality() {
        assert!(outputs_match(&json!([1, 2, 3]), &json!([1, 2, 3])));
        assert!(!outputs_match(&json!([1, 2, 3]), &json!([1, 2])));
    }

    #[test]
    fn test_order_insensitive_fallback() {
        assert!(outputs_match(&json!([2, 1]), &json!([1, 2])));
        assert!(outputs_match(&json!(["b", "a"]), &json!(["a", "b"])));
        assert!(!outputs_match(&json!([2, 1]), &json!([1, 3])));
    }

    #[test]
    fn test_nested_sequences_sort_elementwise() {
        assert!(outputs_match(&json!([[3, 4], [1, 2]]), &json!([[1, 2], [3, 4]])));
        assert!(!outputs_match(&json!([[3, 4], [1, 2]]), &json!([[1, 2], [3, 5]])));
    }

    #[test]
    fn test_mixed_kinds_fall_back_to_exact() {
        // not mutually orderable, so only positional equality counts
        assert!(!outputs_match(&json!([1, "a"]), &json!(["a", 1])));
        assert!(outputs_match(&json!([1, "a"]), &json!([1, "a"])));
    }

    #[test]
    fn test_objects_are_not_sequences() {
        assert!(outputs_match(&json!({"a": 1, "b": 2}), &json!({"b": 2, "a": 1})));
        assert!(!outputs_match(&json!({"a": 1}), &json!({"a": 2})));
    }

    #[test]
    fn test_sequence_vs_scalar_is_exact() {
        assert!(!outputs_match(&json!([1]), &json!(1)));
        assert!(!outputs_match(&json!(1), &json!([1])));
    }

    #[test]
    fn test_numeric_elements_match_across_int_and_float() {
        assert!(outputs_match(&json!([2.0, 1]), &json!([1.0, 2])));
    }
}
