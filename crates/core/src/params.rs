//! Lenient typed lookups into a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key and a default. A missing key or a
//! value of the wrong type yields the default, so partial or hand-edited
//! config documents always produce a usable [`FlowConfig`](crate::FlowConfig).

use serde_json::Value;

/// Extracts an `f32` from `params[name]`. Integers are accepted.
pub fn param_f32(params: &Value, name: &str, default: f32) -> f32 {
    params
        .get(name)
        .and_then(Value::as_f64)
        .map(|v| v as f32)
        .unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`; negative or fractional values fall back.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `u64` from `params[name]`.
pub fn param_u64(params: &Value, name: &str, default: u64) -> u64 {
    params.get(name).and_then(Value::as_u64).unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a string slice from `params[name]`, if present.
pub fn param_str<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f32_reads_float_and_integer() {
        let params = json!({"field_scale": 2.5, "simulation_speed": 3});
        assert!((param_f32(&params, "field_scale", 1.0) - 2.5).abs() < f32::EPSILON);
        assert!((param_f32(&params, "simulation_speed", 1.0) - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn param_f32_falls_back_on_missing_or_mistyped() {
        let params = json!({"field_scale": "big", "speed": null});
        assert_eq!(param_f32(&params, "field_scale", 1.5), 1.5);
        assert_eq!(param_f32(&params, "speed", 4.0), 4.0);
        assert_eq!(param_f32(&params, "absent", 7.0), 7.0);
    }

    #[test]
    fn param_f32_on_non_object_returns_default() {
        assert_eq!(param_f32(&json!([1, 2, 3]), "x", 0.5), 0.5);
    }

    #[test]
    fn param_usize_rejects_negative_and_fractional() {
        let params = json!({"a": 42, "b": -1, "c": 2.5});
        assert_eq!(param_usize(&params, "a", 0), 42);
        assert_eq!(param_usize(&params, "b", 5), 5);
        assert_eq!(param_usize(&params, "c", 9), 9);
    }

    #[test]
    fn param_u64_reads_large_seed() {
        let params = json!({"seed": 18_000_000_000_u64});
        assert_eq!(param_u64(&params, "seed", 0), 18_000_000_000);
    }

    #[test]
    fn param_bool_reads_and_falls_back() {
        let params = json!({"paused": true, "adapt": 1});
        assert!(param_bool(&params, "paused", false));
        assert!(!param_bool(&params, "adapt", false));
    }

    #[test]
    fn param_str_returns_none_for_wrong_type() {
        let params = json!({"method": "rk4", "other": 4});
        assert_eq!(param_str(&params, "method"), Some("rk4"));
        assert_eq!(param_str(&params, "other"), None);
        assert_eq!(param_str(&params, "missing"), None);
    }
}
