//! Equality policy used by `Set` to decide whether a write is needed.
//!
//! `NumericCoercion` treats numbers and numeric strings as the same value
//! when they denote the same number, so `"1"`, `1` and `1.0` are equal but
//! `"abc"` and `0` are not. Containers compare element-wise under the same
//! rule. Booleans and null only equal themselves.
//!
//! `Strict` is JSON equality, except that numbers compare by value
//! (`1 == 1.0`).

pub use configs::EqualityMode;
use serde_json::{Number, Value};

pub fn values_equal(mode: EqualityMode, a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (Numeric::of(x), Numeric::of(y)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
        (Value::String(x), Value::String(y)) => {
            if x == y {
                return true;
            }
            match mode {
                EqualityMode::Strict => false,
                EqualityMode::NumericCoercion => match (Numeric::parse(x), Numeric::parse(y)) {
                    (Some(x), Some(y)) => x == y,
                    _ => false,
                },
            }
        }
        (Value::Number(n), Value::String(s)) | (Value::String(s), Value::Number(n)) => match mode {
            EqualityMode::Strict => false,
            EqualityMode::NumericCoercion => match (Numeric::parse(s), Numeric::of(n)) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        },
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| values_equal(mode, a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter().all(|(k, a)| y.get(k).is_some_and(|b| values_equal(mode, a, b)))
        }
        _ => a == b,
    }
}

/// A number as compared here. Integers stay exact; only floats go through `f64`.
#[derive(Debug, Clone, Copy)]
enum Numeric {
    Int(i128),
    Float(f64),
}

impl Numeric {
    fn of(n: &Number) -> Option<Self> {
        if let Some(i) = n.as_i64() {
            return Some(Self::Int(i.into()));
        }
        if let Some(u) = n.as_u64() {
            return Some(Self::Int(u.into()));
        }
        n.as_f64().map(Self::Float)
    }

    fn parse(s: &str) -> Option<Self> {
        let t = s.trim();
        if t.is_empty() {
            return None;
        }
        if let Ok(i) = t.parse::<i128>() {
            return Some(Self::Int(i));
        }
        // f64::from_str also accepts "inf" and "NaN", which are not numeric here
        t.parse::<f64>().ok().filter(|f| f.is_finite()).map(Self::Float)
    }
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Int(i), Self::Float(f)) | (Self::Float(f), Self::Int(i)) => float_is_int(f, i),
        }
    }
}

// 2^127; floats at or above it lie outside i128.
const I128_BOUND: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

fn float_is_int(f: f64, i: i128) -> bool {
    f.fract() == 0.0 && f.abs() < I128_BOUND && f as i128 == i
}
