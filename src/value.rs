use std::fmt;
use std::rc::Rc;

use crate::interpreter::Interpreter;

/// Anything that can sit on the left of `(...)`.
pub trait Callable: fmt::Debug {
    fn name(&self) -> &str;

    /// Number of arguments the callable expects.
    fn arity(&self) -> usize;

    /// Invoke with already evaluated arguments; `arguments.len() == arity()`.
    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, String>;
}

/// Runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Str(String),
    Bool(bool),
    Null,
    Callable(Rc<dyn Callable>),
}

impl Value {
    /// `null` and `false` are falsy; everything else, `0` and `""` included,
    /// is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Bool(false))
    }

    /// Numeric coercion used by unary `-`.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Bool(true) => 1.0,
            Value::Bool(false) | Value::Null => 0.0,
            Value::Str(s) => parse_number(s),
            Value::Callable(_) => f64::NAN,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Null => "null",
            Value::Callable(_) => "function",
        }
    }
}

impl PartialEq for Value {
    /// No coercion: `1 == "1"` is false. Callables compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::Callable(a), Value::Callable(b)) => {
                std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => fmt_number(*n, f),

            Value::Str(s) => write!(f, "{}", s),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Null => write!(f, "null"),

            Value::Callable(c) => write!(f, "<native fn {}>", c.name()),
        }
    }
}

/// String to number the way a JavaScript `Number()` call reads it: blank is
/// `0`, `0x`/`0o`/`0b` prefixes select a radix, `Infinity` is the only
/// spelling of infinity, and anything else that is not a decimal literal is
/// `NaN`.
fn parse_number(s: &str) -> f64 {
    let text = s.trim();

    if text.is_empty() {
        return 0.0;
    }

    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };

    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
            return f64::NAN;
        }

        return digits
            .chars()
            .filter_map(|c| c.to_digit(radix))
            .fold(0.0, |acc, d| acc * f64::from(radix) + f64::from(d));
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    // Only signs, digits, `.` and exponents; rules out "inf" and "nan".
    let decimal = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));

    if decimal {
        text.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        write!(f, "{}", if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 && n.is_sign_negative() {
        write!(f, "-0")
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        // 7.0 → "7"
        let mut buf = itoa::Buffer::new();
        write!(f, "{}", buf.format(n as i64))
    } else {
        write!(f, "{}", n)
    }
}
