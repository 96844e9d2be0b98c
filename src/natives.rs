//! Built‑in functions installed in the root scope.

use chrono::Utc;
use log::debug;

use crate::interpreter::Interpreter;
use crate::value::{Callable, Value};

/// `clock()` ‑ milliseconds since the Unix epoch.
#[derive(Debug)]
pub struct Clock;

impl Callable for Clock {
    fn name(&self) -> &str {
        "clock"
    }

    fn arity(&self) -> usize {
        0
    }

    fn call(&self, _interpreter: &mut Interpreter, _arguments: Vec<Value>) -> Result<Value, String> {
        let millis = Utc::now().timestamp_millis() as f64;

        debug!("Native function 'clock' returned: {}", millis);

        Ok(Value::Number(millis))
    }
}

/// `print(value)` ‑ writes the value and a newline to the interpreter's
/// output, evaluates to `null`.
#[derive(Debug)]
pub struct Print;

impl Callable for Print {
    fn name(&self) -> &str {
        "print"
    }

    fn arity(&self) -> usize {
        1
    }

    fn call(&self, interpreter: &mut Interpreter, arguments: Vec<Value>) -> Result<Value, String> {
        let value = arguments.into_iter().next().unwrap_or(Value::Null);

        writeln!(interpreter.output(), "{}", value)
            .map_err(|e| format!("Failed to write output: {}", e))?;

        debug!("Printed value: {}", value);

        Ok(Value::Null)
    }
}
