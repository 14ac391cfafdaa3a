use crate::runtime::{data_structures::value::Value, error, interpreter::Interpreter};

/// Forth truth values, all bits set for true.
fn flag(value: bool) -> Value {
    Value::Integer(if value { -1 } else { 0 })
}

fn compare<F>(interpreter: &mut dyn Interpreter, test: F) -> error::Result<()>
where
    F: Fn(i32, i32) -> bool,
{
    interpreter.require(2)?;

    let b = interpreter.pop_as_int()?;
    let a = interpreter.pop_as_int()?;

    interpreter.push(flag(test(a, b)))
}

/// Signature: `a b -- a==b`
pub fn word_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    compare(interpreter, |a, b| a == b)
}

/// Signature: `a b -- a<b`
pub fn word_less(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    compare(interpreter, |a, b| a < b)
}

/// Signature: `a b -- a>b`
pub fn word_greater(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    compare(interpreter, |a, b| a > b)
}

/// Signature: `a -- a==0`
pub fn word_zero_equal(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let a = interpreter.pop_as_int()?;

    interpreter.push(flag(a == 0))
}
