use crate::runtime::{
    data_structures::value::Value,
    error::{self, ErrorKind, script_error},
    interpreter::Interpreter,
};

/// Pop two integers, push the result of the operation.  The second value popped is the left hand
/// side.
fn integer_op<F>(interpreter: &mut dyn Interpreter, op: F) -> error::Result<()>
where
    F: Fn(i32, i32) -> error::Result<i32>,
{
    interpreter.require(2)?;

    let b = interpreter.pop_as_int()?;
    let a = interpreter.pop_as_int()?;

    interpreter.push(Value::Integer(op(a, b)?))
}

/// Same as `integer_op` for floats.
fn float_op<F>(interpreter: &mut dyn Interpreter, op: F) -> error::Result<()>
where
    F: Fn(f32, f32) -> f32,
{
    interpreter.require(2)?;

    let b = interpreter.pop_as_float()?;
    let a = interpreter.pop_as_float()?;

    interpreter.push(Value::Float(op(a, b)))
}

fn checked_divisor(b: i32) -> error::Result<i32> {
    if b == 0 {
        return script_error(ErrorKind::DivisionByZero);
    }

    Ok(b)
}

/// Signature: `a b -- a+b`
pub fn word_add(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    integer_op(interpreter, |a, b| Ok(a.wrapping_add(b)))
}

/// Signature: `a b -- a-b`
pub fn word_subtract(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    integer_op(interpreter, |a, b| Ok(a.wrapping_sub(b)))
}

/// Signature: `a b -- a*b`
pub fn word_multiply(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    integer_op(interpreter, |a, b| Ok(a.wrapping_mul(b)))
}

/// Truncating division.
///
/// Signature: `a b -- a/b`
pub fn word_divide(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    integer_op(interpreter, |a, b| Ok(a.wrapping_div(checked_divisor(b)?)))
}

/// Remainder of the truncating division, takes the sign of `a`.
///
/// Signature: `a b -- a%b`
pub fn word_mod(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    integer_op(interpreter, |a, b| Ok(a.wrapping_rem(checked_divisor(b)?)))
}

/// Signature: `a b -- a+b`
pub fn word_float_add(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    float_op(interpreter, |a, b| a + b)
}

/// Signature: `a b -- a-b`
pub fn word_float_subtract(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    float_op(interpreter, |a, b| a - b)
}

/// Signature: `a b -- a*b`
pub fn word_float_multiply(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    float_op(interpreter, |a, b| a * b)
}

/// IEEE-754 division, dividing by zero gives an infinity or NaN.
///
/// Signature: `a b -- a/b`
pub fn word_float_divide(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    float_op(interpreter, |a, b| a / b)
}
