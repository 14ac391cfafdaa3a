use crate::runtime::{
    error::{self, ErrorKind, script_error},
    interpreter::Interpreter,
};

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
pub fn word_dup(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.peek(0)?;

    interpreter.push(value)
}

/// Drop the top value on the data stack.
///
/// Signature: `value -- `
pub fn word_drop(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let _ = interpreter.pop()?;

    Ok(())
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
pub fn word_swap(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require(2)?;

    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(b)?;
    interpreter.push(a)
}

/// Push a copy of the second value over the top one.
///
/// Signature: `a b -- a b a`
pub fn word_over(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let a = interpreter.peek(1)?;

    interpreter.push(a)
}

/// Rotate the third value up to the top.
///
/// Signature: `a b c -- b c a`
pub fn word_rot(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require(3)?;

    let c = interpreter.pop()?;
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(b)?;
    interpreter.push(c)?;
    interpreter.push(a)
}

/// Rotate the top value down to third place.
///
/// Signature: `a b c -- c a b`
pub fn word_reverse_rot(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    interpreter.require(3)?;

    let c = interpreter.pop()?;
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(c)?;
    interpreter.push(a)?;
    interpreter.push(b)
}

/// Copy the value `n` places below the top, after removing `n` itself.  `0 pick` is `dup`.
///
/// Signature: `... n -- ... value`
pub fn word_pick(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let index = interpreter.pop_as_int()?;
    let depth = interpreter.depth();

    if index < 0 || index as usize >= depth {
        return script_error(ErrorKind::IndexOutOfRange { index, depth });
    }

    let value = interpreter.peek(index as usize)?;

    interpreter.push(value)
}
