use crate::runtime::{error, interpreter::Interpreter};

/// Move the top of the data stack to the aux stack.
///
/// Signature: `value -- `
pub fn word_to_aux(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.aux_stack().push(value)
}

/// Move the top of the aux stack back to the data stack.
///
/// Signature: ` -- value`
pub fn word_from_aux(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = interpreter.aux_stack().pop()?;

    interpreter.push(value)
}

/// Copy the top of the aux stack to the data stack.
///
/// Signature: ` -- value`
pub fn word_copy_aux(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let value = *interpreter.aux_stack().top()?;

    interpreter.push(value)
}
