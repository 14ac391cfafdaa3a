use crate::{
    lang::code::CodeAddress,
    runtime::{
        data_structures::value::Value,
        error::{self, ErrorKind, script_error},
        interpreter::{Flow, Interpreter, LoopFrame},
    },
};

/// Open a counted loop.  The body between `do` and `loop` runs once per step of the counter
/// toward the limit, the limit itself is never visited.
///
/// Signature: `limit start -- `
pub fn word_do(interpreter: &mut dyn Interpreter, pc: CodeAddress) -> error::Result<Flow> {
    interpreter.require(2)?;

    let counter = interpreter.pop_as_int()?;
    let limit = interpreter.pop_as_int()?;

    interpreter.loop_stack().push(LoopFrame {
        rewind: pc,
        counter,
        limit,
    })?;

    Ok(Flow::Next)
}

/// Close the innermost loop iteration.  Steps the counter one toward the limit and goes back to
/// the instruction after `do`, unless the limit was reached.
///
/// Signature: ` -- `
pub fn word_loop(interpreter: &mut dyn Interpreter, pc: CodeAddress) -> error::Result<Flow> {
    let frame = interpreter.loop_stack().top_mut()?;

    if frame.rewind.segment != pc.segment || frame.rewind.offset >= pc.offset {
        return script_error(ErrorKind::MisplacedLoop);
    }

    if frame.counter != frame.limit {
        frame.counter += if frame.limit > frame.counter { 1 } else { -1 };

        if frame.counter != frame.limit {
            let rewind = frame.rewind;
            return Ok(Flow::Goto(CodeAddress::new(rewind.segment, rewind.offset + 1)));
        }
    }

    let _ = interpreter.loop_stack().pop()?;

    Ok(Flow::Next)
}

fn current_counter(interpreter: &mut dyn Interpreter) -> error::Result<i32> {
    Ok(interpreter.loop_stack().top()?.counter)
}

/// Push the innermost loop counter.
///
/// Signature: ` -- counter`
pub fn word_counter(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let counter = current_counter(interpreter)?;

    interpreter.push(Value::Integer(counter))
}

/// Push the innermost loop counter converted to a float.
///
/// Signature: ` -- counter`
pub fn word_float_counter(interpreter: &mut dyn Interpreter) -> error::Result<()> {
    let counter = current_counter(interpreter)?;

    interpreter.push(Value::Float(counter as f32))
}
