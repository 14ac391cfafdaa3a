/// Integer and float arithmetic.
mod arithmetic_words;

/// Words that manipulate the data stack.
mod stack_words;

/// Integer comparisons producing Forth flags.
mod comparison_words;

/// Counted loops and their counters.
mod loop_words;

/// The aux stash, `>r`, `r>` and `r@`.
mod aux_words;

use crate::{
    lang::code::CodeAddress,
    runtime::{
        built_ins::base_words::{
            arithmetic_words::*, aux_words::*, comparison_words::*, loop_words::*, stack_words::*,
        },
        data_structures::dictionary::CoreVerb,
        error::{self, ErrorKind, script_error},
        interpreter::{Flow, Interpreter},
    },
};

/// Run one core verb.  `pc` is the address of the instruction being executed, the loop verbs need
/// it to know where to rewind to.
pub fn execute_core_verb(
    interpreter: &mut dyn Interpreter,
    verb: CoreVerb,
    pc: CodeAddress,
) -> error::Result<Flow> {
    let handler: fn(&mut dyn Interpreter) -> error::Result<()> = match verb {
        CoreVerb::IAdd => word_add,
        CoreVerb::ISub => word_subtract,
        CoreVerb::IMul => word_multiply,
        CoreVerb::IDiv => word_divide,
        CoreVerb::IMod => word_mod,
        CoreVerb::FAdd => word_float_add,
        CoreVerb::FSub => word_float_subtract,
        CoreVerb::FMul => word_float_multiply,
        CoreVerb::FDiv => word_float_divide,

        CoreVerb::Dup => word_dup,
        CoreVerb::Swap => word_swap,
        CoreVerb::Over => word_over,
        CoreVerb::Drop => word_drop,
        CoreVerb::Rot => word_rot,
        CoreVerb::RRot => word_reverse_rot,
        CoreVerb::Pick => word_pick,

        CoreVerb::LoopStart => return word_do(interpreter, pc),
        CoreVerb::LoopEnd => return word_loop(interpreter, pc),
        CoreVerb::LoopCounterI => word_counter,
        CoreVerb::LoopCounterF => word_float_counter,

        CoreVerb::AuxPush => word_to_aux,
        CoreVerb::AuxPop => word_from_aux,
        CoreVerb::AuxCopyTop => word_copy_aux,

        CoreVerb::Equal => word_equal,
        CoreVerb::Less => word_less,
        CoreVerb::Greater => word_greater,
        CoreVerb::ZeroEqual => word_zero_equal,

        // The loader consumes these, they never reach a stream it built.
        CoreVerb::DefinitionStart
        | CoreVerb::DefinitionEnd
        | CoreVerb::If
        | CoreVerb::Else
        | CoreVerb::Then => {
            return script_error(ErrorKind::UnknownOpcode(format!(
                "{} is not executable",
                verb.name()
            )));
        }
    };

    handler(interpreter)?;

    Ok(Flow::Next)
}
