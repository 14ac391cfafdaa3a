use crate::{
    lang::{
        code::{CodeAddress, VerbId},
        source_buffer::SourceLocation,
    },
    runtime::{
        data_structures::{
            bounded_stack::{BoundedStack, StackKind},
            value::Value,
        },
        error::{self, ErrorKind, script_error},
    },
};
use std::fmt::{self, Display, Formatter};

pub mod forth_interpreter;

/// A call stack item is a record of the verb being executed, where it was defined, and the address
/// it was called from.  The call stack is rebuilt from the return stack when an error needs to be
/// reported.
#[derive(Clone, PartialEq, Debug)]
pub struct CallItem {
    location: SourceLocation,
    verb: String,
    called_from: CodeAddress,
}

impl CallItem {
    /// Create a new call stack item.
    pub fn new(verb: String, location: SourceLocation, called_from: CodeAddress) -> CallItem {
        CallItem {
            location,
            verb,
            called_from,
        }
    }

    /// Where the verb was defined.
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// The name of the verb being executed.
    pub fn verb(&self) -> &String {
        &self.verb
    }

    /// Address of the instruction that made the call.
    pub fn called_from(&self) -> CodeAddress {
        self.called_from
    }
}

/// Make sure that the item can be nicely displayed to the user in event of an error.
impl Display for CallItem {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}: {}  (called from {})", self.location, self.verb, self.called_from)
    }
}

/// Type to represent a call stack, innermost call last.
pub type CallStack = Vec<CallItem>;

/// The data stack of values managed by the interpreter.
pub type ValueStack = BoundedStack<Value>;

/// One active user verb call.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ReturnFrame {
    /// The verb that was called.
    pub verb: VerbId,

    /// Where execution continues when the call returns.
    pub resume: CodeAddress,

    /// One past the last instruction of the callee's body.
    pub frame_end: usize,
}

/// One active do/loop.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LoopFrame {
    /// Address of the `do` that opened the loop.  Each iteration resumes right after it.
    pub rewind: CodeAddress,

    /// The current counter, read by `I` and `.I`.
    pub counter: i32,

    /// The value the counter steps toward.
    pub limit: i32,
}

/// How execution continues after an instruction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flow {
    /// On to the next instruction of the current stream.
    Next,

    /// Continue at the given address.
    Goto(CodeAddress),
}

/// Trait for managing the interpreter's data stack.  This is all a module verb gets to see of the
/// interpreter.
pub trait InterpreterStack {
    /// Use to examine the full data stack, bottom first.
    fn stack(&self) -> &[Value];

    /// How many values are currently on the stack.
    fn depth(&self) -> usize {
        self.stack().len()
    }

    /// Fail with a data stack underflow unless at least `count` values are present.
    fn require(&self, count: usize) -> error::Result<()> {
        if self.depth() < count {
            return script_error(ErrorKind::StackUnderflow(StackKind::Data));
        }

        Ok(())
    }

    /// Push a value onto the stack.  Fails if the stack is full.
    fn push(&mut self, value: Value) -> error::Result<()>;

    /// Pop a value from the stack.  If the stack is empty a stack underflow error is returned.
    fn pop(&mut self) -> error::Result<Value>;

    /// Copy the value `depth` places down from the top, 0 being the top itself.
    fn peek(&self, depth: usize) -> error::Result<Value>;

    /// Pop the top value as an integer.  A float is either reinterpreted bit for bit or rejected,
    /// depending on the interpreter's type checking mode.
    fn pop_as_int(&mut self) -> error::Result<i32>;

    /// Pop the top value as a float.  An integer is either reinterpreted bit for bit or rejected,
    /// depending on the interpreter's type checking mode.
    fn pop_as_float(&mut self) -> error::Result<f32>;
}

/// Access to the control stacks core verbs need beyond the data stack.
pub trait ControlStacks {
    fn loop_stack(&mut self) -> &mut BoundedStack<LoopFrame>;

    fn aux_stack(&mut self) -> &mut BoundedStack<Value>;
}

/// Core interpreter trait.  Brings together what a core verb may touch while it runs.
pub trait Interpreter: InterpreterStack + ControlStacks {}
