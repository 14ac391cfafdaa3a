
use std::{ error::Error,
           process::Termination,
           fmt::{ self, Debug, Display, Formatter }, process::ExitCode };
use thiserror::Error as ThisError;
use crate::{ runtime::{ data_structures::bounded_stack::StackKind,
                        interpreter::CallStack },
             lang::{ code::CodeAddress,
                     source_buffer::SourceLocation } };



pub type Result<T> = std::result::Result<T, ScriptError>;



/// What went wrong.  The first group is raised by the loader, the second by the execution engine,
/// the last by module registration and the host.
#[derive(Clone, PartialEq, ThisError)]
pub enum ErrorKind
{
    #[error("Cannot define a verb inside another verb.")]
    NestedDefinition,

    #[error("Not defining a verb.")]
    UnmatchedEnd,

    #[error("Empty verb name.")]
    EmptyName,

    #[error("Unknown verb {0}.")]
    UnresolvedVerb(String),

    #[error("Malformed numeric literal {0}.")]
    MalformedNumber(String),

    #[error("Definition of verb {0} is never closed.")]
    UnterminatedDefinition(String),

    #[error("Conditional is still open at the end of its code stream.")]
    UnbalancedConditional,

    #[error("{0} without a matching if.")]
    UnmatchedConditional(String),


    #[error("{0} stack underflow.")]
    StackUnderflow(StackKind),

    #[error("{stack} stack overflow, capacity is {capacity}.")]
    StackOverflow { stack: StackKind, capacity: usize },

    #[error("Unknown opcode: {0}.")]
    UnknownOpcode(String),

    #[error("Division by zero.")]
    DivisionByZero,

    #[error("Expected {expected} value, found {found}.")]
    TypeMismatch { expected: &'static str, found: &'static str },

    #[error("Pick index {index} out of range of stack depth {depth}.")]
    IndexOutOfRange { index: i32, depth: usize },

    #[error("loop does not belong to the active do.")]
    MisplacedLoop,


    #[error("Module verb {0} is already registered.")]
    DuplicateModuleVerb(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Source is {size} bytes, it must be smaller than {limit} bytes.")]
    SourceTooLarge { size: usize, limit: usize }
}


impl Debug for ErrorKind
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self)
    }
}



/// Any error that occurs while loading or executing a verb program.
#[derive(Clone)]
pub struct ScriptError
{
    /// What went wrong.
    kind: ErrorKind,

    /// The location in the source code the error occurred, if available.
    location: Option<SourceLocation>,

    /// The program counter of the faulting instruction, for errors raised during execution.
    address: Option<CodeAddress>,

    /// The verb call stack at the time of the error, if available.
    call_stack: Option<CallStack>
}


impl Error for ScriptError
{
    fn source(&self) -> Option<&(dyn Error + 'static)>
    {
        Some(&self.kind)
    }
}


/// When returned from main, convert the error result to an operating system exit code.
impl Termination for ScriptError
{
    /// Because this type represents an error, the exit code is always FAILURE.
    fn report(self) -> ExitCode
    {
        eprintln!("Error: {}", self);
        ExitCode::FAILURE
    }
}


impl Display for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        match ( &self.location, &self.address )
        {
            ( Some(location), Some(address) ) => write!(f, "{} [{}]: {}", location,
                                                                          address,
                                                                          self.kind)?,
            ( Some(location), None )          => write!(f, "{}: {}", location, self.kind)?,
            ( None, Some(address) )           => write!(f, "[{}]: {}", address, self.kind)?,
            ( None, None )                    => write!(f, "{}", self.kind)?
        }

        if let Some(call_stack) = &self.call_stack
            && !call_stack.is_empty()
        {
            write!(f, "\n\nCall stack\n")?;

            for item in call_stack.iter().rev()
            {
                writeln!(f, "  {}", item)?;
            }
        }

        Ok(())
    }
}


impl Debug for ScriptError
{
    fn fmt(&self, f: &mut Formatter) -> fmt::Result
    {
        write!(f, "{}", self)
    }
}


impl ScriptError
{
    /// Create a new ScriptError.
    pub fn new(kind: ErrorKind, location: Option<SourceLocation>) -> ScriptError
    {
        ScriptError
            {
                kind,
                location,
                address: None,
                call_stack: None
            }
    }

    /// Create a new Script Error and wrap it in a Result::Err.
    pub fn new_as_result<T>(kind: ErrorKind, location: Option<SourceLocation>) -> Result<T>
    {
        Err(ScriptError::new(kind, location))
    }

    /// Attach the execution context of a fault.  Information already present, for example from a
    /// native verb that raised its own error, is kept.
    pub fn with_execution_context(mut self,
                                  address: CodeAddress,
                                  location: Option<SourceLocation>,
                                  call_stack: CallStack) -> ScriptError
    {
        if self.address.is_none()
        {
            self.address = Some(address);
        }

        if self.location.is_none()
        {
            self.location = location;
        }

        if self.call_stack.is_none()
        {
            self.call_stack = Some(call_stack);
        }

        self
    }

    /// What went wrong.
    pub fn kind(&self) -> &ErrorKind
    {
        &self.kind
    }

    /// If available, the location in the source code the error occurred.
    pub fn location(&self) -> &Option<SourceLocation>
    {
        &self.location
    }

    /// If the error happened during execution, the address of the faulting instruction.
    pub fn address(&self) -> &Option<CodeAddress>
    {
        &self.address
    }

    /// If available, the verb call stack at the time of the error.
    pub fn call_stack(&self) -> &Option<CallStack>
    {
        &self.call_stack
    }
}


/// Allow for the conversion of a std::io::Error into a ScriptError.
impl From<std::io::Error> for ScriptError
{
    fn from(error: std::io::Error) -> ScriptError
    {
        ScriptError::new(ErrorKind::Io(error.to_string()), None)
    }
}


impl From<ErrorKind> for ScriptError
{
    fn from(kind: ErrorKind) -> ScriptError
    {
        ScriptError::new(kind, None)
    }
}



/// A convenience function for raising an error of the given kind with no position information.
/// The execution engine attaches the program counter and call stack on the way out.
pub fn script_error<T>(kind: ErrorKind) -> Result<T>
{
    Err(kind.into())
}
