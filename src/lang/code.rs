use crate::{
    lang::source_buffer::SourceLocation,
    runtime::{
        data_structures::dictionary::{CoreVerb, VerbTable},
        error::{self, ErrorKind, script_error},
    },
};
use std::fmt::{self, Display, Formatter};

/// Index of a user verb in the `VerbTable`.
pub type VerbId = usize;

/// Index of a native verb in the `ModuleTable`.
pub type ModuleVerbId = usize;

/// Which instruction stream an address points into.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Segment {
    /// The top-level program stream.
    Main,

    /// The stream holding every user verb body back to back.
    Verbs,
}

/// A stable address of an instruction, used by calls, jumps and error reports.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CodeAddress {
    pub segment: Segment,
    pub offset: usize,
}

impl CodeAddress {
    pub fn new(segment: Segment, offset: usize) -> CodeAddress {
        CodeAddress { segment, offset }
    }
}

impl Display for CodeAddress {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.segment {
            Segment::Main => write!(f, "main:{}", self.offset),
            Segment::Verbs => write!(f, "verbs:{}", self.offset),
        }
    }
}

/// The type discriminator of an instruction slot.  The numbering follows the layout of the raw
/// stream format, with the branch tags appended after the definition markers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u16)]
pub enum TypeTag {
    None = 0,
    CoreVerb = 1,
    UserVerb = 2,
    ModuleVerb = 3,
    Integer = 4,
    Float = 5,
    DefinitionEntryMarker = 6,
    DefinitionBodyMarker = 7,
    Branch = 8,
    BranchIfZero = 9,
}

/// The operations executed by the virtual machine.  Every variant packs into a `TypeTag` plus a
/// 32-bit payload, see `Op::raw`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Op {
    /// Push an integer literal.
    PushInteger(i32),

    /// Push a floating point literal.
    PushFloat(f32),

    /// Run a built-in verb.
    CoreVerb(CoreVerb),

    /// Call a user verb by its id in the verb table.
    UserVerb(VerbId),

    /// Invoke a native verb by its index in the module table.
    ModuleVerb(ModuleVerbId),

    /// Top-level marker left where a definition was loaded.  Holds the id of the defined verb.
    /// A no-op at execution time.
    DefinitionEntry(VerbId),

    /// Follows `DefinitionEntry` and holds where the verb's body starts in the verb stream.  A
    /// no-op at execution time.
    DefinitionBody(usize),

    /// Continue at the given offset of the current stream.
    Jump(usize),

    /// Pop an integer, continue at the given offset if it was zero.
    JumpIfZero(usize),
}

impl Op {
    pub fn tag(&self) -> TypeTag {
        match self {
            Op::PushInteger(_) => TypeTag::Integer,
            Op::PushFloat(_) => TypeTag::Float,
            Op::CoreVerb(_) => TypeTag::CoreVerb,
            Op::UserVerb(_) => TypeTag::UserVerb,
            Op::ModuleVerb(_) => TypeTag::ModuleVerb,
            Op::DefinitionEntry(_) => TypeTag::DefinitionEntryMarker,
            Op::DefinitionBody(_) => TypeTag::DefinitionBodyMarker,
            Op::Jump(_) => TypeTag::Branch,
            Op::JumpIfZero(_) => TypeTag::BranchIfZero,
        }
    }

    /// The raw 32 bits of the payload.  Floats keep their exact IEEE-754 bit pattern.
    pub fn payload(&self) -> u32 {
        match self {
            Op::PushInteger(value) => *value as u32,
            Op::PushFloat(value) => value.to_bits(),
            Op::CoreVerb(verb) => verb.opcode(),
            Op::UserVerb(index)
            | Op::ModuleVerb(index)
            | Op::DefinitionEntry(index)
            | Op::DefinitionBody(index)
            | Op::Jump(index)
            | Op::JumpIfZero(index) => *index as u32,
        }
    }

    pub fn raw(&self) -> (TypeTag, u32) {
        (self.tag(), self.payload())
    }

    /// Rebuild an operation from its tag and payload.  Fails with `UnknownOpcode` for a slot that
    /// carries no operation or a core opcode that doesn't exist.
    pub fn from_raw(tag: TypeTag, payload: u32) -> error::Result<Op> {
        let op = match tag {
            TypeTag::None => {
                return script_error(ErrorKind::UnknownOpcode("untyped instruction slot".into()));
            }
            TypeTag::Integer => Op::PushInteger(payload as i32),
            TypeTag::Float => Op::PushFloat(f32::from_bits(payload)),
            TypeTag::CoreVerb => match CoreVerb::from_opcode(payload) {
                Some(verb) => Op::CoreVerb(verb),
                None => {
                    return script_error(ErrorKind::UnknownOpcode(format!(
                        "core opcode {}",
                        payload
                    )));
                }
            },
            TypeTag::UserVerb => Op::UserVerb(payload as usize),
            TypeTag::ModuleVerb => Op::ModuleVerb(payload as usize),
            TypeTag::DefinitionEntryMarker => Op::DefinitionEntry(payload as usize),
            TypeTag::DefinitionBodyMarker => Op::DefinitionBody(payload as usize),
            TypeTag::Branch => Op::Jump(payload as usize),
            TypeTag::BranchIfZero => Op::JumpIfZero(payload as usize),
        };

        Ok(op)
    }
}

/// Represents a single instruction in the virtual machine.
#[derive(Clone, PartialEq, Debug)]
pub struct Instruction {
    /// Location of the token this instruction was generated from.
    pub location: Option<SourceLocation>,

    /// The operation to perform.
    pub op: Op,
}

impl Instruction {
    /// Create a new instruction with a location and operation.
    pub fn new(location: Option<SourceLocation>, op: Op) -> Instruction {
        Instruction { location, op }
    }
}

/// Allow for pretty printing of the instruction and it's value.
impl Display for Instruction {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match &self.op {
            Op::PushInteger(value) => write!(f, "PushInteger       {}", value),
            Op::PushFloat(value) => write!(f, "PushFloat         {:?}", value),
            Op::CoreVerb(verb) => write!(f, "CoreVerb          {}", verb.name()),
            Op::UserVerb(index) => write!(f, "UserVerb          {}", index),
            Op::ModuleVerb(index) => write!(f, "ModuleVerb        {}", index),
            Op::DefinitionEntry(index) => write!(f, "DefinitionEntry   {}", index),
            Op::DefinitionBody(offset) => write!(f, "DefinitionBody    {}", offset),
            Op::Jump(offset) => write!(f, "Jump              {}", offset),
            Op::JumpIfZero(offset) => write!(f, "JumpIfZero        {}", offset),
        }
    }
}

/// A flat stream of instructions.
pub type ByteCode = Vec<Instruction>;

/// How far a program had grown before a load started.
#[derive(Clone)]
pub struct ProgramMark {
    main: usize,
    verbs: usize,
    verb_table: VerbTable,
}

/// Everything the loader produces: the top-level stream, the stream of verb bodies, and the table
/// that says where each verb's body lives.
#[derive(Clone, Default)]
pub struct Program {
    pub(crate) main: ByteCode,
    pub(crate) verbs: ByteCode,
    pub(crate) verb_table: VerbTable,
}

impl Program {
    pub fn new() -> Program {
        Program::default()
    }

    /// The top-level instruction stream.
    pub fn main(&self) -> &ByteCode {
        &self.main
    }

    /// The verb-body instruction stream.
    pub fn verbs(&self) -> &ByteCode {
        &self.verbs
    }

    pub fn verb_table(&self) -> &VerbTable {
        &self.verb_table
    }

    pub fn segment(&self, segment: Segment) -> &ByteCode {
        match segment {
            Segment::Main => &self.main,
            Segment::Verbs => &self.verbs,
        }
    }

    pub(crate) fn segment_mut(&mut self, segment: Segment) -> &mut ByteCode {
        match segment {
            Segment::Main => &mut self.main,
            Segment::Verbs => &mut self.verbs,
        }
    }

    /// Fetch the instruction at an address, if there is one.
    pub fn instruction(&self, address: CodeAddress) -> Option<&Instruction> {
        self.segment(address.segment).get(address.offset)
    }

    /// Raw tag/payload view of both streams, top-level first.  Two loads of the same source
    /// produce identical encodings.
    pub fn encoded(&self) -> (Vec<(TypeTag, u32)>, Vec<(TypeTag, u32)>) {
        let encode = |code: &ByteCode| code.iter().map(|instruction| instruction.op.raw()).collect();

        (encode(&self.main), encode(&self.verbs))
    }

    pub(crate) fn mark(&self) -> ProgramMark {
        ProgramMark {
            main: self.main.len(),
            verbs: self.verbs.len(),
            verb_table: self.verb_table.clone(),
        }
    }

    /// Drop everything appended since `mark`, including verbs defined or renamed after it.
    pub(crate) fn rewind(&mut self, mark: ProgramMark) {
        self.main.truncate(mark.main);
        self.verbs.truncate(mark.verbs);
        self.verb_table = mark.verb_table;
    }
}

/// Pretty print the byte code for debugging purposes.
pub fn pretty_print_code(code: &ByteCode) -> String {
    use std::fmt::Write;

    let mut result = String::with_capacity(code.len() * 20);

    for (index, instruction) in code.iter().enumerate() {
        let _ = writeln!(&mut result, "{:4}: {}", index, instruction);
    }

    result
}
