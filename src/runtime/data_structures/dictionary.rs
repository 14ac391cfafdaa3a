use crate::lang::{code::VerbId, source_buffer::SourceLocation};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use std::{
    collections::HashMap,
    fmt::{self, Display, Formatter},
};

/// The built-in verbs.  The discriminant is the verb's opcode in the raw instruction format.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u32)]
pub enum CoreVerb {
    IAdd = 1,
    ISub = 2,
    IMul = 3,
    IDiv = 4,
    IMod = 5,
    FAdd = 6,
    FSub = 7,
    FMul = 8,
    FDiv = 9,
    Dup = 10,
    Swap = 11,
    Over = 12,
    Drop = 13,
    Rot = 14,
    RRot = 15,
    Pick = 16,
    LoopStart = 17,
    LoopEnd = 18,
    LoopCounterI = 19,
    LoopCounterF = 20,
    AuxPush = 21,
    AuxPop = 22,
    AuxCopyTop = 23,
    DefinitionStart = 24,
    DefinitionEnd = 25,
    Equal = 26,
    Less = 27,
    Greater = 28,
    ZeroEqual = 29,
    If = 30,
    Else = 31,
    Then = 32,
}

lazy_static! {
    /// Source spelling of every core verb.  Shared by all interpreters, read-only.  `;;` is an
    /// alternate spelling of `;`.
    static ref CORE_VERBS: IndexMap<&'static str, CoreVerb> = IndexMap::from([
        ("+", CoreVerb::IAdd),
        ("-", CoreVerb::ISub),
        ("*", CoreVerb::IMul),
        ("/", CoreVerb::IDiv),
        ("mod", CoreVerb::IMod),
        (".+", CoreVerb::FAdd),
        (".-", CoreVerb::FSub),
        (".*", CoreVerb::FMul),
        ("./", CoreVerb::FDiv),
        ("dup", CoreVerb::Dup),
        ("swap", CoreVerb::Swap),
        ("over", CoreVerb::Over),
        ("drop", CoreVerb::Drop),
        ("rot", CoreVerb::Rot),
        ("-rot", CoreVerb::RRot),
        ("pick", CoreVerb::Pick),
        ("do", CoreVerb::LoopStart),
        ("loop", CoreVerb::LoopEnd),
        ("I", CoreVerb::LoopCounterI),
        (".I", CoreVerb::LoopCounterF),
        (">r", CoreVerb::AuxPush),
        ("r>", CoreVerb::AuxPop),
        ("r@", CoreVerb::AuxCopyTop),
        (":", CoreVerb::DefinitionStart),
        (";", CoreVerb::DefinitionEnd),
        (";;", CoreVerb::DefinitionEnd),
        ("=", CoreVerb::Equal),
        ("<", CoreVerb::Less),
        (">", CoreVerb::Greater),
        ("0=", CoreVerb::ZeroEqual),
        ("if", CoreVerb::If),
        ("else", CoreVerb::Else),
        ("then", CoreVerb::Then),
    ]);
}

impl CoreVerb {
    /// Look up a core verb by its source spelling.
    pub fn from_name(name: &str) -> Option<CoreVerb> {
        CORE_VERBS.get(name).copied()
    }

    pub fn from_opcode(opcode: u32) -> Option<CoreVerb> {
        CORE_VERBS
            .values()
            .find(|verb| verb.opcode() == opcode)
            .copied()
    }

    pub fn opcode(&self) -> u32 {
        *self as u32
    }

    /// The canonical source spelling of the verb.
    pub fn name(&self) -> &'static str {
        CORE_VERBS
            .iter()
            .find(|(_, verb)| *verb == self)
            .map(|(name, _)| *name)
            .unwrap_or("?")
    }
}

/// A closed user verb definition.  Never changes once it's in the table.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VerbEntry {
    /// The name the verb was defined under.
    pub name: String,

    /// Where the definition's name token appeared.
    pub location: SourceLocation,

    /// First instruction of the body in the verb stream.
    pub body_start: usize,

    /// One past the last instruction of the body.  Reaching it returns to the caller.
    pub body_end: usize,
}

/// A definition whose name has been read but whose `;` hasn't been seen yet.
#[derive(Clone, Debug)]
struct PendingVerb {
    id: VerbId,
    name: String,
    location: SourceLocation,
    body_start: usize,
}

/// The user verb table.  Every definition gets its own id.  A name resolves to the id of its most
/// recent definition, so a redefinition only affects code loaded after it.
#[derive(Clone, Default)]
pub struct VerbTable {
    entries: Vec<VerbEntry>,
    names: HashMap<String, VerbId>,
    pending: Option<PendingVerb>,
}

impl Display for VerbTable {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        let width = self
            .entries
            .iter()
            .map(|entry| entry.name.len())
            .max()
            .unwrap_or(0);

        writeln!(formatter, "{} verbs defined.", self.entries.len())?;

        for (id, entry) in self.entries.iter().enumerate() {
            let current = if self.names.get(&entry.name) == Some(&id) {
                ""
            } else {
                "  (shadowed)"
            };

            writeln!(
                formatter,
                "{:4}  {:width$}  {}..{}{}",
                id,
                entry.name,
                entry.body_start,
                entry.body_end,
                current,
                width = width
            )?;
        }

        Ok(())
    }
}

impl VerbTable {
    pub fn new() -> VerbTable {
        VerbTable::default()
    }

    /// Start a definition.  The returned id is visible to `lookup` right away so the body can call
    /// the verb being defined.
    pub fn open(&mut self, name: &str, location: SourceLocation, body_start: usize) -> VerbId {
        let id = self.entries.len();
        let _ = self.names.insert(name.to_string(), id);

        self.pending = Some(PendingVerb {
            id,
            name: name.to_string(),
            location,
            body_start,
        });

        id
    }

    /// Close the open definition, making its body range final.
    pub fn close(&mut self, body_end: usize) -> Option<VerbId> {
        let pending = self.pending.take()?;

        self.entries.push(VerbEntry {
            name: pending.name,
            location: pending.location,
            body_start: pending.body_start,
            body_end,
        });

        Some(pending.id)
    }

    /// The name of the definition currently open, if any.
    pub fn pending_name(&self) -> Option<&str> {
        self.pending.as_ref().map(|pending| pending.name.as_str())
    }

    /// Resolve a name to the id of its newest definition.
    pub fn lookup(&self, name: &str) -> Option<VerbId> {
        self.names.get(name).copied()
    }

    pub fn get(&self, id: VerbId) -> Option<&VerbEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VerbEntry> {
        self.entries.iter()
    }
}
