use crate::{
    lang::{
        code::{Instruction, ModuleVerbId, Op, Program, Segment, VerbId},
        source_buffer::SourceLocation,
        tokenizing::{NumberType, Token, is_number, to_numeric, tokenize_from_source},
    },
    runtime::{
        built_ins::module_words::ModuleTable,
        data_structures::dictionary::CoreVerb,
        error::{self, ErrorKind, ScriptError},
    },
};
use tracing::{debug, warn};

/// Where the loader is within a definition.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DefinitionState {
    /// Top level, instructions go to the main stream.
    Normal,

    /// A `:` has been seen, the next token is the verb's name.
    NamingVerb,

    /// Inside a body, instructions go to the verb stream until `;`.
    DefiningBody,
}

/// What a token turned out to be.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Word {
    Number(NumberType),
    Core(CoreVerb),
    User(VerbId),
    Module(ModuleVerbId),
}

/// An `if` or `else` whose jump target isn't known yet.
#[derive(Clone, Copy, Debug)]
struct BranchMark {
    at: usize,
    after_else: bool,
}

/// The single-pass loader.  It classifies each token and appends instructions to the program,
/// routing them to the main stream or the verb stream depending on the definition state.
pub struct Loader<'a> {
    program: &'a mut Program,
    modules: &'a ModuleTable,
    state: DefinitionState,
    branches: Vec<BranchMark>,
}

impl<'a> Loader<'a> {
    pub fn new(program: &'a mut Program, modules: &'a ModuleTable) -> Loader<'a> {
        Loader {
            program,
            modules,
            state: DefinitionState::Normal,
            branches: Vec::new(),
        }
    }

    pub fn state(&self) -> DefinitionState {
        self.state
    }

    /// Tokenize and load a source string.
    pub fn load(&mut self, path: &str, source: &str) -> error::Result<()> {
        let tokens = tokenize_from_source(path, source)?;
        self.load_tokens(source, &tokens)
    }

    /// Load an already tokenized source.  The first error stops loading and the program is put
    /// back the way it was before the call, so nothing from a failed load ever runs.
    pub fn load_tokens(&mut self, source: &str, tokens: &[Token]) -> error::Result<()> {
        let mark = self.program.mark();
        let result = process_source_from_tokens(self, source, tokens);

        if result.is_err() {
            self.program.rewind(mark);
            self.state = DefinitionState::Normal;
            self.branches.clear();
        }

        result
    }

    /// Figure out what a token means, in priority order: number, core verb, user verb, module
    /// verb.
    pub fn classify(&self, text: &str, location: &SourceLocation) -> error::Result<Word> {
        if is_number(text) {
            if let Some(number) = to_numeric(text) {
                return Ok(Word::Number(number));
            }

            // Core verbs such as `0=` start like a number.
            if CoreVerb::from_name(text).is_none() {
                return ScriptError::new_as_result(
                    ErrorKind::MalformedNumber(text.to_string()),
                    Some(location.clone()),
                );
            }
        }

        if let Some(verb) = CoreVerb::from_name(text) {
            return Ok(Word::Core(verb));
        }

        if let Some(id) = self.program.verb_table.lookup(text) {
            return Ok(Word::User(id));
        }

        if let Some(id) = self.modules.lookup(text) {
            return Ok(Word::Module(id));
        }

        ScriptError::new_as_result(
            ErrorKind::UnresolvedVerb(text.to_string()),
            Some(location.clone()),
        )
    }

    fn current_segment(&self) -> Segment {
        match self.state {
            DefinitionState::DefiningBody => Segment::Verbs,
            _ => Segment::Main,
        }
    }

    fn emit(&mut self, location: &SourceLocation, op: Op) -> usize {
        let code = self.program.segment_mut(self.current_segment());

        code.push(Instruction::new(Some(location.clone()), op));
        code.len() - 1
    }

    fn write_position(&self) -> usize {
        self.program.segment(self.current_segment()).len()
    }

    fn fail<T>(&self, kind: ErrorKind, location: &SourceLocation) -> error::Result<T> {
        ScriptError::new_as_result(kind, Some(location.clone()))
    }

    fn load_word(&mut self, text: &str, location: &SourceLocation) -> error::Result<()> {
        if self.state == DefinitionState::NamingVerb {
            return match CoreVerb::from_name(text) {
                Some(CoreVerb::DefinitionStart) => {
                    self.fail(ErrorKind::NestedDefinition, location)
                }
                Some(CoreVerb::DefinitionEnd) => self.fail(ErrorKind::EmptyName, location),
                _ => {
                    self.begin_definition(text, location);
                    Ok(())
                }
            };
        }

        match self.classify(text, location)? {
            Word::Number(NumberType::Int(value)) => {
                let _ = self.emit(location, Op::PushInteger(value));
            }

            Word::Number(NumberType::Float(value)) => {
                let _ = self.emit(location, Op::PushFloat(value));
            }

            Word::Core(CoreVerb::DefinitionStart) => {
                if self.state != DefinitionState::Normal {
                    return self.fail(ErrorKind::NestedDefinition, location);
                }

                if !self.branches.is_empty() {
                    return self.fail(ErrorKind::UnbalancedConditional, location);
                }

                self.state = DefinitionState::NamingVerb;
            }

            Word::Core(CoreVerb::DefinitionEnd) => {
                if self.state == DefinitionState::Normal {
                    return self.fail(ErrorKind::UnmatchedEnd, location);
                }

                if !self.branches.is_empty() {
                    return self.fail(ErrorKind::UnbalancedConditional, location);
                }

                self.end_definition();
            }

            Word::Core(CoreVerb::If) => {
                let at = self.emit(location, Op::JumpIfZero(0));
                self.branches.push(BranchMark { at, after_else: false });
            }

            Word::Core(CoreVerb::Else) => match self.branches.pop() {
                Some(mark) if !mark.after_else => {
                    let at = self.emit(location, Op::Jump(0));

                    self.patch(mark, at + 1);
                    self.branches.push(BranchMark { at, after_else: true });
                }
                _ => return self.fail(ErrorKind::UnmatchedConditional(text.into()), location),
            },

            Word::Core(CoreVerb::Then) => match self.branches.pop() {
                Some(mark) => {
                    let target = self.write_position();
                    self.patch(mark, target);
                }
                None => return self.fail(ErrorKind::UnmatchedConditional(text.into()), location),
            },

            Word::Core(verb) => {
                let _ = self.emit(location, Op::CoreVerb(verb));
            }

            Word::User(id) => {
                let _ = self.emit(location, Op::UserVerb(id));
            }

            Word::Module(id) => {
                let _ = self.emit(location, Op::ModuleVerb(id));
            }
        }

        Ok(())
    }

    /// Resolve a pending branch so that it lands on `target` in the current stream.
    fn patch(&mut self, mark: BranchMark, target: usize) {
        let code = self.program.segment_mut(self.current_segment());
        let instruction = &mut code[mark.at];

        instruction.op = match instruction.op {
            Op::JumpIfZero(_) => Op::JumpIfZero(target),
            Op::Jump(_) => Op::Jump(target),
            other => other,
        };
    }

    fn begin_definition(&mut self, name: &str, location: &SourceLocation) {
        if is_number(name) || CoreVerb::from_name(name).is_some() {
            warn!("{}: verb {} can never be called, its name is a literal or core verb.", location, name);
        }

        let body_start = self.program.verbs.len();
        let id = self
            .program
            .verb_table
            .open(name, location.clone(), body_start);

        // Leave a marker at the definition point so the top-level stream records it.
        let _ = self.emit(location, Op::DefinitionEntry(id));
        let _ = self.emit(location, Op::DefinitionBody(body_start));

        debug!("Loading into verb {} ({}) at {}.", name, id, body_start);

        self.state = DefinitionState::DefiningBody;
    }

    fn end_definition(&mut self) {
        let body_end = self.program.verbs.len();

        if let Some(id) = self.program.verb_table.close(body_end) {
            debug!("Closed verb {} with body end {}.", id, body_end);
        }

        self.state = DefinitionState::Normal;
    }

    /// Checks made once every token has been consumed.
    fn finish(&self, end: &SourceLocation) -> error::Result<()> {
        match self.state {
            DefinitionState::NamingVerb => self.fail(ErrorKind::EmptyName, end),
            DefinitionState::DefiningBody => {
                let name = self.program.verb_table.pending_name().unwrap_or_default();
                self.fail(ErrorKind::UnterminatedDefinition(name.to_string()), end)
            }
            DefinitionState::Normal if !self.branches.is_empty() => {
                self.fail(ErrorKind::UnbalancedConditional, end)
            }
            DefinitionState::Normal => Ok(()),
        }
    }
}

/// Run every token through the loader, then make sure nothing was left open.
pub fn process_source_from_tokens(
    loader: &mut Loader,
    source: &str,
    tokens: &[Token],
) -> error::Result<()> {
    for token in tokens {
        loader.load_word(token.text(source), token.location())?;
    }

    let end = match tokens.last() {
        Some(token) => token.location().clone(),
        None => SourceLocation::default(),
    };

    loader.finish(&end)
}
