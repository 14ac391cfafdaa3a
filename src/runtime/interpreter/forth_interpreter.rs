use tracing::{ debug, info, trace };
use crate::{ config::InterpreterConfig,
             lang::{ code::{ CodeAddress,
                             Op,
                             Program,
                             Segment },
                     compilation::Loader,
                     tokenizing::tokenize_from_file },
             runtime::{ built_ins::{ base_words::execute_core_verb,
                                     module_words::{ Module,
                                                     ModuleTable } },
                        data_structures::{ bounded_stack::{ BoundedStack,
                                                            StackKind },
                                           dictionary::VerbTable,
                                           value::Value },
                        error::{ self,
                                 ErrorKind,
                                 script_error },
                        interpreter::{ CallItem,
                                       CallStack,
                                       ControlStacks,
                                       Flow,
                                       Interpreter,
                                       InterpreterStack,
                                       LoopFrame,
                                       ReturnFrame,
                                       ValueStack } } };



/// One interpreter context.  Owns the loaded program, the registered module verbs and the four
/// stacks.  Separate contexts share nothing but the read-only core verb table.
pub struct ForthInterpreter
{
    /// Stack capacities and type checking mode.
    config: InterpreterConfig,

    /// Native verbs registered by modules.
    modules: ModuleTable,

    /// Everything loaded so far.
    program: Program,

    /// The first top-level instruction that hasn't been executed yet.
    next_pc: usize,


    /// The data stack.  Persists across loads and executions.
    stack: ValueStack,

    /// Active user verb calls.
    return_stack: BoundedStack<ReturnFrame>,

    /// Active do/loop frames.
    loop_stack: BoundedStack<LoopFrame>,

    /// Scratch values stashed with >r.
    aux_stack: BoundedStack<Value>
}


impl InterpreterStack for ForthInterpreter
{
    fn stack(&self) -> &[Value]
    {
        self.stack.as_slice()
    }

    fn require(&self, count: usize) -> error::Result<()>
    {
        self.stack.require(count)
    }

    fn push(&mut self, value: Value) -> error::Result<()>
    {
        self.stack.push(value)
    }

    fn pop(&mut self) -> error::Result<Value>
    {
        self.stack.pop()
    }

    fn peek(&self, depth: usize) -> error::Result<Value>
    {
        self.stack.peek(depth).copied()
    }

    fn pop_as_int(&mut self) -> error::Result<i32>
    {
        match self.pop()?
        {
            Value::Integer(value) => Ok(value),
            value if self.config.strict_types =>
                script_error(ErrorKind::TypeMismatch { expected: "integer",
                                                       found: value.type_name() }),
            value => Ok(value.reinterpret_int())
        }
    }

    fn pop_as_float(&mut self) -> error::Result<f32>
    {
        match self.pop()?
        {
            Value::Float(value) => Ok(value),
            value if self.config.strict_types =>
                script_error(ErrorKind::TypeMismatch { expected: "float",
                                                       found: value.type_name() }),
            value => Ok(value.reinterpret_float())
        }
    }
}


impl ControlStacks for ForthInterpreter
{
    fn loop_stack(&mut self) -> &mut BoundedStack<LoopFrame>
    {
        &mut self.loop_stack
    }

    fn aux_stack(&mut self) -> &mut BoundedStack<Value>
    {
        &mut self.aux_stack
    }
}


impl Interpreter for ForthInterpreter {}


impl ForthInterpreter
{
    pub fn new(config: InterpreterConfig) -> ForthInterpreter
    {
        let limits = config.limits;

        ForthInterpreter
            {
                config,

                modules: ModuleTable::new(),
                program: Program::new(),
                next_pc: 0,

                stack: BoundedStack::new(StackKind::Data, limits.data),
                return_stack: BoundedStack::new(StackKind::Return, limits.returns),
                loop_stack: BoundedStack::new(StackKind::Loop, limits.loops),
                aux_stack: BoundedStack::new(StackKind::Aux, limits.aux)
            }
    }

    pub fn config(&self) -> &InterpreterConfig
    {
        &self.config
    }

    /// Make a module's verbs available to sources loaded from now on.  Returns how many verbs were
    /// added.
    pub fn register_module(&mut self, module: &dyn Module) -> error::Result<usize>
    {
        let count = module.register(&mut self.modules)?;

        info!("Registered {} verbs from module {}.", count, module.name());

        Ok(count)
    }

    pub fn modules(&self) -> &ModuleTable
    {
        &self.modules
    }

    pub fn program(&self) -> &Program
    {
        &self.program
    }

    /// The user verbs defined so far.
    pub fn verbs(&self) -> &VerbTable
    {
        self.program.verb_table()
    }

    pub fn return_frames(&self) -> &[ReturnFrame]
    {
        self.return_stack.as_slice()
    }

    pub fn loop_frames(&self) -> &[LoopFrame]
    {
        self.loop_stack.as_slice()
    }

    pub fn aux_values(&self) -> &[Value]
    {
        self.aux_stack.as_slice()
    }

    /// Load a source string, appending to the program.  On failure the program is left as it was
    /// before the call.
    pub fn load(&mut self, path: &str, source: &str) -> error::Result<()>
    {
        debug!("Loading {}.", path);

        Loader::new(&mut self.program, &self.modules).load(path, source)
    }

    /// Read and load a source file.  The file must be smaller than the configured limit.
    pub fn load_file(&mut self, path: &str) -> error::Result<()>
    {
        let ( source, tokens ) = tokenize_from_file(path, self.config.max_source_bytes)?;

        debug!("Loading {}, {} bytes, {} tokens.", path, source.len(), tokens.len());

        Loader::new(&mut self.program, &self.modules).load_tokens(&source, &tokens)
    }

    /// Load then execute a source string.
    pub fn process_source(&mut self, path: &str, source: &str) -> error::Result<()>
    {
        self.load(path, source)?;
        self.execute()
    }

    /// Run the top-level instructions that haven't run yet.  The control stacks start out empty,
    /// the data stack keeps whatever earlier runs left on it.
    pub fn execute(&mut self) -> error::Result<()>
    {
        self.return_stack.clear();
        self.loop_stack.clear();
        self.aux_stack.clear();

        let mut pc = CodeAddress::new(Segment::Main, self.next_pc);
        let result = self.run(&mut pc);

        self.next_pc = self.program.main().len();

        match result
        {
            Ok(()) => Ok(()),
            Err(error) =>
                {
                    let location = self.program
                                       .instruction(pc)
                                       .and_then(|instruction| instruction.location.clone());

                    Err(error.with_execution_context(pc, location, self.call_stack()))
                }
        }
    }

    /// Throw away the program and every stack.  Registered modules and configuration are kept.
    pub fn reset(&mut self)
    {
        self.program = Program::new();
        self.next_pc = 0;

        self.stack.clear();
        self.return_stack.clear();
        self.loop_stack.clear();
        self.aux_stack.clear();
    }

    /// The active verb calls, outermost first.
    pub fn call_stack(&self) -> CallStack
    {
        self.return_stack
            .as_slice()
            .iter()
            .map(|frame|
                {
                    let called_from = CodeAddress::new(frame.resume.segment,
                                                       frame.resume.offset.saturating_sub(1));

                    match self.program.verb_table().get(frame.verb)
                    {
                        Some(entry) => CallItem::new(entry.name.clone(),
                                                     entry.location.clone(),
                                                     called_from),
                        None => CallItem::new(format!("<verb {}>", frame.verb),
                                              Default::default(),
                                              called_from)
                    }
                })
            .collect()
    }

    /// Where the current frame stops.  Reaching it returns from a verb, or ends the run at the top
    /// level.
    fn frame_end(&self) -> usize
    {
        match self.return_stack.as_slice().last()
        {
            Some(frame) => frame.frame_end,
            None => self.program.main().len()
        }
    }

    /// The fetch/dispatch loop.  On error `pc` is left on the faulting instruction.
    fn run(&mut self, pc: &mut CodeAddress) -> error::Result<()>
    {
        loop
        {
            if pc.offset >= self.frame_end()
            {
                if self.return_stack.is_empty()
                {
                    return Ok(());
                }

                let frame = self.return_stack.pop()?;
                *pc = frame.resume;

                continue;
            }

            let op = match self.program.instruction(*pc)
                {
                    Some(instruction) => instruction.op,
                    None => return script_error(ErrorKind::UnknownOpcode(
                                                              format!("no instruction at {}", pc)))
                };

            trace!("{}: {:?}", pc, op);

            match self.step(op, *pc)?
            {
                Flow::Next => pc.offset += 1,
                Flow::Goto(target) => *pc = target
            }
        }
    }

    fn step(&mut self, op: Op, pc: CodeAddress) -> error::Result<Flow>
    {
        match op
        {
            Op::PushInteger(value) => self.push(Value::Integer(value))?,

            Op::PushFloat(value) => self.push(Value::Float(value))?,

            Op::CoreVerb(verb) => return execute_core_verb(self, verb, pc),

            Op::UserVerb(id) =>
                {
                    let ( body_start, body_end ) =
                        match self.program.verb_table().get(id)
                        {
                            Some(entry) => ( entry.body_start, entry.body_end ),
                            None => return script_error(ErrorKind::UnknownOpcode(
                                                                    format!("user verb {}", id)))
                        };

                    self.return_stack.push(ReturnFrame
                        {
                            verb: id,
                            resume: CodeAddress::new(pc.segment, pc.offset + 1),
                            frame_end: body_end
                        })?;

                    return Ok(Flow::Goto(CodeAddress::new(Segment::Verbs, body_start)));
                },

            Op::ModuleVerb(id) =>
                {
                    let handler = match self.modules.get(id)
                        {
                            Some(verb) => verb.handler(),
                            None => return script_error(ErrorKind::UnknownOpcode(
                                                                  format!("module verb {}", id)))
                        };

                    handler(self)?;
                },

            Op::DefinitionEntry(_) | Op::DefinitionBody(_) => {},

            Op::Jump(target) => return Ok(Flow::Goto(CodeAddress::new(pc.segment, target))),

            Op::JumpIfZero(target) =>
                {
                    if self.pop_as_int()? == 0
                    {
                        return Ok(Flow::Goto(CodeAddress::new(pc.segment, target)));
                    }
                }
        }

        Ok(Flow::Next)
    }
}


impl Default for ForthInterpreter
{
    fn default() -> Self
    {
        Self::new(InterpreterConfig::default())
    }
}
