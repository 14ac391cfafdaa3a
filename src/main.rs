use clap::Parser;
use std::process::{ExitCode, Termination};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use verbforth::{
    config::{InterpreterConfig, StackLimits},
    lang::code::pretty_print_code,
    runtime::{
        built_ins::mesh_words::MeshModule,
        data_structures::value::Value,
        error,
        interpreter::{InterpreterStack, forth_interpreter::ForthInterpreter},
    },
};

#[derive(Parser, Debug)]
#[command(name = "verbforth", about = "Load and run a verb program", version)]
struct Args {
    /// Path to the program source
    path: String,

    /// Capacity of the data stack
    #[arg(long, default_value_t = StackLimits::default().data)]
    data_stack: usize,

    /// Maximum nesting of verb calls
    #[arg(long, default_value_t = StackLimits::default().returns)]
    return_stack: usize,

    /// Maximum nesting of do/loop
    #[arg(long, default_value_t = StackLimits::default().loops)]
    loop_stack: usize,

    /// Capacity of the aux stack
    #[arg(long, default_value_t = StackLimits::default().aux)]
    aux_stack: usize,

    /// Reject arithmetic on operands of the wrong numeric type instead of reinterpreting their bits
    #[arg(long)]
    strict_types: bool,

    /// Sources must be smaller than this many bytes
    #[arg(long, default_value_t = InterpreterConfig::default().max_source_bytes)]
    max_source_bytes: usize,

    /// Print both instruction streams after loading
    #[arg(long)]
    dump_code: bool,
}

impl Args {
    fn config(&self) -> InterpreterConfig {
        InterpreterConfig {
            limits: StackLimits {
                data: self.data_stack,
                returns: self.return_stack,
                loops: self.loop_stack,
                aux: self.aux_stack,
            },
            strict_types: self.strict_types,
            max_source_bytes: self.max_source_bytes,
        }
    }
}

fn run(args: &Args) -> error::Result<()> {
    let mut interpreter = ForthInterpreter::new(args.config());

    interpreter.register_module(&MeshModule)?;
    interpreter.load_file(&args.path)?;

    if args.dump_code {
        println!("Top level:\n{}", pretty_print_code(interpreter.program().main()));
        println!("Verbs:\n{}", pretty_print_code(interpreter.program().verbs()));
        println!("{}", interpreter.verbs());
    }

    info!("Execution");
    interpreter.execute()?;

    info!("On stack after execution");

    for value in interpreter.stack() {
        match value {
            Value::Integer(value) => info!("INT {}", value),
            Value::Float(value) => info!("FLOAT {:.6}", value),
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => error.report(),
    }
}
