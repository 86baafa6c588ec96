//! Baiko command line.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode, Stdio};

use clap::{Parser, ValueEnum};
use tracing_subscriber::prelude::*;

use baiko::diagnostics::{BaikoError, RuntimeError};
use baiko::interp::{FileResolver, Interpreter};
use baiko::{Generator, parse};

#[derive(Parser)]
#[command(name = "baiko", version, about = "The Baiko programming language")]
struct Cli {
    /// Source file to process
    file: PathBuf,

    /// What to do with the program
    #[arg(long, value_enum, default_value = "compile")]
    mode: Mode,

    /// Dump the parsed AST as JSON instead of running a mode
    #[arg(long)]
    emit_ast: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Print generated JavaScript
    Compile,
    /// Generate JavaScript and execute it with node
    Run,
    /// Run on the tree-walking interpreter
    Interpret,
}

enum Failure {
    Lang(BaikoError),
    Other(String),
}

impl From<BaikoError> for Failure {
    fn from(err: BaikoError) -> Self {
        Failure::Lang(err)
    }
}

impl From<RuntimeError> for Failure {
    fn from(err: RuntimeError) -> Self {
        Failure::Lang(BaikoError::Runtime(err))
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.file) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Hadisoana: tsy azo novakina ny \"{}\": {err}", cli.file.display());
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &source) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure::Lang(BaikoError::Runtime(err))) => {
            eprintln!("Hadisoana tamin'ny fanatanterahana: {err}");
            ExitCode::FAILURE
        }
        Err(Failure::Lang(err)) => {
            eprintln!("Hadisoana: {err}");
            ExitCode::FAILURE
        }
        Err(Failure::Other(message)) => {
            eprintln!("Hadisoana: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, source: &str) -> Result<(), Failure> {
    let program = parse(source)?;

    if cli.emit_ast {
        let json = serde_json::to_string_pretty(&program)
            .map_err(|err| Failure::Other(err.to_string()))?;
        println!("{json}");
        return Ok(());
    }

    // Imports resolve relative to the source file.
    let root = cli
        .file
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    match cli.mode {
        Mode::Compile => {
            let js = Generator::new()
                .with_file_resolver(file_resolver(root))
                .generate(&program)?;
            println!("{js}");
            Ok(())
        }
        Mode::Run => {
            let js = Generator::new()
                .with_file_resolver(file_resolver(root))
                .generate(&program)?;
            run_node(&js)
        }
        Mode::Interpret => {
            let mut interp = Interpreter::new().with_file_resolver(file_resolver(root));
            interp.run(&program)?;
            Ok(())
        }
    }
}

fn file_resolver(root: PathBuf) -> FileResolver {
    Box::new(move |path: &str| {
        fs::read_to_string(root.join(path)).map_err(|err| err.to_string())
    })
}

fn run_node(js: &str) -> Result<(), Failure> {
    let mut child = Command::new("node")
        .arg("-")
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|err| Failure::Other(format!("tsy azo nalefa ny node: {err}")))?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin
            .write_all(js.as_bytes())
            .map_err(|err| Failure::Other(format!("tsy azo nosoratana ny node: {err}")))?;
    }

    let status = child
        .wait()
        .map_err(|err| Failure::Other(format!("tsy vita ny node: {err}")))?;
    if !status.success() {
        return Err(Failure::Other(format!(
            "niala tamin'ny {} ny node",
            status.code().unwrap_or(1)
        )));
    }
    Ok(())
}
