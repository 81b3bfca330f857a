//! stackc CLI - Command line driver for the stackc compiler

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use ariadne::{Color, Label, Report, ReportKind, Source};
use clap::Parser;

use stackc_ast::{Program, ToTree};
use stackc_codegen::{generate, CodegenOptions};
use stackc_parser::{parse, ParseError};

#[derive(Parser)]
#[command(name = "stackc", version)]
#[command(about = "Compile a stackc program to x86-64 assembly", long_about = None)]
struct Cli {
    /// Source file
    file: PathBuf,

    /// Assembly output file
    #[arg(short, long, default_value = "program.s")]
    output: PathBuf,

    /// Runtime source pulled in with `.include`
    #[arg(long, default_value = "runtime.s")]
    runtime: String,

    /// Runtime routine that prints %rax
    #[arg(long, default_value = "print_num")]
    print_routine: String,

    /// Runtime routine that terminates the program
    #[arg(long, default_value = "exit_program")]
    exit_routine: String,

    /// Program entry label
    #[arg(long, default_value = "_start")]
    entry: String,

    /// Dump the syntax tree as JSON instead of the indented tree
    #[arg(long)]
    ast_json: bool,

    /// Do not print the syntax tree
    #[arg(long, conflicts_with = "ast_json")]
    no_tree: bool,
}

impl Cli {
    fn codegen_options(&self) -> CodegenOptions {
        CodegenOptions {
            entry_label: self.entry.clone(),
            print_routine: self.print_routine.clone(),
            exit_routine: self.exit_routine.clone(),
            runtime_include: Some(self.runtime.clone()),
        }
    }
}

fn main() {
    env_logger::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version come through here too
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    if !cmd_compile(&cli) {
        process::exit(1);
    }
}

fn cmd_compile(cli: &Cli) -> bool {
    let source = match fs::read_to_string(&cli.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {}", cli.file.display(), e);
            return false;
        }
    };

    let program = match parse(&source) {
        Ok(p) => p,
        Err(e) => {
            report_parse_error(&source, &cli.file, &e);
            return false;
        }
    };
    log::info!(
        "parsed {}: {} top-level declarations",
        cli.file.display(),
        program.declarations.len()
    );

    if !cli.no_tree && !print_tree(&program, cli.ast_json) {
        return false;
    }

    let asm = generate(&program, &cli.codegen_options());
    if let Err(e) = fs::write(&cli.output, &asm) {
        eprintln!("Error writing {}: {}", cli.output.display(), e);
        return false;
    }
    log::info!("wrote {} bytes of assembly to {}", asm.len(), cli.output.display());
    true
}

fn print_tree(program: &Program, json: bool) -> bool {
    if !json {
        println!("{}", program.to_tree(0));
        return true;
    }
    match serde_json::to_string_pretty(program) {
        Ok(json) => {
            println!("{}", json);
            true
        }
        Err(e) => {
            eprintln!("Error serializing syntax tree: {}", e);
            false
        }
    }
}

fn report_parse_error(source: &str, file: &Path, error: &ParseError) {
    let name = file.to_string_lossy().to_string();
    let span = error.span();
    let kind = if error.is_lexical() { "lexical error" } else { "syntax error" };

    let printed = Report::build(ReportKind::Error, name.clone(), span.start)
        .with_message(error.to_string())
        .with_label(
            Label::new((name.clone(), span.start..span.end))
                .with_message(kind)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((name, Source::from(source)));

    if printed.is_err() {
        eprintln!("{}: {}", kind, error);
    }
}
