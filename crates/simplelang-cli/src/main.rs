//! simplelang CLI - Command-line driver for the simplelang to Go transpiler

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::{Diagnostic, Label};
use codespan_reporting::files::SimpleFile;
use codespan_reporting::term::{
    self,
    termcolor::{ColorChoice, StandardStream, WriteColor},
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use simplelang_core::codegen::EmitConfig;
use simplelang_core::Generator;

mod config;

use config::ProjectConfig;

#[derive(Parser)]
#[command(name = "simplelang")]
#[command(version = simplelang_core::VERSION)]
#[command(about = "Transpile simplelang source to Go", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Increase log output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Transpile a source file to Go (the default command)
    Build {
        /// Source file (defaults to the config's build.input)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (defaults to the config's build.output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file (defaults to ./simplelang.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the token stream of a source file
    Tokens {
        /// Path to the source file
        file: PathBuf,
    },

    /// Print the parsed syntax tree of a source file
    Ast {
        /// Path to the source file
        file: PathBuf,
    },

    /// Check that a source file transpiles without writing output
    Check {
        /// Path to the source file
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Build {
            input,
            output,
            config,
        }) => build(input, output, config.as_deref())?,

        Some(Commands::Tokens { file }) => {
            let source = read_source(&file)?;
            let tokens = simplelang_core::tokenize(&source)
                .map_err(|e| report(&file, &source, &simplelang_core::Error::from(e)))?;
            for token in tokens {
                println!("{token}");
            }
        }

        Some(Commands::Ast { file }) => {
            let source = read_source(&file)?;
            let module =
                simplelang_core::parse(&source).map_err(|e| report(&file, &source, &e))?;
            println!("{module}");
        }

        Some(Commands::Check { file }) => {
            let source = read_source(&file)?;
            let summary = check(&file, &source).map_err(|e| report(&file, &source, &e))?;
            println!("{summary}");
        }

        None => build(None, None, None)?,
    }

    Ok(())
}

/// Install the tracing subscriber; `RUST_LOG` overrides the verbosity flag
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build(input: Option<PathBuf>, output: Option<PathBuf>, config: Option<&Path>) -> Result<()> {
    let project = match config {
        Some(path) => ProjectConfig::from_path(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => ProjectConfig::load_or_default(".").context("Failed to load simplelang.toml")?,
    };

    let input = input.unwrap_or(project.build.input);
    let output = output.unwrap_or(project.build.output);

    let go = transpile_file(&input, &project.emit)?;

    if let Some(dir) = output.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory '{}'", dir.display()))?;
    }
    std::fs::write(&output, go)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    tracing::info!(input = %input.display(), output = %output.display(), "wrote Go source");
    println!("{} -> {}", input.display(), output.display());
    Ok(())
}

fn transpile_file(path: &Path, emit: &EmitConfig) -> Result<String> {
    let source = read_source(path)?;
    simplelang_core::transpile_with_config(&source, emit).map_err(|e| report(path, &source, &e))
}

/// Run the whole pipeline and describe what was found
fn check(path: &Path, source: &str) -> simplelang_core::Result<String> {
    let module = simplelang_core::parse(source)?;
    Generator::new().emit(&module)?;
    Ok(format!(
        "{}: ok (package {}, {} functions)",
        path.display(),
        module.package_name().unwrap_or_default(),
        module.functions().count()
    ))
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))
}

/// Build a codespan diagnostic for a pipeline error
fn diagnostic(err: &simplelang_core::Error) -> Diagnostic<()> {
    let span = err.span();
    let mut diagnostic = Diagnostic::error().with_message(err.message());

    if !span.is_dummy() {
        diagnostic = diagnostic.with_labels(vec![Label::primary((), span.as_range())
            .with_message(format!("rejected by the {}", err.stage()))]);
    }
    if let Some(hint) = err.hint() {
        diagnostic = diagnostic.with_notes(vec![format!("hint: {hint}")]);
    }
    diagnostic
}

/// Write a pipeline error against its source text
fn render(
    writer: &mut dyn WriteColor,
    path: &Path,
    source: &str,
    err: &simplelang_core::Error,
) -> Result<()> {
    let file = SimpleFile::new(path.display().to_string(), source);
    term::emit(writer, &term::Config::default(), &file, &diagnostic(err))?;
    Ok(())
}

/// Print a pipeline error to stderr and turn it into the command's failure
fn report(path: &Path, source: &str, err: &simplelang_core::Error) -> anyhow::Error {
    let stderr = StandardStream::stderr(ColorChoice::Auto);
    if let Err(render_err) = render(&mut stderr.lock(), path, source, err) {
        tracing::warn!(error = %render_err, "could not render diagnostic");
        eprintln!("error: {err}");
    }
    anyhow::anyhow!("{} failed on '{}'", err.stage(), path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codespan_reporting::term::termcolor::Buffer;
    use tempfile::TempDir;

    #[test]
    fn build_writes_output_and_creates_directories() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("main.sl");
        let output = dir.path().join("out/nested/main.go");
        std::fs::write(&input, "package main\nprint(1 + 2)\n").unwrap();

        build(Some(input), Some(output.clone()), None).unwrap();

        let go = std::fs::read_to_string(output).unwrap();
        assert!(go.starts_with("package main\n"));
        assert!(go.contains("\tfmt.Println(1 + 2)\n"));
    }

    #[test]
    fn build_uses_config_emit_settings() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("app.sl");
        let output = dir.path().join("app.go");
        let config = dir.path().join("simplelang.toml");
        std::fs::write(&input, "package main\nlet x = 1\n").unwrap();
        std::fs::write(
            &config,
            format!(
                "[build]\ninput = {:?}\noutput = {:?}\n\n[emit]\nindent = {{ spaces = 2 }}\n",
                input.display().to_string(),
                output.display().to_string()
            ),
        )
        .unwrap();

        build(None, None, Some(&config)).unwrap();

        let go = std::fs::read_to_string(output).unwrap();
        assert_eq!(go, "package main\n\nfunc main() {\n  var x = 1\n}\n");
    }

    fn rendered(path: &str, source: &str) -> String {
        let err = simplelang_core::transpile(source).unwrap_err();
        let mut buffer = Buffer::no_color();
        render(&mut buffer, Path::new(path), source, &err).unwrap();
        String::from_utf8(buffer.into_inner()).unwrap()
    }

    #[test]
    fn build_failure_names_stage_and_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("bad.sl");
        std::fs::write(&input, "package main\nlet x = 007\n").unwrap();

        let err = build(Some(input), Some(dir.path().join("bad.go")), None).unwrap_err();
        let message = err.to_string();
        assert!(message.starts_with("lexer failed on"));
        assert!(message.contains("bad.sl"));
        assert!(!dir.path().join("bad.go").exists());
    }

    #[test]
    fn diagnostic_points_at_source() {
        let out = rendered("bad.sl", "package main\nlet x = 007\n");
        assert!(out.starts_with("error: octal notation is not supported: 007"));
        assert!(out.contains("bad.sl:2:9"));
        assert!(out.contains("let x = 007"));
        assert!(out.contains("^^^ rejected by the lexer"));
    }

    #[test]
    fn diagnostic_includes_hint() {
        let out = rendered("paren.sl", "package main\nlet x = (1 + 2\n");
        assert!(out.contains("paren.sl:2:"));
        assert!(out.contains("rejected by the parser"));
        assert!(out.contains("hint: unmatched '('"));
    }

    #[test]
    fn diagnostic_without_location_has_no_label() {
        let err = simplelang_core::transpile("").unwrap_err();
        assert!(err.span().is_dummy());
        let diagnostic = diagnostic(&err);
        assert!(diagnostic.labels.is_empty());
        assert_eq!(diagnostic.message, err.message());
    }

    #[test]
    fn check_summarizes_module() {
        let source = "package demo\nfn f() {\n}\nfn g() {\n}\nprint(1)\n";
        let summary = check(Path::new("demo.sl"), source).unwrap();
        assert_eq!(summary, "demo.sl: ok (package demo, 2 functions)");

        assert!(check(Path::new("bad.sl"), "print(1)\n").is_err());
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = build(
            Some(dir.path().join("nope.sl")),
            Some(dir.path().join("nope.go")),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }

    #[test]
    fn cli_defaults_to_build() {
        let cli = Cli::try_parse_from(["simplelang"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);

        let cli = Cli::try_parse_from(["simplelang", "-vv", "check", "main.sl"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Check { .. })));
        assert_eq!(cli.verbose, 2);
    }
}
