//! mermaid-retheme CLI
//!
//! Usage:
//!   mermaid-retheme [OPTIONS] [FILE]
//!
//! Options:
//!   -t, --theme <ID>            Theme identifier (see --list-themes)
//!   -c, --config <FILE>         Settings record (JSON)
//!       --svg                   Input is already rendered SVG
//!       --primary-cmd <CMD>     Enhanced renderer command (source on stdin, SVG on stdout)
//!       --secondary-cmd <CMD>   mermaid.js-style renderer command
//!       --linear-blend          Interpolate synthesized colors
//!   -l, --list-themes           List available themes
//!   -h, --help                  Print help

use std::cell::RefCell;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::rc::Rc;
use std::thread;

use clap::Parser;
use futures::executor::block_on;
use futures::future;

use mermaid_retheme::theme;
use mermaid_retheme::{
    BackendError, Binding, BlendMode, CodeBlockProcessor, Element, HostBindings, MermaidConfig,
    Palette, ProcessOutcome, RenderOutput, Settings, PRIMARY_BINDING, SECONDARY_BINDING,
};

#[derive(Parser)]
#[command(name = "mermaid-retheme")]
#[command(about = "Render Mermaid diagrams and re-theme the SVG with a named palette")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Theme identifier (overrides the settings file)
    #[arg(short, long)]
    theme: Option<String>,

    /// Settings record (JSON) with theme, useDefaultMermaid and blend
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treat the input as already rendered SVG and only re-theme it
    #[arg(long)]
    svg: bool,

    /// Enhanced renderer: reads Mermaid on stdin, palette JSON in $MERMAID_PALETTE, writes SVG
    #[arg(long, value_name = "CMD")]
    primary_cmd: Option<String>,

    /// Baseline renderer: reads Mermaid on stdin, theme in $MERMAID_THEME, writes SVG
    #[arg(long, value_name = "CMD")]
    secondary_cmd: Option<String>,

    /// Interpolate synthesized palette colors instead of switching at 0.5
    #[arg(long)]
    linear_blend: bool,

    /// List available themes
    #[arg(short, long)]
    list_themes: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list_themes {
        for (id, label) in theme::themes() {
            println!("{:<20} {}", id, label);
        }
        return;
    }

    let mut settings = match &cli.config {
        Some(path) => match Settings::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading settings '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    if let Some(theme) = &cli.theme {
        settings.theme = theme.clone();
    }
    if cli.linear_blend {
        settings.blend = BlendMode::Linear;
    }
    if !theme::contains(&settings.theme) {
        log::warn!(
            "Unknown theme '{}', using '{}'",
            settings.theme,
            theme::DEFAULT_THEME
        );
    }

    let input = match read_input(&cli.input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            std::process::exit(1);
        }
    };
    if input.trim().is_empty() {
        eprintln!("Error: No input provided");
        std::process::exit(1);
    }

    let bindings = build_bindings(&cli);
    let processor = CodeBlockProcessor::new(settings, bindings);
    let mut container = Element::new("div");

    match block_on(processor.process(&input, &mut container)) {
        ProcessOutcome::Rendered => println!("{}", container.inner_markup()),
        ProcessOutcome::Skipped => {
            eprintln!("useDefaultMermaid is set; leaving the diagram to the default renderer");
            print!("{}", input);
        }
    }
}

fn read_input(path: &Option<PathBuf>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn build_bindings(cli: &Cli) -> HostBindings {
    let mut bindings = HostBindings::new();

    if cli.svg {
        bindings.set(
            PRIMARY_BINDING,
            Binding::beautiful_mermaid(|source, _| future::ready(Ok(source))),
        );
    } else if let Some(cmd) = cli.primary_cmd.clone() {
        bindings.set(
            PRIMARY_BINDING,
            Binding::beautiful_mermaid(move |source: String, palette: Palette| {
                let result = serde_json::to_string(&palette)
                    .map_err(|e| BackendError::new(e.to_string()))
                    .and_then(|json| run_command(&cmd, &source, &[("MERMAID_PALETTE", json)]));
                future::ready(result)
            }),
        );
    }

    if let Some(cmd) = cli.secondary_cmd.clone() {
        let config = Rc::new(RefCell::new(None::<MermaidConfig>));
        let stored = Rc::clone(&config);
        bindings.set(
            SECONDARY_BINDING,
            Binding::mermaid(
                move |c: MermaidConfig| {
                    *stored.borrow_mut() = Some(c);
                    future::ready(Ok(()))
                },
                move |id: String, source: String| {
                    let theme = config
                        .borrow()
                        .as_ref()
                        .map(|c| c.theme.to_string())
                        .unwrap_or_else(|| "default".to_string());
                    let env = [("MERMAID_THEME", theme), ("MERMAID_RENDER_ID", id)];
                    future::ready(run_command(&cmd, &source, &env).map(|svg| RenderOutput { svg }))
                },
            ),
        );
    }

    bindings
}

/// Run `cmd` with `input` on stdin and return its stdout.
fn run_command(cmd: &str, input: &str, env: &[(&str, String)]) -> Result<String, BackendError> {
    let mut parts = cmd.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| BackendError::new("empty renderer command"))?;

    let mut child = Command::new(program)
        .args(parts)
        .envs(env.iter().map(|(k, v)| (*k, v.as_str())))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| BackendError::new(format!("failed to start `{}`: {}", cmd, e)))?;

    // stdin is written on its own thread while stdout is drained
    let writer = child.stdin.take().map(|mut stdin| {
        let input = input.to_string();
        thread::spawn(move || stdin.write_all(input.as_bytes()))
    });

    let output = child
        .wait_with_output()
        .map_err(|e| BackendError::new(format!("`{}` failed: {}", cmd, e)))?;
    if let Some(writer) = writer {
        let written = writer
            .join()
            .map_err(|_| BackendError::new(format!("stdin writer for `{}` panicked", cmd)))?;
        match written {
            // The renderer may exit without reading all of its input
            Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
                return Err(BackendError::new(format!("failed to write to `{}`: {}", cmd, e)));
            }
            _ => {}
        }
    }
    if !output.status.success() {
        return Err(BackendError::new(format!("`{}` exited with {}", cmd, output.status)));
    }

    String::from_utf8(output.stdout).map_err(|e| BackendError::new(e.to_string()))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_streams_large_input() {
        let input = "x".repeat(1 << 20);
        let output = run_command("cat", &input, &[]).unwrap();
        assert_eq!(output.len(), input.len());
    }

    #[test]
    fn test_run_command_passes_env() {
        let output = run_command("printenv MERMAID_THEME", "", &[("MERMAID_THEME", "dark".to_string())]).unwrap();
        assert_eq!(output.trim(), "dark");
    }

    #[test]
    fn test_run_command_failures() {
        assert!(run_command("", "x", &[]).is_err());
        assert!(run_command("false", "x", &[]).is_err());
    }
}
