mod debug_report;

use ruleseg::{Options, SegmentKind, segment_verbose_with};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RULESEG_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let opts = Options { kind: config.kind, suppressions: config.suppress, max_segments: config.max_segments };
    let res = segment_verbose_with(&config.input, &opts);
    debug_report::print_run(&res, config.color);
}

struct CliConfig {
    input: String,
    kind: SegmentKind,
    suppress: bool,
    max_segments: Option<usize>,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut kind = SegmentKind::default();
    let mut suppress = false;
    let mut max_segments = None;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1).peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("ruleseg {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--suppress" => suppress = true,
            "--kind" | "-k" => {
                let value = args.next().ok_or_else(|| "error: --kind expects a value".to_string())?;
                kind = parse_kind(&value)?;
            }
            "--max" => {
                let value = args.next().ok_or_else(|| "error: --max expects a value".to_string())?;
                max_segments = Some(parse_max(&value)?);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value);
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.is_empty() {
                    if input.is_some() {
                        return Err("error: input provided multiple times".to_string());
                    }
                    input = Some(rest);
                }
                break;
            }
            _ if arg.starts_with("--kind=") => {
                kind = parse_kind(arg.trim_start_matches("--kind="))?;
            }
            _ if arg.starts_with("--max=") => {
                max_segments = Some(parse_max(arg.trim_start_matches("--max="))?);
            }
            _ if arg.starts_with("--input=") => {
                let value = arg.trim_start_matches("--input=");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(value.to_string());
            }
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                if input.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input = Some(rest);
                break;
            }
        }
    }

    let input = match input {
        Some(value) => value,
        None => read_stdin_input()?,
    };

    if input.is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, kind, suppress, max_segments, color })
}

fn parse_kind(value: &str) -> Result<SegmentKind, String> {
    SegmentKind::from_name(value).ok_or_else(|| {
        format!("error: invalid --kind '{value}' (expected grapheme, word, sentence, line or ascii-word)")
    })
}

fn parse_max(value: &str) -> Result<usize, String> {
    value.parse().map_err(|_| format!("error: invalid --max '{value}' (expected a non-negative integer)"))
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "ruleseg {version}

Rule-based text segmentation CLI.

Usage:
  ruleseg [OPTIONS] [--] <input...>
  ruleseg [OPTIONS] --input <text>

Options:
  -k, --kind <kind>          Rule set: grapheme, word, sentence, line or
                             ascii-word. Default: word
  -i, --input <text>         Input text to segment. If omitted, reads remaining
                             args or stdin when no args are provided.
  --suppress                 Suppress sentence breaks after abbreviations
                             (sentence rules only).
  --max <n>                  Stop after n segments.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}                Log filter (e.g. debug, ruleseg=trace).

Exit codes:
  0  Success.
  1  Internal error.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
