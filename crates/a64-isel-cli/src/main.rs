use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

use a64_isel::{Error, MachineFunction, SelectOptions, SelectionReport};

#[derive(Parser)]
#[command(name = "a64-isel")]
#[command(about = "AArch64 instruction selector for generic machine IR")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Select {
        #[arg(help = "Input file with one or more functions in textual machine IR")]
        input: PathBuf,

        #[arg(short, long, help = "Output file (defaults to stdout)")]
        output: Option<PathBuf>,

        #[arg(long, help = "Keep going after a rejection and report every failure")]
        all_failures: bool,

        #[arg(long, help = "Skip verification of the selected functions")]
        no_verify: bool,

        #[arg(long, help = "Print a JSON report instead of the selected IR")]
        json: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Select {
            input,
            output,
            all_failures,
            no_verify,
            json,
        } => {
            let text = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let mut funcs = a64_isel::parse_module(&text)
                .with_context(|| format!("Failed to parse {}", input.display()))?;

            let options = SelectOptions {
                report_all_failures: all_failures,
                verify: !no_verify,
            };

            let mut reports = Vec::with_capacity(funcs.len());
            let mut failed = 0usize;
            for func in &mut funcs {
                match a64_isel::select_function(func, &options) {
                    Ok(report) => reports.push(report),
                    Err(Error::Unselectable { function, failures }) => {
                        for failure in &failures {
                            eprintln!("error: @{function}: {failure}");
                        }
                        failed += 1;
                    }
                    Err(e) => {
                        eprintln!("error: {e}");
                        failed += 1;
                    }
                }
            }
            if failed > 0 {
                bail!("{failed} of {} function(s) could not be selected", funcs.len());
            }

            let rendered = if json {
                let report: Vec<Value> = funcs
                    .iter()
                    .zip(&reports)
                    .map(|(func, report)| function_report(func, *report))
                    .collect();
                serde_json::to_string_pretty(&report).context("Failed to render JSON report")?
            } else {
                funcs
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            write_output(output.as_deref(), &rendered)?;

            for (func, report) in funcs.iter().zip(&reports) {
                tracing::info!(
                    function = %func.name,
                    selected = report.selected,
                    already_selected = report.already_selected,
                    "selected"
                );
            }
        }
    }

    Ok(())
}

fn function_report(func: &MachineFunction, report: SelectionReport) -> Value {
    let instrs: Vec<String> = func.instrs().map(ToString::to_string).collect();
    let classes: serde_json::Map<String, Value> = func
        .regs
        .iter()
        .map(|(vreg, data)| {
            let class = data.class.map_or(Value::Null, |c| json!(c.name()));
            (vreg.to_string(), class)
        })
        .collect();
    json!({
        "name": func.name,
        "selected": report.selected,
        "already_selected": report.already_selected,
        "instructions": instrs,
        "classes": classes,
    })
}

fn write_output(path: Option<&Path>, text: &str) -> Result<()> {
    match path {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("Failed to write output to {}", path.display())),
        None => {
            print!("{text}");
            Ok(())
        }
    }
}
