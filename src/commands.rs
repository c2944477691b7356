//! One-shot command execution.

use crate::config::Config;
use crate::session::Session;
use crate::Commands;
use colored::Colorize;
use dfatrace_core::{Automaton, CoreError, Validation};
use dfatrace_render::{compact_label, prepare_with_theme, Renderer};
use serde_json::{json, Value};

/// Executes a command and returns the formatted output.
pub fn execute(cmd: Commands, config: &Config) -> Result<String, Box<dyn std::error::Error>> {
    match cmd {
        Commands::Repl { .. } | Commands::New { .. } => unreachable!(),

        Commands::Check { file, inputs, json } => {
            let automaton = dfatrace_core::load_file(&file)?;
            let results: Vec<_> = inputs
                .iter()
                .map(|input| (input.as_str(), automaton.validate(input)))
                .collect();

            if json {
                let items: Vec<Value> = results
                    .iter()
                    .map(|(input, result)| result_json(input, result))
                    .collect();
                Ok(serde_json::to_string_pretty(&items)?)
            } else {
                Ok(results
                    .iter()
                    .map(|(input, result)| format_result(input, result))
                    .collect::<Vec<_>>()
                    .join("\n"))
            }
        }

        Commands::Render {
            file,
            input,
            output,
            format,
        } => {
            let automaton = dfatrace_core::load_file(&file)?;
            let validation = input
                .as_deref()
                .map(|input| automaton.validate(input))
                .transpose()?;

            let graph = prepare_with_theme(
                &automaton,
                validation.as_ref().map(|v| &v.trace),
                &config.theme,
            );

            let stem = match output {
                Some(path) => path,
                None => {
                    let session = Session::start(&config.output);
                    match &input {
                        Some(input) => session.trace_stem(input),
                        None => session.structure_stem(),
                    }
                }
            };

            let mut renderer = config.output.renderer();
            if let Some(format) = format {
                renderer.format = format;
            }
            let path = renderer.render(&graph, &stem)?;

            let mut out = String::new();
            if let (Some(input), Some(validation)) = (&input, &validation) {
                out.push_str(&format_validation(input, validation));
                out.push('\n');
            }
            out.push_str(&format!("{} {}", "Saved:".green(), path.display()));
            Ok(out)
        }

        Commands::Inspect { file, dsl } => {
            let automaton = dfatrace_core::load_file(&file)?;
            if dsl {
                Ok(dfatrace_core::to_dsl(&automaton)?.trim_end().to_string())
            } else {
                Ok(format_summary(&automaton))
            }
        }
    }
}

/// Formats one validation outcome for the terminal.
pub fn format_result(input: &str, result: &Result<Validation, CoreError>) -> String {
    match result {
        Ok(validation) => format_validation(input, validation),
        Err(e) => format!("{:?}: {} ({})", input, "ERROR".red(), e),
    }
}

pub fn format_validation(input: &str, validation: &Validation) -> String {
    let verdict = if validation.accepted() {
        validation.verdict.to_string().green()
    } else {
        validation.verdict.to_string().yellow()
    };
    format!(
        "{:?}: {}\n  {} {}",
        input,
        verdict,
        "trace:".dimmed(),
        validation.trace
    )
}

fn result_json(input: &str, result: &Result<Validation, CoreError>) -> Value {
    match result {
        Ok(validation) => json!({
            "input": input,
            "accepted": validation.accepted(),
            "verdict": validation.verdict,
            "trace": validation.trace,
        }),
        Err(e) => json!({
            "input": input,
            "error": e.to_string(),
            "code": e.error_code(),
        }),
    }
}

/// Summarizes an automaton's states, alphabet and transitions.
pub fn format_summary(automaton: &Automaton) -> String {
    let states = |set: &std::collections::BTreeSet<dfatrace_core::State>| {
        set.iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let finals = if automaton.finals().is_empty() {
        "(none)".dimmed().to_string()
    } else {
        states(automaton.finals())
    };

    [
        format!(
            "{} {} ({} symbols)",
            "Alphabet:".bold(),
            compact_label(automaton.alphabet()),
            automaton.alphabet().len()
        ),
        format!("{} {}", "States:".bold(), states(automaton.states())),
        format!("{} {}", "Initial:".bold(), automaton.initial().as_str().cyan()),
        format!("{} {}", "Final:".bold(), finals),
        format!(
            "{} {}",
            "Transitions:".bold(),
            automaton.transitions().len()
        ),
    ]
    .join("\n")
}
