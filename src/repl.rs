//! Interactive simulation loop.

use crate::commands::{format_summary, format_validation};
use crate::config::Config;
use crate::session::Session;
use colored::Colorize;
use dfatrace_core::{Automaton, CoreError, Validation};
use dfatrace_render::{compact_label, prepare_with_theme, DotRenderer, Renderer, Theme};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config as EditorConfig, Editor};

const HELP_TEXT: &str = r#"
Every line is validated as an input string.

Available commands:
  :help                 Show this help
  :info                 Show the automaton summary
  :alphabet             Show the alphabet
  :empty                Validate the empty string
  :render               Render a diagram of the last trace
  :structure            Render the full automaton diagram
  :quit, :exit          Exit the session
"#;

/// State kept between lines of one simulation session.
pub struct Simulation<'a> {
    automaton: &'a Automaton,
    theme: Theme,
    renderer: DotRenderer,
    session: Session,
    last: Option<(String, Validation)>,
    runs: usize,
}

impl<'a> Simulation<'a> {
    pub fn new(automaton: &'a Automaton, config: &Config) -> Self {
        Self {
            automaton,
            theme: config.theme.clone(),
            renderer: config.output.renderer(),
            session: Session::start(&config.output),
            last: None,
            runs: 0,
        }
    }

    /// Handles one line. Returns `Ok(None)` when the session should end.
    pub fn execute_line(&mut self, line: &str) -> Result<Option<String>, Box<dyn std::error::Error>> {
        let Some(command) = line.strip_prefix(':') else {
            return Ok(Some(self.run_input(line)));
        };

        match command.trim().to_lowercase().as_str() {
            "help" | "h" | "?" => Ok(Some(HELP_TEXT.trim().to_string())),
            "quit" | "exit" | "q" => Ok(None),
            "info" => Ok(Some(format_summary(self.automaton))),
            "alphabet" => Ok(Some(compact_label(self.automaton.alphabet()))),
            "empty" => Ok(Some(self.run_input(""))),
            "structure" => {
                let graph = prepare_with_theme(self.automaton, None, &self.theme);
                let path = self
                    .renderer
                    .render(&graph, &self.session.structure_stem())?;
                Ok(Some(format!("{} {}", "Saved:".green(), path.display())))
            }
            "render" => {
                let Some((input, validation)) = &self.last else {
                    return Ok(Some(
                        "No trace yet, enter an input string first".yellow().to_string(),
                    ));
                };
                let graph = prepare_with_theme(self.automaton, Some(&validation.trace), &self.theme);
                let path = self.renderer.render(&graph, &self.session.trace_stem(input))?;
                Ok(Some(format!("{} {}", "Saved:".green(), path.display())))
            }
            other => Ok(Some(format!(
                "{}: unknown command ':{}', type ':help'",
                "Error".red(),
                other
            ))),
        }
    }

    fn run_input(&mut self, input: &str) -> String {
        match self.automaton.validate(input) {
            Ok(validation) => {
                self.runs += 1;
                let output = format_validation(input, &validation);
                self.last = Some((input.to_string(), validation));
                output
            }
            Err(e @ CoreError::SymbolsNotInAlphabet { .. }) => {
                format!("{}: {}", "Warning".yellow(), e)
            }
            Err(e) => format!("{}: {}", "Error".red(), e),
        }
    }

    pub fn runs(&self) -> usize {
        self.runs
    }
}

pub fn run(automaton: &Automaton, config: &Config, name: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("{} {}", "dfatrace".bold().cyan(), name.bold());
    println!("{}", format_summary(automaton));

    let mut simulation = Simulation::new(automaton, config);
    println!(
        "Diagrams are written to {}",
        simulation.session.dir().display()
    );

    // Create readline editor
    let editor_config = EditorConfig::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();
    let mut rl: Editor<(), DefaultHistory> = Editor::with_config(editor_config)?;

    // Load history
    let history_path = std::env::var("HOME")
        .map(|h| std::path::PathBuf::from(h).join(".dfatrace_history"))
        .unwrap_or_else(|_| ".dfatrace_history".into());
    let _ = rl.load_history(&history_path);

    println!("Type ':help' for available commands.\n");

    loop {
        let prompt = format!("[{}] {} ", simulation.runs() + 1, "input>".cyan());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match simulation.execute_line(line) {
                    Ok(Some(output)) => println!("{}\n", output),
                    Ok(None) => break,
                    Err(e) => println!("{}: {}\n", "Error".red(), e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                println!("{}: {:?}", "Error".red(), err);
                break;
            }
        }
    }

    // Save history
    let _ = rl.save_history(&history_path);
    println!("{}", "Exiting.".dimmed());

    Ok(())
}
