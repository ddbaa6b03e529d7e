//! Interactive workspace session.
//!
//! One command per line. `paste` reads the contract from the following
//! lines up to a lone `.`; everything else is a single line.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use legal_lens::presentation::Severity;
use legal_lens::state::{Controls, Tab};
use legal_lens::{ContractBackend, Workspace};

use crate::render::{RenderOptions, View, render_workspace};

pub const HELP: &str = "\
commands:
  paste            read contract text until a line with a single '.', then submit it
  submit           submit the pasted text again
  file PATH        select a .txt or .pdf file
  upload           upload the selected file
  ask QUESTION     ask a question about the current document
  pick N           ask suggested question N
  tab summary|risks
  show             redraw the workspace
  status           document, selection and control state
  help
  quit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellCommand {
    Paste,
    Submit,
    File(PathBuf),
    Upload,
    Ask(String),
    Pick(usize),
    Tab(Tab),
    Show,
    Status,
    Help,
    Quit,
    Empty,
}

impl ShellCommand {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns a usage message for unknown commands or bad arguments.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match word.to_ascii_lowercase().as_str() {
            "" => Ok(Self::Empty),
            "paste" => Ok(Self::Paste),
            "submit" => Ok(Self::Submit),
            "file" if rest.is_empty() => Err("usage: file PATH".into()),
            "file" => Ok(Self::File(PathBuf::from(rest))),
            "upload" => Ok(Self::Upload),
            "ask" => Ok(Self::Ask(rest.to_owned())),
            "pick" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(Self::Pick(n - 1)),
                _ => Err("usage: pick N (N starts at 1)".into()),
            },
            "tab" => Tab::parse(rest).map(Self::Tab).ok_or_else(|| "usage: tab summary|risks".into()),
            "show" => Ok(Self::Show),
            "status" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("unknown command `{other}`; type `help`")),
        }
    }
}

/// Run the session until `quit` or end of input.
///
/// # Errors
///
/// Returns an I/O error if stdin or stdout fail.
pub async fn run<B>(workspace: &Workspace<B>, color: bool) -> io::Result<()>
where
    B: ContractBackend + ?Sized,
{
    let opts = RenderOptions { view: View::Tabbed, color };
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    writeln!(stdout, "Legal Lens — type `help` for commands")?;

    let mut line = String::new();
    loop {
        write!(stdout, "lens> ")?;
        stdout.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let command = match ShellCommand::parse(&line) {
            Ok(command) => command,
            Err(usage) => {
                writeln!(stdout, "{usage}")?;
                continue;
            }
        };

        let redraw = match command {
            ShellCommand::Empty => false,
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                writeln!(stdout, "{HELP}")?;
                false
            }
            ShellCommand::Paste => {
                writeln!(stdout, "paste contract text, end with a line containing only '.'")?;
                workspace.set_paste_text(read_block(&mut input)?);
                working(&mut stdout)?;
                workspace.submit_text().await;
                true
            }
            ShellCommand::Submit => {
                working(&mut stdout)?;
                workspace.submit_text().await;
                true
            }
            ShellCommand::File(path) => {
                writeln!(stdout, "selected {}", path.display())?;
                workspace.select_file(Some(path));
                false
            }
            ShellCommand::Upload => {
                working(&mut stdout)?;
                workspace.upload_file().await;
                true
            }
            ShellCommand::Ask(question) => {
                workspace.set_question(question);
                workspace.ask().await;
                true
            }
            ShellCommand::Pick(index) => {
                workspace.ask_suggested(index).await;
                true
            }
            ShellCommand::Tab(tab) => {
                workspace.select_tab(tab);
                true
            }
            ShellCommand::Show => true,
            ShellCommand::Status => {
                writeln!(stdout, "{}", workspace.with_state(status_line))?;
                false
            }
        };

        print_alerts(workspace, color);
        if redraw {
            writeln!(stdout, "{}", workspace.with_state(|state| render_workspace(state, opts)))?;
        }
    }
    Ok(())
}

/// Read lines up to a lone `.` or end of input.
fn read_block(input: &mut impl BufRead) -> io::Result<String> {
    let mut text = String::new();
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 || line.trim_end_matches(['\r', '\n']) == "." {
            break;
        }
        text.push_str(&line);
    }
    Ok(text)
}

fn working(stdout: &mut impl Write) -> io::Result<()> {
    writeln!(stdout, "Working… (indexing may take a few seconds)")
}

fn status_line(state: &legal_lens::state::WorkspaceState) -> String {
    let controls = Controls::from_state(state);
    let doc = state.doc_id().map_or("—", |id| id.as_str());
    let file = state
        .selected_file()
        .map_or_else(|| "none".to_owned(), |p| p.display().to_string());
    let high = state
        .risks()
        .iter()
        .filter(|r| Severity::from_weight(r.weight.as_deref()) == Severity::High)
        .count();
    format!(
        "document: {doc} | file: {file} | pasted: {} chars | risks: {} ({high} high) | tab: {} | ask enabled: {}",
        state.paste_text().chars().count(),
        state.risks().len(),
        state.tab().label(),
        controls.ask,
    )
}

/// Print and drain pending alerts to stderr; returns how many there were.
pub fn print_alerts<B: ContractBackend + ?Sized>(workspace: &Workspace<B>, color: bool) -> usize {
    use crossterm::style::Stylize;

    let alerts = workspace.take_alerts();
    for alert in &alerts {
        if color {
            eprintln!("{} {}", "!".red().bold(), alert.message);
        } else {
            eprintln!("! {}", alert.message);
        }
    }
    alerts.len()
}
