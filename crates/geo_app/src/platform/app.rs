use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use chrono::Utc;
use geo_core::{
    open, query_part, report_file_name, report_text, update, AppState, GenerationResult, Msg,
};
use geo_engine::GeneratorSettings;
use geo_logging::{bump_dispatch_count, geo_debug, geo_error, geo_info, geo_trace, geo_warn};

use super::commands::{parse_command, Command, HELP};
use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui;
use crate::error::AppError;

/// Everything the dispatch loop reacts to.
pub enum Inbox {
    Input(String),
    Dispatch(Msg),
    InputClosed,
}

pub fn run_app() -> Result<(), AppError> {
    let config = AppConfig::from_env();
    logging::initialize(config.log_destination);
    geo_info!("GEO Studio starting at ?{}", config.initial_query);

    let (inbox_tx, inbox_rx) = mpsc::channel::<Inbox>();
    let mut shell = open_shell(
        &config.initial_query,
        config.generator.clone(),
        config.report_dir.clone(),
        inbox_tx.clone(),
        io::stdout(),
    )?;

    spawn_input_reader(inbox_tx);

    shell.render()?;
    shell.say(HELP)?;
    shell.run(inbox_rx)?;
    geo_info!("GEO Studio exiting after {} dispatches", geo_logging::dispatch_count());
    Ok(())
}

/// Opens the workspace on `query`. The location starts as the link was
/// given, so a stale link is corrected before the first render.
fn open_shell<W: Write>(
    query: &str,
    settings: GeneratorSettings,
    report_dir: PathBuf,
    inbox: mpsc::Sender<Inbox>,
    out: W,
) -> Result<Shell<W>, AppError> {
    let (state, opening) = open(query);
    let mut effects = EffectRunner::new(settings, query_part(query), inbox)?;
    effects.enqueue(opening);
    Ok(Shell::new(state, effects, report_dir, out))
}

fn spawn_input_reader(inbox: mpsc::Sender<Inbox>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if inbox.send(Inbox::Input(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    geo_warn!("Reading input failed: {}", err);
                    break;
                }
            }
        }
        let _ = inbox.send(Inbox::InputClosed);
    });
}

struct Shell<W: Write> {
    state: AppState,
    effects: EffectRunner,
    report_dir: PathBuf,
    out: W,
}

impl<W: Write> Shell<W> {
    fn new(state: AppState, effects: EffectRunner, report_dir: PathBuf, out: W) -> Self {
        Self {
            state,
            effects,
            report_dir,
            out,
        }
    }

    /// Runs until `quit`, or until input ends and no generation is pending.
    fn run(&mut self, inbox: mpsc::Receiver<Inbox>) -> Result<(), AppError> {
        let mut input_closed = false;
        for item in inbox {
            match item {
                Inbox::Input(line) => match parse_command(&line) {
                    Ok(Some(Command::Quit)) => break,
                    Ok(Some(command)) => self.execute(command)?,
                    Ok(None) => {}
                    Err(err) => self.say(&err.to_string())?,
                },
                Inbox::Dispatch(msg) => self.dispatch(msg)?,
                Inbox::InputClosed => input_closed = true,
            }
            if input_closed && self.state.in_flight_ticket().is_none() {
                break;
            }
        }
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<(), AppError> {
        match command {
            Command::Dispatch(msg) => self.dispatch(msg),
            Command::Download => self.download_report(),
            Command::Show => self.render(),
            Command::Json => {
                let json = serde_json::to_string_pretty(&self.state.view())?;
                self.say(&json)
            }
            Command::Help => self.say(HELP),
            Command::Quit => Ok(()),
        }
    }

    fn dispatch(&mut self, msg: Msg) -> Result<(), AppError> {
        let pass = bump_dispatch_count();
        geo_trace!("Dispatching {:?}", msg);

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.effects.enqueue(effects);
        let was_dirty = state.consume_dirty();
        self.state = state;

        if self.effects.location() != self.state.url() {
            geo_warn!(
                "Location ?{} out of step with ?{}",
                self.effects.location(),
                self.state.url()
            );
        }
        if was_dirty {
            self.render()?;
        } else {
            geo_debug!("Dispatch #{} left the view unchanged", pass);
        }
        Ok(())
    }

    /// Writes the dashboard on screen to the report directory. A failed
    /// write is reported, the session goes on.
    fn download_report(&mut self) -> Result<(), AppError> {
        let today = Utc::now().date_naive();
        let (path, text) = match self.state.panel().result() {
            Some(GenerationResult::Dashboard(report)) => (
                self.report_dir.join(report_file_name(report, today)),
                report_text(report, today),
            ),
            _ => return self.say("Nothing to download, generate an insights dashboard first"),
        };
        match std::fs::write(&path, text) {
            Ok(()) => {
                geo_info!("Report written to {}", path.display());
                self.say(&format!("Report saved to {}", path.display()))
            }
            Err(err) => {
                geo_error!("Writing report {} failed: {}", path.display(), err);
                self.say(&format!("Could not save the report: {err}"))
            }
        }
    }

    fn render(&mut self) -> Result<(), AppError> {
        for line in ui::render::render(&self.state.view(), Utc::now()) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn say(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use geo_core::{Stage, ToolId};

    use super::*;

    type TestShell = (Shell<Vec<u8>>, mpsc::Sender<Inbox>, mpsc::Receiver<Inbox>);

    fn shell_at(query: &str, report_dir: PathBuf) -> TestShell {
        let (tx, rx) = mpsc::channel();
        let shell = open_shell(
            query,
            GeneratorSettings::immediate(),
            report_dir,
            tx.clone(),
            Vec::new(),
        )
        .unwrap();
        (shell, tx, rx)
    }

    fn shell() -> TestShell {
        shell_at("", PathBuf::from("."))
    }

    /// Feeds `lines` then closes input; returns once pending runs finish.
    fn run_script(
        shell: &mut Shell<Vec<u8>>,
        tx: mpsc::Sender<Inbox>,
        rx: mpsc::Receiver<Inbox>,
        lines: &[&str],
    ) {
        for line in lines {
            tx.send(Inbox::Input(line.to_string())).unwrap();
        }
        tx.send(Inbox::InputClosed).unwrap();
        shell.run(rx).unwrap();
    }

    fn output(shell: &Shell<Vec<u8>>) -> String {
        String::from_utf8(shell.out.clone()).unwrap()
    }

    #[test]
    fn scripted_session_waits_for_the_generator() {
        let (mut shell, tx, rx) = shell();
        run_script(&mut shell, tx, rx, &["describe Bakery in Tampines", "submit"]);

        assert_eq!(shell.state.navigation().stage, Stage::Output);
        assert!(matches!(
            shell.state.panel().result(),
            Some(GenerationResult::Prompts(_))
        ));
        assert_eq!(shell.effects.location(), "tool=prompt-recommender&stage=output");
        assert!(output(&shell).contains("Bakery in Tampines"));
    }

    #[test]
    fn handoff_through_commands() {
        let (mut shell, tx, rx) = shell();
        for line in ["describe Bakery", "submit"] {
            tx.send(Inbox::Input(line.to_string())).unwrap();
        }
        // Wait for the completion, then hand off.
        loop {
            match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                Inbox::Input(line) => {
                    let command = parse_command(&line).unwrap().unwrap();
                    shell.execute(command).unwrap();
                }
                Inbox::Dispatch(msg) => {
                    shell.dispatch(msg).unwrap();
                    break;
                }
                Inbox::InputClosed => unreachable!(),
            }
        }
        shell
            .execute(parse_command("use-in-rewriter").unwrap().unwrap())
            .unwrap();

        assert_eq!(shell.state.panel().tool(), ToolId::ContentRewriter);
        assert_eq!(shell.effects.location(), "tool=content-rewriter&stage=input");
        assert!(output(&shell).contains("Imported from the previous tool"));
    }

    #[test]
    fn stale_startup_link_is_corrected() {
        let (shell, _tx, _rx) =
            shell_at("?tool=insights-report&stage=expanded", PathBuf::from("."));
        assert_eq!(shell.state.panel().tool(), ToolId::InsightsReport);
        assert_eq!(shell.effects.location(), "tool=insights-report&stage=input");

        let (shell, _tx, _rx) = shell_at("", PathBuf::from("."));
        assert_eq!(shell.effects.location(), "tool=prompt-recommender&stage=input");
    }

    #[test]
    fn download_writes_the_dashboard_report() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, tx, rx) = shell_at("tool=insights-report", dir.path().to_path_buf());
        run_script(
            &mut shell,
            tx,
            rx,
            &[
                "industry Retail",
                "website www.courts.com.sg",
                "prompt 1 best appliance store",
                "submit",
            ],
        );
        shell.execute(Command::Download).unwrap();

        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        let path = dir.path().join(format!("GEO-Dashboard-Courts-{today}.txt"));
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("GEO INSIGHTS DASHBOARD REPORT\n"));
        assert!(text.contains("Industry: Retail"));
        assert!(text.contains("1. \"best appliance store\" - "));
        assert!(output(&shell).contains("Report saved to"));
    }

    #[test]
    fn download_without_a_dashboard_only_explains() {
        let dir = tempfile::tempdir().unwrap();
        let (mut shell, _tx, _rx) = shell_at("", dir.path().to_path_buf());
        shell.execute(Command::Download).unwrap();
        assert!(output(&shell).contains("Nothing to download"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn failed_report_write_keeps_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir");
        let (mut shell, tx, rx) = shell_at("tool=insights-report", missing);
        run_script(
            &mut shell,
            tx,
            rx,
            &[
                "industry Retail",
                "website courts.com.sg",
                "prompt 1 best appliance store",
                "submit",
            ],
        );
        shell.execute(Command::Download).unwrap();
        assert!(output(&shell).contains("Could not save the report"));
        assert_eq!(shell.state.navigation().stage, Stage::Output);
    }

    #[test]
    fn bad_commands_are_reported_not_fatal() {
        let (mut shell, tx, rx) = shell();
        tx.send(Inbox::Input("launch".to_string())).unwrap();
        tx.send(Inbox::Input("quit".to_string())).unwrap();
        shell.run(rx).unwrap();
        assert!(output(&shell).contains("unknown command `launch`"));
    }
}
