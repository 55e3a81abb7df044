use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use chrono::{DateTime, Local};
use newsdesk_core::{update, AppState, InFlight, Msg};
use newsdesk_logging::{desk_debug, desk_info};

use super::config::{load_settings, Cli};
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{parse_command, Command, HELP};
use super::ui::render::render;

/// Everything the dispatcher reacts to, from stdin or from the engine.
pub enum Inbox {
    Command(Command),
    Invalid(String),
    Msg(Msg),
    /// Stdin closed.
    Closed,
}

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    let settings = load_settings(cli.config.as_deref())
        .context("loading settings")?
        .with_overrides(&cli);
    logging::initialize(settings.log_destination, settings.log_level());
    desk_info!("Starting newsdesk with {:?}", settings);

    let (inbox_tx, inbox_rx) = mpsc::channel::<Inbox>();
    let runner = EffectRunner::new(settings.client_settings(), inbox_tx.clone())
        .context("starting search engine")?;
    spawn_stdin_reader(inbox_tx)?;

    let mut dispatcher = Dispatcher {
        state: AppState::with_page_size(settings.page_size),
        runner,
        last_refresh: None,
        out: io::stdout(),
    };
    dispatcher.print(HELP)?;

    for event in inbox_rx {
        match event {
            Inbox::Command(Command::Quit) | Inbox::Closed => break,
            Inbox::Command(Command::Help) => dispatcher.print(HELP)?,
            Inbox::Command(command) => {
                let msgs = command.into_msgs(dispatcher.state.sort_spec());
                for msg in msgs {
                    dispatcher.dispatch(msg)?;
                }
            }
            Inbox::Invalid(reason) => dispatcher.print(&reason)?,
            Inbox::Msg(msg) => dispatcher.dispatch(msg)?,
        }
    }

    desk_info!("Shutting down");
    Ok(())
}

fn spawn_stdin_reader(tx: mpsc::Sender<Inbox>) -> io::Result<()> {
    thread::Builder::new()
        .name("newsdesk-stdin".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                let event = match parse_command(&line) {
                    Ok(command) => Inbox::Command(command),
                    Err(reason) => Inbox::Invalid(reason),
                };
                if tx.send(event).is_err() {
                    return;
                }
            }
            let _ = tx.send(Inbox::Closed);
        })?;
    Ok(())
}

struct Dispatcher<W: Write> {
    state: AppState,
    runner: EffectRunner,
    last_refresh: Option<DateTime<Local>>,
    out: W,
}

impl<W: Write> Dispatcher<W> {
    fn dispatch(&mut self, msg: Msg) -> io::Result<()> {
        if completes_refresh(&self.state, &msg) {
            self.last_refresh = Some(Local::now());
        }

        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);

        if was_dirty {
            let lines = render(&self.state.view(), self.last_refresh.as_ref());
            desk_debug!("Rendering {} lines", lines.len());
            writeln!(self.out)?;
            for line in lines {
                writeln!(self.out, "{line}")?;
            }
            self.out.flush()?;
        }
        Ok(())
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}

/// True when `msg` is the successful answer to the refresh in flight.
fn completes_refresh(state: &AppState, msg: &Msg) -> bool {
    match (state.in_flight(), msg) {
        (
            Some(InFlight::Refresh { id }),
            Msg::CorpusRefreshed {
                request_id,
                result: Ok(_),
            },
        ) => id == request_id,
        _ => false,
    }
}
