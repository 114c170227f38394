//! Interactive terminal front end for the translator widget.
//!
//! Plain lines are appended to the input text; lines starting with `:` are
//! widget actions. Translations run as spawned tasks so the prompt stays
//! responsive, and voice events are read from the session's channel.

use std::io::Write;
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use parla_core::error::ParlaError;
use parla_ui::{
    pair_options, CompletedTranslation, KeyChord, KeyScope, Notice, PendingTranslation,
    ShortcutMap, UiBinding,
};
use parla_voice::{CaptureEvent, EventReceiver};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Text(String),
    Go,
    Pair(String),
    Pairs,
    Voice,
    Clear,
    Key(String),
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_line(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix(':') else {
        return ReplCommand::Text(line.to_string());
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    match (name, arg) {
        ("go", "") | ("t", "") => ReplCommand::Go,
        ("pair", "") => ReplCommand::Pairs,
        ("pair", pair) => ReplCommand::Pair(pair.to_string()),
        ("voice", "") | ("v", "") => ReplCommand::Voice,
        ("clear", "") => ReplCommand::Clear,
        ("key", chord) if !chord.is_empty() => ReplCommand::Key(chord.to_string()),
        ("help", "") | ("h", "") => ReplCommand::Help,
        ("quit", "") | ("q", "") => ReplCommand::Quit,
        _ => ReplCommand::Unknown(trimmed.to_string()),
    }
}

pub fn print_help<W: Write>(out: &mut W, voice_available: bool) -> std::io::Result<()> {
    writeln!(out, "Type text to translate, then:")?;
    writeln!(out, "  :go              translate the input")?;
    writeln!(out, "  :pair [src|dst]  show or change the language pair")?;
    writeln!(out, "  :voice           start or stop the microphone")?;
    writeln!(out, "  :clear           clear input and output, stop the microphone")?;
    writeln!(out, "  :key <chord>     press a shortcut")?;
    writeln!(out, "  :quit            exit")?;
    writeln!(out, "Shortcuts:")?;
    for (chord, action) in ShortcutMap.describe() {
        writeln!(out, "  {:<16} {}", chord, action)?;
    }
    if !voice_available {
        writeln!(
            out,
            "Note: no speech recogniser is available here; :voice and Alt+M report it."
        )?;
    }
    Ok(())
}

/// Work started by the session that has not reached the view yet.
#[derive(Debug, Default)]
struct Outstanding {
    translations: usize,
    timers: usize,
}

impl Outstanding {
    fn is_empty(&self) -> bool {
        self.translations == 0 && self.timers == 0
    }
}

/// Channels and counters shared by the input loop and the exit drain.
struct Tasks {
    done_tx: mpsc::UnboundedSender<CompletedTranslation>,
    fire_tx: mpsc::UnboundedSender<()>,
    outstanding: Outstanding,
}

impl Tasks {
    fn translate(&mut self, pending: Option<PendingTranslation>) {
        let Some(pending) = pending else { return };
        let tx = self.done_tx.clone();
        self.outstanding.translations += 1;
        tokio::spawn(async move {
            let done = pending.run().await;
            if tx.send(done).is_err() {
                tracing::debug!("Session closed before translation finished");
            }
        });
    }

    fn schedule(&mut self, delay: Duration) {
        let tx = self.fire_tx.clone();
        self.outstanding.timers += 1;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(()).is_err() {
                tracing::debug!("Session closed before voice delay elapsed");
            }
        });
    }

    fn voice_event(&mut self, ui: &mut UiBinding, event: CaptureEvent) {
        if let Some(delay) = ui.apply_engine_event(event) {
            self.schedule(delay);
        }
    }

    fn fired(&mut self, ui: &mut UiBinding) {
        self.outstanding.timers = self.outstanding.timers.saturating_sub(1);
        self.translate(ui.begin_translation());
    }

    fn finished(&mut self, ui: &mut UiBinding, done: CompletedTranslation) {
        self.outstanding.translations = self.outstanding.translations.saturating_sub(1);
        ui.finish_translation(done);
    }
}

/// Run the interactive session until `:quit` or end of input.
///
/// Before returning, queued voice events are applied and every pending
/// voice delay and translation is waited for, so their outcome is printed.
pub async fn run<R, W>(
    mut ui: UiBinding,
    mut voice_events: EventReceiver,
    voice_available: bool,
    input: R,
    out: &mut W,
) -> Result<(), ParlaError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<CompletedTranslation>();
    let (fire_tx, mut fire_rx) = mpsc::unbounded_channel::<()>();
    let mut tasks = Tasks {
        done_tx,
        fire_tx,
        outstanding: Outstanding::default(),
    };
    let mut screen = Screen::new(&ui);

    print_help(out, voice_available)?;
    writeln!(out, "Language pair: {}", ui.selection())?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_line(&line) {
                    ReplCommand::Quit => break,
                    ReplCommand::Text(text) => {
                        let joined = if ui.input().is_empty() {
                            text
                        } else {
                            format!("{}\n{}", ui.input(), text)
                        };
                        ui.set_input(joined);
                    }
                    ReplCommand::Go => tasks.translate(ui.begin_translation()),
                    ReplCommand::Pair(pair) => {
                        if ui.select_pair(&pair) {
                            writeln!(out, "Language pair: {}", ui.selection())?;
                        } else {
                            let options = pair_options().join(", ");
                            writeln!(out, "Unknown pair '{}'. Options: {}", pair, options)?;
                        }
                    }
                    ReplCommand::Pairs => {
                        let options = pair_options().join(", ");
                        writeln!(out, "Language pair: {} (options: {})", ui.selection(), options)?;
                    }
                    ReplCommand::Voice => ui.click_voice(),
                    ReplCommand::Clear => ui.clear_and_stop(),
                    ReplCommand::Key(chord) => match chord.parse::<KeyChord>() {
                        Ok(chord) => tasks.translate(ui.handle_key(&chord, KeyScope::Input)),
                        Err(e) => writeln!(out, "{}", e)?,
                    },
                    ReplCommand::Help => print_help(out, voice_available)?,
                    ReplCommand::Unknown(cmd) => {
                        writeln!(out, "Unknown command '{}', try :help", cmd)?;
                    }
                }
            }
            Some(event) = voice_events.recv() => tasks.voice_event(&mut ui, event),
            Some(()) = fire_rx.recv() => tasks.fired(&mut ui),
            Some(done) = done_rx.recv() => tasks.finished(&mut ui, done),
        }
        screen.render(&mut ui, out)?;
    }

    loop {
        while let Ok(event) = voice_events.try_recv() {
            tasks.voice_event(&mut ui, event);
        }
        screen.render(&mut ui, out)?;
        if tasks.outstanding.is_empty() {
            break;
        }
        tokio::select! {
            Some(()) = fire_rx.recv() => tasks.fired(&mut ui),
            Some(done) = done_rx.recv() => tasks.finished(&mut ui, done),
            else => break,
        }
    }
    Ok(())
}

/// Prints what changed since the last render.
struct Screen {
    output: String,
    indicator: parla_ui::MicIndicator,
}

impl Screen {
    fn new(ui: &UiBinding) -> Self {
        Self {
            output: ui.output().to_string(),
            indicator: ui.indicator(),
        }
    }

    fn render<W: Write>(&mut self, ui: &mut UiBinding, out: &mut W) -> std::io::Result<()> {
        for notice in ui.take_notices() {
            match notice {
                Notice::Blocking(message) => writeln!(out, "!! {}", message)?,
                Notice::Console(message) => tracing::info!(notice = %message, "Console notice"),
            }
        }
        if ui.indicator() != self.indicator {
            self.indicator = ui.indicator();
            writeln!(out, "{} {}", self.indicator.label(), ui.placeholder())?;
        }
        if ui.output() != self.output {
            self.output = ui.output().to_string();
            if !self.output.is_empty() {
                writeln!(out, "=> {}", self.output)?;
            }
        }
        out.flush()
    }
}
