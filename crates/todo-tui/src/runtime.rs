use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use std::time::Duration;

use todo_core::Action;

use crate::input::handle_key;
use crate::render::render;
use crate::ui::{App, InputMode, Tui};

pub(crate) async fn run_app(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let mut event_stream = EventStream::new();

    // Regular tick: drains fetch results and expires the "adding" flag
    let mut tick_interval = tokio::time::interval(Duration::from_millis(50));

    app.start();

    while app.running {
        terminal.draw(|f| render(f, app))?;

        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                            if app.pending_quit {
                                app.quit();
                            } else {
                                app.pending_quit = true;
                            }
                        } else {
                            app.pending_quit = false;
                            handle_key(app, key);
                        }
                    }
                    Some(Ok(Event::Paste(text))) => {
                        if app.input_mode == InputMode::Editing {
                            app.paste(&text);
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "terminal event error");
                    }
                    None => app.quit(),
                }
            }

            _ = tick_interval.tick() => {
                app.drain_data_changes();
                app.dispatch(Action::Tick);
            }
        }
    }

    Ok(())
}
