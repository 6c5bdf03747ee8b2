use anyhow::Context;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use weather_core::{Mode, Session, View, ViewOptions, qualifies};

use crate::render;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Replace the query text.
    Text(String),
    Submit,
    /// One-based suggestion position.
    Pick(usize),
    ToggleUnit,
    NewSearch,
    Help,
    Quit,
    Unknown(String),
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Input::Submit;
        }

        let Some(command) = trimmed.strip_prefix(':') else {
            return Input::Text(line.trim_end_matches(['\r', '\n']).to_string());
        };

        match command {
            "go" => Input::Submit,
            "u" | "unit" => Input::ToggleUnit,
            "new" => Input::NewSearch,
            "help" | "h" | "?" => Input::Help,
            "q" | "quit" => Input::Quit,
            other => match other.parse::<usize>() {
                Ok(n) if n > 0 => Input::Pick(n),
                _ => Input::Unknown(trimmed.to_string()),
            },
        }
    }
}

fn show(session: &Session, options: &ViewOptions) {
    print!("{}", render::view(&View::build(session, Utc::now(), options)));
}

/// Drive a session from stdin until `:q` or end of input.
pub async fn run(mut session: Session, options: ViewOptions) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", render::help());
    show(&session, &options);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    debug!("stdin closed");
                    break;
                };

                match Input::parse(&line) {
                    Input::Quit => break,
                    Input::Help => println!("{}", render::help()),
                    Input::Unknown(cmd) => println!("Unknown command {cmd}; try :help"),
                    Input::Text(text) => {
                        if session.mode() == Mode::Displaying {
                            println!("Use :new to start another search.");
                            continue;
                        }
                        session.set_query(text);
                    }
                    Input::Submit => {
                        if session.mode() == Mode::Displaying {
                            continue;
                        }
                        if qualifies(session.query()) {
                            render::loading();
                        }
                        // Failures are rendered from the session's error message.
                        let _ = session.search().await;
                        show(&session, &options);
                    }
                    Input::Pick(position) => {
                        if session.mode() == Mode::Displaying {
                            continue;
                        }
                        if position <= session.suggestions().len() {
                            render::loading();
                        }
                        let _ = session.select_suggestion(position - 1).await;
                        show(&session, &options);
                    }
                    Input::ToggleUnit => {
                        session.toggle_unit();
                        show(&session, &options);
                    }
                    Input::NewSearch => {
                        session.new_search();
                        show(&session, &options);
                    }
                }
            }
            Some(event) = session.suggestion_event() => {
                if session.apply_suggestions(event) {
                    show(&session, &options);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_query() {
        assert_eq!(Input::parse("New York\n"), Input::Text("New York".into()));
        assert_eq!(Input::parse("  Lon"), Input::Text("  Lon".into()));
    }

    #[test]
    fn blank_line_submits() {
        assert_eq!(Input::parse(""), Input::Submit);
        assert_eq!(Input::parse("   "), Input::Submit);
        assert_eq!(Input::parse(":go"), Input::Submit);
    }

    #[test]
    fn commands() {
        assert_eq!(Input::parse(":u"), Input::ToggleUnit);
        assert_eq!(Input::parse(":new"), Input::NewSearch);
        assert_eq!(Input::parse(":q"), Input::Quit);
        assert_eq!(Input::parse(":?"), Input::Help);
    }

    #[test]
    fn numeric_commands_pick() {
        assert_eq!(Input::parse(":1"), Input::Pick(1));
        assert_eq!(Input::parse(" :5 "), Input::Pick(5));
        assert_eq!(Input::parse(":0"), Input::Unknown(":0".into()));
        assert_eq!(Input::parse(":x"), Input::Unknown(":x".into()));
    }
}
