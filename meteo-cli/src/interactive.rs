use anyhow::Context;
use inquire::{CustomUserError, InquireError, Text};
use meteo_core::{Config, SearchOutcome, Session, Units, provider_from_config};

use crate::render;

const HELP: &str = "\
Type a place name to search, or one of:
  :units     switch between metric and imperial
  :day N     show hourly forecast for day N of the daily list
  :retry     repeat the last search
  :history   list recent searches
  :help      show this message
  :quit      leave
";

/// A parsed line of input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Search(&'a str),
    ToggleUnits,
    Day(usize),
    Retry,
    History,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Input::Search(line);
    };

    let mut parts = command.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("units" | "u"), None) => Input::ToggleUnits,
        (Some("day" | "d"), Some(n)) => n.parse().map(Input::Day).unwrap_or(Input::Unknown(line)),
        (Some("retry" | "r"), None) => Input::Retry,
        (Some("history" | "h"), None) => Input::History,
        (Some("help" | "?"), None) => Input::Help,
        (Some("quit" | "q" | "exit"), None) => Input::Quit,
        _ => Input::Unknown(line),
    }
}

pub async fn run(config: &Config) -> anyhow::Result<()> {
    let provider = provider_from_config(config).context("Failed to set up weather provider")?;
    let mut session = Session::new(provider, Units::for_system(config.units));

    print!("{HELP}");

    loop {
        let recent = session.history().to_vec();
        let suggester = move |input: &str| -> Result<Vec<String>, CustomUserError> {
            let needle = input.to_lowercase();
            Ok(recent.iter().filter(|q| q.to_lowercase().contains(&needle)).cloned().collect())
        };

        let line = match Text::new("Search:").with_autocomplete(suggester).prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read input"),
        };

        match parse_input(&line) {
            Input::Search(query) => {
                let outcome = session.search(query).await;
                report(&session, &outcome);
            }
            Input::ToggleUnits => {
                session.toggle_units();
                println!("Units: {}", session.units().system);
                print!("{}", render::session(&session));
            }
            Input::Day(index) => {
                if session.select_day_index(index) {
                    print!("{}", render::session(&session));
                } else {
                    println!("No forecast day {index}.");
                }
            }
            Input::Retry => match session.retry().await {
                Some(outcome) => report(&session, &outcome),
                None => println!("Nothing to retry yet."),
            },
            Input::History => print!("{}", render::history(session.history())),
            Input::Help => print!("{HELP}"),
            Input::Quit => break,
            Input::Unknown(text) => println!("Unknown command '{text}'. Type :help for options."),
        }
    }

    Ok(())
}

fn report(session: &Session, outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::Ignored => {}
        SearchOutcome::Loaded { .. } => print!("{}", render::session(session)),
        SearchOutcome::NoResults => println!("No results found."),
        SearchOutcome::Failed { message } => {
            println!("Something went wrong: {message}\nType :retry to try again.")
        }
    }
}
