//! Interactive conversion session.
//!
//! Every line that is not a command replaces the amount and the results are
//! recomputed from scratch. Settings edits live only as long as the session.

use super::convert::{render_constants, render_results};
use super::ui;
use crate::core::config::AppConfig;
use crate::core::{
    ConversionConstants, ConversionResult, ResultKind, convert_text, format_decimal,
    update_constants,
};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::debug;

const HELP: &str = "\
Type an amount to convert it. Commands:
  :set <rate> <card_divisor> <market_rate>  edit constants (invalid fields are kept)
  :show                                     show current constants
  :copy <1-4>                               print the plain value of one result
  :help                                     show this help
  :quit                                     leave the session";

#[derive(Debug, PartialEq)]
enum Action<'a> {
    Amount(&'a str),
    Set(&'a str, &'a str, &'a str),
    Show,
    Copy(Option<usize>),
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_line(line: &str) -> Action<'_> {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return Action::Amount(line);
    };

    let mut parts = command.split_whitespace();
    match parts.next().unwrap_or("") {
        "set" => {
            let rate = parts.next().unwrap_or("");
            let card = parts.next().unwrap_or("");
            let market = parts.next().unwrap_or("");
            Action::Set(rate, card, market)
        }
        "show" => Action::Show,
        "copy" => Action::Copy(
            parts
                .next()
                .and_then(|n| n.parse::<usize>().ok())
                .filter(|n| (1..=ResultKind::ALL.len()).contains(n)),
        ),
        "help" => Action::Help,
        "quit" | "q" | "exit" => Action::Quit,
        _ => Action::Unknown(trimmed),
    }
}

/// State of one interactive session.
pub struct Session {
    config: AppConfig,
    constants: ConversionConstants,
    input: String,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        let constants = config.constants;
        Session {
            config,
            constants,
            input: String::new(),
        }
    }

    pub fn constants(&self) -> ConversionConstants {
        self.constants
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, raw: &str) {
        self.input = raw.to_string();
    }

    /// Replaces the constants with a settings edit of the current ones.
    pub fn apply_settings(&mut self, raw_rate: &str, raw_card_divisor: &str, raw_market_rate: &str) {
        self.constants = update_constants(&self.constants, raw_rate, raw_card_divisor, raw_market_rate);
        debug!(constants = ?self.constants, "Settings updated");
    }

    /// Results for the current input and constants.
    pub fn results(&self) -> ConversionResult {
        convert_text(&self.input, &self.constants)
    }

    /// Handles one line of input. Returns `None` when the session should end.
    pub fn handle_line(&mut self, line: &str) -> Option<String> {
        let output = match parse_line(line) {
            Action::Amount(raw) => {
                self.set_input(raw);
                render_results(&self.results(), &self.constants, &self.config)
            }
            Action::Set(rate, card, market) => {
                self.apply_settings(rate, card, market);
                format!(
                    "{}\n{}",
                    render_constants(&self.constants),
                    render_results(&self.results(), &self.constants, &self.config)
                )
            }
            Action::Show => render_constants(&self.constants),
            Action::Copy(Some(n)) => {
                let kind = ResultKind::ALL[n - 1];
                format_decimal(self.results().get(kind))
            }
            Action::Copy(None) => ui::style_text(
                "Usage: :copy <1-4>",
                ui::StyleType::Error,
            ),
            Action::Help => HELP.to_string(),
            Action::Quit => return None,
            Action::Unknown(command) => ui::style_text(
                &format!("Unknown command: {command} (try :help)"),
                ui::StyleType::Error,
            ),
        };
        Some(output)
    }

    /// Reads lines from `input` until EOF or `:quit`, writing every response.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "{}\n{}",
            ui::style_text("Price converter", ui::StyleType::Title),
            ui::style_text("Type :help for commands", ui::StyleType::Subtle)
        )?;

        for line in input.lines() {
            let line = line.context("Failed to read input")?;
            match self.handle_line(&line) {
                Some(output) => writeln!(out, "{output}")?,
                None => break,
            }
        }
        Ok(())
    }
}
