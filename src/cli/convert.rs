use super::ui;
use crate::core::config::AppConfig;
use crate::core::{ConversionConstants, ConversionResult, convert_text, format_decimal};
use anyhow::Result;
use comfy_table::Cell;
use std::io::Write;
use tracing::debug;

/// Raw constant overrides given on the command line.
#[derive(Debug, Default, Clone)]
pub struct ConstantOverrides {
    pub rate: Option<String>,
    pub card_divisor: Option<String>,
    pub market_rate: Option<String>,
}

impl ConstantOverrides {
    /// Applies the overrides as a settings edit. Missing or invalid values
    /// keep the configured constant.
    pub fn apply(&self, current: &ConversionConstants) -> ConversionConstants {
        current.updated(
            self.rate.as_deref().unwrap_or(""),
            self.card_divisor.as_deref().unwrap_or(""),
            self.market_rate.as_deref().unwrap_or(""),
        )
    }
}

/// Renders the four results as a table followed by the constants in use.
pub fn render_results(
    result: &ConversionResult,
    constants: &ConversionConstants,
    config: &AppConfig,
) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Result"),
        ui::header_cell("Value"),
        ui::header_cell("Currency"),
    ]);

    for (i, (kind, value)) in result.entries().into_iter().enumerate() {
        let currency = match kind.currency(&config.source_currency, &config.target_currency) {
            Some(code) => Cell::new(code),
            None => ui::subtle_cell("-"),
        };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(kind.label()),
            ui::value_cell(&format_decimal(value)),
            currency,
        ]);
    }

    format!("{table}\n{}", render_constants(constants))
}

/// Renders the current constants as a one line footer.
pub fn render_constants(constants: &ConversionConstants) -> String {
    ui::style_text(
        &format!(
            "Current values: {} / {} / {}",
            constants.rate, constants.card_divisor, constants.market_rate
        ),
        ui::StyleType::Subtle,
    )
}

/// Renders each formatted value on its own line, as copied to a clipboard.
pub fn render_plain(result: &ConversionResult) -> String {
    result
        .entries()
        .iter()
        .map(|(_, value)| format_decimal(*value))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn run<W: Write>(
    out: &mut W,
    config: &AppConfig,
    amount: &str,
    overrides: &ConstantOverrides,
    plain: bool,
) -> Result<()> {
    let constants = overrides.apply(&config.constants);
    debug!(?constants, "Using constants");

    let result = convert_text(amount, &constants);
    let output = if plain {
        render_plain(&result)
    } else {
        render_results(&result, &constants, config)
    };
    writeln!(out, "{output}")?;
    Ok(())
}
