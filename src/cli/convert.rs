use super::ui;
use crate::core::widget::{ConverterWidget, Side};
use crate::core::{ErrorKind, RateProvider};
use anyhow::Result;
use tracing::debug;

/// Arguments of a one-shot conversion. Unset fields keep the widget defaults.
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub amount: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOutput {
    pub message: String,
    pub error: Option<ErrorKind>,
    pub amount_corrected: bool,
    pub date: Option<String>,
}

pub async fn run(
    widget: &mut ConverterWidget,
    provider: &dyn RateProvider,
    args: &ConvertArgs,
) -> Result<()> {
    let output = convert(widget, provider, args).await?;
    let theme = widget.theme();

    if output.amount_corrected {
        println!(
            "{}",
            ui::style_text(
                &format!("Amount corrected to {}", widget.amount_input()),
                ui::StyleType::Subtle,
                theme
            )
        );
    }
    println!(
        "{}",
        ui::message_line(&output.message, output.error.is_some(), theme)
    );
    if let Some(date) = &output.date {
        println!(
            "{}",
            ui::style_text(&format!("Rates as of {date}"), ui::StyleType::Subtle, theme)
        );
    }
    Ok(())
}

/// Applies the arguments to the widget and runs one conversion.
///
/// Unknown currency codes fail before any request is made.
pub async fn convert(
    widget: &mut ConverterWidget,
    provider: &dyn RateProvider,
    args: &ConvertArgs,
) -> Result<ConvertOutput> {
    if let Some(from) = &args.from {
        widget.select(Side::From, from)?;
    }
    if let Some(to) = &args.to {
        widget.select(Side::To, to)?;
    }
    if let Some(amount) = &args.amount {
        widget.set_amount(amount.as_str());
    }

    let pending = widget.begin_conversion();
    let amount_corrected = pending.request().amount.was_corrected();
    debug!(request = ?pending.request(), "Starting conversion");

    let pb = ui::new_spinner(&format!(
        "Fetching {} rates...",
        pending.request().from
    ));
    let outcome = pending.resolve(provider).await;
    pb.finish_and_clear();

    let error = outcome.as_ref().err().map(|e| e.kind());
    let date = outcome.as_ref().ok().and_then(|r| r.date.clone());
    let message = widget.apply(&outcome).to_string();

    Ok(ConvertOutput {
        message,
        error,
        amount_corrected,
        date,
    })
}
