use super::ui;
use crate::core::RateProvider;
use crate::core::widget::{ConverterWidget, Side};
use anyhow::{Result, anyhow};
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP: &str = "\
Commands:
  from <CODE>     select the source currency
  to <CODE>       select the target currency
  amount <VALUE>  set the amount
  convert         convert the amount
  swap            swap source and target
  theme           toggle light/dark theme
  list            list available currencies
  show            show the current state
  help            show this help
  quit            leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    From(String),
    To(String),
    Amount(String),
    Convert,
    Swap,
    Theme,
    List,
    Show,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };
        let required = |usage: &str| {
            if arg.is_empty() {
                Err(anyhow!("Usage: {}", usage))
            } else {
                Ok(arg.to_string())
            }
        };

        match name.to_lowercase().as_str() {
            "from" => Ok(ShellCommand::From(required("from <CODE>")?)),
            "to" => Ok(ShellCommand::To(required("to <CODE>")?)),
            "amount" => Ok(ShellCommand::Amount(arg.to_string())),
            "convert" | "c" => Ok(ShellCommand::Convert),
            "swap" => Ok(ShellCommand::Swap),
            "theme" => Ok(ShellCommand::Theme),
            "list" => Ok(ShellCommand::List),
            "show" => Ok(ShellCommand::Show),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" | "q" => Ok(ShellCommand::Quit),
            _ => Err(anyhow!("Unknown command: {}. Type 'help' for commands.", name)),
        }
    }
}

/// Interactive converter on stdin/stdout.
pub async fn run(widget: &mut ConverterWidget, provider: &dyn RateProvider) -> Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    let mut output = std::io::stdout();
    run_with(widget, provider, input, &mut output).await
}

pub async fn run_with<R, W>(
    widget: &mut ConverterWidget,
    provider: &dyn RateProvider,
    mut input: R,
    output: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(output, "{}", ui::render_widget(widget))?;

    let mut buf = Vec::new();
    loop {
        write!(
            output,
            "{} ",
            ui::style_text(">", ui::StyleType::Prompt, widget.theme())
        )?;
        output.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        // Undecodable bytes become U+FFFD instead of ending the session
        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            continue;
        }

        match line.parse::<ShellCommand>() {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => execute(widget, provider, command, output).await?,
            Err(e) => writeln!(
                output,
                "{}",
                ui::style_text(&e.to_string(), ui::StyleType::Error, widget.theme())
            )?,
        }
    }

    writeln!(output)?;
    Ok(())
}

async fn execute<W: Write>(
    widget: &mut ConverterWidget,
    provider: &dyn RateProvider,
    command: ShellCommand,
    output: &mut W,
) -> Result<()> {
    debug!(?command, "Shell command");
    let theme = widget.theme();
    match command {
        ShellCommand::From(code) => select(widget, Side::From, &code, output)?,
        ShellCommand::To(code) => select(widget, Side::To, &code, output)?,
        ShellCommand::Amount(text) => {
            widget.set_amount(text);
            writeln!(output, "Amount: {}", widget.amount_input())?;
        }
        ShellCommand::Convert => {
            let pending = widget.begin_conversion();
            if pending.request().amount.was_corrected() {
                writeln!(
                    output,
                    "{}",
                    ui::style_text("Amount corrected to 1", ui::StyleType::Subtle, theme)
                )?;
            }
            let pb = ui::new_spinner("Fetching rates...");
            let outcome = pending.resolve(provider).await;
            pb.finish_and_clear();
            let message = widget.apply(&outcome).to_string();
            writeln!(
                output,
                "{}",
                ui::message_line(&message, outcome.is_err(), theme)
            )?;
        }
        ShellCommand::Swap => {
            widget.swap();
            writeln!(
                output,
                "{} -> {}",
                widget.selected(Side::From),
                widget.selected(Side::To)
            )?;
        }
        ShellCommand::Theme => {
            let theme = widget.toggle_theme();
            writeln!(output, "Theme: {} {}", theme, theme.icon())?;
        }
        ShellCommand::List => {
            writeln!(output, "{}", super::currencies::build_table(widget))?;
        }
        ShellCommand::Show => {
            writeln!(output, "{}", ui::render_widget(widget))?;
        }
        ShellCommand::Help => {
            writeln!(output, "{HELP}")?;
        }
        ShellCommand::Quit => {}
    }
    Ok(())
}

fn select<W: Write>(
    widget: &mut ConverterWidget,
    side: Side,
    code: &str,
    output: &mut W,
) -> Result<()> {
    match widget.select(side, code) {
        Ok(()) => writeln!(
            output,
            "{:?}: {} {}",
            side,
            widget.selected(side),
            widget.flag_url(side)
        )?,
        Err(e) => writeln!(
            output,
            "{}",
            ui::style_text(&e.to_string(), ui::StyleType::Error, widget.theme())
        )?,
    }
    Ok(())
}
