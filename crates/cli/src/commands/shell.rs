//! Interactive storefront session.
//!
//! Each input line is one UI interaction. Notices are printed as they would
//! pop up on the page; `show` prints the current markup of every fragment.
//!
//! ```text
//! > add "Caramel Macchiato" 150 img/caramel.png
//! > inc 1
//! > checkout
//! Order placed successfully!
//! Total: ₱300
//! ```

use std::io::Write;
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};

use coffeehub_core::LineItemId;
use coffeehub_storefront::animation::ScreenPoint;
use coffeehub_storefront::config::WidgetConfig;
use coffeehub_storefront::controllers::{
    LoginField, Modal, ProductControl, RowAction, SignupField, resolve_row_click,
};
use coffeehub_storefront::storage::{FileStorage, LocalStorage};
use coffeehub_storefront::{Notice, Storefront, UiEvent};

use super::CliError;

const HELP: &str = "\
Commands:
  search <query>                     echo a search
  add <name> <price> [img] [top left]  click an add-to-cart button
  inc|dec|rm <id>                    cart row controls
  click <class> <id>                 raw click inside #cart-items
  cart | open | close                toggle, open or close the cart panel
  checkout                           place the order
  login | signup                     header auth buttons
  close-modal|backdrop login|signup  dismiss a modal
  switch #login|#signup              switch-form link
  set <form>.<field> <value>         fill login.email, login.password, signup.name,
                                     signup.email, signup.password, signup.confirm
  submit login|signup                submit a form
  show                               print rendered fragments
  users                              list signed-up users
  wait <ms>                          let animations run
  help | quit";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Event(UiEvent),
    Show,
    Users,
    Wait(Duration),
    Help,
    Quit,
}

/// Errors in a shell line. Reported to the user; the session continues.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}`, try `help`")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unterminated quote")]
    UnterminatedQuote,
}

/// Run the session until EOF or `quit`.
///
/// # Errors
///
/// Returns `CliError` if storage cannot be opened or fails mid-session, or
/// if the terminal cannot be read or written.
pub async fn run(config: &WidgetConfig) -> Result<(), CliError> {
    let storage = FileStorage::open(&config.storage_path)?;
    tracing::info!(path = %storage.path().display(), "Starting storefront shell");
    let mut widget = Storefront::new(storage, config.animation)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut out = std::io::stdout();
    writeln!(out, "CoffeeHub storefront. Type `help` for commands.")?;

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => writeln!(out, "{HELP}")?,
            ShellCommand::Wait(duration) => tokio::time::sleep(duration).await,
            ShellCommand::Show => print_rendered(&mut out, &widget)?,
            ShellCommand::Users => {
                for user in widget.auth_mut().users()? {
                    writeln!(out, "{} <{}>", user.name, user.email)?;
                }
            }
            ShellCommand::Event(event) => handle_event(&mut out, &mut widget, event)?,
        }
    }

    Ok(())
}

/// Dispatch one event and print what the user would see.
fn handle_event<S: LocalStorage>(
    out: &mut impl Write,
    widget: &mut Storefront<S>,
    event: UiEvent,
) -> Result<(), CliError> {
    match widget.dispatch(event) {
        Ok(outcome) => {
            if let Some(notice) = outcome.notice {
                writeln!(out, "{}", notice.message)?;
            }
            if let Some(id) = outcome.line_item {
                let rendered = widget.render()?;
                writeln!(out, "[row {id}] {} | badge {}", rendered.cart.total, rendered.cart.badge)?;
            }
        }
        Err(e) if e.is_user_facing() => writeln!(out, "{}", Notice::from(&e).message)?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn print_rendered<S: LocalStorage>(
    out: &mut impl Write,
    widget: &Storefront<S>,
) -> Result<(), CliError> {
    let rendered = widget.render()?;
    writeln!(out, "<!-- #cart-badge -->\n{}", rendered.cart.badge)?;
    writeln!(out, "<!-- #cart-panel -->\n{}", rendered.cart.panel)?;
    writeln!(out, "<!-- header auth controls -->\n{}", rendered.auth_controls)?;
    writeln!(out, "<!-- modals -->\n{}", rendered.auth_modals)?;
    if !rendered.floating_images.trim().is_empty() {
        writeln!(out, "<!-- floating -->\n{}", rendered.floating_images)?;
    }
    Ok(())
}

/// Parse one shell line. Blank lines parse to `None`.
///
/// # Errors
///
/// Returns `ParseError` for unknown commands or bad arguments.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ParseError> {
    let tokens = tokenize(line)?;
    let Some((head, args)) = tokens.split_first() else {
        return Ok(None);
    };
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    let command = match (head.as_str(), args.as_slice()) {
        ("search", query) => ShellCommand::Event(UiEvent::Search {
            query: query.join(" "),
        }),
        ("add", [name, price, rest @ ..]) => {
            let (image, origin) = match rest {
                [] => ("", ScreenPoint::default()),
                [image] => (*image, ScreenPoint::default()),
                [image, top, left] => (*image, parse_point(top, left)?),
                _ => return Err(ParseError::Usage("add <name> <price> [img] [top left]")),
            };
            ShellCommand::Event(UiEvent::AddToCart(ProductControl::new(
                name, price, image, origin,
            )))
        }
        ("add", _) => return Err(ParseError::Usage("add <name> <price> [img] [top left]")),
        ("inc", [id]) => row_event(RowAction::Increase, id)?,
        ("dec", [id]) => row_event(RowAction::Decrease, id)?,
        ("rm", [id]) => row_event(RowAction::Remove, id)?,
        ("inc" | "dec" | "rm", _) => return Err(ParseError::Usage("inc|dec|rm <id>")),
        ("click", [class, id]) => {
            let (id, action) = resolve_row_click(class, Some(*id))
                .ok_or(ParseError::Usage("click increase|decrease|remove <id>"))?;
            ShellCommand::Event(UiEvent::CartRow { id, action })
        }
        ("cart", []) => ShellCommand::Event(UiEvent::ToggleCart),
        ("open", []) => ShellCommand::Event(UiEvent::OpenCart),
        ("close", []) => ShellCommand::Event(UiEvent::CloseCart),
        ("checkout", []) => ShellCommand::Event(UiEvent::Checkout),
        ("login", []) => ShellCommand::Event(UiEvent::LoginControl),
        ("signup", []) => ShellCommand::Event(UiEvent::SignupControl),
        ("close-modal", [which]) => ShellCommand::Event(UiEvent::CloseModal(parse_modal(which)?)),
        ("backdrop", [which]) => ShellCommand::Event(UiEvent::Backdrop(parse_modal(which)?)),
        ("switch", [href]) => ShellCommand::Event(UiEvent::SwitchForm(
            Modal::from_href(href).ok_or(ParseError::Usage("switch #login|#signup"))?,
        )),
        ("set", [target, value @ ..]) => parse_set(target, &value.join(" "))?,
        ("submit", ["login"]) => ShellCommand::Event(UiEvent::SubmitLogin),
        ("submit", ["signup"]) => ShellCommand::Event(UiEvent::SubmitSignup),
        ("submit", _) => return Err(ParseError::Usage("submit login|signup")),
        ("show", []) => ShellCommand::Show,
        ("users", []) => ShellCommand::Users,
        ("wait", [ms]) => ShellCommand::Wait(Duration::from_millis(
            ms.parse().map_err(|_| ParseError::Usage("wait <ms>"))?,
        )),
        ("help", _) => ShellCommand::Help,
        ("quit" | "exit", _) => ShellCommand::Quit,
        (other, _) => return Err(ParseError::UnknownCommand(other.to_owned())),
    };

    Ok(Some(command))
}

fn row_event(action: RowAction, id: &str) -> Result<ShellCommand, ParseError> {
    let id: LineItemId = id.parse().map_err(|_| ParseError::Usage("inc|dec|rm <id>"))?;
    Ok(ShellCommand::Event(UiEvent::CartRow { id, action }))
}

fn parse_modal(which: &str) -> Result<Modal, ParseError> {
    match which {
        "login" => Ok(Modal::Login),
        "signup" => Ok(Modal::Signup),
        _ => Err(ParseError::Usage("close-modal|backdrop login|signup")),
    }
}

fn parse_point(top: &str, left: &str) -> Result<ScreenPoint, ParseError> {
    let usage = || ParseError::Usage("add <name> <price> [img] [top left]");
    Ok(ScreenPoint {
        top: top.parse().map_err(|_| usage())?,
        left: left.parse().map_err(|_| usage())?,
    })
}

fn parse_set(target: &str, value: &str) -> Result<ShellCommand, ParseError> {
    let value = value.to_owned();
    let event = match target {
        "login.email" => UiEvent::LoginInput {
            field: LoginField::Email,
            value,
        },
        "login.password" => UiEvent::LoginInput {
            field: LoginField::Password,
            value,
        },
        "signup.name" => UiEvent::SignupInput {
            field: SignupField::Name,
            value,
        },
        "signup.email" => UiEvent::SignupInput {
            field: SignupField::Email,
            value,
        },
        "signup.password" => UiEvent::SignupInput {
            field: SignupField::Password,
            value,
        },
        "signup.confirm" => UiEvent::SignupInput {
            field: SignupField::Confirm,
            value,
        },
        _ => return Err(ParseError::Usage("set <form>.<field> <value>")),
    };
    Ok(ShellCommand::Event(event))
}

/// Split on whitespace, keeping double-quoted runs together.
fn tokenize(line: &str) -> Result<Vec<String>, ParseError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(ParseError::UnterminatedQuote);
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use coffeehub_core::Price;
    use coffeehub_storefront::config::AnimationConfig;
    use coffeehub_storefront::storage::MemoryStorage;

    use super::*;

    fn event(line: &str) -> UiEvent {
        match parse_line(line).unwrap().unwrap() {
            ShellCommand::Event(event) => event,
            other => panic!("expected event, got {other:?}"),
        }
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"add "Caramel Macchiato" 150"#).unwrap(),
            vec!["add", "Caramel Macchiato", "150"]
        );
        assert_eq!(tokenize(r#"set login.password """#).unwrap(), vec!["set", "login.password", ""]);
        assert_eq!(tokenize(r#"add "oops"#), Err(ParseError::UnterminatedQuote));
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse_line("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_add() {
        let UiEvent::AddToCart(control) = event(r#"add "Iced Latte" 12x img/iced.png 40 80.5"#)
        else {
            panic!("expected add");
        };
        assert_eq!(control.name, "Iced Latte");
        assert_eq!(control.price, Price::new(12));
        assert_eq!(control.image_ref, "img/iced.png");
        assert!((control.origin.left - 80.5).abs() < f64::EPSILON);

        assert!(matches!(
            parse_line("add Latte"),
            Err(ParseError::Usage(_))
        ));
    }

    #[test]
    fn test_parse_row_and_auth_commands() {
        assert_eq!(
            event("dec 4"),
            UiEvent::CartRow {
                id: LineItemId::new(4),
                action: RowAction::Decrease
            }
        );
        assert_eq!(
            event("click remove 2"),
            UiEvent::CartRow {
                id: LineItemId::new(2),
                action: RowAction::Remove
            }
        );
        assert_eq!(event("switch #signup"), UiEvent::SwitchForm(Modal::Signup));
        assert_eq!(event("backdrop login"), UiEvent::Backdrop(Modal::Login));
        assert_eq!(
            event("set signup.name Juan dela Cruz"),
            UiEvent::SignupInput {
                field: SignupField::Name,
                value: "Juan dela Cruz".to_owned()
            }
        );
        assert_eq!(event("submit login"), UiEvent::SubmitLogin);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_line("brew"),
            Err(ParseError::UnknownCommand("brew".to_owned()))
        );
        assert!(parse_line("inc one").is_err());
        assert!(parse_line("switch #cart").is_err());
        assert!(parse_line("set login.age 3").is_err());
    }

    #[test]
    fn test_handle_event_prints_notices() {
        let mut widget = Storefront::new(MemoryStorage::new(), AnimationConfig::default()).unwrap();
        let mut out = Vec::new();

        handle_event(&mut out, &mut widget, event("checkout")).unwrap();
        handle_event(&mut out, &mut widget, event("add Latte 120")).unwrap();
        handle_event(&mut out, &mut widget, event("add Latte 120")).unwrap();
        handle_event(&mut out, &mut widget, event("checkout")).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Your cart is empty!\n\
             [row 1] Total: ₱120 | badge 1\n\
             [row 1] Total: ₱240 | badge 2\n\
             Order placed successfully!\nTotal: ₱240\n"
        );
    }
}
