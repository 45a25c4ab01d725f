use crate::client::ApiClient;
use crate::config::Config;
use crate::controller::SessionViewController;
use crate::state::AuthMode;
use crate::storage::TokenStore;
use crate::ui::TerminalView;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

type Controller = SessionViewController<TerminalView>;
type InputLines = Lines<BufReader<Stdin>>;

/// Wires the controller to the terminal and runs the command loop, the
/// event-loop analog of the browser page. One command is driven to
/// completion before the next line is read.
pub async fn run(config: Config) -> Result<(), std::io::Error> {
    let store = TokenStore::load(config.token_path.clone()).await;
    let client = ApiClient::new(config.api_base.clone());
    let mut controller = SessionViewController::new(client, store, TerminalView::new());
    controller.start().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt("> ")?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((head, tail)) => (head, tail.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "login" => {
                controller.open_login();
                run_auth_form(&mut controller, &mut lines).await?;
            }
            "register" => {
                controller.open_register();
                run_auth_form(&mut controller, &mut lines).await?;
            }
            "logout" => controller.logout().await,
            "tasks" => controller.refresh_tasks().await,
            "complete" => {
                if rest.is_empty() {
                    println!("usage: complete <id>");
                } else {
                    controller.complete_task(rest).await;
                }
            }
            "delete" => {
                if rest.is_empty() {
                    println!("usage: delete <id>");
                } else {
                    controller.delete_task(rest).await;
                }
            }
            "note" => {
                if rest.is_empty() {
                    println!("usage: note <text>");
                } else {
                    controller.view_mut().push_note(rest);
                }
            }
            "generate" => {
                controller.generate().await;
                // Unauthenticated generate opens the login modal instead.
                if controller.is_modal_open() {
                    run_auth_form(&mut controller, &mut lines).await?;
                }
            }
            "help" => print_help(),
            "quit" | "exit" => break,
            other => println!("unknown command: {other} (try help)"),
        }
    }

    Ok(())
}

/// Collects the modal form fields as prompted lines and submits them. A
/// failed submit leaves the modal open, so the form re-prompts; `cancel`
/// at any prompt (or EOF) closes the modal.
async fn run_auth_form(
    controller: &mut Controller,
    lines: &mut InputLines,
) -> Result<(), std::io::Error> {
    while controller.is_modal_open() {
        let Some(email) = read_field(lines, "email: ").await? else {
            controller.cancel_auth();
            break;
        };
        let Some(password) = read_field(lines, "password: ").await? else {
            controller.cancel_auth();
            break;
        };
        let name = if controller.modal_mode() == AuthMode::Register {
            match read_field(lines, "name: ").await? {
                Some(value) => value,
                None => {
                    controller.cancel_auth();
                    break;
                }
            }
        } else {
            String::new()
        };

        controller.submit_auth(&email, &password, &name).await;
    }

    Ok(())
}

/// Reads one form field; `None` means the user cancelled (or stdin ended).
async fn read_field(
    lines: &mut InputLines,
    label: &str,
) -> Result<Option<String>, std::io::Error> {
    prompt(label)?;
    match lines.next_line().await? {
        Some(value) if value.trim() == "cancel" => Ok(None),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

fn prompt(label: &str) -> Result<(), std::io::Error> {
    print!("{label}");
    std::io::stdout().flush()
}

fn print_help() {
    println!("commands:");
    println!("  login / register     open the auth form (enter 'cancel' to close)");
    println!("  logout               clear the session");
    println!("  tasks                refresh the task list");
    println!("  complete <id>        mark a task completed");
    println!("  delete <id>          delete a task");
    println!("  note <text>          append a line to the transcript");
    println!("  generate             turn the transcript into tasks");
    println!("  quit                 exit");
}
