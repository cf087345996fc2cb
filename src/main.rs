use std::io::{self, BufRead, Write};

use anyhow::Context;
use chrono::Local;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tumba_bistro::{
    admin::{catalog, AdminDashboard, DeleteOutcome, MSG_INVALID_CREDENTIALS},
    cli::{Command, Mode, ADMIN_HELP, BOOKING_HELP},
    config::Config,
    menu::{self, MenuFilter},
    models::{Dish, LoginRequest, Table},
    services::Credential,
    wizard::{
        steps::{confirmation, table_selection},
        BookingApp, Step,
    },
    AppState,
};

type Lines<'a> = io::Lines<io::StdinLock<'a>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env().context("invalid configuration")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    info!(
        environment = %config.app.environment,
        api = %config.api.base_url,
        "Starting {} front end",
        config.app.restaurant_name
    );

    let mode = Mode::from_args(std::env::args().skip(1)).map_err(anyhow::Error::msg)?;
    let state = AppState::new(config).context("failed to set up the API client")?;

    match mode {
        Mode::Booking => run_booking(&state).await,
        Mode::Admin => run_admin(&state).await,
        Mode::Menu(args) => run_menu(&state, &args).await,
    }
}

/// Prompts and reads one line; `None` at end of input.
fn read_line(lines: &mut Lines<'_>, prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    lines.next().transpose()
}

fn parse_command(line: &str) -> Option<Command> {
    match line.parse::<Command>() {
        Ok(command) => Some(command),
        Err(message) => {
            if !message.is_empty() {
                println!("{message}");
            }
            None
        }
    }
}

async fn run_booking(state: &AppState) -> anyhow::Result<()> {
    let mut app = BookingApp::new(state.config.app.restaurant_name.clone());
    let mut changes = app.store().subscribe();
    let mut credential: Option<Credential> = None;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{}", app.render(Local::now().date_naive()));
    println!("{BOOKING_HELP}");

    while let Some(line) = read_line(&mut lines, "> ")? {
        let Some(command) = parse_command(&line) else {
            continue;
        };
        let step = app.store().current_step();
        let mut redraw = true;

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{BOOKING_HELP}");
                redraw = false;
            }
            Command::Date(value) if step == Step::DateTime => app.date_time.date = value,
            Command::Time(value) if step == Step::DateTime => app.date_time.time = value,
            Command::Guests(value) if step == Step::DateTime => app.date_time.guests = value,
            Command::Check if step == Step::DateTime => {
                app.date_time.submit(app.store(), &state.api).await;
            }
            Command::Select(number) if step == Step::TableSelect => {
                table_selection::select_number(app.store(), number);
            }
            Command::Back if step == Step::TableSelect => table_selection::back(app.store()),
            Command::Back if step == Step::ContactInfo => app.store().prev_step(),
            Command::Name(value) if step == Step::ContactInfo => app.contact.name = value,
            Command::Phone(value) if step == Step::ContactInfo => app.contact.phone = value,
            Command::Submit if step == Step::ContactInfo => {
                app.contact.submit(app.store(), &state.api, credential.as_ref()).await;
            }
            Command::New if step == Step::Confirmation => confirmation::start_over(app.store()),
            Command::Home => {
                println!("Back to home: {}", confirmation::HOME_LINK);
                redraw = false;
            }
            Command::Login { username, password } => {
                let request = LoginRequest { username, password };
                match state.api.login(&request).await {
                    Ok(response) => {
                        credential = Some(Credential::from_auth(response, state.session_ttl()));
                        println!("Logged in.");
                    }
                    Err(e) => {
                        warn!(error = %e, "login failed");
                        println!("{MSG_INVALID_CREDENTIALS}");
                    }
                }
                redraw = false;
            }
            Command::Logout => {
                credential = None;
                println!("Logged out.");
                redraw = false;
            }
            Command::Dismiss => app.store().set_error(None),
            _ => {
                println!("Not available on this step. Type help for commands.");
                redraw = false;
            }
        }

        if changes.has_changed().unwrap_or(false) {
            changes.borrow_and_update();
            app.remount();
            redraw = true;
        }
        if redraw {
            println!("{}", app.render(Local::now().date_naive()));
        }
    }
    Ok(())
}

async fn run_admin(state: &AppState) -> anyhow::Result<()> {
    let mut dashboard = AdminDashboard::new(state.session_ttl());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!("{}", dashboard.render());
    println!("{ADMIN_HELP}");

    while let Some(line) = read_line(&mut lines, "admin> ")? {
        let Some(command) = parse_command(&line) else {
            continue;
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                println!("{ADMIN_HELP}");
                continue;
            }
            Command::Login { username, password } => {
                dashboard.login(&state.api, &username, &password).await;
            }
            Command::Logout => dashboard.logout(),
            Command::Dismiss => {
                dashboard.error = None;
                dashboard.alert = None;
            }
            _ if !dashboard.is_authenticated() => println!("Please log in first."),
            Command::List => dashboard.load_bookings(&state.api).await,
            Command::Delete(id) => {
                let confirm = |prompt: &str| {
                    matches!(
                        read_line(&mut lines, &format!("{prompt} [y/N] ")),
                        Ok(Some(answer)) if answer.trim().eq_ignore_ascii_case("y")
                    )
                };
                match dashboard.delete_booking(&state.api, id, confirm).await {
                    DeleteOutcome::Cancelled => println!("Not deleted."),
                    DeleteOutcome::Deleted => println!("Booking {id} deleted."),
                    DeleteOutcome::Failed => println!("Failed to delete booking"),
                    DeleteOutcome::LoggedOut => println!("Session ended, please log in again."),
                }
            }
            Command::Tables => match dashboard.tables(&state.api).await {
                Ok(tables) => {
                    println!("{}", catalog::render_tables(&tables));
                    continue;
                }
                Err(e) => println!("Failed to load tables: {e}"),
            },
            Command::Table(id) => match dashboard.table(&state.api, id).await {
                Ok(table) => {
                    println!("{}", catalog::render_tables(&[table]));
                    continue;
                }
                Err(e) => println!("Failed to load table {id}: {e}"),
            },
            Command::ShowBooking(id) => match dashboard.booking(&state.api, id).await {
                Ok(booking) => {
                    println!("{}", catalog::render_booking(&booking));
                    continue;
                }
                Err(e) => println!("Failed to load booking {id}: {e}"),
            },
            Command::AddTable { table_number, capacity } => {
                let table = Table {
                    id: 0,
                    table_number,
                    capacity,
                    is_available: true,
                };
                match dashboard.create_table(&state.api, &table).await {
                    Ok(()) => println!("Table {table_number} added."),
                    Err(e) => println!("Failed to add table: {e}"),
                }
            }
            Command::AddDish { price, name } => {
                let dish = Dish {
                    id: 0,
                    name,
                    price,
                    description: String::new(),
                    is_popular: false,
                    image_url: None,
                };
                match dashboard.create_dish(&state.api, &dish).await {
                    Ok(()) => println!("{} added.", dish.name),
                    Err(e) => println!("Failed to add dish: {e}"),
                }
            }
            Command::DishPrice { id, price } => match state.api.get_dish(id).await {
                Ok(dish) => {
                    let dish = Dish { price, ..dish };
                    match dashboard.update_dish(&state.api, &dish).await {
                        Ok(()) => println!("{} now costs {price:.2}.", dish.name),
                        Err(e) => println!("Failed to update dish: {e}"),
                    }
                }
                Err(e) => println!("Failed to load dish {id}: {e}"),
            },
            _ => {
                println!("Not available here. Type help for commands.");
                continue;
            }
        }

        println!("{}", dashboard.render());
    }
    Ok(())
}

async fn run_menu(state: &AppState, args: &[String]) -> anyhow::Result<()> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let filter = MenuFilter::parse(&args).map_err(anyhow::Error::msg)?;

    let dishes = state.api.list_dishes().await.context("failed to load the menu")?;

    if filter == MenuFilter::default() {
        println!("{}", menu::render("Popular Dishes", &menu::popular(&dishes)));
    }
    println!("{}", menu::render("Menu", &filter.apply(&dishes)));
    Ok(())
}
