//! Line commands of the terminal front end.

use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Booking,
    Admin,
    /// Menu with optional filter arguments.
    Menu(Vec<String>),
}

impl Mode {
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, String> {
        let mut args = args.into_iter();
        match args.next().as_deref() {
            None | Some("booking") => Ok(Mode::Booking),
            Some("admin") => Ok(Mode::Admin),
            Some("menu") => Ok(Mode::Menu(args.collect())),
            Some(other) => Err(format!("unknown mode {other:?}, expected booking, admin or menu")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Date(String),
    Time(String),
    Guests(u32),
    Check,
    Select(i32),
    Back,
    Name(String),
    Phone(String),
    Submit,
    New,
    Home,
    Login { username: String, password: String },
    Logout,
    List,
    Delete(i32),
    Tables,
    Table(i32),
    ShowBooking(i32),
    AddTable { table_number: i32, capacity: i32 },
    AddDish { price: f64, name: String },
    DishPrice { id: i32, price: f64 },
    Dismiss,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let number = |what: &str| -> Result<i32, String> {
            rest.parse().map_err(|_| format!("{word} needs a {what}"))
        };

        let command = match word.to_lowercase().as_str() {
            "date" => Command::Date(rest.to_string()),
            "time" => Command::Time(rest.to_string()),
            "guests" => Command::Guests(
                rest.parse()
                    .map_err(|_| "guests needs a whole number".to_string())?,
            ),
            "check" => Command::Check,
            "select" => Command::Select(number("table number")?),
            "back" => Command::Back,
            "name" => Command::Name(rest.to_string()),
            "phone" => Command::Phone(rest.to_string()),
            "submit" => Command::Submit,
            "new" => Command::New,
            "home" => Command::Home,
            "login" => {
                let (username, password) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "usage: login <username> <password>".to_string())?;
                Command::Login {
                    username: username.to_string(),
                    password: password.trim().to_string(),
                }
            }
            "logout" => Command::Logout,
            "list" | "refresh" => Command::List,
            "delete" => Command::Delete(number("booking id")?),
            "tables" => Command::Tables,
            "table" => Command::Table(number("table id")?),
            "booking" => Command::ShowBooking(number("booking id")?),
            "add-table" => {
                let (table_number, capacity) = split_pair(rest, "add-table <number> <capacity>")?;
                Command::AddTable {
                    table_number: table_number
                        .parse()
                        .map_err(|_| "table number must be a whole number".to_string())?,
                    capacity: capacity
                        .parse()
                        .map_err(|_| "capacity must be a whole number".to_string())?,
                }
            }
            "add-dish" => {
                let (raw, name) = split_pair(rest, "add-dish <price> <name>")?;
                Command::AddDish {
                    price: parse_price(raw)?,
                    name: name.to_string(),
                }
            }
            "price" => {
                let (id, raw) = split_pair(rest, "price <dish id> <price>")?;
                Command::DishPrice {
                    id: id.parse().map_err(|_| "dish id must be a whole number".to_string())?,
                    price: parse_price(raw)?,
                }
            }
            "dismiss" => Command::Dismiss,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err(String::new()),
            other => return Err(format!("unknown command {other:?}, type help")),
        };
        Ok(command)
    }
}

/// First word and the rest, both required.
fn split_pair<'a>(rest: &'a str, usage: &str) -> Result<(&'a str, &'a str), String> {
    rest.split_once(char::is_whitespace)
        .map(|(first, second)| (first, second.trim()))
        .filter(|(_, second)| !second.is_empty())
        .ok_or_else(|| format!("usage: {usage}"))
}

fn parse_price(raw: &str) -> Result<f64, String> {
    raw.parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
        .ok_or_else(|| format!("{raw:?} is not a price"))
}

pub const BOOKING_HELP: &str = "\
  date <YYYY-MM-DD>  time <HH:MM>  guests <1-20>  check
  select <table number>  back
  name <full name>  phone <number>  submit
  login <username> <password>  logout
  new  home  dismiss  help  quit";

pub const ADMIN_HELP: &str = "\
  login <username> <password>  logout
  list  delete <id>  booking <id>
  tables  table <id>  add-table <number> <capacity>
  add-dish <price> <name>  price <dish id> <price>
  dismiss  help  quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes() {
        assert_eq!(Mode::from_args(Vec::<String>::new()).unwrap(), Mode::Booking);
        assert_eq!(Mode::from_args(vec!["admin".to_string()]).unwrap(), Mode::Admin);
        assert_eq!(
            Mode::from_args(vec!["menu".into(), "salmon".into()]).unwrap(),
            Mode::Menu(vec!["salmon".into()])
        );
        assert!(Mode::from_args(vec!["kitchen".to_string()]).is_err());
    }

    #[test]
    fn commands_keep_the_rest_of_the_line() {
        assert_eq!("name  Ada Lindqvist ".parse::<Command>().unwrap(), Command::Name("Ada Lindqvist".into()));
        assert_eq!(
            "phone +46 70 123 45 67".parse::<Command>().unwrap(),
            Command::Phone("+46 70 123 45 67".into())
        );
        assert_eq!(
            "login admin s3cret pass".parse::<Command>().unwrap(),
            Command::Login {
                username: "admin".into(),
                password: "s3cret pass".into()
            }
        );
    }

    #[test]
    fn numeric_arguments() {
        assert_eq!("select 3".parse::<Command>().unwrap(), Command::Select(3));
        assert_eq!("DELETE 12".parse::<Command>().unwrap(), Command::Delete(12));
        assert!("guests many".parse::<Command>().is_err());
        assert!("select".parse::<Command>().is_err());
        assert!("login admin".parse::<Command>().is_err());
    }

    #[test]
    fn catalogue_commands() {
        assert_eq!("table 7".parse::<Command>().unwrap(), Command::Table(7));
        assert_eq!("booking 12".parse::<Command>().unwrap(), Command::ShowBooking(12));
        assert_eq!(
            "add-table 3 4".parse::<Command>().unwrap(),
            Command::AddTable {
                table_number: 3,
                capacity: 4
            }
        );
        assert_eq!(
            "add-dish 145.50 Toast Skagen".parse::<Command>().unwrap(),
            Command::AddDish {
                price: 145.5,
                name: "Toast Skagen".into()
            }
        );
        assert_eq!(
            "price 4 99".parse::<Command>().unwrap(),
            Command::DishPrice { id: 4, price: 99.0 }
        );
        assert!("add-table 3".parse::<Command>().is_err());
        assert!("add-dish free Toast".parse::<Command>().is_err());
        assert!("price 4 -1".parse::<Command>().is_err());
    }
}
