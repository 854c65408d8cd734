//! Booker-side command handling: manage the sitter list, request bookings.

use chrono::Local;

use sitterbot_bookings::{BookingError, BookingStore};
use sitterbot_sitters::{display_name, RegistryError, SitterRegistry};

use crate::error::Result;
use crate::parse;
use crate::phone;

const HELP_TEXT: &str = "You can add a sitter by giving me their first name and 10-digit \
phone number, or book a sitter by specifying a date and time.  You can also remove a sitter \
from the list with \"delete\" or \"remove\" and then their first name.";

/// Handle a message from the booker. The body arrives lowercased and
/// trimmed.
pub(crate) fn handle_booker(
    registry: &SitterRegistry,
    bookings: &BookingStore,
    country: &str,
    body: &str,
) -> Result<String> {
    if phone::has_phone_number(body) {
        return add_sitter(registry, country, body);
    }
    if body.contains("remove") || body.contains("delete") {
        return remove_sitter(registry, body);
    }
    if body.contains(" to ") {
        return request_booking(bookings, body);
    }
    Ok(format!(
        "I wasn't sure what to do with your input. {HELP_TEXT}"
    ))
}

/// "amy 612-555-0101": first token is the name, the digits are the number.
fn add_sitter(registry: &SitterRegistry, country: &str, body: &str) -> Result<String> {
    let name = body.split_whitespace().next().unwrap_or_default();
    let number = phone::normalize(body, country);
    let (name, number) = match number {
        Some(number) if !name.is_empty() && name.chars().all(char::is_alphabetic) => {
            (name, number)
        }
        _ => return Ok("Sorry, did you mean to add a sitter?  Please try again.".to_string()),
    };

    match registry.add(name, &number) {
        Ok(sitter) => Ok(format!(
            "Okay, I added {} to the sitters, with phone # {}.",
            sitter.display_name(),
            number
        )),
        Err(RegistryError::AlreadyExists { .. }) => Ok(format!(
            "Looks like {} is already one of the sitters. Remove them first to change the number.",
            display_name(name)
        )),
        Err(e) => Err(e.into()),
    }
}

/// "delete amy" / "remove amy from the list": the name is the word after
/// the command.
fn remove_sitter(registry: &SitterRegistry, body: &str) -> Result<String> {
    let name = body
        .split_whitespace()
        .skip_while(|w| *w != "remove" && *w != "delete")
        .nth(1)
        .unwrap_or_default();

    match registry.remove(name) {
        Ok(sitter) => Ok(format!(
            "Okay, I removed {} from the sitters.",
            sitter.display_name()
        )),
        Err(RegistryError::NotFound { .. }) => {
            Ok("No such sitter. Please write \"delete [sitter's first name].\"".to_string())
        }
        Err(e) => Err(e.into()),
    }
}

fn request_booking(bookings: &BookingStore, body: &str) -> Result<String> {
    let now = Local::now().naive_local();
    let window = match parse::parse_window(body, now) {
        Ok(window) => window,
        Err(_) => {
            return Ok("Please specify an end time (e.g. \"tomorrow 5pm to 10pm\").".to_string())
        }
    };

    match bookings.create_if_none_open(window) {
        Ok(booking) => Ok(format!(
            "Okay, I will reach out to the sitters about sitting on {}.",
            booking.window
        )),
        Err(BookingError::ActiveBookingExists { .. }) => {
            Ok("Please wait until the current booking is either booked or expires.".to_string())
        }
        Err(e) => Err(e.into()),
    }
}
