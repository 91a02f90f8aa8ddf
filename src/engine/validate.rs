//! Input validation for booking requests. Runs before any transaction is
//! opened, so a rejected request never touches the store.

use crate::error::BookingError;
use crate::models::seat;
use crate::models::Customer;
use validator::ValidateEmail;

pub fn movie_id(movie_id: i64) -> Result<(), BookingError> {
    if movie_id < 1 {
        return Err(BookingError::Validation(format!(
            "invalid movie id: {movie_id}"
        )));
    }
    Ok(())
}

pub fn seat_position(row: i64, col: i64) -> Result<(), BookingError> {
    if !seat::in_bounds(row, col) {
        return Err(BookingError::Validation(format!(
            "seat position ({row}, {col}) outside {}x{} grid",
            seat::GRID_ROWS,
            seat::GRID_COLS
        )));
    }
    Ok(())
}

pub fn customer(customer: &Customer) -> Result<(), BookingError> {
    if customer.name.trim().is_empty() {
        return Err(BookingError::Validation("customer name is required".into()));
    }

    let email = customer.email.trim();
    if !is_valid_email(email) {
        return Err(BookingError::Validation(format!(
            "invalid email address: {email}"
        )));
    }

    let phone = customer.phone.trim();
    if !is_valid_phone(phone) {
        return Err(BookingError::Validation(format!(
            "invalid phone number: {phone}"
        )));
    }

    Ok(())
}

/// `local@domain.tld` shape. The validator crate accepts bare-host domains,
/// so the dotted-domain check is kept explicit.
fn is_valid_email(email: &str) -> bool {
    !email.is_empty()
        && email.validate_email()
        && email
            .rsplit_once('@')
            .is_some_and(|(_, domain)| domain.contains('.'))
}

/// Local phone format: punctuation stripped, then either a trunk `0` or a
/// `+` country code, followed by 9-12 subscriber digits.
fn is_valid_phone(phone: &str) -> bool {
    let stripped: String = phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '.'))
        .collect();

    let digits = stripped.strip_prefix('+').unwrap_or(&stripped);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    if stripped.starts_with('+') {
        // 1-3 digit country code plus 9-12 subscriber digits
        (10..=15).contains(&digits.len())
    } else {
        digits.starts_with('0') && (10..=13).contains(&digits.len())
    }
}
