//! Stock screens.
//!
//! - `YesNoDialog`: question answered with yes or no, usable as quit screen
//! - `PasswordDialog`: single hidden input

mod password;
mod yes_no;

pub use password::PasswordDialog;
pub use yes_no::YesNoDialog;
