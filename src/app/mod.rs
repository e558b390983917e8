// Presentation logic consumed by the invitation page and the CLI client.

pub mod form;
pub mod view;

pub use form::{AttendanceOption, RsvpForm};
pub use view::GuestView;
