pub mod organiser;

pub use organiser::{clear_session_cookie, set_session_cookie, LoginRedirect, OrganiserSession};
