//! Section renderers for the landing page.

mod hero;
mod pitch;
mod solution;
mod waitlist;

pub use hero::*;
pub use pitch::*;
pub use solution::*;
pub use waitlist::*;

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
