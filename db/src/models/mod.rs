pub mod signal_reading;
pub mod user;

pub use signal_reading::*;
pub use user::*;
