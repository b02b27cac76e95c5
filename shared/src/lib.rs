mod request;
mod session;
mod types;
mod views;

pub use request::*;
pub use session::*;
pub use types::*;
pub use views::*;
