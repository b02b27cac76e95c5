mod code_card;
mod header;
mod layout;

pub use code_card::CodeCard;
pub use header::Header;
pub use layout::Layout;
