pub mod board_string;
pub mod utils;
