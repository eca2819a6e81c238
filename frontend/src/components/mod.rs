pub mod chat_box;
pub mod chat_input;
pub mod chat_screen;
pub mod handlers;
pub mod header;
pub mod preview_area;
pub mod results;
pub mod upload_screen;
pub mod upload_section;
pub mod utils;
