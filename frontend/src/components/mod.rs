pub mod handlers;
pub mod header;
pub mod notification;
pub mod preview_area;
pub mod results;
pub mod upload_section;
pub mod utils;
