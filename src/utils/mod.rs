pub mod environment;
pub mod paths;
pub mod terminal;
pub mod text;
pub mod timestamps;

pub use environment::get_archive_dir;
pub use paths::{format_path_with_tilde, validate_file_size, validate_relative_path};
pub use terminal::sanitize_for_terminal;
pub use text::{escape_html, get_initials, message_preview};
pub use timestamps::format_date;
