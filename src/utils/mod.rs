pub mod path;
pub mod time;

pub use path::{expand_tilde, safe_segment};
pub use time::{archive_stamp, format_duration, to_wall_clock};
