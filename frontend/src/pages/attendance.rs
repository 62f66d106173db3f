pub mod view_model;

pub use view_model::{map_link, render_attendance_page};
