pub mod attendance;
pub mod export;
pub mod leave;

pub use attendance::render_attendance_page;
pub use export::{render_export_form, ExportForm};
pub use leave::render_leave_page;
