pub mod view_model;

pub use view_model::render_leave_page;
