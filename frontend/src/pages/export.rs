pub mod view_model;

pub use view_model::{render_export_form, year_options, ExportForm, ExportFormView};
