//! Output rendering (exported data file, graph view model)

pub mod dataset;
pub mod view;

pub use dataset::{build_data_file, read_data_file, render_data_file, write_data_file};
pub use view::{display_label, render, Filters, GraphOptions, ViewState};
