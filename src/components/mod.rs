pub mod app;
pub mod lab_settings;
pub mod lab_view;
pub mod product_details;
pub mod product_list;
pub mod quick_view;

pub use app::App;
