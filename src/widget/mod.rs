//! Checkout widget: mount controller, message relay, and configuration.

mod builder;
mod core;
mod forms;
mod options;

pub use builder::WidgetBuilder;
pub use core::CheckoutWidget;
pub use options::{FormOptions, ResponseHandler};
