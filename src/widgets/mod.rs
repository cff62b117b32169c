//! User interface components reused between pages.

pub mod alert;
pub mod badge;
