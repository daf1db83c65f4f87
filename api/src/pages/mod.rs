//! Page module
//!
//! Plain-text renderings of the poll, account and feed pages.

pub mod renderer;

pub use renderer::{
    render_detail, render_external_page, render_index, render_login_form, render_register_form,
    render_results,
};
