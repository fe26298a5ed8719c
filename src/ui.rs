//! Help page rendering.

use crate::error::AppResult;
use tera::{Context as TeraContext, Tera};

const HELP_TEMPLATE: &str = include_str!("../static/help.html");

/// Render the static help page with the requesting host substituted into
/// every usage example.
pub fn render_help_page(host: &str) -> AppResult<String> {
    let mut tera = Tera::default();
    let mut context = TeraContext::new();
    context.insert("host", host);

    Ok(tera.render_str(HELP_TEMPLATE, &context)?)
}
