//! Generate command - emits markup and style for a layout document.

use crate::commands::shared::{format_code, load_model, CodeOutput};
use crate::context::{GridSession, Settings};
use crate::error_fmt::AppError;
use crate::render::GenerateOptions;

/// Print the code for the layout at `layout`, or for the default grid.
pub fn generate(
    layout: Option<&str>,
    settings: &Settings,
    output: CodeOutput,
) -> Result<(), AppError> {
    let model = load_model(layout)?;
    let session = GridSession::with_model(model, GenerateOptions::from(settings))?;
    let code = session.generated()?;
    print!("{}", format_code(&code, output));
    Ok(())
}
