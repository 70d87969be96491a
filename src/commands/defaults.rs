//! Defaults command - prints the default layout document.

use crate::context::Layout;
use crate::error_fmt::{AppError, LayoutResultExt};

/// Print the default grid as a layout document, ready to edit.
pub fn defaults() -> Result<(), AppError> {
    let yaml = Layout::default().to_yaml().with_path("<defaults>")?;
    print!("{}", yaml);
    Ok(())
}
