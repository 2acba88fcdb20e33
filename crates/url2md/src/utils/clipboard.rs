use crate::errors::ConvertError;

/// Read the system clipboard as UTF-8 text.
pub fn read_clipboard() -> Result<String, ConvertError> {
    let mut clipboard = arboard::Clipboard::new().map_err(backend_error)?;
    clipboard.get_text().map_err(backend_error)
}

/// Overwrite the system clipboard with `text`.
pub fn write_clipboard(text: &str) -> Result<(), ConvertError> {
    let mut clipboard = arboard::Clipboard::new().map_err(backend_error)?;
    clipboard.set_text(text.to_owned()).map_err(backend_error)
}

fn backend_error(err: arboard::Error) -> ConvertError {
    ConvertError::Clipboard {
        message: err.to_string(),
    }
}
