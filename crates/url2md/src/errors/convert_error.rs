/// Custom error types for better error handling
///
/// Every variant's display string contains the word "Error" because the
/// message is printed verbatim on stderr as the process diagnostic.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Error: Clipboard does not contain a valid URL: '{content}'")]
    InvalidUrl { content: String },
    #[error("Error: clipboard access failed: {message}")]
    Clipboard { message: String },
    #[error("Error: could not build HTTP client: {message}")]
    Client { message: String },
    #[error("Error fetching {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("Error fetching {url}: HTTP status {status}")]
    Http { url: String, status: u16 },
    #[error("Error converting to Markdown: {message}")]
    Content { message: String },
}
