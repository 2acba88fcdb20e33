mod clipboard;
pub use clipboard::{read_clipboard, write_clipboard};

mod extract;
pub use extract::{ExtractedPage, extract_page};

mod http_client;
pub use http_client::build_client;

mod markdown;
pub use markdown::{assemble_result, render_markdown, sanitize_markdown};
