mod convert;
pub use convert::{page_to_markdown, url_to_markdown};

mod validation;
pub use validation::is_valid_url;
