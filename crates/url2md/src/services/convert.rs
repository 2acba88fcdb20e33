use reqwest::Client;

use crate::errors::ConvertError;
use crate::utils::{assemble_result, extract_page, render_markdown, sanitize_markdown};

/// Fetch `url` and produce the final Markdown document, header included.
pub async fn url_to_markdown(client: &Client, url: &str) -> Result<String, ConvertError> {
    let html = fetch_page(client, url).await?;
    Ok(page_to_markdown(url, &html).await)
}

/// Perform the single GET request and decode the body as text.
///
/// Transport failures and non-success statuses both come back as errors;
/// the body decode honours the charset the server declared.
async fn fetch_page(client: &Client, url: &str) -> Result<String, ConvertError> {
    tracing::info!("Fetching {url}");

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ConvertError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ConvertError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| ConvertError::Fetch {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// The post-fetch pipeline: extract, render, sanitize, assemble.
///
/// Pure with respect to the outside world, so the whole conversion is
/// testable without a network or a clipboard.
pub async fn page_to_markdown(url: &str, html: &str) -> String {
    let page = extract_page(html);
    tracing::debug!("Extracted content region for '{}'", page.title);

    let rendered = render_markdown(&page).await;
    let body = sanitize_markdown(&rendered);

    assemble_result(&page.title, url, &body)
}
