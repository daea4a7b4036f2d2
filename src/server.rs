//! HTTP front end.
//!
//! A single page: `GET /?word=<headword>` shows the definition, or "Not Found"
//! with a handful of random headwords to try instead.

use std::fmt::Write as _;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use log::{error, info};
use rand::Rng;
use serde::Deserialize;
use url::form_urlencoded;

use crate::dict::{Dictionary, Result};

/// Number of suggestions offered after a miss.
pub const SUGGESTION_COUNT: usize = 10;

const NOT_FOUND: &str = "Not Found";

#[derive(Debug, Default, Deserialize)]
pub struct LookupParams {
    pub word: Option<String>,
}

/// Everything the page template needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub query: String,
    /// Definition text, or the not-found message.
    pub result: String,
    /// Random headwords, only filled after a miss.
    pub suggestions: Vec<String>,
}

/// Runs the lookup for one request.
///
/// An absent or empty `word` is treated like a miss, so the landing page
/// shows suggestions.
pub fn resolve_page<R: Rng>(dict: &Dictionary<R>, word: &str) -> Result<Page> {
    let mut result = if word.is_empty() {
        String::new()
    } else {
        dict.lookup(word)?
    };

    let mut suggestions = Vec::new();
    if result.is_empty() {
        result = NOT_FOUND.to_string();
        suggestions = dict.random_sample(SUGGESTION_COUNT)?;
    }

    Ok(Page {
        query: word.to_string(),
        result,
        suggestions,
    })
}

/// Renders `page` as HTML. Text is escaped before newlines become `<br>`.
pub fn render_page(page: &Page) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Dictionary</title>\n</head>\n<body>\n");
    let _ = writeln!(
        html,
        "<form method=\"get\" action=\"/\"><input type=\"text\" name=\"word\" value=\"{}\" autofocus> <input type=\"submit\" value=\"Look up\"></form>",
        escape_html(&page.query)
    );
    let _ = writeln!(
        html,
        "<div class=\"result\">{}</div>",
        escape_html(&page.result).replace('\n', "<br>")
    );
    if !page.suggestions.is_empty() {
        html.push_str("<ul class=\"suggestions\">\n");
        for word in &page.suggestions {
            let query: String = form_urlencoded::byte_serialize(word.as_bytes()).collect();
            let _ = writeln!(
                html,
                "<li><a href=\"/?word={}\">{}</a></li>",
                query,
                escape_html(word)
            );
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Builds the application router around a shared dictionary.
pub fn router(dict: Arc<Dictionary>) -> Router {
    Router::new()
        .route("/", get(lookup_handler))
        .with_state(dict)
}

async fn lookup_handler(
    State(dict): State<Arc<Dictionary>>,
    Query(params): Query<LookupParams>,
) -> Response {
    let word = params.word.unwrap_or_default();
    // Lookups do blocking file I/O and may inflate the data file on first use.
    let outcome = tokio::task::spawn_blocking(move || resolve_page(&*dict, &word)).await;
    match outcome {
        Ok(Ok(page)) => Html(render_page(&page)).into_response(),
        Ok(Err(e)) => {
            error!("Lookup failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(e) => {
            error!("Lookup task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Serves the dictionary on `0.0.0.0:<port>` until the process exits.
pub async fn serve(dict: Arc<Dictionary>, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, router(dict)).await?;
    Ok(())
}
