//! Page handlers: view, edit, save.

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::storage::Page;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

/// GET `/view/{title}`
///
/// A title with no stored file redirects to its edit form instead of
/// producing an error page.
pub async fn view(state: &AppState, title: &str) -> Response<Full<Bytes>> {
    let mut page = match state.store.load(title).await {
        Ok(page) => page,
        Err(_) => return http::build_redirect_response(&format!("/edit/{title}")),
    };

    if state.config.wiki.show_menu {
        match state.store.list_titles().await {
            Ok(titles) => page.menu = titles,
            // The page itself is still served; the menu is decoration.
            Err(e) => logger::log_warning(&format!("Could not list page titles: {e}")),
        }
    }

    render(state, "view", &page)
}

/// GET `/edit/{title}`
///
/// Prefills the form with the stored body, or an empty one for a new page.
pub async fn edit(state: &AppState, title: &str) -> Response<Full<Bytes>> {
    let page = match state.store.load(title).await {
        Ok(page) => page,
        Err(_) => Page::empty(title),
    };

    render(state, "edit", &page)
}

/// POST `/save/{title}`
///
/// Overwrites the page with the submitted form field `body`. An absent
/// field saves an empty body.
pub async fn save(state: &AppState, title: &str, form_body: &[u8]) -> Response<Full<Bytes>> {
    let body = http::form::form_value(form_body, "body").unwrap_or_default();

    match state.store.save(title, body.as_bytes()).await {
        Ok(()) => http::build_redirect_response(&format!("/view/{title}")),
        Err(e) => {
            logger::log_error(&format!("Failed to save page '{title}': {e}"));
            http::build_500_response(&e.to_string())
        }
    }
}

fn render(state: &AppState, template: &str, page: &Page) -> Response<Full<Bytes>> {
    match state.templates.render(template, page) {
        Ok(html) => http::build_html_response(html),
        Err(e) => http::build_500_response(&e.to_string()),
    }
}
