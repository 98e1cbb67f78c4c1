use axum::{
    http::HeaderValue,
    response::{IntoResponse, Response},
};
use maud::{html, Markup, DOCTYPE};
use relate_entrypoint::Environment;
use reqwest::header::CONTENT_TYPE;
use tower_cookies::{
    cookie::{time, SameSite},
    Cookie,
};
use url::Url;

const ACCESS_TOKEN_COOKIE: &str = "accessToken";
const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

fn same_site() -> SameSite {
    match Environment::new_or_prod() {
        Environment::Production => SameSite::Strict,
        Environment::Local | Environment::Develop => SameSite::None,
    }
}

fn auth_cookie(name: &'static str, token: &str, max_age: time::Duration) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, token.to_owned());
    cookie.set_secure(true);
    cookie.set_http_only(true);
    cookie.set_same_site(same_site());
    cookie.set_path("/");
    cookie.set_expires(Some(time::OffsetDateTime::now_utc() + max_age));
    cookie
}

pub fn create_access_token_cookie(token: &str) -> Cookie<'static> {
    auth_cookie(ACCESS_TOKEN_COOKIE, token, time::Duration::hours(1))
}

pub fn create_refresh_token_cookie(token: &str) -> Cookie<'static> {
    auth_cookie(REFRESH_TOKEN_COOKIE, token, time::Duration::days(365))
}

pub fn html_redirect_inner(url: &Url) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Redirect" }
                meta http-equiv="refresh" content=(format!("0;url={url}"));
            };
        };
    }
}

/// A meta-refresh redirect back to the frontend. Used instead of a 3xx so
/// the cookies set on this response survive every browser's redirect
/// handling.
pub fn html_redirect(url: &Url) -> Response {
    let s = html_redirect_inner(url).0;

    let headers = [(
        CONTENT_TYPE,
        HeaderValue::from_static("text/html; charset=utf-8"),
    )];
    (headers, s).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_redirect_works() {
        let res = html_redirect_inner(&"https://example.com".parse().unwrap()).into_string();
        assert!(
            res.contains(r#"<meta http-equiv="refresh" content="0;url=https://example.com/">"#)
        );
    }

    #[test]
    fn auth_cookies_are_scoped_to_the_root_path() {
        let cookie = create_access_token_cookie("token");
        assert_eq!(cookie.name(), "accessToken");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
    }
}
