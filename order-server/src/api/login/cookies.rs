//! Session cookie / header transport

use http::header::{AUTHORIZATION, COOKIE, SET_COOKIE};
use http::{HeaderMap, HeaderName, HeaderValue};

use crate::services::SessionTokens;
use crate::utils::{AppError, AppResult};

pub const ACCESS_COOKIE: &str = "sAccessToken";
pub const REFRESH_COOKIE: &str = "sRefreshToken";
pub const FRONT_COOKIE: &str = "sFrontToken";

pub const ACCESS_HEADER: &str = "st-access-token";
pub const REFRESH_HEADER: &str = "st-refresh-token";
pub const FRONT_HEADER: &str = "front-token";

const ACCESS_MAX_AGE: i64 = 3_600;
const REFRESH_MAX_AGE: i64 = 2_592_000;

/// Read a cookie value from the request headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Token from the cookie, or from `Authorization: Bearer` for header-mode clients
pub fn read_token(headers: &HeaderMap, cookie: &str) -> Option<String> {
    read_cookie(headers, cookie).or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::internal(format!("Invalid header value: {}", e)))
}

fn append_cookie(headers: &mut HeaderMap, cookie: String) -> AppResult<()> {
    headers.append(SET_COOKIE, header_value(&cookie)?);
    Ok(())
}

fn insert_header(headers: &mut HeaderMap, name: &'static str, value: &str) -> AppResult<()> {
    headers.insert(HeaderName::from_static(name), header_value(value)?);
    Ok(())
}

fn access_cookie(value: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ACCESS_COOKIE, value, ACCESS_MAX_AGE
    )
}

fn front_cookie(value: &str) -> String {
    format!(
        "{}={}; Path=/; SameSite=Lax; Max-Age={}",
        FRONT_COOKIE, value, ACCESS_MAX_AGE
    )
}

/// Cookies and headers issued on sign-in
pub fn sign_in_headers(tokens: &SessionTokens) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    append_cookie(&mut headers, access_cookie(&tokens.access_token))?;
    append_cookie(
        &mut headers,
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            REFRESH_COOKIE, tokens.refresh_token, REFRESH_MAX_AGE
        ),
    )?;
    append_cookie(&mut headers, front_cookie(&tokens.front_token))?;
    insert_header(&mut headers, ACCESS_HEADER, &tokens.access_token)?;
    insert_header(&mut headers, REFRESH_HEADER, &tokens.refresh_token)?;
    insert_header(&mut headers, FRONT_HEADER, &tokens.front_token)?;
    Ok(headers)
}

/// Cookies and headers issued on refresh (refresh token unchanged)
pub fn refresh_headers(tokens: &SessionTokens) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    append_cookie(&mut headers, access_cookie(&tokens.access_token))?;
    append_cookie(&mut headers, front_cookie(&tokens.front_token))?;
    insert_header(&mut headers, ACCESS_HEADER, &tokens.access_token)?;
    insert_header(&mut headers, FRONT_HEADER, &tokens.front_token)?;
    Ok(headers)
}

/// Expire both session cookies
pub fn sign_out_headers() -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    for name in [ACCESS_COOKIE, REFRESH_COOKIE] {
        append_cookie(
            &mut headers,
            format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name),
        )?;
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_cookie(raw: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(raw).unwrap());
        headers
    }

    #[test]
    fn test_read_cookie() {
        let headers = with_cookie("theme=dark; sAccessToken=access_abc ; sRefreshToken=");
        assert_eq!(read_cookie(&headers, ACCESS_COOKIE).as_deref(), Some("access_abc"));
        assert_eq!(read_cookie(&headers, REFRESH_COOKIE), None);
        assert_eq!(read_cookie(&headers, FRONT_COOKIE), None);
    }

    #[test]
    fn test_read_token_falls_back_to_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer refresh_xyz"));
        assert_eq!(read_token(&headers, REFRESH_COOKIE).as_deref(), Some("refresh_xyz"));
    }

    #[test]
    fn test_sign_in_headers() {
        let tokens = SessionTokens {
            access_token: "access_s1".into(),
            refresh_token: "refresh_s1".into(),
            front_token: "e30=".into(),
        };
        let headers = sign_in_headers(&tokens).unwrap();
        let cookies: Vec<&str> = headers
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(cookies.len(), 3);
        assert!(cookies[0].starts_with("sAccessToken=access_s1;"));
        assert!(cookies[0].contains("HttpOnly"));
        assert!(cookies[1].contains("Max-Age=2592000"));
        assert!(!cookies[2].contains("HttpOnly"));
        assert_eq!(headers[FRONT_HEADER], "e30=");
        assert_eq!(headers[REFRESH_HEADER], "refresh_s1");
    }

    #[test]
    fn test_sign_out_expires_cookies() {
        let headers = sign_out_headers().unwrap();
        assert!(headers
            .get_all(SET_COOKIE)
            .iter()
            .all(|v| v.to_str().unwrap().contains("Max-Age=0")));
    }
}
