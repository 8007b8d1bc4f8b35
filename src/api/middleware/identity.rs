//! Anonymous per-browser identity cookie.
//!
//! Every request is assigned an owner identity: a UUID carried in an
//! HMAC-SHA256-signed cookie. A request without the cookie, or with a
//! tampered one, transparently gets a fresh identity and a `Set-Cookie`
//! header on the response. This is pseudo-authentication only: it
//! partitions records per browser, nothing more.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::state::AppState;

pub const IDENTITY_COOKIE: &str = "urlcut_identity";

type HmacSha256 = Hmac<Sha256>;

/// Verified owner identity, inserted into request extensions for handlers.
#[derive(Debug, Clone)]
pub struct OwnerId(pub String);

/// Resolves the request's owner identity, minting one when needed.
///
/// # Cookie Format
///
/// ```text
/// urlcut_identity=<uuid>.<hex hmac-sha256(uuid)>
/// ```
///
/// The signature is verified in constant time; an invalid or unparseable
/// cookie is treated the same as a missing one.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let verified = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| cookie_value(raw, IDENTITY_COOKIE))
        .and_then(|value| verify(value, st.cookie_secret.as_bytes()));

    let (owner_id, minted_cookie) = match verified {
        Some(owner_id) => (owner_id, None),
        None => {
            let owner_id = Uuid::new_v4().to_string();
            let cookie = format!(
                "{}={}.{}; Path=/; HttpOnly; SameSite=Lax",
                IDENTITY_COOKIE,
                owner_id,
                sign(&owner_id, st.cookie_secret.as_bytes())
            );
            (owner_id, Some(cookie))
        }
    };

    req.extensions_mut().insert(OwnerId(owner_id));

    let mut response = next.run(req).await;

    if let Some(cookie) = minted_cookie
        && let Ok(value) = HeaderValue::from_str(&cookie)
    {
        response.headers_mut().append(header::SET_COOKIE, value);
    }

    response
}

/// Extracts one cookie's value from a raw `Cookie` header.
fn cookie_value<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    raw.split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}

fn sign(value: &str, key: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(value.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

fn verify(cookie: &str, key: &[u8]) -> Option<String> {
    let (owner_id, signature) = cookie.split_once('.')?;

    Uuid::parse_str(owner_id).ok()?;

    let mut mac = HmacSha256::new_from_slice(key).ok()?;
    mac.update(owner_id.as_bytes());
    let signature = hex::decode(signature).ok()?;
    mac.verify_slice(&signature).ok()?;

    Some(owner_id.to_string())
}
