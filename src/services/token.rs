// Session tokens: base64 of "id:email:unix_millis". Reversible and unsigned;
// anyone holding one can read it and anyone can forge one.
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub id: u64,
    pub email: String,
    pub issued_at_ms: i64,
}

pub fn issue(id: u64, email: &str, issued_at_ms: i64) -> String {
    BASE64.encode(format!("{}:{}:{}", id, email, issued_at_ms))
}

#[cfg(test)]
pub fn decode(token: &str) -> Option<TokenClaims> {
    let raw = String::from_utf8(BASE64.decode(token).ok()?).ok()?;
    let (id, rest) = raw.split_once(':')?;
    // emails cannot contain ':' in practice, but split from the right anyway
    let (email, issued_at) = rest.rsplit_once(':')?;
    Some(TokenClaims {
        id: id.parse().ok()?,
        email: email.to_string(),
        issued_at_ms: issued_at.parse().ok()?,
    })
}
