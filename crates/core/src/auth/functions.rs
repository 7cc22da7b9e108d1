use chrono::{DateTime, Duration, Utc};

use super::{AuthError, Claims, TokenType};
use crate::rental::User;

/// Longest token lifetime accepted from configuration (ten years).
pub const MAX_TOKEN_TTL_SECONDS: i64 = 3_650 * 86_400;

/// Parse a duration like `30m`, `24h`, `7d`, `45s` or a bare number of seconds.
///
/// Values above [`MAX_TOKEN_TTL_SECONDS`] are rejected.
pub fn parse_duration(input: &str) -> Result<Duration, AuthError> {
    let input = input.trim();
    let invalid = || AuthError::InvalidDuration(input.to_string());

    let (digits, unit) = match input.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&input[..idx], Some(c)),
        Some(_) => (input, None),
        None => return Err(invalid()),
    };
    let value: i64 = digits.parse().map_err(|_| invalid())?;
    if value <= 0 {
        return Err(invalid());
    }

    let seconds = match unit {
        None | Some('s') => Some(value),
        Some('m') => value.checked_mul(60),
        Some('h') => value.checked_mul(3_600),
        Some('d') => value.checked_mul(86_400),
        Some(_) => None,
    }
    .filter(|seconds| *seconds <= MAX_TOKEN_TTL_SECONDS)
    .ok_or_else(invalid)?;

    Duration::try_seconds(seconds).ok_or_else(invalid)
}

/// Build the claims for a token of `token_type` issued to `user` at `now`.
pub fn build_claims(user: &User, token_type: TokenType, now: DateTime<Utc>, ttl: Duration) -> Claims {
    Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role,
        token_type,
        iat: now.timestamp(),
        exp: now
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
            .timestamp(),
    }
}

/// Check if a token's claims have expired.
pub fn is_token_expired(claims: &Claims, now: DateTime<Utc>) -> bool {
    claims.exp <= now.timestamp()
}

/// Canonical form used for storing and looking up emails.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rental::Role;

    #[test]
    fn parse_duration_units() {
        assert_eq!(parse_duration("30m").unwrap(), Duration::minutes(30));
        assert_eq!(parse_duration("24h").unwrap(), Duration::hours(24));
        assert_eq!(parse_duration("7d").unwrap(), Duration::days(7));
        assert_eq!(parse_duration("45s").unwrap(), Duration::seconds(45));
        assert_eq!(parse_duration("3600").unwrap(), Duration::hours(1));
        assert_eq!(parse_duration(" 2h ").unwrap(), Duration::hours(2));
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        for bad in ["", "h", "0", "-5m", "7w", "1.5h", "abc", "99999999999d", "3651d"] {
            assert!(parse_duration(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn build_claims_sets_expiry() {
        let user = crate::rental::User::new("ana@example.com", "Ana", Role::Owner, "hash");
        let now = Utc::now();
        let claims = build_claims(&user, TokenType::Access, now, Duration::hours(1));

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.role, Role::Owner);
        assert_eq!(claims.exp - claims.iat, 3_600);
    }

    #[test]
    fn parse_duration_accepts_the_maximum() {
        assert_eq!(parse_duration("3650d").unwrap(), Duration::days(3_650));
    }

    #[test]
    fn build_claims_saturates_huge_ttl() {
        let user = crate::rental::User::new("ana@example.com", "Ana", Role::Owner, "hash");
        let claims = build_claims(&user, TokenType::Refresh, Utc::now(), Duration::MAX);

        assert_eq!(claims.exp, DateTime::<Utc>::MAX_UTC.timestamp());
    }

    #[test]
    fn is_token_expired_at_exact_expiry() {
        let user = crate::rental::User::new("ana@example.com", "Ana", Role::Customer, "hash");
        let now = Utc::now();
        let claims = build_claims(&user, TokenType::Access, now, Duration::minutes(5));

        assert!(!is_token_expired(&claims, now));
        assert!(is_token_expired(&claims, now + Duration::minutes(5)));
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Ana.Perez@Example.COM "), "ana.perez@example.com");
    }
}
