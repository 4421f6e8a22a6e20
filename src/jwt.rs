use jwt_simple::prelude::*;

use crate::credential::Credential;
use crate::errors::SnowflakeResult;

/// Build the key-pair JWT Snowflake expects as a bearer token.
///
/// The issuer is `ACCOUNT.USER.SHA256:<public key fingerprint>` and the
/// subject is `ACCOUNT.USER`. Tokens are capped at 59 minutes, one minute
/// under the longest lifetime Snowflake accepts.
pub(crate) fn authorization_token(
    credential: &Credential,
    account_identifier: &str,
    user: &str,
) -> SnowflakeResult<String> {
    // A region suffix is not part of the token identity:
    // AAA00000.us-east-1 becomes AAA00000.
    let account = match account_identifier.find('.') {
        Some(dot) => &account_identifier[..dot],
        None => account_identifier,
    };
    let qualified_username = format!("{account}.{user}");
    let fingerprint = public_key_fingerprint(credential);
    log::debug!("public key fingerprint: {fingerprint}");
    let claims = Claims::create(Duration::from_mins(59))
        .with_issuer(format!("{qualified_username}.SHA256:{fingerprint}"))
        .with_subject(qualified_username);
    Ok(credential.key_pair().sign(claims)?)
}

/// SHA-256 fingerprint of the public key, in the padded standard-base64 form
/// Snowflake publishes via `DESCRIBE USER`.
fn public_key_fingerprint(credential: &Credential) -> String {
    let mut thumbprint = credential.key_pair().public_key().sha256_thumbprint();
    // The thumbprint arrives URL-safe and unpadded.
    thumbprint = thumbprint.replace('-', "+").replace('_', "/");
    for _ in 0..(4 - thumbprint.len() % 4) % 4 {
        thumbprint.push('=');
    }
    thumbprint
}

#[cfg(test)]
mod tests {
    use jwt_simple::algorithms::RS256KeyPair;

    use crate::errors::SnowflakeResult;

    use super::*;

    #[test]
    fn token_verifies_against_the_public_key() -> SnowflakeResult<()> {
        let key_pair = RS256KeyPair::generate(2048)?;
        let credential = Credential::from_key_pair(key_pair.clone())?;
        let token = authorization_token(&credential, "TEST_ACCOUNT", "TEST_USER")?;
        let claims = key_pair
            .public_key()
            .verify_token::<NoCustomClaims>(&token, None);
        assert!(claims.is_ok());
        Ok(())
    }

    #[test]
    fn region_suffix_is_stripped_from_the_issuer() -> SnowflakeResult<()> {
        let key_pair = RS256KeyPair::generate(2048)?;
        let credential = Credential::from_key_pair(key_pair.clone())?;
        let token = authorization_token(&credential, "AAA00000.us-east-1", "REPORTER")?;
        let claims = key_pair
            .public_key()
            .verify_token::<NoCustomClaims>(&token, None)?;
        assert_eq!(claims.subject.as_deref(), Some("AAA00000.REPORTER"));
        Ok(())
    }

    #[test]
    fn fingerprint_is_padded_standard_base64() -> SnowflakeResult<()> {
        let credential = Credential::from_key_pair(RS256KeyPair::generate(2048)?)?;
        let fingerprint = public_key_fingerprint(&credential);
        assert_eq!(fingerprint.len() % 4, 0);
        assert!(!fingerprint.contains('-') && !fingerprint.contains('_'));
        Ok(())
    }
}
