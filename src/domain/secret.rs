//! Deployment bootstrap secrets.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rand::Rng;

/// Random bytes behind a freshly generated JWT signing secret.
pub const JWT_SECRET_BYTES: usize = 64;

/// Length of the per-run database root password.
pub const DB_PASSWORD_LEN: usize = 8;

const DB_PASSWORD_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Secrets placed into the plan for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Secrets {
    pub jwt_secret: String,
    pub db_root_password: String,
    /// Whether the JWT secret was created by this run rather than reused.
    pub jwt_generated: bool,
}

/// Reuse a stored JWT secret verbatim or generate one, and always draw a new database password.
pub fn generate_secrets<R: Rng + ?Sized>(stored_jwt: Option<&str>, rng: &mut R) -> Secrets {
    let (jwt_secret, jwt_generated) = match stored_jwt.filter(|secret| !secret.is_empty()) {
        Some(secret) => (secret.to_string(), false),
        None => (generate_jwt_secret(rng), true),
    };

    Secrets { jwt_secret, db_root_password: generate_db_password(rng), jwt_generated }
}

fn generate_jwt_secret<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; JWT_SECRET_BYTES];
    rng.fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

fn generate_db_password<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..DB_PASSWORD_LEN)
        .map(|_| DB_PASSWORD_CHARSET[rng.gen_range(0..DB_PASSWORD_CHARSET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn stored_jwt_secret_is_reused_verbatim() {
        let mut rng = StdRng::seed_from_u64(7);

        let first = generate_secrets(Some("c2VjcmV0"), &mut rng);
        let second = generate_secrets(Some("c2VjcmV0"), &mut rng);

        assert_eq!(first.jwt_secret, "c2VjcmV0");
        assert_eq!(second.jwt_secret, "c2VjcmV0");
        assert!(!first.jwt_generated);
    }

    #[test]
    fn missing_jwt_secret_is_generated_with_minimum_length() {
        let mut rng = StdRng::seed_from_u64(7);

        let secrets = generate_secrets(None, &mut rng);

        assert!(secrets.jwt_generated);
        assert!(secrets.jwt_secret.len() >= JWT_SECRET_BYTES);
        assert!(STANDARD.decode(&secrets.jwt_secret).is_ok());
    }

    #[test]
    fn empty_stored_secret_is_replaced() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(generate_secrets(Some(""), &mut rng).jwt_generated);
    }

    #[test]
    fn db_password_is_short_lowercase_alphanumeric() {
        let mut rng = StdRng::seed_from_u64(42);

        let secrets = generate_secrets(Some("kept"), &mut rng);

        assert_eq!(secrets.db_root_password.len(), DB_PASSWORD_LEN);
        assert!(secrets
            .db_root_password
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }
}
