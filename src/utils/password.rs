use crate::config::{AppConfig, Argon2Config};
use crate::errors::{CampusError, Result};
use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};

fn hasher(config: &Argon2Config) -> Result<Argon2<'static>> {
    let params = Params::new(
        config.memory_cost,
        config.time_cost,
        config.parallelism,
        None,
    )
    .map_err(|e| CampusError::internal(format!("Invalid Argon2 parameters: {e}")))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// 哈希密码（Argon2id）
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with(&AppConfig::get().argon2, password)
}

pub fn hash_password_with(config: &Argon2Config, password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher(config)?.hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// 验证密码，参数从哈希串中读取
pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed_hash) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Argon2Config {
        Argon2Config {
            memory_cost: 1024,
            time_cost: 1,
            parallelism: 1,
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password_with(&cheap(), "SecurePass123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("SecurePass123", &hash));
        assert!(!verify_password("securepass123", &hash));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-hash"));
        assert!(!verify_password("anything", ""));
    }
}
