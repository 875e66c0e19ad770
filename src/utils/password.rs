use base64::{Engine, engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD}};
use constant_time_eq::constant_time_eq;
use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::Rng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[cfg(not(test))]
const ITERATIONS: u32 = 260000;
// Hash rapide pour les tests
#[cfg(test)]
const ITERATIONS: u32 = 1000;
const KEY_LENGTH: usize = 32;
const PREFIX: &str = "pbkdf2:sha256:";

/// Hash un mot de passe au format pbkdf2:sha256:iterations$salt$hash
pub fn hash_password(password: &str) -> Result<String, String> {
    hash_with_iterations(password, ITERATIONS)
}

pub(crate) fn hash_with_iterations(password: &str, iterations: u32) -> Result<String, String> {
    // Salt aléatoire de 16 bytes
    let mut salt = [0u8; 16];
    rand::thread_rng().fill(&mut salt);

    let mut key = [0u8; KEY_LENGTH];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, iterations, &mut key)
        .map_err(|e| format!("PBKDF2 hash generation failed: {}", e))?;

    Ok(format!(
        "{}{}${}${}",
        PREFIX,
        iterations,
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(key)
    ))
}

/// Vérifie un mot de passe contre un hash stocké
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, String> {
    let (iterations, salt, expected) = parse_hash(stored_hash)?;

    let mut computed = vec![0u8; expected.len()];
    pbkdf2::<HmacSha256>(password.as_bytes(), &salt, iterations, &mut computed)
        .map_err(|e| format!("PBKDF2 hash verification failed: {}", e))?;

    Ok(constant_time_eq(&computed, &expected))
}

/// Vrai si le hash a été calculé avec moins d'itérations que l'actuel
pub fn needs_rehash(stored_hash: &str) -> bool {
    match parse_hash(stored_hash) {
        Ok((iterations, _, _)) => iterations < ITERATIONS,
        Err(_) => false,
    }
}

fn parse_hash(stored_hash: &str) -> Result<(u32, Vec<u8>, Vec<u8>), String> {
    let parts: Vec<&str> = stored_hash.split('$').collect();
    if parts.len() != 3 {
        return Err("Invalid hash format".to_string());
    }

    let iterations = parts[0]
        .strip_prefix(PREFIX)
        .ok_or_else(|| "Invalid header".to_string())?
        .parse::<u32>()
        .map_err(|_| "Invalid iterations".to_string())?;

    let salt = decode(parts[1])?;
    let hash = decode(parts[2])?;
    if hash.is_empty() {
        return Err("Empty hash".to_string());
    }

    Ok((iterations, salt, hash))
}

/// base64 URL-safe sans padding, sinon base64 standard, sinon hexadécimal
fn decode(input: &str) -> Result<Vec<u8>, String> {
    URL_SAFE_NO_PAD
        .decode(input)
        .or_else(|_| STANDARD.decode(input))
        .or_else(|_| hex::decode(input))
        .map_err(|_| "Failed to decode".to_string())
}
