use crate::error::AuthError;

const TOKEN_BYTES: usize = 32;

/// 64 lowercase hex characters from the OS random source.
///
/// # Errors
///
/// Returns `AuthError::TokenStore` if the OS random source is unavailable.
pub fn generate_session_token() -> Result<String, AuthError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    getrandom::fill(&mut bytes)
        .map_err(|e| AuthError::TokenStore(format!("random source unavailable: {e}")))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}
