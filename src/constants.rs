// Environment-backed configuration, loaded once on first access.

use std::env;

/// The value shipped in `.env.example`; treated the same as no key at all.
pub const API_KEY_PLACEHOLDER: &str = "your_gemini_api_key_here";

lazy_static::lazy_static! {
    /// Gemini generateContent endpoint. Overridable mainly for local testing.
    pub static ref GEMINI_API_URL: String = env::var("GEMINI_API_URL").unwrap_or_else(|_| {
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
            .to_string()
    });
    /// Access credential for the Gemini API. Empty means unconfigured.
    pub static ref GEMINI_API_KEY: String = env::var("GEMINI_API_KEY").unwrap_or_default();
}
