use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{
    Rng, SeedableRng, TryRngCore,
    rngs::{OsRng, SmallRng, StdRng},
    seq::IndexedRandom,
};

use crate::{Error, Res, warning};

const STATE_BYTES: usize = 32;

/// Generates the anti-forgery `state` value for one sign-in attempt.
///
/// Reads 32 bytes straight from the operating system's random source and
/// encodes them as URL-safe base64 without padding. Fails instead of falling
/// back to a weaker generator.
pub fn generate_state() -> Res<String> {
    let mut bytes = [0u8; STATE_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| Error::Entropy(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Picks one keyword uniformly from `words` using the given generator.
pub fn choose_keyword<'w, R: Rng + ?Sized>(words: &[&'w str], rng: &mut R) -> Option<&'w str> {
    words.choose(rng).copied()
}

/// Picks one keyword uniformly from `words`.
///
/// Prefers a cryptographically secure generator seeded from the OS and only
/// falls back to a clock-seeded `SmallRng` when the OS source errors.
pub fn pick_keyword<'w>(words: &[&'w str]) -> Option<&'w str> {
    match StdRng::try_from_os_rng() {
        Ok(mut rng) => choose_keyword(words, &mut rng),
        Err(e) => {
            warning!("Secure random source failed ({}), using fallback generator", e);
            let seed = chrono::Utc::now()
                .timestamp_nanos_opt()
                .unwrap_or_default() as u64;
            choose_keyword(words, &mut SmallRng::seed_from_u64(seed))
        }
    }
}

/// Spotify URI for a track id, the form the library endpoints expect.
pub fn track_uri(track_id: &str) -> String {
    format!("spotify:track:{}", track_id)
}

/// Redirect URI registered with Spotify for the given `host:port`.
pub fn redirect_uri(redirect_host: &str) -> String {
    format!("http://{}/callback", redirect_host)
}
