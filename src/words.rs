//! Keywords fed to the catalogue search.
//!
//! Common, mood-neutral English words that each match thousands of tracks, so
//! a random pick lands on an arbitrary slice of the catalogue.

pub const SEARCH_TERMS: &[&str] = &[
    "again", "air", "alone", "angel", "answer", "autumn", "baby", "back", "ballad", "beach",
    "beautiful", "bird", "black", "blue", "body", "bones", "boy", "bridge", "bright", "broken",
    "brother", "burn", "california", "call", "candle", "car", "change", "city", "closer", "cloud",
    "cold", "color", "come", "crazy", "crown", "cry", "dance", "dark", "daughter", "dawn", "day",
    "dear", "desert", "diamond", "dream", "drive", "drum", "early", "earth", "echo", "electric",
    "empty", "end", "escape", "evening", "eyes", "fade", "faith", "fall", "far", "fever", "field",
    "fire", "flower", "fly", "forever", "free", "friend", "garden", "ghost", "girl", "glass",
    "gold", "good", "gravity", "green", "happy", "heart", "heaven", "highway", "holiday", "home",
    "honey", "hope", "horizon", "hunger", "ice", "island", "journey", "jungle", "kingdom", "kiss",
    "lady", "last", "late", "lemon", "letter", "light", "lightning", "little", "lonely", "long",
    "love", "lucky", "machine", "magic", "memory", "midnight", "mirror", "moment", "money",
    "moon", "morning", "mountain", "music", "neon", "never", "night", "ocean", "orange", "paper",
    "paradise", "party", "people", "piano", "place", "rain", "red", "river", "road", "rock",
    "roses", "run", "sailor", "satellite", "sea", "secret", "shadow", "shine", "silver", "sky",
    "sleep", "slow", "smile", "snow", "song", "soul", "spring", "star", "stay", "stone", "storm",
    "story", "street", "strange", "summer", "sun", "sunday", "sweet", "talk", "tears", "thunder",
    "time", "tomorrow", "tonight", "touch", "train", "tree", "true", "velvet", "voice", "wait",
    "walk", "water", "wave", "wild", "wind", "window", "winter", "wish", "wonder", "world",
    "yellow", "young",
];
