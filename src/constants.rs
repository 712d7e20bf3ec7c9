/// Default HTTP listen port
pub const DEFAULT_PORT: u16 = 3000;

/// Number of tables seeded at startup
pub const DEFAULT_TABLE_COUNT: u32 = 10;

/// Simulated processing time before a replay becomes available (milliseconds)
pub const DEFAULT_REPLAY_DELAY_MS: u64 = 3000;

/// How long a replay is flagged as "new" in the list view (milliseconds)
pub const DEFAULT_FRESHNESS_WINDOW_MS: i64 = 120_000;

/// Client poll cadence for list, player and notification pollers (milliseconds)
pub const POLL_INTERVAL_MS: u64 = 1000;

/// Placeholder live feed served for every table
pub const DEFAULT_STREAM_URL: &str =
    "https://storage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4";

/// Placeholder replay clip. Every completed trigger writes this same URL;
/// a real pipeline would produce a unique asset per clip.
pub const DEFAULT_REPLAY_URL: &str =
    "https://storage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4";
