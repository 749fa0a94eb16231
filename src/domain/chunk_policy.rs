/// How a recording should be split before transcription.
///
/// A requested duration of zero or less disables backend chunking entirely
/// (clients that chunk on their side pass `<= 0`); any positive value is
/// silently clamped to the safe range rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkPolicy {
    /// Skip segmentation and transcribe the whole file in one remote call.
    Disabled,
    /// Segment speech into chunks of at most this many seconds.
    Chunked(u32),
}

impl ChunkPolicy {
    pub const MIN_SECONDS: u32 = 10;
    pub const MAX_SECONDS: u32 = 600;
    pub const DEFAULT_SECONDS: u32 = 120;

    /// Clamp a requested positive duration to `[MIN_SECONDS, MAX_SECONDS]`.
    pub fn clamp_seconds(requested: i64) -> u32 {
        requested.clamp(Self::MIN_SECONDS as i64, Self::MAX_SECONDS as i64) as u32
    }

    /// Resolve the effective policy for one request. `None` means the caller
    /// did not ask for anything and the configured default applies.
    pub fn resolve(requested: Option<i64>, default_seconds: u32) -> Self {
        match requested {
            None => Self::Chunked(Self::clamp_seconds(default_seconds as i64)),
            Some(v) if v <= 0 => Self::Disabled,
            Some(v) => Self::Chunked(Self::clamp_seconds(v)),
        }
    }
}
