/// A contiguous region of detected speech, in seconds from the start of the
/// waveform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechSpan {
    start_secs: f64,
    end_secs: f64,
}

impl SpeechSpan {
    pub fn new(start_secs: f64, end_secs: f64) -> Self {
        debug_assert!(end_secs >= start_secs);
        Self {
            start_secs,
            end_secs,
        }
    }

    pub fn start_secs(&self) -> f64 {
        self.start_secs
    }

    pub fn end_secs(&self) -> f64 {
        self.end_secs
    }

    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}
