use derive_more::{Display, From};

/// Identifies one outbound request. Responses carrying a tag that is no longer
/// current are dropped by the owning screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From)]
#[display(fmt = "#{}", _0)]
pub struct RequestTag(u64);

/// Monotonic counter owned by a screen state.
///
/// `begin` mints a fresh tag and makes it the only accepted one; `invalidate`
/// retires the current tag without minting a new one (used by clear and mode
/// switches).
#[derive(Debug, Clone, Default)]
pub struct Generation {
    next: u64,
    current: Option<RequestTag>,
}

impl Generation {
    pub fn begin(&mut self) -> RequestTag {
        self.next += 1;
        let tag = RequestTag(self.next);
        self.current = Some(tag);
        tag
    }

    pub fn invalidate(&mut self) {
        self.current = None;
    }

    pub fn is_current(&self, tag: RequestTag) -> bool {
        self.current == Some(tag)
    }

    /// Accepts `tag` exactly once. Returns false for stale or already-settled tags.
    pub fn settle(&mut self, tag: RequestTag) -> bool {
        if self.is_current(tag) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_tag_settles() {
        let mut generation = Generation::default();
        let first = generation.begin();
        let second = generation.begin();

        assert!(!generation.settle(first));
        assert!(generation.settle(second));
        assert!(!generation.settle(second), "a tag settles at most once");
    }

    #[test]
    fn invalidate_retires_in_flight_tag() {
        let mut generation = Generation::default();
        let tag = generation.begin();
        generation.invalidate();

        assert!(!generation.is_current(tag));
        assert!(!generation.settle(tag));
        assert_ne!(generation.begin(), tag);
    }

    #[test]
    fn tags_display_with_sequence_number() {
        let mut generation = Generation::default();
        assert_eq!(generation.begin().to_string(), "#1");
    }
}
