/// Delay between the last search keystroke and the reload.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Keeps only the latest value of a burst.
///
/// `push` returns a generation; after the delay the caller asks for that
/// generation back and gets the value only if nothing newer was pushed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Debounce<T> {
    generation: u64,
    pending: Option<T>,
}

impl<T> Debounce<T> {
    pub fn push(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.pending = Some(value);
        self.generation
    }

    pub fn take(&mut self, generation: u64) -> Option<T> {
        if generation == self.generation {
            self.pending.take()
        } else {
            None
        }
    }

    /// Drops the pending value; outstanding generations become stale.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_generation_fires() {
        let mut d = Debounce::default();
        let first = d.push("i");
        let second = d.push("ib");
        assert_eq!(d.take(first), None);
        assert_eq!(d.take(second), Some("ib"));
        assert_eq!(d.take(second), None);
    }

    #[test]
    fn test_cancel() {
        let mut d = Debounce::default();
        let g = d.push(1);
        d.cancel();
        assert_eq!(d, Debounce { generation: 2, pending: None });
        assert_eq!(d.take(g), None);
    }
}
