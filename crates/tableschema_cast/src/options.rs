/// Options for row conversion.
///
/// The default collects every error in a row before failing it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Stop at the first field error instead of collecting all of them
    pub fail_fast: bool,
}

impl ConvertOptions {
    /// Creates options with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets fail-fast mode.
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_collect_all() {
        assert!(!ConvertOptions::new().fail_fast);
        assert!(ConvertOptions::new().with_fail_fast(true).fail_fast);
    }
}
