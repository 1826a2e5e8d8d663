//! Per-search statistics.

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of records scored.
    pub scanned: usize,
    /// Number of records that met the threshold.
    pub matched: usize,
    /// Number of records handed back (at most `MAX_RESULTS`).
    pub returned: usize,
    /// Records where neither the query nor the field had a single shingle.
    pub degenerate: usize,
}

impl SearchStats {
    /// Matches dropped by the result cap.
    pub fn truncated(&self) -> usize {
        self.matched.saturating_sub(self.returned)
    }
}

impl core::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} scanned, {} matched, {} returned",
            self.scanned, self.matched, self.returned
        )?;

        if self.degenerate > 0 {
            write!(f, ", {} degenerate", self.degenerate)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_basic() {
        let stats = SearchStats {
            scanned: 8,
            matched: 7,
            returned: 5,
            degenerate: 0,
        };
        assert_eq!(stats.to_string(), "8 scanned, 7 matched, 5 returned");
        assert_eq!(stats.truncated(), 2);
    }

    #[test]
    fn display_degenerate() {
        let stats = SearchStats {
            scanned: 3,
            degenerate: 1,
            ..Default::default()
        };
        assert!(stats.to_string().ends_with(", 1 degenerate"));
        assert_eq!(stats.truncated(), 0);
    }
}
