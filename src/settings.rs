use crate::error::Error;

/// Configuration of the duplex split engine.
///
/// Thresholds named `*_thr` and `*_edist` come in strict/relaxed pairs: the
/// strict values gate the high-confidence strategies, the relaxed values the
/// combined-evidence ones. Current thresholds are in picoamps and converted
/// to raw-signal scale per read; flank and prefix lengths are in bases unless
/// noted.
#[derive(Debug, Clone)]
pub struct DuplexSplitSettings {
    /// Master switch; when false the node forwards every message unchanged.
    pub enabled: bool,
    /// Restrict splitting to the pore-plus-adapter strategy.
    pub simplex_mode: bool,
    /// Current threshold (pA) for strong open-pore signal.
    pub pore_thr: f32,
    /// Lower current threshold (pA) used by the combined strategy.
    pub relaxed_pore_thr: f32,
    /// Max gap (samples) between super-threshold samples within one pore cluster.
    pub pore_cl_dist: usize,
    /// Template-side flank length upstream of a candidate spacer.
    pub end_flank: usize,
    /// Bases skipped immediately before the spacer when forming the query flank.
    pub end_trim: usize,
    /// Complement-side flank length downstream of a candidate spacer.
    pub start_flank: usize,
    pub flank_edist: i32,
    pub relaxed_flank_edist: i32,
    pub adapter_edist: i32,
    pub relaxed_adapter_edist: i32,
    /// How far downstream of a pore region to search for the adapter (bases).
    pub pore_adapter_range: usize,
    /// Leading bases ignored when searching for adapters.
    pub expect_adapter_prefix: usize,
    /// Leading samples ignored when searching for pore signal.
    pub expect_pore_prefix: usize,
    /// Window width centered on the read midpoint for the middle-adapter search.
    pub middle_adapter_search_span: usize,
    /// Adapter sequence expected at the start of a read.
    pub adapter: String,
}

impl Default for DuplexSplitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            simplex_mode: false,
            pore_thr: 2200.0,
            relaxed_pore_thr: 700.0,
            pore_cl_dist: 4000,
            end_flank: 1200,
            end_trim: 200,
            start_flank: 1700,
            flank_edist: 150,
            relaxed_flank_edist: 250,
            adapter_edist: 4,
            relaxed_adapter_edist: 8,
            pore_adapter_range: 100,
            expect_adapter_prefix: 200,
            expect_pore_prefix: 5000,
            middle_adapter_search_span: 1000,
            adapter: "AATGTACTTCGTTCAGTTACGTATTGCT".to_string(),
        }
    }
}

impl DuplexSplitSettings {
    /// Validate combinations that the type system alone cannot enforce.
    pub fn validate(&self) -> Result<(), Error> {
        if self.adapter.is_empty() {
            return Err(Error::settings("adapter sequence must not be empty"));
        }
        if self.end_flank == 0 || self.start_flank == 0 {
            return Err(Error::settings("flank lengths must be >= 1"));
        }
        if self.end_trim >= self.end_flank {
            return Err(Error::settings("end_trim must be smaller than end_flank"));
        }
        if self.flank_edist < 0
            || self.relaxed_flank_edist < 0
            || self.adapter_edist < 0
            || self.relaxed_adapter_edist < 0
        {
            return Err(Error::settings("edit-distance thresholds must be >= 0"));
        }
        if self.middle_adapter_search_span == 0 {
            return Err(Error::settings("middle_adapter_search_span must be >= 1"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = DuplexSplitSettings::default();
        assert!(s.enabled);
        assert!(!s.simplex_mode);
        assert_eq!(s.pore_thr, 2200.0);
        assert_eq!(s.relaxed_pore_thr, 700.0);
        assert_eq!(s.pore_cl_dist, 4000);
        assert_eq!(s.end_flank, 1200);
        assert_eq!(s.end_trim, 200);
        assert_eq!(s.start_flank, 1700);
        assert_eq!(s.flank_edist, 150);
        assert_eq!(s.relaxed_flank_edist, 250);
        assert_eq!(s.adapter_edist, 4);
        assert_eq!(s.relaxed_adapter_edist, 8);
        assert_eq!(s.pore_adapter_range, 100);
        assert_eq!(s.expect_adapter_prefix, 200);
        assert_eq!(s.expect_pore_prefix, 5000);
        assert_eq!(s.middle_adapter_search_span, 1000);
        assert_eq!(s.adapter.len(), 28);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn rejects_empty_adapter() {
        let s = DuplexSplitSettings {
            adapter: String::new(),
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_trim_wider_than_flank() {
        let s = DuplexSplitSettings {
            end_flank: 100,
            end_trim: 100,
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn rejects_negative_edit_distance() {
        let s = DuplexSplitSettings {
            adapter_edist: -1,
            ..Default::default()
        };
        assert!(s.validate().is_err());
    }
}
