//! Append-only cohort-flow ledger
//!
//! Every stage that changes the sample size records an entry: the stage
//! label, the resulting count, how many rows the stage excluded, and why.
//! Entries are never reordered or rewritten after the fact.

/// One stage of the cohort flow.
#[derive(Debug, Clone)]
pub struct CohortStage {
    pub stage: String,
    pub n: usize,
    pub excluded: usize,
    pub reason: String,
}

/// Ordered record of sample-size reductions from raw load to analysis sample.
#[derive(Debug, Clone, Default)]
pub struct CohortFlow {
    stages: Vec<CohortStage>,
}

impl CohortFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage entry.
    pub fn record(&mut self, stage: &str, n: usize, excluded: usize, reason: &str) {
        self.stages.push(CohortStage {
            stage: stage.to_string(),
            n,
            excluded,
            reason: reason.to_string(),
        });
    }

    pub fn stages(&self) -> &[CohortStage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Sample size at the first recorded stage (the raw load).
    pub fn initial_n(&self) -> usize {
        self.stages.first().map(|s| s.n).unwrap_or(0)
    }

    /// Sample size at the last recorded stage (the analysis sample).
    pub fn final_n(&self) -> usize {
        self.stages.last().map(|s| s.n).unwrap_or(0)
    }

    /// Share of the raw sample that survived to the last stage, in percent.
    pub fn retention_pct(&self) -> f64 {
        if self.initial_n() == 0 {
            return 0.0;
        }
        self.final_n() as f64 / self.initial_n() as f64 * 100.0
    }

    /// True when stage counts never increase from one entry to the next.
    pub fn is_monotonic(&self) -> bool {
        self.stages.windows(2).all(|pair| pair[0].n >= pair[1].n)
    }
}
