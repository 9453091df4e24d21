use oxidize_sched_core::error::{SchedResult, SchedulerError};
use oxidize_sched_core::{
    check_progress, clamp_progress, IntervalScaling, ParamScheduler, UpdateInterval, WHERE_EPSILON,
};
use tracing::{debug, trace};

/// Allowed deviation of the summed segment lengths from 1.0.
pub const LENGTH_SUM_TOLERANCE: f64 = 1e-3;

/// Runs a sequence of schedulers back to back over the course of training.
///
/// Segment `i` covers `lengths[i]` of total progress. Segments are right-open:
/// a progress value exactly on a boundary belongs to the later segment, and the
/// last segment absorbs whatever remains up to 1.0.
///
/// With [`IntervalScaling::Rescaled`] a segment's scheduler sees its own span
/// remapped onto `[0, 1)`, so it starts and ends at the same values it would if
/// it were the only scheduler. With [`IntervalScaling::Fixed`] it sees global
/// progress unchanged.
///
/// ```ignore
/// // 0.42 for the first 30% of training, then cosine decay to 0.0001.
/// let sched = CompositeParamScheduler::new(
///     vec![
///         Box::new(ConstantParamScheduler::new(0.42)),
///         Box::new(CosineParamScheduler::new(0.42, 0.0001)),
///     ],
///     vec![0.3, 0.7],
///     UpdateInterval::Step,
///     vec![IntervalScaling::Rescaled; 2],
/// )?;
/// ```
#[derive(Debug)]
pub struct CompositeParamScheduler {
    schedulers: Vec<Box<dyn ParamScheduler>>,
    lengths: Vec<f64>,
    interval_scaling: Vec<IntervalScaling>,
    update_interval: UpdateInterval,
    where_epsilon: f64,
}

impl CompositeParamScheduler {
    /// Build a composite from parallel lists of schedulers, lengths and scaling modes.
    ///
    /// Fails with [`SchedulerError::Configuration`] when the lists differ in
    /// length, are empty, contain a non-positive length, or when the lengths
    /// do not sum to 1.0 within [`LENGTH_SUM_TOLERANCE`]. A sum that is off by
    /// less than the tolerance is closed by rewriting the last length.
    pub fn new(
        schedulers: Vec<Box<dyn ParamScheduler>>,
        mut lengths: Vec<f64>,
        update_interval: UpdateInterval,
        interval_scaling: Vec<IntervalScaling>,
    ) -> SchedResult<Self> {
        if schedulers.is_empty() {
            return Err(SchedulerError::config(
                "composite scheduler needs at least one scheduler",
            ));
        }
        if schedulers.len() != lengths.len() {
            return Err(SchedulerError::config(format!(
                "composite scheduler: {} schedulers but {} lengths",
                schedulers.len(),
                lengths.len()
            )));
        }
        if schedulers.len() != interval_scaling.len() {
            return Err(SchedulerError::config(format!(
                "composite scheduler: {} schedulers but {} interval scalings",
                schedulers.len(),
                interval_scaling.len()
            )));
        }
        if let Some(bad) = lengths.iter().find(|l| !l.is_finite() || **l <= 0.0) {
            return Err(SchedulerError::config(format!(
                "composite scheduler: lengths must be positive, got {}",
                bad
            )));
        }

        let total: f64 = lengths.iter().sum();
        if (total - 1.0).abs() >= LENGTH_SUM_TOLERANCE {
            return Err(SchedulerError::config(format!(
                "composite scheduler: lengths must sum to 1.0, got {}",
                total
            )));
        }
        if total != 1.0 {
            let last = lengths.len() - 1;
            let head: f64 = lengths[..last].iter().sum();
            let closed = 1.0 - head;
            if closed <= 0.0 {
                return Err(SchedulerError::config(format!(
                    "composite scheduler: leading lengths already sum to {}, nothing left for the last segment",
                    head
                )));
            }
            debug!(from = lengths[last], to = closed, "adjusted last composite length");
            lengths[last] = closed;
        }

        debug!(
            segments = schedulers.len(),
            %update_interval,
            ?lengths,
            "built composite scheduler"
        );

        Ok(CompositeParamScheduler {
            schedulers,
            lengths,
            interval_scaling,
            update_interval,
            where_epsilon: WHERE_EPSILON,
        })
    }

    /// Override the boundary tie-break tolerance (defaults to [`WHERE_EPSILON`]).
    ///
    /// The tolerance must be finite, non-negative and smaller than the
    /// shortest segment, otherwise some segment could never be selected.
    pub fn with_where_epsilon(mut self, where_epsilon: f64) -> SchedResult<Self> {
        let shortest = self.lengths.iter().copied().fold(f64::INFINITY, f64::min);
        if !where_epsilon.is_finite() || where_epsilon < 0.0 || where_epsilon >= shortest {
            return Err(SchedulerError::config(format!(
                "composite scheduler: where epsilon must be in [0, {}), got {}",
                shortest, where_epsilon
            )));
        }
        self.where_epsilon = where_epsilon;
        Ok(self)
    }

    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    pub fn interval_scaling(&self) -> &[IntervalScaling] {
        &self.interval_scaling
    }

    pub fn where_epsilon(&self) -> f64 {
        self.where_epsilon
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.schedulers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedulers.is_empty()
    }

    /// Index of the segment that owns `progress`.
    pub fn segment_index(&self, progress: f64) -> SchedResult<usize> {
        let p = check_progress(progress)?;
        Ok(self.locate(p).0)
    }

    /// Returns the segment index and the cumulative boundary at its end.
    fn locate(&self, progress: f64) -> (usize, f64) {
        let last = self.lengths.len() - 1;
        let mut i = 0;
        let mut running_total = self.lengths[0];
        while progress + self.where_epsilon > running_total && i < last {
            i += 1;
            running_total += self.lengths[i];
        }
        (i, running_total)
    }
}

impl ParamScheduler for CompositeParamScheduler {
    fn value_at(&self, progress: f64) -> SchedResult<f64> {
        let p = check_progress(progress)?;
        let (i, running_total) = self.locate(p);

        let local = match self.interval_scaling[i] {
            IntervalScaling::Fixed => p,
            IntervalScaling::Rescaled => {
                let length = self.lengths[i];
                let segment_start = running_total - length;
                // Tie-breaking can hand a value just below the boundary to this
                // segment, so keep the remapped progress inside [0, 1).
                clamp_progress((p - segment_start) / length)
            }
        };

        trace!(progress = p, segment = i, local, "composite segment selected");
        self.schedulers[i].value_at(local)
    }

    fn update_interval(&self) -> UpdateInterval {
        self.update_interval
    }
}
