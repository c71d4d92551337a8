//! Piecewise-linear trend curves
//!
//! A [`TrendCurve`] is a multiplicative factor over time, defined by anchor
//! points `(year, value)`. It is flat at the first anchor's value before the
//! first anchor, linear between anchors, and continues with a fixed slope after
//! the last one. Building the segments from anchors makes the curve continuous
//! at every breakpoint.
//!
//! Two instances are used by the series: [`TrendCurve::climate`] and
//! [`TrendCurve::human_impact`].

/// One linear piece of a trend curve, valid from `start_year` until the next segment starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSegment {
    pub start_year: f64,
    pub intercept: f64,
    pub slope: f64,
}

impl TrendSegment {
    pub fn value(&self, year: f64) -> f64 {
        self.intercept + self.slope * (year - self.start_year)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendCurve {
    baseline: f64,
    segments: Vec<TrendSegment>,
}

impl TrendCurve {
    /// Build a curve through `anchors`, which must be sorted by year.
    ///
    /// An empty anchor list gives a flat curve at 1.0.
    pub fn from_anchors(anchors: &[(i32, f64)], tail_slope: f64) -> Self {
        let baseline = anchors.first().map(|(_, value)| *value).unwrap_or(1.0);

        let mut segments: Vec<TrendSegment> = anchors
            .windows(2)
            .map(|pair| {
                let (start, from) = pair[0];
                let (end, to) = pair[1];
                TrendSegment {
                    start_year: f64::from(start),
                    intercept: from,
                    slope: (to - from) / f64::from(end - start),
                }
            })
            .collect();

        if let Some(&(year, value)) = anchors.last() {
            segments.push(TrendSegment {
                start_year: f64::from(year),
                intercept: value,
                slope: tail_slope,
            });
        }

        Self { baseline, segments }
    }

    /// Industrial-era climate trend.
    ///
    /// Pre-industrial until 1900, then 1.02 by 1950, 1.1 by 1980 and 1.3 by
    /// 2000, rising 1.5% of the baseline per year afterwards.
    pub fn climate() -> Self {
        Self::from_anchors(
            &[(1900, 1.0), (1950, 1.02), (1980, 1.1), (2000, 1.3)],
            0.015,
        )
    }

    /// Human impact multiplier.
    ///
    /// | Period | Factor |
    /// |---|---|
    /// | before 1800 | 1.0 |
    /// | 1800–1900 | 1.0 + 0.005 (y − 1800) |
    /// | 1900–1950 | 1.5 + 0.01 (y − 1900) |
    /// | 1950–1980 | 2.0 + 0.02 (y − 1950) |
    /// | 1980–2000 | 2.6 + 0.03 (y − 1980) |
    /// | from 2000 | 3.2 + 0.04 (y − 2000) |
    pub fn human_impact() -> Self {
        Self::from_anchors(
            &[
                (1800, 1.0),
                (1900, 1.5),
                (1950, 2.0),
                (1980, 2.6),
                (2000, 3.2),
            ],
            0.04,
        )
    }

    pub fn segments(&self) -> &[TrendSegment] {
        &self.segments
    }

    /// Years at which the curve changes formula.
    pub fn breakpoints(&self) -> impl Iterator<Item = f64> + '_ {
        self.segments.iter().map(|s| s.start_year)
    }

    pub fn value_at(&self, year: f64) -> f64 {
        self.segments
            .iter()
            .rev()
            .find(|s| year >= s.start_year)
            .map(|s| s.value(year))
            .unwrap_or(self.baseline)
    }

    pub fn at(&self, year: i32) -> f64 {
        self.value_at(f64::from(year))
    }

    /// Largest jump between the formula ending at a breakpoint and the one starting there.
    pub fn max_discontinuity(&self) -> f64 {
        let leading = self
            .segments
            .first()
            .map(|s| (self.baseline - s.intercept).abs())
            .unwrap_or(0.0);

        self.segments
            .windows(2)
            .map(|pair| (pair[0].value(pair[1].start_year) - pair[1].intercept).abs())
            .fold(leading, f64::max)
    }
}
