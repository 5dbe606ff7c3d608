//! Discrete zoom-level selection relative to the fit scale.
//!
//! The candidate ladder is fixed, but the effective list is recomputed
//! against the fit scale every time: candidates closer to the fit scale
//! than the minimum distance would be visually indistinguishable from fit
//! and are dropped.

/// Ascending candidate multipliers.
pub const ZOOM_LADDER: &[f64] = &[0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 2.0, 3.0, 4.0];

/// Minimum distance a candidate must exceed the fit scale by.
pub const MIN_FIT_DISTANCE: f64 = 0.05;

const FACTOR_EPSILON: f64 = 1e-9;

/// Either the dynamic fit scale or a fixed multiplier from the ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Zoom {
    Fit,
    Factor(f64),
}

impl Zoom {
    pub const fn is_fit(self) -> bool {
        matches!(self, Self::Fit)
    }
}

/// Steps through the effective zoom list, remembering the fit scale that
/// was last measured while actually in fit mode. A scale observed while
/// zoomed reflects the zoomed preview and must not shift the ladder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ZoomSelector {
    current: Option<f64>,
    last_fit_scale: Option<f64>,
}

impl ZoomSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Zoom {
        match self.current {
            Some(factor) => Zoom::Factor(factor),
            None => Zoom::Fit,
        }
    }

    /// Records the measured fit scale, but only while in fit mode. Before
    /// fit has ever been measured, [`Self::effective_levels`] falls back to
    /// the live scale passed in.
    pub fn observe_fit_scale(&mut self, scale: f64) {
        if self.current.is_none() && scale > 0.0 {
            self.last_fit_scale = Some(scale);
        }
    }

    /// The selectable levels: `fit` first, then every ladder candidate that
    /// clears the fit scale by the minimum distance. Strictly ascending.
    pub fn effective_levels(&self, live_fit_scale: f64) -> Vec<Zoom> {
        let fit = self.last_fit_scale.unwrap_or(live_fit_scale);
        let mut levels = vec![Zoom::Fit];
        levels.extend(
            ZOOM_LADDER
                .iter()
                .copied()
                .filter(|candidate| candidate - fit >= MIN_FIT_DISTANCE)
                .map(Zoom::Factor),
        );
        levels
    }

    pub fn can_zoom_in(&self, live_fit_scale: f64) -> bool {
        self.next_level(live_fit_scale).is_some()
    }

    pub fn can_zoom_out(&self) -> bool {
        self.current.is_some()
    }

    /// Steps to the next effective level; disabled at the top end.
    pub fn zoom_in(&mut self, live_fit_scale: f64) -> Zoom {
        if let Some(next) = self.next_level(live_fit_scale) {
            self.set_zoom(next);
        }
        self.current()
    }

    /// Steps to the previous effective level; at the bottom this is fit.
    pub fn zoom_out(&mut self, live_fit_scale: f64) -> Zoom {
        let Some(factor) = self.current else {
            return Zoom::Fit;
        };
        let previous = self
            .effective_levels(live_fit_scale)
            .into_iter()
            .rev()
            .find(|level| match level {
                Zoom::Factor(candidate) => *candidate < factor - FACTOR_EPSILON,
                Zoom::Fit => true,
            })
            .unwrap_or(Zoom::Fit);
        self.set_zoom(previous);
        self.current()
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.current = match zoom {
            Zoom::Fit => None,
            Zoom::Factor(factor) => Some(factor),
        };
    }

    fn next_level(&self, live_fit_scale: f64) -> Option<Zoom> {
        let levels = self.effective_levels(live_fit_scale);
        match self.current {
            None => levels.get(1).copied(),
            Some(factor) => levels.into_iter().find(|level| {
                matches!(level, Zoom::Factor(candidate) if *candidate > factor + FACTOR_EPSILON)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factors(levels: &[Zoom]) -> Vec<f64> {
        levels
            .iter()
            .filter_map(|level| match level {
                Zoom::Factor(factor) => Some(*factor),
                Zoom::Fit => None,
            })
            .collect()
    }

    #[test]
    fn effective_levels_begin_with_fit_and_ascend_strictly() {
        let selector = ZoomSelector::new();
        for fit_scale in [0.1, 0.3, 0.72, 1.0, 2.5] {
            let levels = selector.effective_levels(fit_scale);
            assert_eq!(levels[0], Zoom::Fit, "fit_scale {fit_scale}");
            let factors = factors(&levels);
            for pair in factors.windows(2) {
                assert!(pair[0] < pair[1], "fit_scale {fit_scale}: {factors:?}");
            }
        }
    }

    #[test]
    fn candidates_too_close_to_fit_scale_are_dropped() {
        let selector = ZoomSelector::new();
        // 0.75 - 0.72 < 0.05, so 0.75 is indistinguishable from fit.
        let levels = factors(&selector.effective_levels(0.72));
        assert!(!levels.contains(&0.75));
        assert!(levels.contains(&1.0));
    }

    #[test]
    fn zoom_in_and_out_step_the_effective_list() {
        let mut selector = ZoomSelector::new();
        assert!(!selector.can_zoom_out());

        assert_eq!(selector.zoom_in(0.3), Zoom::Factor(0.5));
        assert_eq!(selector.zoom_in(0.3), Zoom::Factor(0.75));
        assert_eq!(selector.zoom_out(0.3), Zoom::Factor(0.5));
        assert_eq!(selector.zoom_out(0.3), Zoom::Fit);
        assert_eq!(selector.zoom_out(0.3), Zoom::Fit);
    }

    #[test]
    fn zoom_in_is_disabled_at_the_top_of_the_ladder() {
        let mut selector = ZoomSelector::new();
        for _ in 0..ZOOM_LADDER.len() + 1 {
            selector.zoom_in(0.3);
        }
        assert_eq!(selector.current(), Zoom::Factor(4.0));
        assert!(!selector.can_zoom_in(0.3));
    }

    #[test]
    fn fit_scale_observed_while_zoomed_does_not_shift_the_ladder() {
        let mut selector = ZoomSelector::new();
        selector.observe_fit_scale(0.3);
        selector.zoom_in(0.3);

        // Window resize while zoomed reports a different scale.
        selector.observe_fit_scale(0.9);
        let levels = factors(&selector.effective_levels(0.9));
        assert!(levels.contains(&0.5), "ladder should still be fit-relative");
    }

    #[test]
    fn live_scale_is_used_before_fit_was_ever_measured() {
        let selector = ZoomSelector::new();
        let levels = factors(&selector.effective_levels(0.9));
        assert_eq!(levels, [1.0, 1.25, 1.5, 2.0, 3.0, 4.0]);
    }
}
