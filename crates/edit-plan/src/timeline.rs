//! Timeline resolution: elapsed time to current shot.
//!
//! `resolve` is a pure function of `(elapsed, plan)`. Recomputing the
//! current shot from scratch every tick (instead of stepping a cursor)
//! removes drift between the reported shot and the true timeline position.

use crate::shot::{EditPlan, Shot};

/// The shot occupying a given elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedShot<'a> {
    /// Index into `plan.shots`.
    pub index: usize,

    /// The shot itself.
    pub shot: &'a Shot,

    /// Seconds into this shot's window, in `[0, duration)`.
    pub local_elapsed: f64,

    /// 1-based count of Image/Video shots up to and including this one.
    /// During a text card this holds the previous visual count, so the
    /// shot counter shown upstream never moves during editorial beats.
    pub visual_ordinal: usize,
}

impl ResolvedShot<'_> {
    /// Shot-local progress fraction in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        let duration = self.shot.duration();
        if duration <= 0.0 {
            return 0.0;
        }
        (self.local_elapsed / duration).clamp(0.0, 1.0)
    }
}

/// Resolve the shot occupying `elapsed` seconds into the plan.
///
/// Shot windows are half-open `[start, start + duration)`: a boundary
/// exactly at `elapsed` belongs to the next shot. Returns `None` once
/// `elapsed` reaches the declared total duration or runs past the last
/// shot; the caller treats that as the termination signal.
pub fn resolve(elapsed: f64, plan: &EditPlan) -> Option<ResolvedShot<'_>> {
    if elapsed < 0.0 || elapsed >= plan.total_duration {
        return None;
    }

    let mut cumulative = 0.0;
    let mut visual_ordinal = 0;

    for (index, shot) in plan.shots.iter().enumerate() {
        if shot.is_visual() {
            visual_ordinal += 1;
        }
        if elapsed < cumulative + shot.duration() {
            return Some(ResolvedShot {
                index,
                shot,
                local_elapsed: elapsed - cumulative,
                // for a text card this is the count of visuals before it
                visual_ordinal,
            });
        }
        cumulative += shot.duration();
    }

    None
}

/// Per-tick render state, recomputed from the clock.
///
/// Ephemeral; exists only to feed progress reporting and dispatch. Nothing
/// here accumulates across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    /// Index of the current shot, if any.
    pub shot_index: Option<usize>,

    /// 1-based visual shot ordinal at this instant (0 before the first
    /// visual shot has been reached).
    pub visual_ordinal: usize,

    /// Total Image/Video shots in the plan.
    pub total_visual: usize,
}

impl RenderState {
    /// Compute the state at `elapsed` seconds.
    pub fn at(elapsed: f64, plan: &EditPlan) -> Self {
        let total_visual = plan.visual_shot_count();
        match resolve(elapsed, plan) {
            Some(resolved) => Self {
                shot_index: Some(resolved.index),
                visual_ordinal: resolved.visual_ordinal,
                total_visual,
            },
            None => Self {
                shot_index: None,
                // past the end every visual shot has been passed
                visual_ordinal: if elapsed > 0.0 { total_visual } else { 0 },
                total_visual,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shot::PanZoom;

    fn plan() -> EditPlan {
        EditPlan {
            total_duration: 9.0,
            shots: vec![
                Shot::TextCard {
                    duration: 2.0,
                    text: "TITLE".to_string(),
                },
                Shot::Image {
                    scene_index: 0,
                    duration: 3.0,
                    pan_zoom_style: PanZoom::ZoomIn,
                },
                Shot::Video {
                    scene_index: 1,
                    duration: 4.0,
                },
            ],
        }
    }

    #[test]
    fn resolves_shots_in_order() {
        let plan = plan();

        let first = resolve(0.0, &plan).unwrap();
        assert_eq!(first.index, 0);
        assert_eq!(first.local_elapsed, 0.0);

        let second = resolve(3.5, &plan).unwrap();
        assert_eq!(second.index, 1);
        assert!((second.local_elapsed - 1.5).abs() < 1e-9);
        assert!((second.progress() - 0.5).abs() < 1e-9);

        let third = resolve(8.9, &plan).unwrap();
        assert_eq!(third.index, 2);
    }

    #[test]
    fn boundary_belongs_to_next_shot() {
        let plan = plan();
        let at_boundary = resolve(2.0, &plan).unwrap();
        assert_eq!(at_boundary.index, 1);
        assert_eq!(at_boundary.local_elapsed, 0.0);

        let at_second_boundary = resolve(5.0, &plan).unwrap();
        assert_eq!(at_second_boundary.index, 2);
    }

    #[test]
    fn past_total_duration_resolves_to_none() {
        let plan = plan();
        assert!(resolve(9.0, &plan).is_none());
        assert!(resolve(100.0, &plan).is_none());
        assert!(resolve(-0.1, &plan).is_none());
    }

    #[test]
    fn total_duration_caps_resolution_even_with_longer_shots() {
        // shots sum to 10.2 but the declared total is 10
        let plan = EditPlan {
            total_duration: 10.0,
            shots: vec![
                Shot::Image {
                    scene_index: 0,
                    duration: 5.0,
                    pan_zoom_style: PanZoom::PanLeft,
                },
                Shot::Image {
                    scene_index: 0,
                    duration: 5.2,
                    pan_zoom_style: PanZoom::PanRight,
                },
            ],
        };
        assert!(resolve(9.99, &plan).is_some());
        assert!(resolve(10.0, &plan).is_none());
    }

    #[test]
    fn visual_ordinal_skips_text_cards_and_sticks() {
        let plan = plan();

        // during the leading text card no visual shot has been reached
        assert_eq!(resolve(1.0, &plan).unwrap().visual_ordinal, 0);

        // first visual shot
        assert_eq!(resolve(2.5, &plan).unwrap().visual_ordinal, 1);

        // second visual shot
        assert_eq!(resolve(6.0, &plan).unwrap().visual_ordinal, 2);
    }

    #[test]
    fn ordinal_holds_during_interleaved_text_card() {
        let plan = EditPlan {
            total_duration: 6.0,
            shots: vec![
                Shot::Image {
                    scene_index: 0,
                    duration: 2.0,
                    pan_zoom_style: PanZoom::ZoomOut,
                },
                Shot::TextCard {
                    duration: 2.0,
                    text: "MEANWHILE".to_string(),
                },
                Shot::Image {
                    scene_index: 0,
                    duration: 2.0,
                    pan_zoom_style: PanZoom::ZoomIn,
                },
            ],
        };

        assert_eq!(resolve(1.0, &plan).unwrap().visual_ordinal, 1);
        // the card between the two images keeps reporting 1
        assert_eq!(resolve(3.0, &plan).unwrap().visual_ordinal, 1);
        assert_eq!(resolve(5.0, &plan).unwrap().visual_ordinal, 2);
    }

    #[test]
    fn render_state_reflects_resolution() {
        let plan = plan();

        let state = RenderState::at(3.0, &plan);
        assert_eq!(state.shot_index, Some(1));
        assert_eq!(state.visual_ordinal, 1);
        assert_eq!(state.total_visual, 2);

        let done = RenderState::at(9.5, &plan);
        assert_eq!(done.shot_index, None);
        assert_eq!(done.visual_ordinal, 2);
    }

    #[test]
    fn resolution_is_idempotent() {
        let plan = plan();
        for t in [0.0, 1.9999, 2.0, 4.7, 8.999] {
            let a = resolve(t, &plan).unwrap();
            let b = resolve(t, &plan).unwrap();
            assert_eq!(a.index, b.index);
            assert_eq!(a.local_elapsed, b.local_elapsed);
            assert_eq!(a.visual_ordinal, b.visual_ordinal);
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn arbitrary_plan() -> impl Strategy<Value = EditPlan> {
            prop::collection::vec(
                prop_oneof![
                    (0.1f64..5.0).prop_map(|duration| Shot::Image {
                        scene_index: 0,
                        duration,
                        pan_zoom_style: PanZoom::ZoomIn,
                    }),
                    (0.1f64..5.0).prop_map(|duration| Shot::Video {
                        scene_index: 0,
                        duration,
                    }),
                    (0.1f64..5.0).prop_map(|duration| Shot::TextCard {
                        duration,
                        text: "CARD".to_string(),
                    }),
                ],
                1..8,
            )
            .prop_map(|shots| {
                let total: f64 = shots.iter().map(Shot::duration).sum();
                EditPlan {
                    total_duration: total,
                    shots,
                }
            })
        }

        proptest! {
            #[test]
            fn shot_index_is_monotonic(plan in arbitrary_plan(), t1 in 0.0f64..1.0, t2 in 0.0f64..1.0) {
                let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
                let lo = lo * plan.total_duration * 0.999;
                let hi = hi * plan.total_duration * 0.999;

                if let (Some(a), Some(b)) = (resolve(lo, &plan), resolve(hi, &plan)) {
                    prop_assert!(b.index >= a.index);
                    prop_assert!(b.visual_ordinal >= a.visual_ordinal);
                }
            }

            #[test]
            fn local_elapsed_stays_inside_shot(plan in arbitrary_plan(), t in 0.0f64..1.0) {
                let elapsed = t * plan.total_duration * 0.999;
                if let Some(resolved) = resolve(elapsed, &plan) {
                    prop_assert!(resolved.local_elapsed >= 0.0);
                    prop_assert!(resolved.local_elapsed < resolved.shot.duration() + 1e-9);
                    let p = resolved.progress();
                    prop_assert!((0.0..=1.0).contains(&p));
                }
            }
        }
    }
}
