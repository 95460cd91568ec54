//! Scroll-triggered entrance animations.
//!
//! Elements marked with `data-animate` and an `id` are watched with an
//! `IntersectionObserver`. The first time at least [`REVEAL_THRESHOLD`] of an
//! element is inside the viewport its id joins the page's [`RevealedSet`],
//! and it keeps the `animate` class for the rest of the page's life.
//!
//! When the browser has no `IntersectionObserver`, every region is marked
//! `revealed` instead, which renders the final state with no transition.

#[cfg(test)]
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const MARKER_SELECTOR: &str = "[data-animate]";
pub const ANIMATE_CLASS: &str = "animate";
pub const SHOWN_CLASS: &str = "revealed";

#[cfg(test)]
thread_local! {
    static LIVE_OBSERVERS: Cell<usize> = Cell::new(0);
}

#[cfg(test)]
pub(crate) fn live_observers() -> usize {
    LIVE_OBSERVERS.with(Cell::get)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionState {
    Resting,
    Animated,
    /// Final state without a transition.
    Shown,
}

/// Ids of regions that have played their entrance animation. Insert-only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealedSet {
    ids: HashSet<String>,
    without_motion: bool,
}

impl RevealedSet {
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn state_of(&self, id: &str) -> RegionState {
        match (self.contains(id), self.without_motion) {
            (false, _) => RegionState::Resting,
            (true, false) => RegionState::Animated,
            (true, true) => RegionState::Shown,
        }
    }

    /// Returns false when the id was already revealed.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }
}

pub enum RevealAction {
    Entered(Vec<String>),
    /// Observation is impossible; show these regions as-is.
    ShowAll(Vec<String>),
}

impl Reducible for RevealedSet {
    type Action = RevealAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            RevealAction::Entered(ids) => {
                if ids.iter().all(|id| self.contains(id)) {
                    return self;
                }
                let mut next = (*self).clone();
                for id in ids {
                    next.insert(id);
                }
                Rc::new(next)
            }
            RevealAction::ShowAll(ids) => {
                if self.without_motion && ids.iter().all(|id| self.contains(id)) {
                    return self;
                }
                let mut next = (*self).clone();
                next.without_motion = true;
                for id in ids {
                    next.insert(id);
                }
                Rc::new(next)
            }
        }
    }
}

/// One intersection report, detached from the DOM entry it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Sighting {
    pub id: String,
    pub is_intersecting: bool,
    pub ratio: f64,
}

impl Sighting {
    pub fn counts(&self) -> bool {
        self.is_intersecting && self.ratio >= REVEAL_THRESHOLD && !self.id.is_empty()
    }
}

pub fn entered_ids(sightings: &[Sighting]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for sighting in sightings.iter().filter(|s| s.counts()) {
        if !ids.contains(&sighting.id) {
            ids.push(sighting.id.clone());
        }
    }
    ids
}

pub fn stagger_style(index: usize, step_ms: u32) -> String {
    format!("animation-delay: {}ms", index as u32 * step_ms)
}

/// Handle returned by [`use_reveal_tracker`].
#[derive(Clone)]
pub struct RevealTracker {
    revealed: UseReducerHandle<RevealedSet>,
}

impl RevealTracker {
    /// `base` plus the modifier for the region's current state.
    pub fn class(&self, id: &str, base: &'static str) -> Classes {
        reveal_classes(base, self.revealed.state_of(id))
    }
}

pub fn reveal_classes(base: &'static str, state: RegionState) -> Classes {
    match state {
        RegionState::Resting => classes!(base),
        RegionState::Animated => classes!(base, ANIMATE_CLASS),
        RegionState::Shown => classes!(base, SHOWN_CLASS),
    }
}

/// Live observer; disconnects when dropped.
struct RegionObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl RegionObserver {
    fn start(regions: &[Element], dispatcher: UseReducerDispatcher<RevealedSet>) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            let mut sightings = Vec::new();
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let sighting = Sighting {
                    id: target.id(),
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                };
                if sighting.counts() {
                    // Nothing left to animate for this one.
                    observer.unobserve(&target);
                }
                sightings.push(sighting);
            }

            let entered = entered_ids(&sightings);
            if !entered.is_empty() {
                debug!("Revealing {:?}", entered);
                dispatcher.dispatch(RevealAction::Entered(entered));
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        for region in regions {
            observer.observe(region);
        }

        #[cfg(test)]
        LIVE_OBSERVERS.with(|n| n.set(n.get() + 1));

        Ok(RegionObserver {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for RegionObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
        debug!("Reveal observer disconnected");

        #[cfg(test)]
        LIVE_OBSERVERS.with(|n| n.set(n.get() - 1));
    }
}

fn marked_regions() -> Option<Vec<Element>> {
    let document = web_sys::window()?.document()?;
    let nodes = document.query_selector_all(MARKER_SELECTOR).ok()?;
    let regions = (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect();
    Some(regions)
}

/// Tracks which marked regions have been seen. Observation starts after the
/// first render and is released on unmount. Without IntersectionObserver
/// support every region is revealed at once.
#[hook]
pub fn use_reveal_tracker() -> RevealTracker {
    let revealed = use_reducer_eq(RevealedSet::default);

    {
        let dispatcher = revealed.dispatcher();
        use_effect_with_deps(
            move |_| {
                let regions = marked_regions().unwrap_or_default();
                let observer = match RegionObserver::start(&regions, dispatcher.clone()) {
                    Ok(observer) => {
                        info!("Watching {} animated regions", regions.len());
                        Some(observer)
                    }
                    Err(e) => {
                        warn!("IntersectionObserver unavailable, showing all regions: {:?}", e);
                        let ids = regions.iter().map(Element::id).filter(|id| !id.is_empty()).collect();
                        dispatcher.dispatch(RevealAction::ShowAll(ids));
                        None
                    }
                };
                move || drop(observer)
            },
            (),
        );
    }

    RevealTracker { revealed }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sighting(id: &str, is_intersecting: bool, ratio: f64) -> Sighting {
        Sighting {
            id: id.to_string(),
            is_intersecting,
            ratio,
        }
    }

    fn enter(state: Rc<RevealedSet>, ids: &[&str]) -> Rc<RevealedSet> {
        state.reduce(RevealAction::Entered(ids.iter().map(|id| id.to_string()).collect()))
    }

    #[test]
    fn starts_empty() {
        let state = RevealedSet::default();
        assert!(state.ids.is_empty());
        assert!(!state.contains("hero-content"));
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(sighting("step-0", true, 0.1).counts());
        assert!(sighting("step-0", true, 0.75).counts());
        assert!(!sighting("step-0", true, 0.05).counts());
        assert!(!sighting("step-0", false, 0.0).counts());
        assert!(!sighting("", true, 1.0).counts());
    }

    #[test]
    fn entered_ids_filters_and_dedups_a_batch() {
        let batch = vec![
            sighting("step-0", true, 0.2),
            sighting("step-1", true, 0.02),
            sighting("step-2", false, 0.0),
            sighting("step-0", true, 0.4),
            sighting("faq-title", true, 1.0),
        ];
        assert_eq!(entered_ids(&batch), vec!["step-0".to_string(), "faq-title".to_string()]);
    }

    #[test]
    fn reveal_is_monotonic() {
        let state = Rc::new(RevealedSet::default());
        let state = enter(state, &["step-0", "step-1", "step-2"]);
        let state = enter(state, &["faq-title"]);
        assert_eq!(state.ids.len(), 4);
        for id in ["step-0", "step-1", "step-2", "faq-title"] {
            assert!(state.contains(id));
        }
    }

    #[test]
    fn repeat_entry_keeps_the_same_state() {
        let state = enter(Rc::new(RevealedSet::default()), &["pricing-0"]);
        let again = enter(state.clone(), &["pricing-0"]);
        assert!(Rc::ptr_eq(&state, &again));
        assert_eq!(again.ids.len(), 1);
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let state = Rc::new(RevealedSet::default());
        let next = enter(state.clone(), &[]);
        assert!(Rc::ptr_eq(&state, &next));
    }

    #[test]
    fn insert_reports_duplicates() {
        let mut state = RevealedSet::default();
        assert!(state.insert("final-cta"));
        assert!(!state.insert("final-cta"));
        assert_eq!(state.ids.len(), 1);
    }

    #[test]
    fn animate_class_follows_membership() {
        let state = enter(Rc::new(RevealedSet::default()), &["benefits-image"]);
        assert_eq!(state.state_of("hero-content"), RegionState::Resting);
        assert_eq!(state.state_of("benefits-image"), RegionState::Animated);

        let resting = reveal_classes("fade-in-up", state.state_of("hero-content"));
        assert!(resting.contains("fade-in-up"));
        assert!(!resting.contains(ANIMATE_CLASS));
        assert!(!resting.contains(SHOWN_CLASS));

        let animated = reveal_classes("fade-in-left", state.state_of("benefits-image"));
        assert!(animated.contains("fade-in-left"));
        assert!(animated.contains(ANIMATE_CLASS));
    }

    #[test]
    fn show_all_renders_final_state_without_animation() {
        let ids = vec!["hero-content".to_string(), "step-0".to_string()];
        let state = Rc::new(RevealedSet::default()).reduce(RevealAction::ShowAll(ids.clone()));
        assert_eq!(state.state_of("hero-content"), RegionState::Shown);
        assert_eq!(state.state_of("step-0"), RegionState::Shown);
        assert_eq!(state.state_of("final-cta"), RegionState::Resting);

        let classes = reveal_classes("fade-in-up", state.state_of("hero-content"));
        assert!(classes.contains(SHOWN_CLASS));
        assert!(!classes.contains(ANIMATE_CLASS));

        let again = state.clone().reduce(RevealAction::ShowAll(ids));
        assert!(Rc::ptr_eq(&state, &again));
    }

    #[test]
    fn stagger_grows_with_index() {
        assert_eq!(stagger_style(0, 200), "animation-delay: 0ms");
        assert_eq!(stagger_style(1, 200), "animation-delay: 200ms");
        assert_eq!(stagger_style(2, 150), "animation-delay: 300ms");
    }
}
