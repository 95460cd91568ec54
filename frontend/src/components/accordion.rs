use yew::prelude::*;

use crate::components::icons::{Icon, IconSvg};
use crate::content::FaqEntry;

/// Which item of a single-open accordion is expanded, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccordionState {
    open: Option<usize>,
}

impl AccordionState {
    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    /// Opening an item closes the previous one. Clicking the open item closes
    /// it only when the accordion is collapsible.
    pub fn toggle(self, index: usize, collapsible: bool) -> Self {
        match self.open {
            Some(open) if open == index && collapsible => AccordionState { open: None },
            Some(open) if open == index => self,
            _ => AccordionState { open: Some(index) },
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AccordionProps {
    pub items: Vec<FaqEntry>,
    #[prop_or(true)]
    pub collapsible: bool,
}

#[function_component(Accordion)]
pub fn accordion(props: &AccordionProps) -> Html {
    let state = use_state(AccordionState::default);
    let collapsible = props.collapsible;

    html! {
        <div class="accordion">
            { for props.items.iter().enumerate().map(|(index, item)| {
                let is_open = state.is_open(index);
                let toggle = {
                    let state = state.clone();
                    Callback::from(move |e: MouseEvent| {
                        e.prevent_default();
                        state.set((*state).toggle(index, collapsible));
                    })
                };
                html! {
                    <div key={index.to_string()} class={classes!("accordion-item", "card-medical", is_open.then(|| "open"))}>
                        <button
                            type="button"
                            class="accordion-trigger"
                            aria-expanded={is_open.to_string()}
                            onclick={toggle}
                        >
                            <span class="question-text">{&item.question}</span>
                            <IconSvg icon={Icon::ChevronDown} class="accordion-chevron" />
                        </button>
                        {
                            if is_open {
                                html! { <div class="accordion-content">{&item.answer}</div> }
                            } else {
                                html! {}
                            }
                        }
                    </div>
                }
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_nothing_open() {
        let state = AccordionState::default();
        assert_eq!(state.open, None);
        assert!(!state.is_open(0));
    }

    #[test]
    fn opening_another_item_closes_the_first() {
        let state = AccordionState::default().toggle(1, true);
        assert!(state.is_open(1));

        let state = state.toggle(3, true);
        assert!(state.is_open(3));
        assert!(!state.is_open(1));
        assert_eq!(state.open, Some(3));
    }

    #[test]
    fn collapsing_the_open_item_leaves_none_open() {
        let state = AccordionState::default().toggle(2, true).toggle(2, true);
        assert_eq!(state.open, None);
    }

    #[test]
    fn non_collapsible_keeps_the_open_item() {
        let state = AccordionState::default().toggle(0, false).toggle(0, false);
        assert_eq!(state.open, Some(0));
    }
}
