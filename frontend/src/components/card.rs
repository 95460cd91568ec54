use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct CardProps {
    #[prop_or_default]
    pub id: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub style: Option<AttrValue>,
    /// Marks the card for the scroll reveal observer. Needs an `id`.
    #[prop_or_default]
    pub reveal: bool,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Card)]
pub fn card(props: &CardProps) -> Html {
    let marker = props.reveal.then(|| AttrValue::from("true"));

    html! {
        <div
            id={props.id.clone()}
            class={classes!("card", props.class.clone())}
            style={props.style.clone()}
            data-animate={marker}
        >
            { for props.children.iter() }
        </div>
    }
}
