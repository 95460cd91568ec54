use std::rc::Rc;

use log::{info, Level};
use yew::prelude::*;
use yew_router::prelude::*;

mod config;
mod content;
mod reveal;
mod components {
    pub mod accordion;
    pub mod button;
    pub mod card;
    pub mod icons;
}
mod pages {
    pub mod landing;
}

use config::Site;
use pages::landing::Landing;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => {
            info!("Rendering Landing page");
            html! { <Landing /> }
        }
        Route::NotFound => {
            info!("Unknown route, rendering Landing page");
            html! { <Landing /> }
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub site: Rc<Site>,
}

#[function_component]
fn App(props: &AppProps) -> Html {
    html! {
        <ContextProvider<Rc<Site>> context={props.site.clone()}>
            <BrowserRouter>
                <Switch<Route> render={switch} />
            </BrowserRouter>
        </ContextProvider<Rc<Site>>>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(Level::Info).expect("error initializing log");

    let site = Rc::new(config::load_site());
    info!(
        "Starting landing page ({} plans, offer link {})",
        site.content.pricing.plans.len(),
        if site.offer.href().is_some() { "configured" } else { "missing" }
    );
    yew::Renderer::<App>::with_props(AppProps { site }).render();
}
