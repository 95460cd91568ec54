use std::rc::Rc;

use log::{error, info, warn};
use yew::prelude::*;

use crate::components::accordion::Accordion;
use crate::components::button::Button;
use crate::components::card::Card;
use crate::components::icons::{Icon, IconSvg};
use crate::config::{OfferLink, Site};
use crate::reveal::{stagger_style, use_reveal_tracker};

const STEP_STAGGER_MS: u32 = 200;
const TESTIMONIAL_STAGGER_MS: u32 = 150;
const PLAN_STAGGER_MS: u32 = 200;

const LANDING_CSS: &str = r#"
:root {
    --medical-blue: #1e6fd9;
    --medical-blue-light: #7fb2f0;
    --trust-green: #18a572;
    --trust-green-light: #7fd8b5;
    --accent-orange: #f59e2b;
    --accent-orange-light: #fbd19b;
    --foreground: #1a2433;
    --muted: #5b6778;
    --background: #ffffff;
}
.landing-page {
    min-height: 100vh;
    background: var(--background);
    color: var(--foreground);
    font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    overflow-x: hidden;
}
.container {
    max-width: 72rem;
    margin: 0 auto;
}
.container.narrow {
    max-width: 56rem;
}
.section {
    padding: 5rem 1rem;
}
.section-trust {
    background: #f7fafc;
}
.section-benefits {
    background: linear-gradient(to right, rgba(30, 111, 217, 0.05), rgba(24, 165, 114, 0.05));
}
.section-pricing {
    background: linear-gradient(135deg, rgba(30, 111, 217, 0.05), rgba(24, 165, 114, 0.05), rgba(245, 158, 43, 0.05));
}
.section-title {
    text-align: center;
    margin-bottom: 4rem;
}
.section-title h2 {
    font-size: clamp(1.9rem, 4vw, 3rem);
    font-weight: 700;
    margin-bottom: 1rem;
}
.section-title p {
    font-size: 1.25rem;
    color: var(--muted);
}
.grid {
    display: grid;
    gap: 2rem;
}
.grid.align-center {
    align-items: center;
    gap: 3rem;
}
@media (min-width: 768px) {
    .grid-2 { grid-template-columns: repeat(2, 1fr); }
    .grid-3 { grid-template-columns: repeat(3, 1fr); }
}

.section-hero {
    position: relative;
    overflow: hidden;
    color: white;
}
.hero {
    min-height: 100vh;
    display: flex;
    align-items: center;
    justify-content: center;
    padding: 5rem 1rem;
}
.hero-image,
.final-cta-image {
    position: absolute;
    inset: 0;
    background-size: cover;
    background-position: center;
    background-repeat: no-repeat;
    opacity: 0.2;
}
.final-cta-image {
    opacity: 0.1;
}
.hero-overlay {
    position: absolute;
    inset: 0;
    background: linear-gradient(135deg, rgba(30, 111, 217, 0.95), rgba(24, 165, 114, 0.95));
}
.hero-overlay.horizontal {
    background: linear-gradient(to right, rgba(30, 111, 217, 0.95), rgba(24, 165, 114, 0.95));
}
.hero-inner {
    position: relative;
    z-index: 1;
    max-width: 56rem;
    margin: 0 auto;
    text-align: center;
}
.hero h1 {
    font-size: clamp(2.25rem, 6vw, 3.75rem);
    font-weight: 700;
    line-height: 1.15;
    margin-bottom: 1.5rem;
}
.final-cta h2 {
    font-size: clamp(1.9rem, 4vw, 3rem);
    font-weight: 700;
    margin-bottom: 1.5rem;
}
.highlight {
    color: var(--accent-orange);
}
.hero-subtitle {
    font-size: clamp(1.25rem, 2.5vw, 1.5rem);
    color: rgba(255, 255, 255, 0.9);
    max-width: 42rem;
    margin: 0 auto 2rem;
}

.btn {
    display: inline-flex;
    align-items: center;
    justify-content: center;
    gap: 0.5rem;
    border: none;
    cursor: pointer;
    font-weight: 600;
}
.btn-medical-primary {
    background: var(--accent-orange);
    color: white;
    border-radius: 1rem;
    padding: 0.85rem 1.75rem;
    box-shadow: 0 10px 25px rgba(245, 158, 43, 0.35);
    transition: transform 0.2s ease, box-shadow 0.2s ease;
}
.btn-medical-primary:hover {
    transform: translateY(-2px);
    box-shadow: 0 14px 30px rgba(245, 158, 43, 0.45);
}
.btn-large {
    font-size: 1.125rem;
    padding: 1.5rem 2.5rem;
}
.btn-block {
    width: 100%;
}
.btn-icon {
    width: 1.25rem;
    height: 1.25rem;
}

.icon {
    width: 1.25rem;
    height: 1.25rem;
    flex-shrink: 0;
}
.icon.icon-large {
    width: 2rem;
    height: 2rem;
}
.card {
    border-radius: 1.25rem;
    padding: 2rem;
}
.card-medical {
    background: white;
    box-shadow: 0 10px 30px rgba(26, 36, 51, 0.08);
}
.step-card,
.plan-card {
    text-align: center;
    position: relative;
    overflow: hidden;
}
.icon-medical {
    display: inline-flex;
    align-items: center;
    justify-content: center;
    width: 4rem;
    height: 4rem;
    margin-bottom: 1.5rem;
    border-radius: 50%;
    color: white;
    background: linear-gradient(135deg, var(--medical-blue), var(--trust-green));
}
.step-number {
    font-size: 3.75rem;
    font-weight: 700;
    color: var(--medical-blue);
    margin-bottom: 1rem;
}
.step-card h3 {
    font-size: 1.5rem;
    font-weight: 600;
    margin-bottom: 1rem;
}
.step-card p {
    color: var(--muted);
    font-size: 1.125rem;
}

.benefits-image {
    width: 100%;
    height: auto;
    border-radius: 1rem;
    box-shadow: 0 10px 30px rgba(26, 36, 51, 0.15);
}
.benefits-list {
    display: flex;
    flex-direction: column;
    gap: 1.5rem;
}
.benefit {
    display: flex;
    align-items: center;
    gap: 1rem;
}
.benefit p {
    font-size: 1.125rem;
    font-weight: 500;
}
.icon-trust {
    display: inline-flex;
    align-items: center;
    justify-content: center;
    width: 2.5rem;
    height: 2.5rem;
    border-radius: 50%;
    color: white;
    background: var(--trust-green);
    flex-shrink: 0;
}

.aggregate-rating {
    display: flex;
    align-items: center;
    justify-content: center;
    gap: 0.75rem;
    font-size: 1.25rem;
    font-weight: 600;
}
.stars {
    display: flex;
    gap: 0.15rem;
    margin-bottom: 1rem;
}
.aggregate-rating .stars {
    margin-bottom: 0;
}
.star {
    color: var(--accent-orange);
    fill: var(--accent-orange);
}
.icon.star-large {
    width: 1.5rem;
    height: 1.5rem;
}
.card-testimonial {
    box-shadow: 0 6px 20px rgba(26, 36, 51, 0.06);
}
.card-testimonial .quote {
    font-size: 1.125rem;
    font-style: italic;
    margin-bottom: 1rem;
}
.card-testimonial .author {
    color: var(--muted);
    font-weight: 500;
}
.tone-blue-green {
    background: linear-gradient(135deg, rgba(127, 178, 240, 0.2), rgba(127, 216, 181, 0.2));
}
.tone-green-blue {
    background: linear-gradient(135deg, rgba(127, 216, 181, 0.2), rgba(127, 178, 240, 0.2));
}
.tone-orange-blue {
    background: linear-gradient(135deg, rgba(251, 209, 155, 0.2), rgba(127, 178, 240, 0.2));
}

.plan-card h3 {
    font-size: 1.5rem;
    font-weight: 700;
    margin-bottom: 0.5rem;
}
.plan-subtitle {
    color: var(--muted);
    margin-bottom: 1.5rem;
}
.plan-price {
    font-size: 3rem;
    font-weight: 700;
    color: var(--medical-blue);
    margin-bottom: 1.5rem;
}
.plan-period {
    font-size: 1.125rem;
    color: var(--muted);
}
.plan-features {
    list-style: none;
    padding: 0;
    margin: 0 0 2rem;
    display: flex;
    flex-direction: column;
    gap: 0.75rem;
}
.plan-features li {
    display: flex;
    align-items: center;
    justify-content: center;
    gap: 0.5rem;
}
.feature-check {
    color: var(--trust-green);
}

.accordion {
    display: flex;
    flex-direction: column;
    gap: 1rem;
}
.accordion-item {
    border-radius: 1.25rem;
    padding: 0 1.5rem;
}
.accordion-trigger {
    width: 100%;
    display: flex;
    align-items: center;
    justify-content: space-between;
    gap: 1rem;
    padding: 1.5rem 0;
    background: none;
    border: none;
    cursor: pointer;
    text-align: left;
    font-size: 1.125rem;
    font-weight: 600;
    color: var(--foreground);
}
.accordion-chevron {
    transition: transform 0.2s ease;
}
.accordion-item.open .accordion-chevron {
    transform: rotate(180deg);
}
.accordion-content {
    color: var(--muted);
    line-height: 1.7;
    padding-bottom: 1.5rem;
}

.final-cta {
    padding: 5rem 1rem;
}
.final-cta .btn-large {
    margin-bottom: 3rem;
}
.trust-badges {
    display: grid;
    grid-template-columns: repeat(2, 1fr);
    gap: 1.5rem;
    max-width: 42rem;
    margin: 0 auto;
}
@media (min-width: 768px) {
    .trust-badges { grid-template-columns: repeat(4, 1fr); }
}
.trust-badge {
    display: flex;
    flex-direction: column;
    align-items: center;
    gap: 0.5rem;
    color: rgba(255, 255, 255, 0.8);
    font-size: 0.875rem;
    font-weight: 500;
}

.fade-in-up,
.fade-in-left,
.fade-in-right {
    opacity: 0;
}
.fade-in-up { transform: translateY(30px); }
.fade-in-left { transform: translateX(-30px); }
.fade-in-right { transform: translateX(30px); }
.fade-in-up.animate { animation: fade-in-up 0.8s ease-out forwards; }
.fade-in-left.animate { animation: fade-in-left 0.8s ease-out forwards; }
.fade-in-right.animate { animation: fade-in-right 0.8s ease-out forwards; }
@keyframes fade-in-up {
    to { opacity: 1; transform: translateY(0); }
}
@keyframes fade-in-left {
    to { opacity: 1; transform: translateX(0); }
}
@keyframes fade-in-right {
    to { opacity: 1; transform: translateX(0); }
}
.fade-in-up.revealed,
.fade-in-left.revealed,
.fade-in-right.revealed {
    opacity: 1;
    transform: none;
    animation: none;
}
@media (prefers-reduced-motion: reduce) {
    .fade-in-up,
    .fade-in-left,
    .fade-in-right {
        opacity: 1;
        transform: none;
        animation: none !important;
    }
}
"#;

fn open_in_new_tab(url: &str) {
    let Some(window) = web_sys::window() else {
        warn!("No window to open {} in", url);
        return;
    };
    if let Err(e) = window.open_with_url_and_target_and_features(url, "_blank", "noopener,noreferrer") {
        warn!("Failed to open {}: {:?}", url, e);
    }
}

fn offer_callback(offer: &OfferLink, source: &'static str) -> Callback<MouseEvent> {
    let offer = offer.clone();
    Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        match &offer {
            OfferLink::Ready(url) => {
                info!("Offer opened from {}", source);
                open_in_new_tab(url.as_str());
            }
            OfferLink::Unconfigured(raw) => {
                warn!("Offer clicked from {} but the offer link {:?} is not configured", source, raw)
            }
        }
    })
}

#[function_component(Landing)]
pub fn landing() -> Html {
    let site = use_context::<Rc<Site>>();
    let reveal = use_reveal_tracker();

    // Scroll to top only on initial mount
    {
        use_effect_with_deps(
            move |_| {
                if let Some(window) = web_sys::window() {
                    window.scroll_to_with_x_and_y(0.0, 0.0);
                }
                || ()
            },
            (),
        );
    }

    let Some(site) = site else {
        error!("Landing rendered without a Site context");
        return html! {};
    };

    let content = &site.content;
    let hero = &content.hero;
    let how = &content.how_it_works;
    let benefits = &content.benefits;
    let testimonials = &content.testimonials;
    let pricing = &content.pricing;
    let faq = &content.faq;
    let final_cta = &content.final_cta;

    html! {
        <div class="landing-page">
            <section class="section-hero hero">
                <div class="hero-image" style={format!("background-image: url({})", hero.image)}></div>
                <div class="hero-overlay"></div>
                <div class="hero-inner">
                    <div id="hero-content" data-animate="true" class={reveal.class("hero-content", "fade-in-up")}>
                        <h1>
                            {&hero.headline}<br />
                            <span class="highlight">{&hero.highlight}</span>
                        </h1>
                        <p class="hero-subtitle">{&hero.subtitle}</p>
                        <Button class="btn-medical-primary btn-large" onclick={offer_callback(&site.offer, "hero")}>
                            {&hero.cta}
                            <IconSvg icon={Icon::ArrowRight} class="btn-icon" />
                        </Button>
                    </div>
                </div>
            </section>

            <section class="section section-trust">
                <div class="container">
                    <div id="how-it-works-title" data-animate="true" class={classes!("section-title", reveal.class("how-it-works-title", "fade-in-up"))}>
                        <h2>{&how.title}</h2>
                        <p>{&how.subtitle}</p>
                    </div>
                    <div class="grid grid-3">
                        { for how.steps.iter().enumerate().map(|(index, step)| {
                            let id = format!("step-{}", index);
                            html! {
                                <Card
                                    key={id.clone()}
                                    id={AttrValue::from(id.clone())}
                                    reveal=true
                                    class={classes!("card-medical", "step-card", reveal.class(&id, "fade-in-up"))}
                                    style={AttrValue::from(stagger_style(index, STEP_STAGGER_MS))}
                                >
                                    <div class="icon-medical">
                                        <IconSvg icon={step.icon} class="icon-large" />
                                    </div>
                                    <div class="step-number">{&step.step}</div>
                                    <h3>{&step.title}</h3>
                                    <p>{&step.description}</p>
                                </Card>
                            }
                        }) }
                    </div>
                </div>
            </section>

            <section class="section section-benefits">
                <div class="container">
                    <div id="benefits-title" data-animate="true" class={classes!("section-title", reveal.class("benefits-title", "fade-in-up"))}>
                        <h2>{&benefits.title}</h2>
                        <p>{&benefits.subtitle}</p>
                    </div>
                    <div class="grid grid-2 align-center">
                        <div id="benefits-image" data-animate="true" class={reveal.class("benefits-image", "fade-in-left")}>
                            <img class="benefits-image" src={benefits.image.clone()} alt={benefits.image_alt.clone()} loading="lazy" />
                        </div>
                        <div id="benefits-list" data-animate="true" class={classes!("benefits-list", reveal.class("benefits-list", "fade-in-right"))}>
                            { for benefits.items.iter().map(|benefit| html! {
                                <div key={benefit.clone()} class="benefit">
                                    <div class="icon-trust">
                                        <IconSvg icon={Icon::CheckCircle} />
                                    </div>
                                    <p>{benefit}</p>
                                </div>
                            }) }
                        </div>
                    </div>
                </div>
            </section>

            <section class="section section-trust">
                <div class="container">
                    <div id="testimonials-title" data-animate="true" class={classes!("section-title", reveal.class("testimonials-title", "fade-in-up"))}>
                        <h2>{&testimonials.title}</h2>
                        <div class="aggregate-rating">
                            <div class="stars">
                                { for (0..5).map(|i| html! { <IconSvg key={i.to_string()} icon={Icon::Star} class="star star-large" /> }) }
                            </div>
                            <span>{&testimonials.aggregate_rating}</span>
                        </div>
                    </div>
                    <div class="grid grid-3">
                        { for testimonials.items.iter().enumerate().map(|(index, testimonial)| {
                            let id = format!("testimonial-{}", index);
                            html! {
                                <Card
                                    key={id.clone()}
                                    id={AttrValue::from(id.clone())}
                                    reveal=true
                                    class={classes!("card-testimonial", testimonial.tone.clone(), reveal.class(&id, "fade-in-up"))}
                                    style={AttrValue::from(stagger_style(index, TESTIMONIAL_STAGGER_MS))}
                                >
                                    <div class="stars">
                                        { for (0..testimonial.rating).map(|i| html! { <IconSvg key={i.to_string()} icon={Icon::Star} class="star" /> }) }
                                    </div>
                                    <p class="quote">{format!("\"{}\"", testimonial.text)}</p>
                                    <p class="author">{format!("— {}", testimonial.author)}</p>
                                </Card>
                            }
                        }) }
                    </div>
                </div>
            </section>

            <section class="section section-pricing">
                <div class="container narrow">
                    <div id="pricing-title" data-animate="true" class={classes!("section-title", reveal.class("pricing-title", "fade-in-up"))}>
                        <h2>{&pricing.title}</h2>
                        <p>{&pricing.subtitle}</p>
                    </div>
                    <div class="grid grid-2">
                        { for pricing.plans.iter().enumerate().map(|(index, plan)| {
                            let id = format!("pricing-{}", index);
                            html! {
                                <Card
                                    key={id.clone()}
                                    id={AttrValue::from(id.clone())}
                                    reveal=true
                                    class={classes!("card-medical", "plan-card", reveal.class(&id, "fade-in-up"))}
                                    style={AttrValue::from(stagger_style(index, PLAN_STAGGER_MS))}
                                >
                                    <h3>{&plan.title}</h3>
                                    <p class="plan-subtitle">{&plan.subtitle}</p>
                                    <div class="plan-price">
                                        {&plan.price}
                                        <span class="plan-period">{"/month"}</span>
                                    </div>
                                    <ul class="plan-features">
                                        { for plan.features.iter().map(|feature| html! {
                                            <li key={feature.clone()}>
                                                <IconSvg icon={Icon::CheckCircle} class="feature-check" />
                                                <span>{feature}</span>
                                            </li>
                                        }) }
                                    </ul>
                                    <Button class="btn-medical-primary btn-block" onclick={offer_callback(&site.offer, "pricing")}>
                                        {&pricing.cta}
                                    </Button>
                                </Card>
                            }
                        }) }
                    </div>
                </div>
            </section>

            <section class="section section-trust">
                <div class="container narrow">
                    <div id="faq-title" data-animate="true" class={classes!("section-title", reveal.class("faq-title", "fade-in-up"))}>
                        <h2>{&faq.title}</h2>
                        <p>{&faq.subtitle}</p>
                    </div>
                    <div id="faq-accordion" data-animate="true" class={reveal.class("faq-accordion", "fade-in-up")}>
                        <Accordion items={faq.items.clone()} />
                    </div>
                </div>
            </section>

            <section class="section section-hero final-cta">
                <div class="final-cta-image" style={format!("background-image: url({})", final_cta.image)}></div>
                <div class="hero-overlay horizontal"></div>
                <div class="container narrow hero-inner">
                    <div id="final-cta" data-animate="true" class={reveal.class("final-cta", "fade-in-up")}>
                        <h2>{&final_cta.title}</h2>
                        <p class="hero-subtitle">{&final_cta.subtitle}</p>
                        <Button class="btn-medical-primary btn-large" onclick={offer_callback(&site.offer, "final-cta")}>
                            {&final_cta.cta}
                            <IconSvg icon={Icon::ArrowRight} class="btn-icon" />
                        </Button>
                        <div class="trust-badges">
                            { for final_cta.badges.iter().map(|badge| html! {
                                <div key={badge.text.clone()} class="trust-badge">
                                    <IconSvg icon={badge.icon} class="icon-large" />
                                    <p>{&badge.text}</p>
                                </div>
                            }) }
                        </div>
                    </div>
                </div>
            </section>

            <style>{LANDING_CSS}</style>
        </div>
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use std::rc::Rc;

    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_test::*;
    use web_sys::js_sys::{Array, Function, Reflect};
    use web_sys::{Document, Element, HtmlElement, MouseEvent};
    use yew::prelude::*;

    use super::*;
    use crate::config::{self, OFFER_LINK_PLACEHOLDER};
    use crate::reveal::{live_observers, ANIMATE_CLASS, SHOWN_CLASS};

    wasm_bindgen_test_configure!(run_in_browser);

    const MARKED_REGIONS: u32 = 18;

    #[derive(Properties, PartialEq)]
    struct HarnessProps {
        site: Rc<Site>,
    }

    #[function_component(Harness)]
    fn harness(props: &HarnessProps) -> Html {
        html! {
            <ContextProvider<Rc<Site>> context={props.site.clone()}>
                <Landing />
            </ContextProvider<Rc<Site>>>
        }
    }

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    /// Hidden roots never intersect the viewport; visible ones are pinned to it.
    fn mount_root(hidden: bool) -> Element {
        let root = document().create_element("div").unwrap();
        let style = if hidden {
            "display: none"
        } else {
            "position: fixed; top: 0; left: 0; width: 100%"
        };
        root.set_attribute("style", style).unwrap();
        document().body().unwrap().append_child(&root).unwrap();
        root
    }

    fn render_page(root: &Element) -> yew::AppHandle<Harness> {
        let site = Rc::new(config::load_site());
        yew::Renderer::<Harness>::with_root_and_props(root.clone(), HarnessProps { site }).render()
    }

    fn count(root: &Element, selector: &str) -> u32 {
        root.query_selector_all(selector).unwrap().length()
    }

    fn nth(root: &Element, selector: &str, index: u32) -> Element {
        root.query_selector_all(selector)
            .unwrap()
            .item(index)
            .unwrap()
            .dyn_into::<Element>()
            .unwrap()
    }

    fn has_class(element: &Element, class: &str) -> bool {
        element.class_name().split_whitespace().any(|c| c == class)
    }

    async fn settle(ms: u32) {
        TimeoutFuture::new(ms).await;
    }

    #[wasm_bindgen_test]
    async fn regions_rest_until_they_are_seen() {
        let root = mount_root(true);
        let handle = render_page(&root);
        settle(100).await;

        assert_eq!(count(&root, "[data-animate]"), MARKED_REGIONS);
        assert_eq!(count(&root, &format!(".{}", ANIMATE_CLASS)), 0);
        assert_eq!(count(&root, &format!(".{}", SHOWN_CLASS)), 0);

        handle.destroy();
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn visible_hero_animates() {
        let root = mount_root(false);
        let handle = render_page(&root);
        settle(300).await;

        let hero = nth(&root, "#hero-content", 0);
        assert!(has_class(&hero, ANIMATE_CLASS));
        assert!(!has_class(&hero, SHOWN_CLASS));

        handle.destroy();
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn observer_is_released_on_unmount() {
        let before = live_observers();
        let root = mount_root(true);
        let handle = render_page(&root);
        settle(50).await;
        assert_eq!(live_observers(), before + 1);

        handle.destroy();
        settle(50).await;
        assert_eq!(live_observers(), before);
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn missing_observer_shows_regions_without_animation() {
        let window = web_sys::window().unwrap();
        let key = JsValue::from_str("IntersectionObserver");
        let saved = Reflect::get(&window, &key).unwrap();
        Reflect::set(&window, &key, &JsValue::UNDEFINED).unwrap();

        let before = live_observers();
        let root = mount_root(false);
        let handle = render_page(&root);
        settle(100).await;

        assert_eq!(live_observers(), before);
        assert_eq!(count(&root, &format!(".{}", SHOWN_CLASS)), MARKED_REGIONS);
        assert_eq!(count(&root, &format!(".{}", ANIMATE_CLASS)), 0);

        handle.destroy();
        root.remove();
        Reflect::set(&window, &key, &saved).unwrap();
    }

    #[wasm_bindgen_test]
    async fn landing_needs_site_context() {
        let root = mount_root(true);
        let handle = yew::Renderer::<Landing>::with_root(root.clone()).render();
        settle(50).await;

        assert_eq!(count(&root, "[data-animate]"), 0);

        handle.destroy();
        root.remove();
    }

    #[wasm_bindgen_test]
    async fn faq_keeps_at_most_one_item_open() {
        let root = mount_root(false);
        let handle = render_page(&root);
        settle(50).await;

        let click = |index: u32| {
            nth(&root, ".accordion-trigger", index)
                .dyn_into::<HtmlElement>()
                .unwrap()
                .click();
        };

        click(0);
        settle(20).await;
        assert_eq!(count(&root, ".accordion-item.open"), 1);
        assert!(has_class(&nth(&root, ".accordion-item", 0), "open"));

        click(1);
        settle(20).await;
        assert_eq!(count(&root, ".accordion-item.open"), 1);
        assert!(has_class(&nth(&root, ".accordion-item", 1), "open"));

        click(1);
        settle(20).await;
        assert_eq!(count(&root, ".accordion-item.open"), 0);

        handle.destroy();
        root.remove();
    }

    /// Swaps `window.open` for a recorder and returns the original.
    fn record_window_open() -> JsValue {
        let window = web_sys::window().unwrap();
        let saved = Reflect::get(&window, &"open".into()).unwrap();
        let recorder = Function::new_with_args(
            "url, target, features",
            "window.__offer_opened = [url, target, features]; return null;",
        );
        Reflect::set(&window, &"open".into(), &recorder).unwrap();
        Reflect::set(&window, &"__offer_opened".into(), &JsValue::UNDEFINED).unwrap();
        saved
    }

    fn restore_window_open(saved: JsValue) {
        let window = web_sys::window().unwrap();
        Reflect::set(&window, &"open".into(), &saved).unwrap();
    }

    fn opened() -> JsValue {
        Reflect::get(&web_sys::window().unwrap(), &"__offer_opened".into()).unwrap()
    }

    #[wasm_bindgen_test]
    fn configured_offer_opens_a_new_tab() {
        let saved = record_window_open();

        let link = OfferLink::from_raw("https://offers.example.com/start");
        offer_callback(&link, "hero").emit(MouseEvent::new("click").unwrap());

        let call: Array = opened().dyn_into().unwrap();
        assert_eq!(call.get(0).as_string().as_deref(), Some("https://offers.example.com/start"));
        assert_eq!(call.get(1).as_string().as_deref(), Some("_blank"));
        assert!(call.get(2).as_string().unwrap().contains("noopener"));

        restore_window_open(saved);
    }

    #[wasm_bindgen_test]
    fn placeholder_offer_opens_nothing() {
        let saved = record_window_open();

        let link = OfferLink::from_raw(OFFER_LINK_PLACEHOLDER);
        offer_callback(&link, "pricing").emit(MouseEvent::new("click").unwrap());

        assert!(opened().is_undefined());

        restore_window_open(saved);
    }
}
