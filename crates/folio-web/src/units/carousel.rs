#![forbid(unsafe_code)]

use std::cell::RefCell;
use std::rc::Rc;

use folio_fx::carousel::{Carousel, CarouselConfig, Selection};
use folio_fx::effect::Effect;
use web_sys::Element;

use super::{Disabled, MountContext, failed};
use crate::dom;
use crate::listener::Listeners;
use crate::page::MountedUnit;
use crate::timer::Interval;

const CARDS: &str = ".testimonial-card";
const DOTS: &str = ".dot";

struct Slides {
    carousel: Carousel,
    cards: Vec<Element>,
    dots: Vec<Element>,
    active_class: String,
}

impl Slides {
    fn show(&self, selection: &Selection) {
        for (i, on) in selection.flags.iter().enumerate() {
            for el in [self.cards.get(i), self.dots.get(i)].into_iter().flatten() {
                dom::set_class(el, &self.active_class, *on);
            }
        }
    }

    fn advance(&mut self) {
        if let Some(selection) = self.carousel.advance() {
            self.show(&selection);
        }
    }
}

/// Rotates the active testimonial on a timer; dots select directly.
pub(crate) struct CarouselUnit {
    slides: Rc<RefCell<Slides>>,
    timer: Rc<RefCell<Option<Interval>>>,
    listeners: Listeners,
}

fn start_timer(slides: &Rc<RefCell<Slides>>, config: &CarouselConfig) -> Option<Interval> {
    let slides = slides.clone();
    match Interval::new(config.interval, move || slides.borrow_mut().advance()) {
        Ok(interval) => Some(interval),
        Err(err) => {
            tracing::warn!(unit = "carousel", error = ?err, "rotation timer not started");
            None
        }
    }
}

pub(crate) fn mount(ctx: &mut MountContext) -> Box<dyn MountedUnit> {
    let cards = dom::query_all(CARDS);
    if cards.is_empty() {
        return Box::new(Disabled("carousel"));
    }
    let config = ctx.config.carousel.clone();
    let dots = dom::query_all(DOTS);
    let slides = Rc::new(RefCell::new(Slides {
        carousel: Carousel::new(cards.len()),
        cards,
        dots: dots.clone(),
        active_class: config.active_class.clone(),
    }));
    {
        let slides = slides.borrow();
        slides.show(&slides.carousel.selection());
    }

    let Some(interval) = start_timer(&slides, &config) else {
        return failed("carousel", "interval unavailable".into());
    };
    let timer = Rc::new(RefCell::new(Some(interval)));

    let mut listeners = Listeners::new();
    for (i, dot) in dots.iter().enumerate() {
        let (slides, timer, config) = (slides.clone(), timer.clone(), config.clone());
        listeners.on(dot.as_ref(), "click", move |_| {
            let selection = slides.borrow_mut().carousel.select(i);
            if let Some(selection) = selection {
                slides.borrow().show(&selection);
            }
            if config.reset_timer_on_select {
                *timer.borrow_mut() = start_timer(&slides, &config);
            }
        });
    }

    tracing::debug!(unit = "carousel", count = slides.borrow().carousel.len(), "carousel mounted");
    Box::new(CarouselUnit {
        slides,
        timer,
        listeners,
    })
}

impl MountedUnit for CarouselUnit {
    fn name(&self) -> &'static str {
        "carousel"
    }

    fn is_active(&self) -> bool {
        self.slides.borrow().carousel.is_active()
            && self.timer.borrow().as_ref().is_some_and(Interval::is_running)
    }

    fn stop(&mut self) {
        self.listeners.clear();
        if let Some(timer) = self.timer.borrow_mut().as_mut() {
            timer.stop();
        }
        self.slides.borrow_mut().carousel.stop();
    }
}
