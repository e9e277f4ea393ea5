#![forbid(unsafe_code)]

//! Project cards.

use tracing::trace;

use crate::host::{Dom, StyleProperty};

/// A portfolio entry. Compile-time data, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub name: &'static str,
    pub link: &'static str,
    pub description: Option<&'static str>,
}

/// The portfolio, in display order.
pub const PROJECTS: &[Project] = &[
    Project {
        name: "KYC System @ Natixis",
        link: "https://github.com/404-geek/kyc-system",
        description: Some(
            "Enterprise-grade KYC (Know Your Customer) system built with modern backend technologies.",
        ),
    },
    Project {
        name: "GSoC '24 Contribution",
        link: "https://github.com/404-geek/gsoc-project",
        description: Some(
            "Open source contributions as part of Google Summer of Code 2024 program.",
        ),
    },
    Project {
        name: "FinTech API Service",
        link: "https://github.com/404-geek/fintech-api",
        description: Some(
            "Scalable financial technology API service with microservices architecture.",
        ),
    },
];

pub const PROJECT_CLASS: &str = "project";
pub const LINK_LABEL: &str = "View on GitHub";
/// External links open in a new browsing context with no opener/referrer.
pub const LINK_TARGET: &str = "_blank";
pub const LINK_REL: &str = "noopener noreferrer";

/// `animation-delay` for the card at `index`.
#[must_use]
pub fn stagger_delay(index: usize, step_secs: f64) -> String {
    format!("{}s", index as f64 * step_secs)
}

/// Build the card element for `project` and return it, unattached.
///
/// Children are created as elements with text content, so project strings are
/// never interpreted as markup. `None` if the host could not create an
/// element.
pub fn build_card<D: Dom>(
    dom: &mut D,
    project: &Project,
    index: usize,
    fade_in_class: &str,
    step_secs: f64,
) -> Option<D::Node> {
    let card = dom.create_element("div")?;
    dom.add_class(&card, PROJECT_CLASS);
    dom.add_class(&card, fade_in_class);
    dom.set_style(
        &card,
        StyleProperty::AnimationDelay,
        &stagger_delay(index, step_secs),
    );

    let title = dom.create_element("h3")?;
    dom.set_text(&title, project.name);
    dom.append_child(&card, &title);

    if let Some(description) = project.description {
        let body = dom.create_element("p")?;
        dom.set_text(&body, description);
        dom.append_child(&card, &body);
    }

    let link = dom.create_element("a")?;
    dom.set_attribute(&link, "href", project.link);
    dom.set_attribute(&link, "target", LINK_TARGET);
    dom.set_attribute(&link, "rel", LINK_REL);
    dom.set_text(&link, LINK_LABEL);
    dom.append_child(&card, &link);

    trace!(index, name = project.name, "project card built");
    Some(card)
}
