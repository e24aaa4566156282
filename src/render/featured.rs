use tracing::{error, warn};

use crate::domain::Post;
use crate::page::{Element, Page, Selector};

pub(crate) const FEATURED_HEADER: Selector<'static> = Selector::Class("feathead");
pub(crate) const THUMBNAIL: Selector<'static> = Selector::Class("thumbcont");
pub(crate) const CONTINUE_READING: Selector<'static> = Selector::Class("cont-reading");

const TEXT_ROLES: [&str; 4] = ["subheader", "post-date", "tags", "summary"];

/// Fill the featured post containers.
///
/// `None` renders the featured placeholder copy. Returns the selectors of
/// containers that were missing from the page.
pub fn render_featured(page: &mut Page, post: Option<&Post>) -> Vec<String> {
    let fallback;
    let post = match post {
        Some(post) => post,
        None => {
            fallback = Post::featured_placeholder();
            &fallback
        }
    };

    let mut missing = Vec::new();

    match page.query_mut(&FEATURED_HEADER) {
        Some(container) => {
            container.clear();
            container.append(
                Element::new("h3").with_child(link(&post.link, "dynalink").with_text(&post.header)),
            );
        }
        None => {
            error!("Could not inject header!");
            missing.push(FEATURED_HEADER.to_string());
        }
    }

    for role in TEXT_ROLES {
        let selector = Selector::Attr {
            name: "data-placeholder",
            value: role,
        };
        match page.query_mut(&selector) {
            Some(element) => element.set_text(text_for(post, role)),
            None => {
                warn!("No container for {}", selector);
                missing.push(selector.to_string());
            }
        }
    }

    match page.query_mut(&THUMBNAIL) {
        Some(container) => {
            container.clear();
            let image = Element::new("img")
                .with_attr("src", &post.thumbnail)
                .with_attr("alt", &post.alttext)
                .with_class("image")
                .with_class("featured");
            container.append(
                link(&post.link, "image")
                    .with_class("featured")
                    .with_class("dynalink")
                    .with_child(image),
            );
        }
        None => {
            error!("Could not inject thumbnail!");
            missing.push(THUMBNAIL.to_string());
        }
    }

    match page.query_mut(&CONTINUE_READING) {
        Some(container) => {
            container.clear();
            container.append(
                link(&post.link, "button")
                    .with_class("dynalink")
                    .with_text("Continue reading"),
            );
        }
        None => {
            error!("Could not inject button!");
            missing.push(CONTINUE_READING.to_string());
        }
    }

    missing
}

fn link(href: &str, class: &str) -> Element {
    Element::new("a").with_attr("href", href).with_class(class)
}

fn text_for<'p>(post: &'p Post, role: &str) -> &'p str {
    match role {
        "subheader" => &post.subheader,
        "post-date" => &post.post_date,
        "tags" => &post.tags,
        _ => &post.summary,
    }
}
