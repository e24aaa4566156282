use crate::domain::{Post, PostCollection};
use crate::page::{Element, Page, Selector};

pub(crate) const SIDEBAR_SLOT: Selector<'static> = Selector::TagClassIdPrefix {
    tag: "li",
    class: "side-posts",
    prefix: "p",
};

/// Fill every sidebar slot `pN` (N >= 1) with the post whose index is N.
///
/// `p0` belongs to the featured post and is left alone. Slots without a
/// matching post get the "No older posts" placeholder; posts without a slot
/// are ignored. Returns the number of slots written.
pub fn render_sidebar(page: &mut Page, posts: &PostCollection) -> usize {
    let placeholder = Post::sidebar_placeholder();
    let mut written = 0;

    page.for_each_mut(&SIDEBAR_SLOT, |_, slot| {
        let index = slot.id().and_then(slot_index);
        if index == Some(0) {
            return;
        }

        let post = index
            .and_then(|i| posts.find_by_index(i))
            .unwrap_or(&placeholder);

        slot.clear();
        slot.append(summary_card(post));
        written += 1;
    });

    written
}

/// Leading digits after the `p`, the way `parseInt` reads them.
fn slot_index(id: &str) -> Option<u32> {
    let digits: String = id
        .strip_prefix('p')?
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn summary_card(post: &Post) -> Element {
    let heading = Element::new("h3").with_child(
        Element::new("a")
            .with_attr("href", &post.link)
            .with_class("dynalink")
            .with_text(&post.header),
    );

    let meta = Element::new("ul")
        .with_class("meta")
        .with_child(Element::new("i").with_class("nf").with_class("nf-md-calendar_edit"))
        .with_child(Element::new("li").with_text(&post.post_date));

    Element::new("article")
        .with_class("box")
        .with_class("post-summary")
        .with_child(heading)
        .with_child(meta)
}
