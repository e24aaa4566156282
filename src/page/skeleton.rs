use crate::config::LayoutConfig;
use crate::page::{Element, Page};

impl Page {
    /// The default Seedscribe page: featured post containers, sidebar slots
    /// `p0..=pN` and a grid of post images, still carrying bracketed template
    /// placeholders.
    pub fn skeleton(layout: &LayoutConfig) -> Self {
        let featured = Element::new("section")
            .with_id("featured")
            .with_class("box")
            .with_class("post")
            .with_child(
                Element::new("header").with_child(
                    Element::new("div").with_class("feathead").with_child(
                        Element::new("h3").with_child(
                            Element::new("a")
                                .with_class("dynalink")
                                .with_attr("href", "[#]")
                                .with_text("[Featured post]"),
                        ),
                    ),
                ),
            )
            .with_child(
                Element::new("p")
                    .with_attr("data-placeholder", "subheader")
                    .with_text("[Subheader]"),
            )
            .with_child(
                Element::new("ul")
                    .with_class("meta")
                    .with_child(
                        Element::new("li").with_child(
                            Element::new("span")
                                .with_attr("data-placeholder", "post-date")
                                .with_text("[Date]"),
                        ),
                    )
                    .with_child(
                        Element::new("li").with_child(
                            Element::new("span")
                                .with_attr("data-placeholder", "tags")
                                .with_text("[Tags]"),
                        ),
                    ),
            )
            .with_child(Element::new("div").with_class("thumbcont"))
            .with_child(
                Element::new("p")
                    .with_attr("data-placeholder", "summary")
                    .with_text("[Summary]"),
            )
            .with_child(Element::new("div").with_class("cont-reading"));

        let mut sidebar = Element::new("ul").with_class("divided");
        for slot in 0..=layout.last_sidebar_slot {
            sidebar.append(
                Element::new("li")
                    .with_class("side-posts")
                    .with_id(format!("p{}", slot)),
            );
        }

        let mut grid = Element::new("section").with_class("grid");
        for _ in 0..layout.grid_images {
            grid.append(
                Element::new("img")
                    .with_class("imgposts")
                    .with_attr("src", "placeholder.jpg")
                    .with_attr("alt", ""),
            );
        }

        let body = Element::new("body")
            .with_child(featured)
            .with_child(Element::new("aside").with_id("sidebar").with_child(sidebar))
            .with_child(grid);

        let head = Element::new("head")
            .with_child(Element::new("meta").with_attr("charset", "utf-8"))
            .with_child(Element::new("title").with_text("Seedscribe"));

        Page::new(
            Element::new("html")
                .with_attr("lang", "en")
                .with_child(head)
                .with_child(body),
        )
    }
}
