use crate::domain::{Post, PostCollection};
use crate::page::{Page, Selector};

pub(crate) const GRID_IMAGE: Selector<'static> = Selector::TagClass {
    tag: "img",
    class: "imgposts",
};

/// Point each grid image at the post whose index equals the image's
/// position among grid images (0-based). Returns the number of images.
pub fn render_image_grid(page: &mut Page, posts: &PostCollection) -> usize {
    let placeholder = Post::image_placeholder();

    page.for_each_mut(&GRID_IMAGE, |position, image| {
        let post = u32::try_from(position)
            .ok()
            .and_then(|i| posts.find_by_index(i))
            .unwrap_or(&placeholder);

        image.set_attr("src", post.thumbnail.as_str());
        image.set_attr("alt", post.alttext.as_str());
    })
}
