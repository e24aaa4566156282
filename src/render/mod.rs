//! Renderers: write post data (or placeholder copy) into fixed page
//! containers.
//!
//! Every renderer clears what it owns before writing, so rendering the same
//! input twice leaves the same page as rendering it once. Missing containers
//! are logged and skipped.

mod featured;
mod grid;
mod sidebar;

pub use featured::render_featured;
pub use grid::render_image_grid;
pub use sidebar::render_sidebar;

use crate::domain::{Post, PostCollection, RenderState};
use crate::page::Page;

/// Render everything a state shows.
pub fn render_state(page: &mut Page, state: &RenderState) {
    match state {
        RenderState::Loading => {
            render_featured(page, Some(&Post::loading_placeholder()));
        }
        RenderState::Loaded(posts) => {
            render_featured(page, posts.featured());
            render_sidebar(page, posts);
            render_image_grid(page, posts);
        }
        RenderState::EmptyFallback => {
            render_featured(page, Some(&Post::empty_fallback()));
            render_sidebar(page, &PostCollection::empty());
        }
        RenderState::ErrorFallback { category, .. } => {
            render_featured(page, Some(&Post::error_fallback(category.user_copy())));
            render_sidebar(page, &PostCollection::empty());
        }
    }
}

/// `(id, text)` of every sidebar slot except `p0`, in page order.
#[cfg(test)]
pub(crate) fn sidebar_slot_texts(page: &Page) -> Vec<(String, String)> {
    page.query_all(&sidebar::SIDEBAR_SLOT)
        .into_iter()
        .filter_map(|slot| {
            let id = slot.id()?;
            (id != "p0").then(|| (id.to_string(), slot.text_content()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::domain::ErrorCategory;
    use crate::fetcher::scripted::collection;
    use crate::page::Selector;

    fn summary(page: &Page) -> String {
        page.query(&Selector::Attr {
            name: "data-placeholder",
            value: "summary",
        })
        .unwrap()
        .text_content()
    }

    #[test]
    fn test_error_state_shows_category_copy() {
        let mut page = Page::skeleton(&LayoutConfig::default());
        render_state(
            &mut page,
            &RenderState::ErrorFallback {
                category: ErrorCategory::NotFound,
                message: "HTTP error! status: 404".into(),
            },
        );
        assert_eq!(summary(&page), ErrorCategory::NotFound.user_copy());
    }

    #[test]
    fn test_loaded_after_fallback_replaces_everything() {
        let mut fresh = Page::skeleton(&LayoutConfig::default());
        render_state(&mut fresh, &RenderState::Loaded(collection(&[0, 1, 2])));

        let mut page = Page::skeleton(&LayoutConfig::default());
        render_state(&mut page, &RenderState::Loading);
        render_state(&mut page, &RenderState::EmptyFallback);
        render_state(&mut page, &RenderState::Loaded(collection(&[0, 1, 2])));

        assert_eq!(page, fresh);
    }

    #[test]
    fn test_render_state_is_idempotent() {
        let states = [
            RenderState::Loading,
            RenderState::Loaded(collection(&[0, 3])),
            RenderState::EmptyFallback,
            RenderState::ErrorFallback {
                category: ErrorCategory::Generic,
                message: "boom".into(),
            },
        ];
        for state in &states {
            let mut once = Page::skeleton(&LayoutConfig::default());
            render_state(&mut once, state);
            let mut twice = once.clone();
            render_state(&mut twice, state);
            assert_eq!(once.to_html(), twice.to_html(), "{}", state);
        }
    }
}
