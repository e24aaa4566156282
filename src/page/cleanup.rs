use crate::page::{Page, Selector};

fn strip_brackets(value: &str) -> String {
    value.chars().filter(|c| !matches!(c, '[' | ']')).collect()
}

/// Remove template brackets left in the static markup.
///
/// Text of every `[data-placeholder]` element loses its `[` and `]`; the
/// `href` of every `a.dynalink` does too, but only when it contains both.
/// Returns how many elements were touched.
pub fn clean_placeholder_brackets(page: &mut Page) -> usize {
    let mut touched = page.for_each_mut(&Selector::HasAttr("data-placeholder"), |_, element| {
        let text = strip_brackets(&element.text_content());
        element.set_text(text);
    });

    page.for_each_mut(
        &Selector::TagClass {
            tag: "a",
            class: "dynalink",
        },
        |_, element| {
            let Some(href) = element.attr("href") else {
                return;
            };
            if href.contains('[') && href.contains(']') {
                let cleaned = strip_brackets(href);
                element.set_attr("href", cleaned);
                touched += 1;
            }
        },
    );

    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;

    #[test]
    fn test_cleans_text_and_links() {
        let mut page = Page::skeleton(&LayoutConfig::default());
        clean_placeholder_brackets(&mut page);

        let summary = page
            .query(&Selector::Attr {
                name: "data-placeholder",
                value: "summary",
            })
            .unwrap();
        assert_eq!(summary.text_content(), "Summary");

        let link = page
            .query(&Selector::TagClass {
                tag: "a",
                class: "dynalink",
            })
            .unwrap();
        assert_eq!(link.attr("href"), Some("#"));
    }

    #[test]
    fn test_leaves_single_bracket_hrefs() {
        let mut page = Page::new(
            crate::page::Element::new("html").with_child(
                crate::page::Element::new("a")
                    .with_class("dynalink")
                    .with_attr("href", "posts/[draft.html"),
            ),
        );
        assert_eq!(clean_placeholder_brackets(&mut page), 0);
        assert_eq!(
            page.to_html(),
            "<!DOCTYPE html>\n<html><a class=\"dynalink\" href=\"posts/[draft.html\"></a></html>\n"
        );
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let mut once = Page::skeleton(&LayoutConfig::default());
        clean_placeholder_brackets(&mut once);
        let mut twice = once.clone();
        clean_placeholder_brackets(&mut twice);
        assert_eq!(once, twice);
    }
}
