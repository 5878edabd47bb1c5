//! Domain-specific assertion macros for livefilter harnesses.
//!
//! These add context-rich failure messages that make it clear *which* entry
//! ended up with the wrong visibility and *what* query produced it.

/// Assert that exactly the listed texts are shown among `page`'s candidates
/// under `selection`, in page order.
///
/// ```rust
/// assert_shown!(page, &profile.selection, ["Retro", "Sprint Review"]);
/// ```
#[macro_export]
macro_rules! assert_shown {
    ($page:expr, $selection:expr, [$($text:expr),* $(,)?]) => {{
        let page: &livefilter_core::Page = &$page;
        let expected: Vec<&str> = vec![$($text),*];
        let shown: Vec<&str> = page
            .select($selection)
            .into_iter()
            .filter_map(|id| page.element(id))
            .filter(|e| e.display.is_shown())
            .map(|e| e.text.as_str())
            .collect();
        pretty_assertions::assert_eq!(
            shown,
            expected,
            "assert_shown! failed: shown entries differ"
        );
    }};
}

/// Assert that no candidate of `page` under `selection` is hidden.
#[macro_export]
macro_rules! assert_all_shown {
    ($page:expr, $selection:expr) => {{
        let page: &livefilter_core::Page = &$page;
        let hidden: Vec<&str> = page
            .select($selection)
            .into_iter()
            .filter_map(|id| page.element(id))
            .filter(|e| !e.display.is_shown())
            .map(|e| e.text.as_str())
            .collect();
        if !hidden.is_empty() {
            panic!("assert_all_shown! failed: hidden entries {:?}", hidden);
        }
    }};
}
