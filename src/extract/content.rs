// src/extract/content.rs
// =============================================================================
// Content extraction.
//
// Most pages carry navigation, sidebars and footers around the article we
// actually care about. Each domain rule names the element that wraps the
// article (for example <div class="content-area">). Sites without a rule
// fall back to the whole <body>.
//
// Rust concepts:
// - Lifetimes: ElementRef<'a> borrows from the parsed Html document
// - Option: a missing content element is not an error, just "nothing here"
// =============================================================================

use scraper::{ElementRef, Html, Selector};

use crate::rules::RuleRegistry;

// Elements whose text is never shown to a reader
const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template"];

// Returns the element holding the main content of `document`
//
// Parameters:
//   document: the parsed page
//   registry: domain rules
//   domain: host of the page URL (e.g. "tim.blog")
//
// Returns:
//   - <body> when the domain has no rule, or its rule names no tag
//   - the first element with the rule's tag and class otherwise
//   - None when the rule's element is not on the page
pub fn extract_content<'a>(
    document: &'a Html,
    registry: &RuleRegistry,
    domain: &str,
) -> Option<ElementRef<'a>> {
    let content = registry.lookup(domain).and_then(|rule| rule.content.as_ref());

    let Some(content) = content else {
        return body(document);
    };

    document
        .select(content.tag_selector())
        .find(|element| match &content.class {
            Some(class) => element.value().classes().any(|c| c == class),
            None => true,
        })
}

fn body(document: &Html) -> Option<ElementRef<'_>> {
    // "body" is a constant selector
    let selector = Selector::parse("body").expect("body selector is valid");
    document.select(&selector).next()
}

/// Visible text of `element`, split on whitespace.
///
/// Text nodes are joined with a space so `<p>one</p><p>two</p>` yields two
/// tokens rather than "onetwo".
pub fn text_tokens(element: ElementRef<'_>) -> Vec<String> {
    let mut text = String::new();

    for node in element.descendants() {
        let Some(fragment) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .map(|el| INVISIBLE_TAGS.contains(&el.name()))
                .unwrap_or(false)
        });
        if hidden {
            continue;
        }

        text.push_str(fragment);
        text.push(' ');
    }

    text.split_whitespace().map(str::to_string).collect()
}
