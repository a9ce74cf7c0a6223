use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use watcher_core::SelectorPath;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Element not found for selector '{selector}' in path '{path}'")]
    ElementNotFound { selector: String, path: String },
    #[error("Invalid selector '{selector}' in path '{path}': {reason}")]
    InvalidSelector {
        selector: String,
        path: String,
        reason: String,
    },
}

/// Locates the element addressed by `path` and returns its outer markup.
///
/// A blank path returns the `<body>` element, or the input unchanged when
/// the document has none. Otherwise each step selects the first matching
/// descendant of the element found by the previous step.
pub fn extract_element(html: &str, path: &SelectorPath) -> Result<String, ExtractError> {
    let document = Html::parse_document(html);

    if path.is_blank() {
        let body = Selector::parse("body").ok();
        return Ok(body
            .as_ref()
            .and_then(|sel| document.select(sel).next())
            .map(|node| node.html())
            .unwrap_or_else(|| html.to_string()));
    }

    let mut current: Option<ElementRef<'_>> = None;
    for step in path.steps() {
        let selector = Selector::parse(step).map_err(|err| ExtractError::InvalidSelector {
            selector: step.clone(),
            path: path.as_str().to_string(),
            reason: err.to_string(),
        })?;

        let found = match current {
            None => document.select(&selector).next(),
            // Descendants only: the scope element itself never matches.
            Some(scope) => scope
                .select(&selector)
                .find(|candidate| candidate.id() != scope.id()),
        };

        current = Some(found.ok_or_else(|| ExtractError::ElementNotFound {
            selector: step.clone(),
            path: path.as_str().to_string(),
        })?);
    }

    Ok(match current {
        Some(element) => element.html(),
        // Only separators were configured: nothing narrows the document.
        None => document.root_element().html(),
    })
}
