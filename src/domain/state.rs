use std::fmt;

use crate::domain::PostCollection;

/// What the page currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    Loading,
    Loaded(PostCollection),
    EmptyFallback,
    ErrorFallback {
        category: ErrorCategory,
        /// Message of the last failed attempt.
        message: String,
    },
}

impl RenderState {
    pub fn name(&self) -> &'static str {
        match self {
            RenderState::Loading => "loading",
            RenderState::Loaded(_) => "loaded",
            RenderState::EmptyFallback => "empty-fallback",
            RenderState::ErrorFallback { .. } => "error-fallback",
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            RenderState::EmptyFallback | RenderState::ErrorFallback { .. }
        )
    }
}

impl fmt::Display for RenderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// User-facing bucket for a fetch failure, chosen by message inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    Connectivity,
    Blocked,
    Generic,
}

impl ErrorCategory {
    /// First match wins: `404`, then `network timeout`, then
    /// `Failed to fetch` / `CORS`.
    pub fn classify(message: &str) -> Self {
        if message.contains("404") {
            ErrorCategory::NotFound
        } else if message.contains("network timeout") {
            ErrorCategory::Connectivity
        } else if message.contains("Failed to fetch") || message.contains("CORS") {
            ErrorCategory::Blocked
        } else {
            ErrorCategory::Generic
        }
    }

    pub fn user_copy(self) -> &'static str {
        match self {
            ErrorCategory::NotFound => {
                "Oops! We couldn\u{2019}t find the page you were looking for. Please check the link and try again. If the issue persists, please report it using the contact details below."
            }
            ErrorCategory::Connectivity => {
                "It looks like there was a delay in loading the content. Please check your internet connection and try again. If the issue continues, feel free to report it using the contact details below."
            }
            ErrorCategory::Blocked => {
                "Sorry, we were unable to load some content due to a connection issue. Please try again later. If the issue persists, please report it using the contact details below."
            }
            ErrorCategory::Generic => {
                "Something went wrong while loading the content. Please try again later, and we apologize for the inconvenience. If this keeps happening, please report it using the contact details below."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_not_found() {
        assert_eq!(
            ErrorCategory::classify("HTTP error! status: 404"),
            ErrorCategory::NotFound
        );
    }

    #[test]
    fn test_classify_order_prefers_404() {
        assert_eq!(
            ErrorCategory::classify("Failed to fetch: 404 network timeout"),
            ErrorCategory::NotFound
        );
        assert_eq!(
            ErrorCategory::classify("network timeout, Failed to fetch"),
            ErrorCategory::Connectivity
        );
    }

    #[test]
    fn test_classify_blocked() {
        assert_eq!(
            ErrorCategory::classify("Failed to fetch http://x/posts.json: connection refused"),
            ErrorCategory::Blocked
        );
        assert_eq!(
            ErrorCategory::classify("blocked by CORS policy"),
            ErrorCategory::Blocked
        );
    }

    #[test]
    fn test_classify_generic() {
        assert_eq!(
            ErrorCategory::classify("HTTP error! status: 500"),
            ErrorCategory::Generic
        );
        assert_eq!(ErrorCategory::classify(""), ErrorCategory::Generic);
    }

    #[test]
    fn test_user_copy_is_distinct() {
        let copies = [
            ErrorCategory::NotFound.user_copy(),
            ErrorCategory::Connectivity.user_copy(),
            ErrorCategory::Blocked.user_copy(),
            ErrorCategory::Generic.user_copy(),
        ];
        for (i, a) in copies.iter().enumerate() {
            for b in &copies[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
