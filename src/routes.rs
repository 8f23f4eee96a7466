//! Screen routing

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Categories,
    Books,
}

impl Route {
    /// Where the empty path redirects to
    pub const DEFAULT: Route = Route::Categories;

    /// Resolve a path; the empty path and `/` redirect to the default screen
    pub fn resolve(path: &str) -> Option<Self> {
        match path.trim().trim_start_matches('/').trim_end_matches('/') {
            "" => Some(Self::DEFAULT),
            "categories" => Some(Route::Categories),
            "books" => Some(Route::Books),
            _ => None,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Categories => "/categories",
            Route::Books => "/books",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(Route::resolve(""), Some(Route::Categories));
        assert_eq!(Route::resolve("/"), Some(Route::Categories));
        assert_eq!(Route::resolve("/categories"), Some(Route::Categories));
        assert_eq!(Route::resolve("books"), Some(Route::Books));
        assert_eq!(Route::resolve("/books/"), Some(Route::Books));
        assert_eq!(Route::resolve("/authors"), None);
    }

    #[test]
    fn test_path_round_trips() {
        for route in [Route::Categories, Route::Books] {
            assert_eq!(Route::resolve(route.path()), Some(route));
        }
    }
}
