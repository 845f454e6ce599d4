use serde::{Deserialize, Serialize};

pub type MovieId = u32;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    /// External reference id (e.g., the poster API key space).
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub keywords: String,
    /// Flat text used for vectorization. Derived from the metadata fields at
    /// load time when absent; never mutated afterward.
    #[serde(default)]
    pub tag: String,
}

impl Movie {
    /// Concatenation of the descriptive fields, missing ones contributing an
    /// empty string. The tokenizer collapses any extra whitespace.
    pub fn derived_tag(&self) -> String {
        format!("{} {} {}", self.overview, self.genres, self.keywords)
    }
}

/// Immutable set of movies, ordered as loaded. Row index into the similarity
/// matrix is position in this order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    /// Fills in the derived `tag` for every movie that lacks one.
    pub fn new(mut movies: Vec<Movie>) -> Self {
        for movie in &mut movies {
            if movie.tag.is_empty() {
                movie.tag = movie.derived_tag();
            }
        }
        Self { movies }
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Exact title match; the first occurrence in catalog order wins when
    /// titles are duplicated.
    pub fn index_of_title(&self, title: &str) -> Option<usize> {
        self.movies.iter().position(|m| m.title == title)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|m| m.title.as_str())
    }
}
