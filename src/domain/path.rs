//! Document and collection paths
//!
//! Paths alternate collection and document segments:
//! `RECIPES` is a collection, `RECIPES/r1` a document, and
//! `RECIPES/r1/NOTES` a nested collection under that document.

use super::errors::CookbookError;
use super::ids::validate_segment;
use super::result::Result;
use std::fmt;

fn split_segments(kind: &str, raw: &str) -> Result<Vec<String>> {
    if raw.trim().is_empty() {
        return Err(CookbookError::InvalidArgument(format!("{kind} path cannot be empty")));
    }
    let segments: Vec<String> = raw.split('/').map(str::to_string).collect();
    if segments.iter().any(|s| s.trim().is_empty()) {
        return Err(CookbookError::InvalidArgument(format!(
            "{kind} path '{raw}' contains an empty segment"
        )));
    }
    for segment in &segments {
        validate_segment("Path segment", segment).map_err(|e| {
            CookbookError::InvalidArgument(format!("{kind} path '{raw}': {e}"))
        })?;
    }
    Ok(segments)
}

/// Path addressing one document (an even number of segments)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath {
    segments: Vec<String>,
}

impl DocumentPath {
    /// Parses `"<collection>/<id>"`, possibly nested
    ///
    /// # Errors
    ///
    /// Returns [`CookbookError::InvalidArgument`] for blank segments or an odd
    /// number of segments
    pub fn parse(raw: &str) -> Result<Self> {
        let segments = split_segments("Document", raw)?;
        if segments.len() % 2 != 0 {
            return Err(CookbookError::InvalidArgument(format!(
                "Document path '{raw}' must have an even number of segments"
            )));
        }
        Ok(Self { segments })
    }

    /// Collection containing this document
    pub fn collection(&self) -> CollectionPath {
        CollectionPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        }
    }

    /// Last segment
    pub fn id(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// Nested collection under this document
    pub fn child(&self, collection: &str) -> Result<CollectionPath> {
        CollectionPath::parse(&format!("{self}/{collection}"))
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl std::str::FromStr for DocumentPath {
    type Err = CookbookError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Path addressing a collection (an odd number of segments)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath {
    segments: Vec<String>,
}

impl CollectionPath {
    /// Parses a collection name such as `"RECIPES"` or a nested collection path
    ///
    /// # Errors
    ///
    /// Returns [`CookbookError::InvalidArgument`] for blank segments or an even
    /// number of segments
    pub fn parse(raw: &str) -> Result<Self> {
        let segments = split_segments("Collection", raw)?;
        if segments.len() % 2 != 1 {
            return Err(CookbookError::InvalidArgument(format!(
                "Collection path '{raw}' must have an odd number of segments"
            )));
        }
        Ok(Self { segments })
    }

    /// Path of the document `id` inside this collection
    pub fn doc(&self, id: &str) -> Result<DocumentPath> {
        validate_segment("Document ID", id).map_err(|e| {
            CookbookError::InvalidArgument(format!("{e} (collection {self})"))
        })?;
        let mut segments = self.segments.clone();
        segments.push(id.to_string());
        Ok(DocumentPath { segments })
    }

    /// Collection name (the last segment)
    pub fn name(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// Document owning this collection, `None` for top-level collections
    pub fn parent(&self) -> Option<DocumentPath> {
        if self.segments.len() == 1 {
            return None;
        }
        Some(DocumentPath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl std::str::FromStr for CollectionPath {
    type Err = CookbookError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_document_path_parts() {
        let path = DocumentPath::parse("RECIPES/r1").unwrap();
        assert_eq!(path.id(), "r1");
        assert_eq!(path.collection().to_string(), "RECIPES");
        assert_eq!(path.collection().name(), "RECIPES");
        assert_eq!(path.to_string(), "RECIPES/r1");
    }

    #[test]
    fn test_nested_paths() {
        let path = DocumentPath::parse("RECIPES/r1/INGREDIENTS/p1").unwrap();
        assert_eq!(path.collection().to_string(), "RECIPES/r1/INGREDIENTS");
        assert_eq!(path.collection().name(), "INGREDIENTS");
        assert_eq!(
            path.collection().parent().unwrap(),
            DocumentPath::parse("RECIPES/r1").unwrap()
        );

        let child = DocumentPath::parse("RECIPES/r1").unwrap().child("NOTES").unwrap();
        assert_eq!(child.to_string(), "RECIPES/r1/NOTES");
    }

    #[test_case("" ; "empty")]
    #[test_case("RECIPES" ; "collection only")]
    #[test_case("RECIPES/" ; "trailing slash")]
    #[test_case("/r1" ; "leading slash")]
    #[test_case("RECIPES//r1" ; "double slash")]
    #[test_case("RECIPES/r1/INGREDIENTS" ; "nested collection")]
    #[test_case("RECIPES/r1?x" ; "query character")]
    #[test_case("RECIPES/r#1" ; "hash")]
    #[test_case("RECIPES/r\\1" ; "backslash")]
    fn test_malformed_document_paths(raw: &str) {
        let err = DocumentPath::parse(raw).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_collection_doc() {
        let recipes = CollectionPath::parse("RECIPES").unwrap();
        assert!(recipes.parent().is_none());
        assert_eq!(recipes.doc("r1").unwrap().to_string(), "RECIPES/r1");
        assert!(recipes.doc("").unwrap_err().is_invalid_argument());
        assert!(recipes.doc("a/b").unwrap_err().is_invalid_argument());
        assert!(recipes.doc("a#b").unwrap_err().is_invalid_argument());
        assert!(CollectionPath::parse("RECIPES/r1").is_err());
    }
}
