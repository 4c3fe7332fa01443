//! URI-addressed read-only data resources.
//!
//! Resources expose the data side of the mentoring runtime: course
//! catalogs, course details, and student records, addressed by URIs such
//! as `courses://catalog` or `student://1/profile`. The in-memory store
//! here is the reference backend, seeded with a small catalog; a missing
//! URI reads as `Ok(None)` rather than an error so callers can decide
//! whether absence is a problem.

use std::collections::HashMap;

use async_trait::async_trait;
use mentora_core::error::ResourceError;
use mentora_core::resource::ResourceStore;
use tracing::debug;

/// An immutable, seeded map from URI to JSON value.
pub struct InMemoryResourceStore {
    entries: HashMap<String, serde_json::Value>,
}

impl InMemoryResourceStore {
    /// An empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// A store seeded with the reference course catalog and student
    /// records.
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.seed_courses();
        store.seed_students();
        store
    }

    /// Add or replace a resource at the given URI.
    pub fn insert(&mut self, uri: impl Into<String>, value: serde_json::Value) {
        self.entries.insert(uri.into(), value);
    }

    fn seed_courses(&mut self) {
        let catalog = serde_json::json!([
            {
                "id": "CS101",
                "name": "Introduction to Programming",
                "department": "Computer Science",
                "credits": 3,
                "description": "Fundamentals of programming, covering basic syntax, data structures, and algorithms."
            },
            {
                "id": "CS201",
                "name": "Data Structures",
                "department": "Computer Science",
                "credits": 4,
                "description": "Advanced data structures and algorithms, including trees, graphs, and complexity analysis."
            },
            {
                "id": "MATH240",
                "name": "Linear Algebra",
                "department": "Mathematics",
                "credits": 3,
                "description": "Vector spaces, linear transformations, matrices, determinants, and eigenvalues."
            },
            {
                "id": "BIO101",
                "name": "Introduction to Biology",
                "department": "Biology",
                "credits": 4,
                "description": "Foundational concepts in biology, including cell structure, genetics, and evolution."
            },
            {
                "id": "CHEM101",
                "name": "General Chemistry",
                "department": "Chemistry",
                "credits": 4,
                "description": "Basic principles of chemistry, atomic structure, chemical bonding, and reactions."
            },
        ]);

        // Per-course detail records, addressable as courses://{id}.
        if let Some(courses) = catalog.as_array() {
            for course in courses {
                if let Some(id) = course["id"].as_str() {
                    self.insert(format!("courses://{id}"), course.clone());
                }
            }
        }

        if let Some(entry) = self.entries.get_mut("courses://CS101") {
            entry["prerequisites"] = serde_json::json!([]);
            entry["topics"] = serde_json::json!([
                "Programming fundamentals",
                "Variables and data types",
                "Control structures",
                "Functions",
                "Basic data structures",
            ]);
        }
        if let Some(entry) = self.entries.get_mut("courses://CS201") {
            entry["prerequisites"] = serde_json::json!(["CS101"]);
            entry["topics"] = serde_json::json!([
                "Algorithm analysis",
                "Linked lists",
                "Trees and binary search trees",
                "Hash tables",
                "Graphs",
            ]);
        }

        self.insert("courses://catalog", catalog);
    }

    fn seed_students(&mut self) {
        self.insert(
            "student://1/profile",
            serde_json::json!({
                "id": "1",
                "name": "Alex Johnson",
                "major": "Computer Science",
                "year": 3,
                "gpa": 3.7,
                "interests": ["Artificial Intelligence", "Web Development", "Game Design"],
                "career_goals": ["Software Engineer", "AI Researcher"],
            }),
        );
        self.insert(
            "student://1/courses",
            serde_json::json!([
                {"id": "CS101", "name": "Introduction to Programming", "credits": 3, "grade": "A", "grade_points": 4.0, "semester": "Fall 2024"},
                {"id": "CS201", "name": "Data Structures", "credits": 4, "grade": "B+", "grade_points": 3.3, "semester": "Spring 2025"},
                {"id": "MATH240", "name": "Linear Algebra", "credits": 3, "grade": "B", "grade_points": 3.0, "semester": "Fall 2024"},
            ]),
        );
        self.insert(
            "student://2/profile",
            serde_json::json!({
                "id": "2",
                "name": "Sam Rivera",
                "major": "Biology",
                "year": 2,
                "gpa": 3.2,
                "interests": ["Genetics", "Environmental Science", "Research"],
                "career_goals": ["Medical Researcher", "Biotechnology"],
            }),
        );
        self.insert(
            "student://2/courses",
            serde_json::json!([
                {"id": "BIO101", "name": "Introduction to Biology", "credits": 4, "grade": "A-", "grade_points": 3.7, "semester": "Fall 2024"},
                {"id": "CHEM101", "name": "General Chemistry", "credits": 4, "grade": "B", "grade_points": 3.0, "semester": "Fall 2024"},
            ]),
        );
    }
}

impl Default for InMemoryResourceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceStore for InMemoryResourceStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn read(&self, uri: &str) -> Result<Option<serde_json::Value>, ResourceError> {
        let value = self.entries.get(uri).cloned();
        debug!(uri, found = value.is_some(), "resource read");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn catalog_lists_five_courses() {
        let store = InMemoryResourceStore::with_defaults();
        let catalog = store.read("courses://catalog").await.unwrap().unwrap();
        assert_eq!(catalog.as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn course_details_carry_topics() {
        let store = InMemoryResourceStore::with_defaults();
        let course = store.read("courses://CS201").await.unwrap().unwrap();
        assert_eq!(course["credits"], 4);
        assert_eq!(course["prerequisites"][0], "CS101");
        assert!(course["topics"].as_array().unwrap().len() >= 3);
    }

    #[tokio::test]
    async fn unknown_uri_reads_as_none() {
        let store = InMemoryResourceStore::with_defaults();
        assert!(store.read("courses://NOPE").await.unwrap().is_none());
        assert!(store.read("bogus://scheme").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn inserted_resources_override_seeds() {
        let mut store = InMemoryResourceStore::with_defaults();
        store.insert("student://1/profile", serde_json::json!({"gpa": 2.0}));
        let profile = store.read("student://1/profile").await.unwrap().unwrap();
        assert_eq!(profile["gpa"], 2.0);
    }
}
