//! Immutable course catalog with a precomputed reverse-dependency index

use super::course::{Course, CourseId, CourseKind, PrereqKind};
use crate::core::error::CatalogError;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::Path;

/// Catalog compiled into the binary (mandatory curriculum plus electives)
const BUNDLED_CATALOG: &str = include_str!("../../../assets/catalog.json");

/// The full course catalog (mandatory + elective), validated at construction
///
/// Besides the ordered course list the catalog keeps two association lists:
/// - `regular_dependents`: prerequisite id -> courses that need it regularized
/// - `approved_dependents`: prerequisite id -> courses that need it approved
///
/// Both are built once so that cascades and rankings never rescan the catalog.
#[derive(Debug, Clone)]
pub struct CourseCatalog {
    courses: Vec<Course>,
    index: HashMap<CourseId, usize>,
    regular_dependents: HashMap<CourseId, Vec<CourseId>>,
    approved_dependents: HashMap<CourseId, Vec<CourseId>>,
}

impl CourseCatalog {
    /// Build a catalog from an ordered course list
    ///
    /// References to ids not present in the list are kept on the courses but
    /// left out of the reverse index; they never lock anything.
    ///
    /// # Errors
    /// Returns an error on duplicate ids or when the prerequisite graph has a cycle
    pub fn new(courses: Vec<Course>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(courses.len());
        for (pos, course) in courses.iter().enumerate() {
            if index.insert(course.id, pos).is_some() {
                return Err(CatalogError::DuplicateCourse(course.id));
            }
        }

        let mut regular_dependents: HashMap<CourseId, Vec<CourseId>> = HashMap::new();
        let mut approved_dependents: HashMap<CourseId, Vec<CourseId>> = HashMap::new();

        for course in &courses {
            for (kind, prereq) in course.prerequisites() {
                if !index.contains_key(&prereq) {
                    crate::warn!(
                        "Course {} references unknown prerequisite {prereq}; ignoring",
                        course.id
                    );
                    continue;
                }
                let bucket = match kind {
                    PrereqKind::Regular => regular_dependents.entry(prereq).or_default(),
                    PrereqKind::Approved => approved_dependents.entry(prereq).or_default(),
                };
                if !bucket.contains(&course.id) {
                    bucket.push(course.id);
                }
            }
        }

        let catalog = Self {
            courses,
            index,
            regular_dependents,
            approved_dependents,
        };
        catalog.check_acyclic()?;

        crate::debug!(
            "Course catalog ready: {} mandatory, {} electives",
            catalog.mandatory().count(),
            catalog.electives().count()
        );
        Ok(catalog)
    }

    /// Parse a catalog from a JSON array of course records
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed or the catalog fails validation
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let courses: Vec<Course> = serde_json::from_str(json).map_err(CatalogError::Bundled)?;
        Self::new(courses)
    }

    /// The catalog compiled into the binary
    ///
    /// # Errors
    /// Returns an error only if the bundled asset is malformed
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Load a catalog from a JSON file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let courses: Vec<Course> =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(courses)
    }

    /// Kahn's algorithm over prerequisite -> dependent edges of both kinds
    fn check_acyclic(&self) -> Result<(), CatalogError> {
        let mut indegree: HashMap<CourseId, usize> =
            self.courses.iter().map(|c| (c.id, 0)).collect();
        for id in self.courses.iter().map(|c| c.id) {
            for dependent in self.all_dependents(id) {
                if let Some(count) = indegree.get_mut(&dependent) {
                    *count += 1;
                }
            }
        }

        let mut queue: VecDeque<CourseId> = self
            .courses
            .iter()
            .map(|c| c.id)
            .filter(|id| indegree.get(id).copied() == Some(0))
            .collect();
        let mut visited = 0usize;

        while let Some(id) = queue.pop_front() {
            visited += 1;
            for dependent in self.all_dependents(id) {
                if let Some(count) = indegree.get_mut(&dependent) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        queue.push_back(dependent);
                    }
                }
            }
        }

        if visited == self.courses.len() {
            return Ok(());
        }

        let mut stuck: Vec<CourseId> = indegree
            .into_iter()
            .filter(|&(_, count)| count > 0)
            .map(|(id, _)| id)
            .collect();
        stuck.sort_unstable();
        Err(CatalogError::Cycle(stuck))
    }

    fn all_dependents(&self, id: CourseId) -> impl Iterator<Item = CourseId> + '_ {
        self.dependents(id, PrereqKind::Regular)
            .iter()
            .chain(self.dependents(id, PrereqKind::Approved))
            .copied()
    }

    /// Look up a course by id
    #[must_use]
    pub fn get(&self, id: CourseId) -> Option<&Course> {
        self.index.get(&id).map(|&pos| &self.courses[pos])
    }

    /// Whether the catalog defines `id`
    #[must_use]
    pub fn contains(&self, id: CourseId) -> bool {
        self.index.contains_key(&id)
    }

    /// All courses in catalog order
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// Mandatory courses in catalog order
    pub fn mandatory(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter().filter(|c| c.kind == CourseKind::Mandatory)
    }

    /// Elective courses in catalog order
    pub fn electives(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter().filter(|c| c.kind == CourseKind::Elective)
    }

    /// Courses that list `id` as a prerequisite of the given kind
    #[must_use]
    pub fn dependents(&self, id: CourseId, kind: PrereqKind) -> &[CourseId] {
        let map = match kind {
            PrereqKind::Regular => &self.regular_dependents,
            PrereqKind::Approved => &self.approved_dependents,
        };
        map.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

impl std::fmt::Display for CourseCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Course catalog ({} courses):", self.courses.len())?;
        writeln!(f)?;

        for course in &self.courses {
            let regular = join_ids(&course.regular_prereqs);
            let approved = join_ids(&course.approved_prereqs);
            writeln!(
                f,
                "  {:>3} {} [regular: {regular}] [approved: {approved}]",
                course.id, course.name
            )?;
        }

        Ok(())
    }
}

fn join_ids(ids: &[CourseId]) -> String {
    if ids.is_empty() {
        "–".to_string()
    } else {
        ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    }
}
