//! Academic hierarchy: institution → college → department → course → level.
//!
//! The tree is fetched once from `/api/options` and treated as read-only afterwards.
//! Every level is keyed by an integer id that is unique among its siblings.

use serde::{Deserialize, Serialize};

/// Backend primary key of a hierarchy node.
pub type EntityId = i64;

/// Common view over the id/name pair every hierarchy node carries.
pub trait HierarchyNode {
    fn id(&self) -> EntityId;
    fn name(&self) -> &str;
}

/// Root of the tree, exactly as served by `GET /api/options`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicOptions {
    #[serde(default)]
    pub institutions: Vec<Institution>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub colleges: Vec<College>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct College {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub departments: Vec<Department>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// A course of study. Levels are course-scoped: the backend only accepts a level that
/// belongs to the chosen course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub levels: Vec<String>,
}

macro_rules! hierarchy_node {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl HierarchyNode for $ty {
                fn id(&self) -> EntityId {
                    self.id
                }

                fn name(&self) -> &str {
                    &self.name
                }
            }
        )+
    };
}

hierarchy_node!(Institution, College, Department, Course);

fn find<T: HierarchyNode>(nodes: &[T], id: EntityId) -> Option<&T> {
    nodes.iter().find(|node| node.id() == id)
}

impl AcademicOptions {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.institutions.is_empty()
    }

    #[must_use]
    pub fn institution(&self, id: EntityId) -> Option<&Institution> {
        find(&self.institutions, id)
    }

    #[must_use]
    pub fn college(&self, institution: EntityId, college: EntityId) -> Option<&College> {
        self.institution(institution)?.college(college)
    }

    #[must_use]
    pub fn department(
        &self,
        institution: EntityId,
        college: EntityId,
        department: EntityId,
    ) -> Option<&Department> {
        self.college(institution, college)?.department(department)
    }

    #[must_use]
    pub fn course(
        &self,
        institution: EntityId,
        college: EntityId,
        department: EntityId,
        course: EntityId,
    ) -> Option<&Course> {
        self.department(institution, college, department)?.course(course)
    }
}

impl Institution {
    #[must_use]
    pub fn college(&self, id: EntityId) -> Option<&College> {
        find(&self.colleges, id)
    }
}

impl College {
    #[must_use]
    pub fn department(&self, id: EntityId) -> Option<&Department> {
        find(&self.departments, id)
    }
}

impl Department {
    #[must_use]
    pub fn course(&self, id: EntityId) -> Option<&Course> {
        find(&self.courses, id)
    }
}

impl Course {
    #[must_use]
    pub fn offers_level(&self, level: &str) -> bool {
        self.levels.iter().any(|l| l == level)
    }
}
