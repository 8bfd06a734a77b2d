//! The five dependent academic dropdowns.
//!
//! Institution → College → Department → Course → Level. A dropdown is enabled only once
//! its parent has a selection, and any change at one level clears and disables every level
//! below it before the next level is repopulated. Courses are optional but levels are
//! course-scoped, so Level stays disabled until a course is picked.

use crate::error::{WizardError, WizardResult};
use hustler_domain::hierarchy::{AcademicOptions, EntityId, HierarchyNode};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

static ORDER: [CascadeLevel; 5] = CascadeLevel::ALL;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CascadeLevel {
    Institution,
    College,
    Department,
    Course,
    Level,
}

impl CascadeLevel {
    /// Top to bottom.
    pub const ALL: [Self; 5] =
        [Self::Institution, Self::College, Self::Department, Self::Course, Self::Level];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Institution => "Institution",
            Self::College => "College",
            Self::Department => "Department",
            Self::Course => "Course",
            Self::Level => "Level",
        }
    }

    /// Placeholder shown while the dropdown is cleared and disabled.
    #[must_use]
    pub const fn cleared_placeholder(self) -> &'static str {
        match self {
            Self::Institution => "Select Institution",
            Self::College => "Select College",
            Self::Department => "Select Department",
            Self::Course => "Select Course",
            Self::Level => "Select Level",
        }
    }

    /// Placeholder shown once the dropdown has been populated.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Course => "Select Course (Optional)",
            other => other.cleared_placeholder(),
        }
    }

    /// Every level strictly below this one.
    #[must_use]
    pub fn descendants(self) -> &'static [Self] {
        &ORDER[self.index() + 1..]
    }

    /// A course is the only level the academic step lets the user skip.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::Course)
    }
}

impl fmt::Display for CascadeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownOption {
    /// Form value: the node id, or the level name itself for [`CascadeLevel::Level`].
    pub value: String,
    pub label: String,
}

impl DropdownOption {
    fn from_node(node: &impl HierarchyNode) -> Self {
        Self { value: node.id().to_string(), label: node.name().to_owned() }
    }

    fn from_level(level: &str) -> Self {
        Self { value: level.to_owned(), label: level.to_owned() }
    }
}

/// One select box: its placeholder, options, current value and enablement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dropdown {
    level: CascadeLevel,
    placeholder: &'static str,
    options: Vec<DropdownOption>,
    selected: Option<String>,
    enabled: bool,
}

impl Dropdown {
    const fn new(level: CascadeLevel) -> Self {
        Self {
            level,
            placeholder: level.cleared_placeholder(),
            options: Vec::new(),
            selected: None,
            enabled: false,
        }
    }

    fn clear(&mut self) {
        self.placeholder = self.level.cleared_placeholder();
        self.options.clear();
        self.selected = None;
        self.enabled = false;
    }

    fn populate(&mut self, options: impl IntoIterator<Item = DropdownOption>) {
        self.placeholder = self.level.placeholder();
        self.options = options.into_iter().collect();
        self.selected = None;
        self.enabled = true;
    }

    #[must_use]
    pub const fn level(&self) -> CascadeLevel {
        self.level
    }

    #[must_use]
    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    #[must_use]
    pub fn options(&self) -> &[DropdownOption] {
        &self.options
    }

    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }
}

/// What the academic step will submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcademicSelection {
    pub institution: Option<EntityId>,
    pub college: Option<EntityId>,
    pub department: Option<EntityId>,
    pub course: Option<EntityId>,
    pub level: Option<String>,
}

/// The dropdown chain over a loaded [`AcademicOptions`] tree.
#[derive(Debug, Clone)]
pub struct Cascade {
    options: Option<Arc<AcademicOptions>>,
    dropdowns: [Dropdown; 5],
}

impl Default for Cascade {
    fn default() -> Self {
        Self::new()
    }
}

impl Cascade {
    /// Everything cleared and disabled until [`Cascade::load`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            options: None,
            dropdowns: [
                Dropdown::new(CascadeLevel::Institution),
                Dropdown::new(CascadeLevel::College),
                Dropdown::new(CascadeLevel::Department),
                Dropdown::new(CascadeLevel::Course),
                Dropdown::new(CascadeLevel::Level),
            ],
        }
    }

    /// Installs the hierarchy: institutions are offered, everything below is cleared.
    pub fn load(&mut self, options: Arc<AcademicOptions>) {
        debug!(institutions = options.institutions.len(), "Academic options loaded");
        self.clear_below(CascadeLevel::Institution);
        self.dropdown_mut(CascadeLevel::Institution)
            .populate(options.institutions.iter().map(DropdownOption::from_node));
        self.options = Some(options);
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.options.is_some()
    }

    #[must_use]
    pub fn options(&self) -> Option<&AcademicOptions> {
        self.options.as_deref()
    }

    #[must_use]
    pub const fn dropdown(&self, level: CascadeLevel) -> &Dropdown {
        &self.dropdowns[level.index()]
    }

    pub fn dropdowns(&self) -> impl Iterator<Item = &Dropdown> {
        self.dropdowns.iter()
    }

    fn dropdown_mut(&mut self, level: CascadeLevel) -> &mut Dropdown {
        &mut self.dropdowns[level.index()]
    }

    fn clear_below(&mut self, level: CascadeLevel) {
        for descendant in level.descendants() {
            self.dropdown_mut(*descendant).clear();
        }
    }

    fn selected_id(&self, level: CascadeLevel) -> Option<EntityId> {
        self.dropdown(level).selected()?.parse().ok()
    }

    /// Applies a raw form value at `level`.
    ///
    /// An empty or unknown value behaves like picking the placeholder: the level loses its
    /// selection and everything below is cleared.
    ///
    /// # Errors
    /// [`WizardError::Validation`] for a level name the current course does not offer.
    pub fn select(&mut self, level: CascadeLevel, raw: &str) -> WizardResult<()> {
        let raw = raw.trim();
        let id = raw.parse::<EntityId>().ok();
        match level {
            CascadeLevel::Institution => self.select_institution(id),
            CascadeLevel::College => self.select_college(id),
            CascadeLevel::Department => self.select_department(id),
            CascadeLevel::Course => self.select_course(id),
            CascadeLevel::Level => return self.select_level(Some(raw).filter(|r| !r.is_empty())),
        }
        Ok(())
    }

    pub fn select_institution(&mut self, id: Option<EntityId>) {
        self.clear_below(CascadeLevel::Institution);
        let colleges = self
            .options
            .as_deref()
            .zip(id)
            .and_then(|(options, id)| options.institution(id))
            .map(|institution| {
                institution.colleges.iter().map(DropdownOption::from_node).collect::<Vec<_>>()
            });
        self.apply(CascadeLevel::Institution, id, colleges);
    }

    pub fn select_college(&mut self, id: Option<EntityId>) {
        self.clear_below(CascadeLevel::College);
        let departments = self
            .options
            .as_deref()
            .zip(self.selected_id(CascadeLevel::Institution).zip(id))
            .and_then(|(options, (institution, college))| options.college(institution, college))
            .map(|college| {
                college.departments.iter().map(DropdownOption::from_node).collect::<Vec<_>>()
            });
        self.apply(CascadeLevel::College, id, departments);
    }

    pub fn select_department(&mut self, id: Option<EntityId>) {
        self.clear_below(CascadeLevel::Department);
        let parents = self
            .selected_id(CascadeLevel::Institution)
            .zip(self.selected_id(CascadeLevel::College));
        let courses = self
            .options
            .as_deref()
            .zip(parents.zip(id))
            .and_then(|(options, ((institution, college), department))| {
                options.department(institution, college, department)
            })
            .map(|department| {
                department.courses.iter().map(DropdownOption::from_node).collect::<Vec<_>>()
            });
        self.apply(CascadeLevel::Department, id, courses);
    }

    pub fn select_course(&mut self, id: Option<EntityId>) {
        self.clear_below(CascadeLevel::Course);
        let parents = self
            .selected_id(CascadeLevel::Institution)
            .zip(self.selected_id(CascadeLevel::College))
            .zip(self.selected_id(CascadeLevel::Department));
        let levels = self
            .options
            .as_deref()
            .zip(parents.zip(id))
            .and_then(|(options, (((institution, college), department), course))| {
                options.course(institution, college, department, course)
            })
            .map(|course| {
                course.levels.iter().map(|level| DropdownOption::from_level(level)).collect::<Vec<_>>()
            });
        self.apply(CascadeLevel::Course, id, levels);
    }

    /// # Errors
    /// [`WizardError::Validation`] when `level` is not among the current course's levels.
    pub fn select_level(&mut self, level: Option<&str>) -> WizardResult<()> {
        let dropdown = self.dropdown_mut(CascadeLevel::Level);
        match level {
            None => {
                dropdown.selected = None;
                Ok(())
            },
            Some(level) if dropdown.enabled && dropdown.contains(level) => {
                dropdown.selected = Some(level.to_owned());
                Ok(())
            },
            Some(level) => Err(WizardError::Validation {
                message: format!("Level '{level}' is not offered for the selected course").into(),
                context: None,
            }),
        }
    }

    /// Records the selection at `level` and populates the next level with `children`.
    /// `None` children means the id did not resolve, which leaves `level` unselected.
    fn apply(
        &mut self,
        level: CascadeLevel,
        id: Option<EntityId>,
        children: Option<Vec<DropdownOption>>,
    ) {
        let selected = id.filter(|_| children.is_some()).map(|id| id.to_string());
        self.dropdown_mut(level).selected = selected;

        if let (Some(children), Some(next)) = (children, level.descendants().first()) {
            self.dropdown_mut(*next).populate(children);
        }
    }

    #[must_use]
    pub fn selection(&self) -> AcademicSelection {
        AcademicSelection {
            institution: self.selected_id(CascadeLevel::Institution),
            college: self.selected_id(CascadeLevel::College),
            department: self.selected_id(CascadeLevel::Department),
            course: self.selected_id(CascadeLevel::Course),
            level: self.dropdown(CascadeLevel::Level).selected().map(str::to_owned),
        }
    }
}
