use hustler_domain::hierarchy::{AcademicOptions, College, Course, Department, Institution};
use hustler_registration::{Cascade, CascadeLevel};
use proptest::prelude::*;
use std::sync::Arc;

/// A 2×2×2×2 tree with ids encoding their path, e.g. course 1211 lives under 1 → 12 → 121.
fn tree() -> AcademicOptions {
    let courses = |department: i64| {
        (1..=2)
            .map(|n| Course {
                id: department * 10 + n,
                name: format!("Course {}", department * 10 + n),
                levels: vec![format!("{n}00"), format!("{}00", n + 1)],
            })
            .collect()
    };
    let departments = |college: i64| {
        (1..=2)
            .map(|n| Department {
                id: college * 10 + n,
                name: format!("Department {}", college * 10 + n),
                courses: courses(college * 10 + n),
            })
            .collect()
    };
    let colleges = |institution: i64| {
        (1..=2)
            .map(|n| College {
                id: institution * 10 + n,
                name: format!("College {}", institution * 10 + n),
                departments: departments(institution * 10 + n),
            })
            .collect()
    };
    AcademicOptions {
        institutions: (1..=2)
            .map(|id| Institution { id, name: format!("Institution {id}"), colleges: colleges(id) })
            .collect(),
    }
}

fn level() -> impl Strategy<Value = CascadeLevel> {
    prop::sample::select(CascadeLevel::ALL.to_vec())
}

/// Raw form values: placeholders, garbage, valid ids at every depth and level names.
fn raw_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("not-a-number".to_owned()),
        (1i64..=2).prop_map(|n| n.to_string()),
        (11i64..=22).prop_map(|n| n.to_string()),
        (111i64..=222).prop_map(|n| n.to_string()),
        (1111i64..=2222).prop_map(|n| n.to_string()),
        (1u8..=3).prop_map(|n| format!("{n}00")),
    ]
}

fn assert_consistent(cascade: &Cascade) -> Result<(), TestCaseError> {
    let dropdowns: Vec<_> = cascade.dropdowns().collect();

    prop_assert!(dropdowns[0].is_enabled());
    for pair in dropdowns.windows(2) {
        let (parent, child) = (pair[0], pair[1]);
        prop_assert_eq!(
            child.is_enabled(),
            parent.selected().is_some(),
            "{} enabled without a {} selection",
            child.level(),
            parent.level()
        );
    }
    for dropdown in &dropdowns {
        if let Some(selected) = dropdown.selected() {
            prop_assert!(dropdown.is_enabled());
            prop_assert!(dropdown.contains(selected));
        }
        if !dropdown.is_enabled() {
            prop_assert!(dropdown.options().is_empty());
            prop_assert_eq!(dropdown.placeholder(), dropdown.level().cleared_placeholder());
        }
    }

    let level = cascade.dropdown(CascadeLevel::Level);
    prop_assert_eq!(level.is_enabled(), cascade.selection().course.is_some());
    Ok(())
}

proptest! {
    #[test]
    fn any_selection_sequence_keeps_the_chain_consistent(
        steps in prop::collection::vec((level(), raw_value()), 0..40)
    ) {
        let mut cascade = Cascade::new();
        cascade.load(Arc::new(tree()));

        for (level, raw) in steps {
            let _ = cascade.select(level, &raw);
            assert_consistent(&cascade)?;
        }
    }

    #[test]
    fn changing_an_ancestor_clears_every_descendant(
        institution in 1i64..=2,
        college in 1i64..=2,
        department in 1i64..=2,
        course in 1i64..=2,
        ancestor in prop::sample::select(vec![
            CascadeLevel::Institution,
            CascadeLevel::College,
            CascadeLevel::Department,
            CascadeLevel::Course,
        ]),
        replacement in raw_value(),
    ) {
        let college = institution * 10 + college;
        let department = college * 10 + department;
        let course = department * 10 + course;
        let level = format!("{}00", course % 10);

        let mut cascade = Cascade::new();
        cascade.load(Arc::new(tree()));
        for (at, value) in [
            (CascadeLevel::Institution, institution.to_string()),
            (CascadeLevel::College, college.to_string()),
            (CascadeLevel::Department, department.to_string()),
            (CascadeLevel::Course, course.to_string()),
            (CascadeLevel::Level, level),
        ] {
            prop_assert!(cascade.select(at, &value).is_ok());
        }

        prop_assert!(cascade.select(ancestor, &replacement).is_ok());

        for descendant in ancestor.descendants() {
            prop_assert_eq!(cascade.dropdown(*descendant).selected(), None);
        }
        for descendant in &ancestor.descendants()[1..] {
            prop_assert!(!cascade.dropdown(*descendant).is_enabled());
        }
        assert_consistent(&cascade)?;
    }
}

#[test]
fn single_institution_scenario() {
    let options = AcademicOptions {
        institutions: vec![Institution {
            id: 1,
            name: "X".into(),
            colleges: vec![College {
                id: 1,
                name: "Y".into(),
                departments: vec![
                    Department { id: 1, name: "Physics".into(), courses: vec![] },
                    Department { id: 2, name: "Chemistry".into(), courses: vec![] },
                ],
            }],
        }],
    };
    let mut cascade = Cascade::new();
    cascade.load(Arc::new(options));

    cascade.select(CascadeLevel::Institution, "1").unwrap();
    let colleges: Vec<_> = cascade
        .dropdown(CascadeLevel::College)
        .options()
        .iter()
        .map(|o| o.label.as_str())
        .collect();
    assert_eq!(colleges, ["Y"]);

    cascade.select(CascadeLevel::College, "1").unwrap();
    let departments: Vec<_> = cascade
        .dropdown(CascadeLevel::Department)
        .options()
        .iter()
        .map(|o| o.label.as_str())
        .collect();
    assert_eq!(departments, ["Physics", "Chemistry"]);

    cascade.select(CascadeLevel::Institution, "").unwrap();
    for level in [
        CascadeLevel::College,
        CascadeLevel::Department,
        CascadeLevel::Course,
        CascadeLevel::Level,
    ] {
        let dropdown = cascade.dropdown(level);
        assert!(!dropdown.is_enabled());
        assert!(dropdown.options().is_empty());
        assert_eq!(dropdown.placeholder(), level.cleared_placeholder());
    }
}
