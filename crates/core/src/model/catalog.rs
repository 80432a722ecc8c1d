use std::collections::HashMap;

use crate::model::grade::{Grade, GradeError};

/// The built-in ladder, easiest first: `(name, digits, terms, seconds)`.
const STANDARD_LADDER: [(&str, u8, u8, f64); 20] = [
    ("10級", 1, 4, 4.0),
    ("9級", 1, 6, 6.0),
    ("8級", 1, 8, 8.0),
    ("7級", 1, 10, 10.0),
    ("6級", 2, 3, 3.0),
    ("5級", 2, 4, 4.0),
    ("4級", 2, 5, 5.0),
    ("3級", 2, 7, 7.0),
    ("2級", 2, 10, 10.0),
    ("1級", 3, 5, 5.0),
    ("初段", 3, 7, 7.0),
    ("二段", 3, 10, 10.0),
    ("三段", 3, 10, 7.0),
    ("四段", 3, 10, 5.0),
    ("五段", 3, 10, 4.5),
    ("六段", 3, 10, 4.0),
    ("七段", 3, 10, 3.5),
    ("八段", 3, 10, 3.0),
    ("九段", 3, 15, 4.0),
    ("十段", 3, 15, 3.0),
];

/// Ordered, name-indexed collection of grades.
///
/// Built once at startup and shared read-only for the life of the process;
/// there are no mutation operations.
#[derive(Debug, Clone)]
pub struct GradeCatalog {
    grades: Vec<Grade>,
    by_name: HashMap<String, usize>,
}

impl GradeCatalog {
    /// Creates a catalog from the given grades, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns `GradeError::DuplicateName` if two grades share a name.
    pub fn new(grades: Vec<Grade>) -> Result<Self, GradeError> {
        let mut by_name = HashMap::with_capacity(grades.len());
        for (position, grade) in grades.iter().enumerate() {
            if by_name.insert(grade.name().to_string(), position).is_some() {
                return Err(GradeError::DuplicateName(grade.name().to_string()));
            }
        }
        Ok(Self { grades, by_name })
    }

    /// Returns the built-in twenty-grade ladder, from `10級` up to `十段`.
    ///
    /// Digit width and term count grow with difficulty while the time limit
    /// generally shrinks.
    ///
    /// # Panics
    ///
    /// Panics if the built-in ladder table is invalid, which it is not.
    #[must_use]
    pub fn standard() -> Self {
        let grades = STANDARD_LADDER
            .iter()
            .map(|&(name, digits, terms, seconds)| Grade::new(name, digits, terms, seconds))
            .collect::<Result<Vec<_>, _>>()
            .expect("built-in ladder entries should be valid grades");
        Self::new(grades).expect("built-in ladder names should be unique")
    }

    /// Looks up a grade by its exact name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Grade> {
        self.by_name.get(name).map(|&position| &self.grades[position])
    }

    /// Returns true if a grade with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Iterates grades in ladder order, easiest first.
    pub fn iter(&self) -> impl Iterator<Item = &Grade> {
        self.grades.iter()
    }

    /// Returns the number of grades in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.grades.len()
    }

    /// Returns true if the catalog holds no grades.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_ladder_has_twenty_grades_in_order() {
        let catalog = GradeCatalog::standard();
        assert_eq!(catalog.len(), 20);

        let names: Vec<&str> = catalog.iter().map(Grade::name).collect();
        assert_eq!(names.first(), Some(&"10級"));
        assert_eq!(names.get(9), Some(&"1級"));
        assert_eq!(names.get(10), Some(&"初段"));
        assert_eq!(names.last(), Some(&"十段"));
    }

    #[test]
    fn every_standard_grade_is_within_bounds() {
        for grade in GradeCatalog::standard().iter() {
            assert!((1..=3).contains(&grade.digits()), "{}", grade.name());
            assert!((3..=15).contains(&grade.terms()), "{}", grade.name());
            assert!(grade.seconds() > 0.0, "{}", grade.name());
        }
    }

    #[test]
    fn looks_up_grades_by_exact_name() {
        let catalog = GradeCatalog::standard();

        let beginner = catalog.get("10級").unwrap();
        assert_eq!(beginner.digits(), 1);
        assert_eq!(beginner.terms(), 4);

        let top = catalog.get("十段").unwrap();
        assert_eq!(top.digits(), 3);
        assert_eq!(top.terms(), 15);
        assert!((top.seconds() - 3.0).abs() < f64::EPSILON);

        assert!(catalog.get("11級").is_none());
        assert!(catalog.get("").is_none());
        assert!(!catalog.contains("dan 11"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let grades = vec![
            Grade::new("初段", 3, 7, 7.0).unwrap(),
            Grade::new("初段", 3, 10, 10.0).unwrap(),
        ];
        let err = GradeCatalog::new(grades).unwrap_err();
        assert_eq!(err, GradeError::DuplicateName("初段".to_string()));
    }

    #[test]
    fn empty_catalog_is_allowed() {
        let catalog = GradeCatalog::new(Vec::new()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.len(), 0);
    }
}
