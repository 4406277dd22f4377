use super::*;
use std::collections::HashMap;

/// All the selections taking part in one search, together with the students
/// and projects they reference.
///
/// Selections are kept in load order. Students, projects and selections are
/// indexed by their dense ids.
#[derive(Clone, Debug)]
pub struct Selections {
    students: Vec<Student>,
    projects: Vec<Project>,
    selections: Vec<Selection>,
    by_student: Vec<Vec<SelectionId>>,
    by_project: Vec<Vec<SelectionId>>,
    project_by_code: HashMap<String, ProjectId>,
}

impl Selections {
    pub fn student(&self, StudentId(student): StudentId) -> &Student {
        &self.students[student]
    }

    pub fn project(&self, ProjectId(project): ProjectId) -> &Project {
        &self.projects[project]
    }

    pub fn selection(&self, SelectionId(selection): SelectionId) -> &Selection {
        &self.selections[selection]
    }

    pub(super) fn selection_mut(&mut self, SelectionId(selection): SelectionId) -> &mut Selection {
        &mut self.selections[selection]
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Selection> {
        self.selections.iter()
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn all_students(&self) -> Vec<StudentId> {
        (0..self.students.len()).map(StudentId).collect()
    }

    pub fn project_by_code(&self, code: &str) -> Option<&Project> {
        self.project_by_code.get(code).map(|&p| self.project(p))
    }

    pub fn allocated(&self) -> impl Iterator<Item = &Selection> {
        self.iter().filter(|s| s.is_allocated())
    }

    pub fn unallocated(&self) -> impl Iterator<Item = &Selection> {
        self.iter().filter(|s| !s.is_allocated())
    }

    pub fn for_student(&self, StudentId(student): StudentId) -> impl Iterator<Item = &Selection> {
        self.by_student[student]
            .iter()
            .map(|&id| self.selection(id))
    }

    pub fn for_project(&self, ProjectId(project): ProjectId) -> impl Iterator<Item = &Selection> {
        self.by_project[project]
            .iter()
            .map(|&id| self.selection(id))
    }

    pub fn for_supervisor(&self, supervisor: &str) -> impl Iterator<Item = &Selection> {
        self.iter()
            .filter(move |s| self.project(s.project).supervisor == supervisor)
    }

    pub fn available_for_student(&self, student: StudentId) -> impl Iterator<Item = &Selection> {
        self.for_student(student).filter(|s| s.is_available())
    }

    pub fn project_for(&self, student: StudentId) -> Option<ProjectId> {
        self.for_student(student)
            .find(|s| s.is_allocated())
            .map(|s| s.project)
    }

    /// Supervisors in order of first appearance among the selections.
    pub fn supervisors(&self) -> Vec<&str> {
        let mut supervisors: Vec<&str> = Vec::new();
        for selection in &self.selections {
            let supervisor = self.project(selection.project).supervisor.as_str();
            if !supervisors.contains(&supervisor) {
                supervisors.push(supervisor);
            }
        }
        supervisors
    }

    pub fn allocated_count(&self) -> usize {
        self.allocated().count()
    }

    pub fn project_allocated_count(&self, project: ProjectId) -> usize {
        self.for_project(project).filter(|s| s.is_allocated()).count()
    }

    pub fn supervisor_allocated_count(&self, supervisor: &str) -> usize {
        self.projects
            .iter()
            .filter(|p| p.supervisor == supervisor)
            .map(|p| self.project_allocated_count(p.id))
            .sum()
    }

    /// Sum of the serials of allocated selections, the value to minimize.
    pub fn total_serial(&self) -> u32 {
        self.allocated().map(|s| s.serial).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.allocated_count() == self.students.len()
    }

    /// Students holding at least one available selection.
    pub fn available_students(&self) -> Vec<StudentId> {
        self.all_students()
            .into_iter()
            .filter(|&s| self.available_for_student(s).next().is_some())
            .collect()
    }

    /// Students with neither an allocation nor any available selection left.
    pub fn missing_students(&self) -> Vec<StudentId> {
        self.all_students()
            .into_iter()
            .filter(|&s| {
                !self
                    .for_student(s)
                    .any(|sel| sel.is_allocated() || sel.is_available())
            })
            .collect()
    }

    /// Whether the allocated students and the students still holding options
    /// together cover everyone.
    pub fn is_still_completable(&self) -> bool {
        self.allocated_count() + self.available_students().len() == self.students.len()
    }

    /// Projects restricted to a single student.
    pub fn single_student_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| !p.allow_multiple).collect()
    }

    /// Allow or forbid several students on the same project.
    pub fn set_allow_multiple(&mut self, ProjectId(project): ProjectId, allow: bool) {
        self.projects[project].set_allow_multiple(allow);
    }
}

/// Incremental construction of a [`Selections`] collection, assigning dense
/// ids to students, projects and selections as they are first seen.
#[derive(Debug, Default)]
pub struct SelectionsBuilder {
    students: Vec<Student>,
    projects: Vec<Project>,
    selections: Vec<Selection>,
    student_by_login: HashMap<String, StudentId>,
    project_by_code: HashMap<String, ProjectId>,
}

impl SelectionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_student(&self, login: &str) -> bool {
        self.student_by_login.contains_key(login)
    }

    /// Return the id of the student with this login, registering it if needed.
    pub fn student(&mut self, login: &str) -> StudentId {
        if let Some(&id) = self.student_by_login.get(login) {
            return id;
        }
        let id = StudentId(self.students.len());
        self.students.push(Student::new(id, login));
        self.student_by_login.insert(login.to_owned(), id);
        id
    }

    /// Return the id of the project with this code, registering it if needed.
    /// The supervisor is only used on registration.
    pub fn project(&mut self, code: &str, supervisor: &str) -> ProjectId {
        if let Some(&id) = self.project_by_code.get(code) {
            return id;
        }
        let id = ProjectId(self.projects.len());
        self.projects.push(Project::new(id, code, supervisor));
        self.project_by_code.insert(code.to_owned(), id);
        id
    }

    pub fn has_choice(&self, student: StudentId, project: ProjectId) -> bool {
        self.selections
            .iter()
            .any(|s| s.student == student && s.project == project)
    }

    pub fn choice(&mut self, student: StudentId, project: ProjectId, serial: u32) -> SelectionId {
        assert!(serial >= 1, "serials start at 1");
        assert!(student.0 < self.students.len(), "unknown student");
        assert!(project.0 < self.projects.len(), "unknown project");
        let id = SelectionId(self.selections.len());
        self.selections
            .push(Selection::new(id, serial, student, project));
        id
    }

    pub fn build(self) -> Selections {
        let mut by_student = vec![Vec::new(); self.students.len()];
        let mut by_project = vec![Vec::new(); self.projects.len()];
        for selection in &self.selections {
            by_student[selection.student.0].push(selection.id);
            by_project[selection.project.0].push(selection.id);
        }
        Selections {
            students: self.students,
            projects: self.projects,
            selections: self.selections,
            by_student,
            by_project,
            project_by_code: self.project_by_code,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a collection from `(login, [(project code, supervisor)])` rows,
    /// serials following the order of the choices.
    pub(crate) fn selections(rows: &[(&str, &[(&str, &str)])]) -> Selections {
        let mut builder = SelectionsBuilder::new();
        for &(login, choices) in rows {
            let student = builder.student(login);
            for (serial, &(code, supervisor)) in (1..).zip(choices) {
                let project = builder.project(code, supervisor);
                builder.choice(student, project, serial);
            }
        }
        builder.build()
    }

    #[test]
    fn test_builder_deduplicates() {
        let s = selections(&[
            ("stu1", &[("A-sup1-1", "sup1"), ("A-sup2-1", "sup2")]),
            ("stu2", &[("A-sup2-1", "sup2"), ("A-sup1-1", "sup1")]),
        ]);
        assert_eq!(s.students().len(), 2);
        assert_eq!(s.projects().len(), 2);
        assert_eq!(s.len(), 4);
        let p = s.project_by_code("A-sup2-1").unwrap().id;
        let serials = s.for_project(p).map(|sel| sel.serial).collect::<Vec<_>>();
        assert_eq!(serials, vec![2, 1]);
        assert_eq!(s.for_supervisor("sup1").count(), 2);
        assert_eq!(s.supervisors(), vec!["sup1", "sup2"]);
    }

    #[test]
    fn test_fresh_views() {
        let s = selections(&[
            ("stu1", &[("A-sup1-1", "sup1")]),
            ("stu2", &[("A-sup1-2", "sup1")]),
        ]);
        assert_eq!(s.allocated_count(), 0);
        assert_eq!(s.unallocated().count(), 2);
        assert!(s.iter().all(|sel| sel.is_available()));
        assert_eq!(s.total_serial(), 0);
        assert!(!s.is_complete());
        assert!(s.missing_students().is_empty());
        assert!(s.is_still_completable());
        assert_eq!(s.project_for(StudentId(0)), None);
    }

    #[test]
    fn test_student_without_choice_is_missing() {
        let mut builder = SelectionsBuilder::new();
        let lazy = builder.student("lazy");
        let s = builder.build();
        assert_eq!(s.missing_students(), vec![lazy]);
        assert!(!s.is_still_completable());
    }

    #[test]
    fn test_single_student_projects() {
        let mut s = selections(&[("stu1", &[("A-sup1-1", "sup1")])]);
        assert!(s.single_student_projects().is_empty());
        let p = s.project_by_code("A-sup1-1").unwrap().id;
        s.set_allow_multiple(p, false);
        assert_eq!(s.single_student_projects()[0].code, "A-sup1-1");
        let limits = Limits {
            max_project_students: 3,
            ..Limits::default()
        };
        assert_eq!(s.capacity(p, &limits), 1);
        assert!(s.project_by_code("Z-nobody-9").is_none());
    }
}
