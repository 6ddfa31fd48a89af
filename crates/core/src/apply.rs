// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use reflektion_domain::{
    Class, CoordinatorSlot, CoordinatorTarget, Department, DepartmentHead, Division, DomainError,
    EntityKind, Faculty, FacultyIdScheme, Lab, LabScope, RollRange, Subject, normalize_email,
    require_identifier, validate_assignment, validate_credits, validate_department_unheaded,
    validate_email, validate_email_unique, validate_lab_range, validate_removal,
    validate_required,
};

use crate::command::Command;
use crate::error::CoreError;
use crate::preview::{
    LabPreview, preview_class_id, preview_department_code, preview_division_id,
    preview_employee_id, preview_faculty_id, preview_lab, preview_subject_id,
};
use crate::state::{Action, Mutation, Record, State, TransitionResult};

/// Applies a command to the current state, producing a new state and the
/// writes that realize it.
///
/// This function is pure. Derived identifiers are resolved against `state`
/// exactly as the preview functions resolve them.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `current_year` - The calendar year used in year-stamped identifiers
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and ordered mutations
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if the command violates a domain rule or references a
/// record that does not exist.
pub fn apply(
    state: &State,
    command: Command,
    current_year: i32,
) -> Result<TransitionResult, CoreError> {
    let command_name: &'static str = command.name();
    let mut tx: Transition = Transition::new(state, current_year);

    let details: String = match command {
        Command::CreateDepartment { name } => tx.create_department(&name)?,
        Command::UpdateDepartment {
            department,
            name,
            is_active,
        } => tx.update_department(department, &name, is_active)?,
        Command::CreateDepartmentHead {
            name,
            email,
            department,
        } => tx.create_department_head(&name, &email, department)?,
        Command::AssignDepartmentHead { head, department } => {
            tx.assign_department_head(head, department)?
        }
        Command::SetHeadManagement { head, enabled } => tx.set_head_management(head, enabled)?,
        Command::CreateFaculty {
            name,
            email,
            scheme,
        } => tx.create_faculty(&name, &email, scheme)?,
        Command::UpdateFaculty {
            faculty,
            name,
            email,
        } => tx.update_faculty(faculty, &name, &email)?,
        Command::AssignFacultyClass { faculty, class } => {
            tx.assign_faculty_class(faculty, class)?
        }
        Command::UnassignFacultyClass { faculty, class } => {
            tx.unassign_faculty_class(faculty, class)?
        }
        Command::DeleteFaculty { faculty } => tx.delete_faculty(faculty)?,
        Command::CreateClass { name, year } => tx.create_class(&name, &year)?,
        Command::UpdateClass { class, name, year } => tx.update_class(class, &name, &year)?,
        Command::DeleteClass { class } => tx.delete_class(class)?,
        Command::CreateDivision { class, name } => tx.create_division(class, &name)?,
        Command::DeleteDivision { division } => {
            let labs: usize = tx.delete_division_cascade(division)?;
            format!("Deleted division {division} and {labs} lab(s)")
        }
        Command::CreateLab {
            scope,
            name,
            start,
            end,
        } => tx.create_lab(scope, &name, start, end)?,
        Command::UpdateLab {
            lab,
            name,
            start,
            end,
        } => tx.update_lab(lab, &name, start, end)?,
        Command::DeleteLab { lab } => tx.delete_lab(lab)?,
        Command::CreateSubject {
            name,
            code,
            credits,
            department,
        } => tx.create_subject(&name, &code, credits, department)?,
        Command::AssignCoordinator { faculty, target } => {
            tx.assign_coordinator(faculty, target)?
        }
        Command::RemoveCoordinator { faculty } => tx.remove_coordinator(faculty)?,
    };

    Ok(tx.finish(command_name, details))
}

/// Working copy of the state plus the writes recorded so far.
struct Transition {
    state: State,
    mutations: Vec<Mutation>,
    /// Faculty records changed by this transition; written once at the end.
    touched_faculty: BTreeSet<i64>,
    current_year: i32,
}

impl Transition {
    fn new(state: &State, current_year: i32) -> Self {
        Self {
            state: state.clone(),
            mutations: Vec::new(),
            touched_faculty: BTreeSet::new(),
            current_year,
        }
    }

    fn finish(mut self, name: &str, details: String) -> TransitionResult {
        for id in std::mem::take(&mut self.touched_faculty) {
            if let Ok(faculty) = self.state.faculty_member(id) {
                self.mutations
                    .push(Mutation::Update(Record::Faculty(faculty.clone())));
            }
        }

        TransitionResult {
            new_state: self.state,
            mutations: self.mutations,
            action: Action {
                name: name.to_string(),
                details,
            },
        }
    }

    fn insert(&mut self, record: Record) {
        match &record {
            Record::Department(r) => self.state.departments.push(r.clone()),
            Record::DepartmentHead(r) => self.state.department_heads.push(r.clone()),
            Record::Faculty(r) => self.state.faculty.push(r.clone()),
            Record::Class(r) => self.state.classes.push(r.clone()),
            Record::Division(r) => self.state.divisions.push(r.clone()),
            Record::Lab(r) => self.state.labs.push(r.clone()),
            Record::Subject(r) => self.state.subjects.push(r.clone()),
        }
        self.mutations.push(Mutation::Insert(record));
    }

    fn update(&mut self, record: Record) {
        self.mutations.push(Mutation::Update(record));
    }

    fn delete(&mut self, kind: EntityKind, id: i64) {
        self.mutations.push(Mutation::Delete { kind, id });
    }

    // ------------------------------------------------------------------
    // Departments
    // ------------------------------------------------------------------

    fn create_department(&mut self, name: &str) -> Result<String, DomainError> {
        validate_required("name", name)?;

        let code: String =
            require_identifier("name", preview_department_code(&self.state, name).resolved_id)?;
        let department: Department = Department::new(name.trim().to_string(), code.clone());
        self.insert(Record::Department(department));

        Ok(format!("Created department '{}' ({code})", name.trim()))
    }

    fn update_department(
        &mut self,
        department: i64,
        name: &str,
        is_active: bool,
    ) -> Result<String, DomainError> {
        validate_required("name", name)?;

        let record: &mut Department = self.state.department_mut(department)?;
        record.name = name.trim().to_string();
        record.is_active = is_active;
        let record: Department = record.clone();
        let code: String = record.code.clone();
        self.update(Record::Department(record));

        Ok(format!("Updated department {code}"))
    }

    // ------------------------------------------------------------------
    // Department heads
    // ------------------------------------------------------------------

    fn create_department_head(
        &mut self,
        name: &str,
        email: &str,
        department: Option<i64>,
    ) -> Result<String, DomainError> {
        validate_required("name", name)?;
        validate_email(email)?;
        validate_email_unique(
            EntityKind::DepartmentHead,
            email,
            self.state.department_heads.iter().map(|h| h.email.as_str()),
        )?;
        if let Some(department) = department {
            self.state.department(department)?;
            validate_department_unheaded(department, None, &self.state.department_heads)?;
        }

        let employee_id: String =
            require_identifier("name", preview_employee_id(&self.state, name).resolved_id)?;
        let head: DepartmentHead = DepartmentHead::new(
            name.trim().to_string(),
            email,
            employee_id.clone(),
            department,
        );
        self.insert(Record::DepartmentHead(head));

        Ok(format!("Created department head {employee_id}"))
    }

    fn assign_department_head(&mut self, head: i64, department: i64) -> Result<String, DomainError> {
        self.state.department(department)?;
        self.state.department_head(head)?;
        validate_department_unheaded(department, Some(head), &self.state.department_heads)?;

        let record: &mut DepartmentHead = self.state.department_head_mut(head)?;
        record.department = Some(department);
        let record: DepartmentHead = record.clone();
        self.update(Record::DepartmentHead(record));

        Ok(format!(
            "Assigned department head {head} to department {department}"
        ))
    }

    fn set_head_management(&mut self, head: i64, enabled: bool) -> Result<String, DomainError> {
        let record: &mut DepartmentHead = self.state.department_head_mut(head)?;
        record.management_enabled = enabled;
        let record: DepartmentHead = record.clone();
        self.update(Record::DepartmentHead(record));

        let verb: &str = if enabled { "Enabled" } else { "Disabled" };
        Ok(format!("{verb} management for department head {head}"))
    }

    // ------------------------------------------------------------------
    // Faculty
    // ------------------------------------------------------------------

    fn create_faculty(
        &mut self,
        name: &str,
        email: &str,
        scheme: FacultyIdScheme,
    ) -> Result<String, DomainError> {
        validate_required("name", name)?;
        validate_email(email)?;
        validate_email_unique(
            EntityKind::Faculty,
            email,
            self.state.faculty.iter().map(|f| f.email.as_str()),
        )?;

        let check = preview_faculty_id(&self.state, name, email, scheme, self.current_year);
        let faculty_id: String = require_identifier("name", check.resolved_id)?;
        let faculty: Faculty = Faculty::new(name.trim().to_string(), email, faculty_id.clone());
        self.insert(Record::Faculty(faculty));

        Ok(format!("Created faculty {faculty_id}"))
    }

    fn update_faculty(&mut self, faculty: i64, name: &str, email: &str) -> Result<String, DomainError> {
        validate_required("name", name)?;
        validate_email(email)?;
        self.state.faculty_member(faculty)?;
        validate_email_unique(
            EntityKind::Faculty,
            email,
            self.state
                .faculty
                .iter()
                .filter(|f| f.id != Some(faculty))
                .map(|f| f.email.as_str()),
        )?;

        let record: &mut Faculty = self.state.faculty_mut(faculty)?;
        record.name = name.trim().to_string();
        record.email = normalize_email(email);
        self.touched_faculty.insert(faculty);

        Ok(format!("Updated faculty {faculty}"))
    }

    fn assign_faculty_class(&mut self, faculty: i64, class: i64) -> Result<String, DomainError> {
        self.state.class(class)?;
        self.state.faculty_mut(faculty)?.assigned_classes.insert(class);
        self.touched_faculty.insert(faculty);

        Ok(format!("Assigned class {class} to faculty {faculty}"))
    }

    fn unassign_faculty_class(&mut self, faculty: i64, class: i64) -> Result<String, DomainError> {
        self.state.faculty_mut(faculty)?.assigned_classes.remove(&class);
        self.touched_faculty.insert(faculty);

        Ok(format!("Removed class {class} from faculty {faculty}"))
    }

    fn delete_faculty(&mut self, faculty: i64) -> Result<String, DomainError> {
        let record: Faculty = self.state.faculty_member(faculty)?.clone();

        if let Some(target) = record.coordinator_for {
            self.set_target_coordinator(target, None);
        }

        self.delete(EntityKind::Faculty, faculty);
        self.state.faculty.retain(|f| f.id != Some(faculty));
        self.touched_faculty.remove(&faculty);

        Ok(format!("Deleted faculty {}", record.faculty_id))
    }

    // ------------------------------------------------------------------
    // Classes and divisions
    // ------------------------------------------------------------------

    fn create_class(&mut self, name: &str, year: &str) -> Result<String, DomainError> {
        validate_required("name", name)?;
        validate_required("year", year)?;

        let class_id: String =
            require_identifier("name", preview_class_id(&self.state, name, year).resolved_id)?;
        let class: Class = Class::new(
            class_id.clone(),
            name.trim().to_string(),
            year.trim().to_string(),
        );
        self.insert(Record::Class(class));

        Ok(format!("Created class {class_id}"))
    }

    fn update_class(&mut self, class: i64, name: &str, year: &str) -> Result<String, DomainError> {
        validate_required("name", name)?;
        validate_required("year", year)?;

        let record: &mut Class = self.state.class_mut(class)?;
        record.name = name.trim().to_string();
        record.year = year.trim().to_string();
        let record: Class = record.clone();
        let class_id: String = record.class_id.clone();
        self.update(Record::Class(record));

        Ok(format!("Updated class {class_id}"))
    }

    fn delete_class(&mut self, class: i64) -> Result<String, DomainError> {
        let record: Class = self.state.class(class)?.clone();

        let divisions: Vec<i64> = self
            .state
            .divisions_of(class)
            .filter_map(|d| d.id)
            .collect();
        let mut labs: usize = 0;
        for division in &divisions {
            labs += self.delete_division_cascade(*division)?;
        }
        labs += self.delete_labs_in(LabScope::Class(class));

        if let Some(coordinator) = record.class_coordinator {
            self.release_faculty(coordinator, CoordinatorTarget::Class(class));
        }

        let teaching: Vec<i64> = self
            .state
            .faculty
            .iter_mut()
            .filter_map(|faculty| {
                if faculty.assigned_classes.remove(&class) {
                    faculty.id
                } else {
                    None
                }
            })
            .collect();
        self.touched_faculty.extend(teaching);

        self.delete(EntityKind::Class, class);
        self.state.classes.retain(|c| c.id != Some(class));

        Ok(format!(
            "Deleted class {} with {} division(s) and {labs} lab(s)",
            record.class_id,
            divisions.len()
        ))
    }

    fn create_division(&mut self, class: i64, name: &str) -> Result<String, DomainError> {
        validate_required("name", name)?;
        self.state.class(class)?;
        if self
            .state
            .labs
            .iter()
            .any(|lab| lab.scope == LabScope::Class(class))
        {
            return Err(DomainError::ClassHasLabs { class });
        }

        let check = preview_division_id(&self.state, class, name, self.current_year)?;
        let division_id: String = require_identifier("name", check.resolved_id)?;
        let division: Division = Division::new(division_id.clone(), name.trim().to_string(), class);
        self.insert(Record::Division(division));

        Ok(format!("Created division {division_id}"))
    }

    /// Deletes a division, its labs, and the faculty side of its
    /// coordinator link. Returns the number of labs removed.
    fn delete_division_cascade(&mut self, division: i64) -> Result<usize, DomainError> {
        let record: Division = self.state.division(division)?.clone();

        let labs: usize = self.delete_labs_in(LabScope::Division(division));
        if let Some(coordinator) = record.class_coordinator {
            self.release_faculty(coordinator, CoordinatorTarget::Division(division));
        }

        self.delete(EntityKind::Division, division);
        self.state.divisions.retain(|d| d.id != Some(division));
        if let Ok(owner) = self.state.class_mut(record.owner_class) {
            owner.divisions.retain(|d| *d != division);
        }

        Ok(labs)
    }

    // ------------------------------------------------------------------
    // Labs
    // ------------------------------------------------------------------

    fn create_lab(
        &mut self,
        scope: LabScope,
        name: &str,
        start: u32,
        end: u32,
    ) -> Result<String, DomainError> {
        validate_required("name", name)?;
        if let LabScope::Class(class) = scope {
            self.state.class(class)?;
            if self.state.divisions_of(class).next().is_some() {
                return Err(DomainError::ClassHasDivisions { class });
            }
        }

        let preview: LabPreview = preview_lab(&self.state, scope, name, self.current_year)?;
        let range: RollRange = validate_lab_range(start, end, scope, &self.state.labs, None)?;
        let lab_id: String = require_identifier("name", preview.check.resolved_id)?;
        let lab: Lab = Lab::new(lab_id.clone(), name.trim().to_string(), scope, range);
        self.insert(Record::Lab(lab));

        Ok(format!("Created lab {lab_id} covering roll numbers {range}"))
    }

    fn update_lab(
        &mut self,
        lab: i64,
        name: &str,
        start: u32,
        end: u32,
    ) -> Result<String, DomainError> {
        validate_required("name", name)?;
        let scope: LabScope = self.state.lab(lab)?.scope;
        let range: RollRange = validate_lab_range(start, end, scope, &self.state.labs, Some(lab))?;

        let record: &mut Lab = self.state.lab_mut(lab)?;
        record.name = name.trim().to_string();
        record.range = range;
        let record: Lab = record.clone();
        let lab_id: String = record.lab_id.clone();
        self.update(Record::Lab(record));

        Ok(format!("Updated lab {lab_id} to cover roll numbers {range}"))
    }

    fn delete_lab(&mut self, lab: i64) -> Result<String, DomainError> {
        let lab_id: String = self.state.lab(lab)?.lab_id.clone();
        self.delete(EntityKind::Lab, lab);
        self.state.labs.retain(|l| l.id != Some(lab));

        Ok(format!("Deleted lab {lab_id}"))
    }

    /// Deletes every lab in `scope`, returning how many were removed.
    fn delete_labs_in(&mut self, scope: LabScope) -> usize {
        let labs: Vec<i64> = self
            .state
            .labs
            .iter()
            .filter(|lab| lab.scope == scope)
            .filter_map(|lab| lab.id)
            .collect();
        for lab in &labs {
            self.delete(EntityKind::Lab, *lab);
        }
        self.state.labs.retain(|lab| lab.scope != scope);
        labs.len()
    }

    // ------------------------------------------------------------------
    // Subjects
    // ------------------------------------------------------------------

    fn create_subject(
        &mut self,
        name: &str,
        code: &str,
        credits: u8,
        department: i64,
    ) -> Result<String, DomainError> {
        validate_required("name", name)?;
        validate_required("code", code)?;
        validate_credits(credits)?;
        self.state.department(department)?;

        let subject_id: String =
            require_identifier("code", preview_subject_id(&self.state, code, name).resolved_id)?;
        let subject: Subject = Subject {
            id: None,
            subject_id: subject_id.clone(),
            name: name.trim().to_string(),
            code: code.trim().to_string(),
            credits,
            department,
        };
        self.insert(Record::Subject(subject));

        Ok(format!("Created subject {subject_id}"))
    }

    // ------------------------------------------------------------------
    // Coordinators
    // ------------------------------------------------------------------

    fn assign_coordinator(
        &mut self,
        faculty: i64,
        target: CoordinatorTarget,
    ) -> Result<String, DomainError> {
        let current: Option<CoordinatorTarget> = self.state.faculty_member(faculty)?.coordinator_for;
        let slot: CoordinatorSlot = match target {
            CoordinatorTarget::Class(class) => self.state.class(class)?.class_coordinator,
            CoordinatorTarget::Division(division) => {
                self.state.division(division)?.class_coordinator
            }
        }
        .into();

        validate_assignment(slot, target, faculty, current)?;

        self.set_target_coordinator(target, Some(faculty));
        self.state.faculty_mut(faculty)?.coordinator_for = Some(target);
        self.touched_faculty.insert(faculty);

        Ok(format!("Assigned faculty {faculty} as coordinator of {target}"))
    }

    fn remove_coordinator(&mut self, faculty: i64) -> Result<String, DomainError> {
        let current: Option<CoordinatorTarget> = self.state.faculty_member(faculty)?.coordinator_for;
        let target: CoordinatorTarget = validate_removal(faculty, current)?;

        self.set_target_coordinator(target, None);
        self.state.faculty_mut(faculty)?.coordinator_for = None;
        self.touched_faculty.insert(faculty);

        Ok(format!("Removed faculty {faculty} as coordinator of {target}"))
    }

    /// Writes the target side of a coordinator link.
    ///
    /// A target that no longer exists is skipped.
    fn set_target_coordinator(&mut self, target: CoordinatorTarget, coordinator: Option<i64>) {
        match target {
            CoordinatorTarget::Class(class) => {
                if let Ok(record) = self.state.class_mut(class) {
                    record.class_coordinator = coordinator;
                    let record: Class = record.clone();
                    self.update(Record::Class(record));
                }
            }
            CoordinatorTarget::Division(division) => {
                if let Ok(record) = self.state.division_mut(division) {
                    record.class_coordinator = coordinator;
                    let record: Division = record.clone();
                    self.update(Record::Division(record));
                }
            }
        }
    }

    /// Clears the faculty side of a link whose target is being deleted.
    fn release_faculty(&mut self, faculty: i64, target: CoordinatorTarget) {
        let linked: Option<&mut Faculty> = self
            .state
            .faculty_mut(faculty)
            .ok()
            .filter(|record| record.coordinator_for == Some(target));
        if let Some(record) = linked {
            record.coordinator_for = None;
            self.touched_faculty.insert(faculty);
        }
    }
}
