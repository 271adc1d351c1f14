//! 排班存放區
//!
//! [`ShiftAssignmentStore`] owns the shifts and staff of one merchant and
//! keeps the two collections consistent:
//!
//! - an assigned staff id must name an existing staff record when it is
//!   written, and deleting a staff record removes its id from every shift
//! - a staff member may sit on several shifts; while a shift is edited,
//!   [`ShiftAssignmentStore::assignable_staff_for`] hides staff that other
//!   shifts already hold, but never the shift's own assignees
//! - `staff_needed` is independent of the number of assignees
//! - ids come from a monotonic [`IdSource`] and are never reused
//!
//! Everything here is synchronous and in-memory. Loading and saving the
//! document lives in [`super::session`].

use std::collections::HashSet;

use shared::models::{
    ScheduleDocument, ScheduleSummary, Shift, ShiftId, ShiftInput, Staff, StaffId, StaffInput,
    StorageKey, TimeOfDay,
};
use shared::util::IdSource;
use shared::{AppError, AppResult, ErrorCode};

use crate::utils::validation::{
    MAX_DATE_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};

/// Records currently open in the add/edit forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EditSession {
    pub shift: Option<ShiftId>,
    pub staff: Option<StaffId>,
}

/// Result of a delete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeleteOutcome {
    /// A record with that id existed and was removed
    pub removed: bool,
    /// The deleted record was being edited; the form must be reset
    pub edit_reset: bool,
}

/// Shifts and staff of one merchant
#[derive(Debug)]
pub struct ShiftAssignmentStore {
    key: StorageKey,
    shifts: Vec<Shift>,
    staff: Vec<Staff>,
    ids: IdSource,
    editing: EditSession,
}

impl ShiftAssignmentStore {
    pub fn new(key: StorageKey) -> Self {
        Self {
            key,
            shifts: Vec::new(),
            staff: Vec::new(),
            ids: IdSource::new(),
            editing: EditSession::default(),
        }
    }

    /// Store over an already parsed document; fails on ids that collide
    /// or leave no room for new records
    pub fn from_document(key: StorageKey, document: ScheduleDocument) -> AppResult<Self> {
        let mut store = Self::new(key);
        store.replace_collections(document)?;
        Ok(store)
    }

    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub fn staff(&self) -> &[Staff] {
        &self.staff
    }

    pub fn shift(&self, id: ShiftId) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.id == id)
    }

    pub fn staff_member(&self, id: StaffId) -> Option<&Staff> {
        self.staff.iter().find(|m| m.id == id)
    }

    pub fn has_staff(&self, id: StaffId) -> bool {
        self.staff.iter().any(|m| m.id == id)
    }

    pub fn editing(&self) -> EditSession {
        self.editing
    }

    // ========== Shifts ==========

    /// Create a shift, or replace the fields of `editing_id` when it exists.
    ///
    /// Nothing changes when validation fails.
    pub fn upsert_shift(
        &mut self,
        input: ShiftInput,
        editing_id: Option<ShiftId>,
    ) -> AppResult<Shift> {
        let assigned = self.validate_shift_input(&input)?;

        let shift = match editing_id.and_then(|id| self.shifts.iter().position(|s| s.id == id)) {
            Some(index) => {
                let shift = build_shift(self.shifts[index].id, input, assigned);
                self.shifts[index] = shift.clone();
                tracing::debug!(shift_id = shift.id, "Shift updated");
                shift
            }
            None => {
                let shift = build_shift(self.ids.next_id()?, input, assigned);
                self.shifts.push(shift.clone());
                tracing::debug!(shift_id = shift.id, date = %shift.date, "Shift created");
                shift
            }
        };

        if editing_id.is_some() && self.editing.shift == editing_id {
            self.editing.shift = None;
        }
        Ok(shift)
    }

    /// Returns the collapsed assignee list (first occurrence wins)
    fn validate_shift_input(&self, input: &ShiftInput) -> AppResult<Vec<StaffId>> {
        validate_required_text(&input.date, "date", MAX_DATE_LEN)?;
        validate_required_text(&input.role, "role", MAX_NAME_LEN)?;

        if input.staff_needed == 0 {
            return Err(AppError::out_of_range(
                "staffNeeded",
                "staffNeeded must be at least 1",
            ));
        }
        for (field, time) in [("start", input.start), ("end", input.end)] {
            if TimeOfDay::new(time.hour, time.minute).is_none() {
                return Err(AppError::out_of_range(
                    field,
                    format!(
                        "{field} time {}:{} is out of range (00:00-23:59)",
                        time.hour, time.minute
                    ),
                ));
            }
        }

        let mut seen = HashSet::new();
        let mut assigned = Vec::with_capacity(input.assigned_staff_ids.len());
        for &id in &input.assigned_staff_ids {
            if !self.has_staff(id) {
                return Err(AppError::with_message(
                    ErrorCode::UnknownStaffReference,
                    format!("Staff {id} does not exist"),
                )
                .with_detail("staffId", id));
            }
            if seen.insert(id) {
                assigned.push(id);
            }
        }
        Ok(assigned)
    }

    pub fn delete_shift(&mut self, id: ShiftId) -> DeleteOutcome {
        let before = self.shifts.len();
        self.shifts.retain(|s| s.id != id);
        let removed = self.shifts.len() != before;

        let edit_reset = self.editing.shift == Some(id);
        if edit_reset {
            self.editing.shift = None;
        }
        if removed {
            tracing::info!(shift_id = id, "Shift deleted");
        }
        DeleteOutcome {
            removed,
            edit_reset,
        }
    }

    // ========== Staff ==========

    /// Create a staff record, or replace the fields of `editing_id` when it exists.
    pub fn upsert_staff(
        &mut self,
        input: StaffInput,
        editing_id: Option<StaffId>,
    ) -> AppResult<Staff> {
        validate_required_text(&input.name, "name", MAX_NAME_LEN)?;
        validate_required_text(&input.role, "role", MAX_NAME_LEN)?;
        validate_optional_text(&input.status, "status", MAX_NOTE_LEN)?;

        let status = input.status.filter(|s| !s.trim().is_empty());
        let member = match editing_id.and_then(|id| self.staff.iter().position(|m| m.id == id)) {
            Some(index) => {
                let member = &mut self.staff[index];
                member.name = input.name;
                member.role = input.role;
                member.status = status;
                tracing::debug!(staff_id = member.id, "Staff updated");
                member.clone()
            }
            None => {
                let member = Staff {
                    id: self.ids.next_id()?,
                    name: input.name,
                    role: input.role,
                    status,
                };
                self.staff.push(member.clone());
                tracing::debug!(staff_id = member.id, "Staff created");
                member
            }
        };

        if editing_id.is_some() && self.editing.staff == editing_id {
            self.editing.staff = None;
        }
        Ok(member)
    }

    /// Remove a staff record and unassign it from every shift.
    pub fn delete_staff(&mut self, id: StaffId) -> DeleteOutcome {
        let before = self.staff.len();
        self.staff.retain(|m| m.id != id);
        let removed = self.staff.len() != before;

        let mut unassigned = 0usize;
        for shift in &mut self.shifts {
            let len = shift.assigned_staff_ids.len();
            shift.assigned_staff_ids.retain(|&staff_id| staff_id != id);
            unassigned += len - shift.assigned_staff_ids.len();
        }

        let edit_reset = self.editing.staff == Some(id);
        if edit_reset {
            self.editing.staff = None;
        }
        if removed {
            tracing::info!(staff_id = id, unassigned, "Staff deleted");
        }
        DeleteOutcome {
            removed,
            edit_reset,
        }
    }

    // ========== Edit session ==========

    /// Open a shift in the form; `None` if it does not exist
    pub fn begin_shift_edit(&mut self, id: ShiftId) -> Option<ShiftInput> {
        let input = self.shift(id).map(ShiftInput::from)?;
        self.editing.shift = Some(id);
        Some(input)
    }

    pub fn cancel_shift_edit(&mut self) {
        self.editing.shift = None;
    }

    /// Open a staff record in the form; `None` if it does not exist
    pub fn begin_staff_edit(&mut self, id: StaffId) -> Option<StaffInput> {
        let input = self.staff_member(id).map(StaffInput::from)?;
        self.editing.staff = Some(id);
        Some(input)
    }

    pub fn cancel_staff_edit(&mut self) {
        self.editing.staff = None;
    }

    // ========== Queries ==========

    /// Staff ids assigned to any shift other than `editing_shift_id`
    pub fn assigned_elsewhere(&self, editing_shift_id: Option<ShiftId>) -> HashSet<StaffId> {
        self.shifts
            .iter()
            .filter(|s| Some(s.id) != editing_shift_id)
            .flat_map(|s| s.assigned_staff_ids.iter().copied())
            .collect()
    }

    /// Staff selectable for the shift being edited: everyone not held by
    /// another shift, plus the shift's own current assignees.
    pub fn assignable_staff_for(&self, editing_shift_id: Option<ShiftId>) -> Vec<&Staff> {
        let taken = self.assigned_elsewhere(editing_shift_id);
        let own = editing_shift_id
            .and_then(|id| self.shift(id))
            .map(|s| s.assigned_staff_ids.as_slice())
            .unwrap_or_default();

        self.staff
            .iter()
            .filter(|m| !taken.contains(&m.id) || own.contains(&m.id))
            .collect()
    }

    pub fn assignable_staff_for_session(&self) -> Vec<&Staff> {
        self.assignable_staff_for(self.editing.shift)
    }

    /// Names of the shift's assignees, skipping ids with no staff record
    pub fn assignee_names<'a>(&'a self, shift: &'a Shift) -> impl Iterator<Item = &'a str> + 'a {
        shift
            .assigned_staff_ids
            .iter()
            .filter_map(|&id| self.staff_member(id))
            .map(|m| m.name.as_str())
            .filter(|name| !name.is_empty())
    }

    pub fn summary(&self) -> ScheduleSummary {
        let staff_ids: HashSet<StaffId> = self.staff.iter().map(|m| m.id).collect();

        let (needed, assigned) = self.shifts.iter().fold((0u32, 0u32), |(needed, assigned), s| {
            let live = s
                .assigned_staff_ids
                .iter()
                .filter(|id| staff_ids.contains(id))
                .count() as u32;
            (
                needed.saturating_add(s.staff_needed),
                assigned.saturating_add(live),
            )
        });
        ScheduleSummary::new(needed, assigned)
    }

    // ========== Document ==========

    /// Snapshot of both collections as the persisted document
    pub fn serialize(&self) -> ScheduleDocument {
        ScheduleDocument {
            shifts: self.shifts.clone(),
            staff: self.staff.clone(),
        }
    }

    pub fn to_json(&self) -> AppResult<Vec<u8>> {
        serde_json::to_vec(&self.serialize())
            .map_err(|e| AppError::internal(format!("Failed to encode schedule: {e}")))
    }

    /// Replace both collections with a stored document.
    ///
    /// On malformed input, or ids that repeat within a collection or leave
    /// no room for new records, the collections are left empty and a
    /// `PersistenceParse` error is returned; the store stays usable.
    pub fn deserialize(&mut self, bytes: &[u8]) -> AppResult<()> {
        let result = serde_json::from_slice::<ScheduleDocument>(bytes)
            .map_err(|e| {
                AppError::persistence_parse(format!("Failed to parse stored schedule data: {e}"))
                    .with_detail("line", e.line())
                    .with_detail("column", e.column())
            })
            .and_then(|document| self.replace_collections(document));

        if result.is_err() {
            self.shifts.clear();
            self.staff.clear();
            self.editing = EditSession::default();
        }
        result
    }

    fn replace_collections(&mut self, document: ScheduleDocument) -> AppResult<()> {
        check_ids("shifts", document.shifts.iter().map(|s| s.id))?;
        check_ids("staff", document.staff.iter().map(|m| m.id))?;

        for id in document
            .shifts
            .iter()
            .map(|s| s.id)
            .chain(document.staff.iter().map(|m| m.id))
        {
            self.ids.observe(id);
        }
        self.shifts = document.shifts;
        self.staff = document.staff;
        self.editing = EditSession::default();
        Ok(())
    }
}

/// Ids within one collection must be distinct and below `i64::MAX`
fn check_ids(collection: &str, ids: impl Iterator<Item = i64>) -> AppResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(AppError::persistence_parse(format!(
                "Duplicate id {id} in stored {collection}"
            ))
            .with_detail("collection", collection)
            .with_detail("id", id));
        }
        if !IdSource::has_headroom(id) {
            return Err(AppError::persistence_parse(format!(
                "Stored {collection} id {id} leaves no room for new records"
            ))
            .with_detail("collection", collection)
            .with_detail("id", id));
        }
    }
    Ok(())
}

fn build_shift(id: ShiftId, input: ShiftInput, assigned: Vec<StaffId>) -> Shift {
    Shift {
        id,
        date: input.date,
        shift_type: input.shift_type,
        role: input.role,
        staff_needed: input.staff_needed,
        start_hour: input.start.hour,
        start_minute: input.start.minute,
        end_hour: input.end.hour,
        end_minute: input.end.minute,
        assigned_staff_ids: assigned,
        status: input.status,
    }
}
