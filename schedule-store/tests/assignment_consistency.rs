use schedule_store::{ErrorCode, ShiftAssignmentStore};
use shared::models::{
    MerchantIdentity, ScheduleSummary, ShiftId, ShiftInput, ShiftPreset, StaffId, StaffInput,
};

fn new_store() -> ShiftAssignmentStore {
    let key = MerchantIdentity::with_id("merchant-1").storage_key().unwrap();
    ShiftAssignmentStore::new(key)
}

fn add_staff(store: &mut ShiftAssignmentStore, name: &str) -> StaffId {
    store
        .upsert_staff(StaffInput::new(name, "外場"), None)
        .unwrap()
        .id
}

fn add_shift(
    store: &mut ShiftAssignmentStore,
    date: &str,
    needed: u32,
    assigned: Vec<StaffId>,
) -> ShiftId {
    let mut input = ShiftInput::with_preset(ShiftPreset::Morning);
    input.date = date.into();
    input.role = "外場服務".into();
    input.staff_needed = needed;
    input.assigned_staff_ids = assigned;
    store.upsert_shift(input, None).unwrap().id
}

#[test]
fn summary_follows_staff_deletion() {
    let mut store = new_store();
    let a = add_staff(&mut store, "A");
    let _b = add_staff(&mut store, "B");
    let shift = add_shift(&mut store, "2025-11-21", 2, vec![a]);

    assert_eq!(store.summary(), ScheduleSummary {
        total_needed: 2,
        total_assigned: 1,
        shortage: 1,
    });

    store.delete_staff(a);

    assert!(store.shift(shift).unwrap().assigned_staff_ids.is_empty());
    assert_eq!(store.summary(), ScheduleSummary {
        total_needed: 2,
        total_assigned: 0,
        shortage: 2,
    });
}

#[test]
fn over_assignment_clamps_shortage_to_zero() {
    let mut store = new_store();
    let ids: Vec<_> = ["A", "B", "C"]
        .into_iter()
        .map(|n| add_staff(&mut store, n))
        .collect();
    add_shift(&mut store, "2025-11-21", 1, ids);

    let summary = store.summary();
    assert_eq!(summary.total_assigned, 3);
    assert_eq!(summary.shortage, 0);
}

#[test]
fn empty_date_is_rejected_without_mutation() {
    let mut store = new_store();
    add_staff(&mut store, "A");
    let before = store.serialize();

    let mut input = ShiftInput::default();
    input.role = "x".into();
    let err = store.upsert_shift(input, None).unwrap_err();

    assert_eq!(err.code, ErrorCode::RequiredField);
    assert!(err.is_validation());
    assert_eq!(store.serialize(), before);
}

#[test]
fn deleted_staff_never_remains_assigned() {
    let mut store = new_store();
    let staff: Vec<_> = (0..5)
        .map(|i| add_staff(&mut store, &format!("S{i}")))
        .collect();
    add_shift(&mut store, "2025-11-21", 3, staff[0..3].to_vec());
    add_shift(&mut store, "2025-11-22", 2, staff[2..5].to_vec());
    add_shift(&mut store, "2025-11-23", 2, vec![staff[2], staff[4]]);

    for &id in &[staff[2], staff[4]] {
        store.delete_staff(id);
        assert!(
            store
                .shifts()
                .iter()
                .all(|s| !s.assigned_staff_ids.contains(&id))
        );
    }
    assert_eq!(store.summary().total_assigned, 3);
}

#[test]
fn assignable_staff_keeps_own_assignees_and_hides_others() {
    let mut store = new_store();
    let a = add_staff(&mut store, "A");
    let b = add_staff(&mut store, "B");
    let c = add_staff(&mut store, "C");
    let s = add_shift(&mut store, "2025-11-21", 2, vec![a]);
    let t = add_shift(&mut store, "2025-11-21", 2, vec![b]);

    for (shift, own, foreign) in [(s, a, b), (t, b, a)] {
        let assignable: Vec<StaffId> = store
            .assignable_staff_for(Some(shift))
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert!(assignable.contains(&own));
        assert!(!assignable.contains(&foreign));
        assert!(assignable.contains(&c));
    }
}

#[test]
fn shared_staff_stays_visible_on_every_shift_holding_it() {
    let mut store = new_store();
    let a = add_staff(&mut store, "A");
    let s = add_shift(&mut store, "2025-11-21", 1, vec![a]);
    let t = add_shift(&mut store, "2025-11-21", 1, vec![a]);

    for shift in [s, t] {
        let visible = store.assignable_staff_for(Some(shift));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, a);
    }
    assert!(store.assignable_staff_for(None).is_empty());
}

#[test]
fn edit_flow_through_the_session() {
    let mut store = new_store();
    let a = add_staff(&mut store, "A");
    let b = add_staff(&mut store, "B");
    let s = add_shift(&mut store, "2025-11-21", 2, vec![a]);
    add_shift(&mut store, "2025-11-22", 1, vec![b]);

    let mut form = store.begin_shift_edit(s).unwrap();
    let choices: Vec<StaffId> = store
        .assignable_staff_for_session()
        .into_iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(choices, vec![a]);

    form.set_preset(ShiftPreset::Noon);
    let editing = store.editing().shift;
    let updated = store.upsert_shift(form, editing).unwrap();
    assert_eq!(updated.id, s);
    assert_eq!(updated.display_name(), "午班 (12:00 - 17:00)");
    assert!(store.editing().shift.is_none());

    store.begin_shift_edit(s).unwrap();
    let outcome = store.delete_shift(s);
    assert!(outcome.edit_reset);
}
