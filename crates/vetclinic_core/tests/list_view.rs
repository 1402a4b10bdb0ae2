mod support;

use support::service;
use vetclinic_core::db::open_db_in_memory;
use vetclinic_core::model::kennel::{Kennel, KennelDraft};
use vetclinic_core::{
    Confirmation, DeleteOutcome, LifecycleError, ListView, RecordStore, SaveOutcome, Selection,
};

#[test]
fn created_rows_appear_and_form_clears() {
    let conn = open_db_in_memory().unwrap();
    let mut view = ListView::load(service::<Kennel>(&conn, 1)).unwrap();
    assert!(view.rows().is_empty());

    *view.form_mut() = support::kennel("Boarding Kennel", "12", "Vacant");
    let id = view.create().unwrap();

    assert_eq!(view.rows().len(), 1);
    assert_eq!(view.rows()[0].id, id);
    assert!(view.selection().is_idle());
    assert_eq!(view.form(), &KennelDraft::default());
}

#[test]
fn click_populates_form_and_second_click_clears() {
    let conn = open_db_in_memory().unwrap();
    let mut view = ListView::load(service::<Kennel>(&conn, 2)).unwrap();
    *view.form_mut() = support::kennel("Training Kennel", "3", "In Training");
    let id = view.create().unwrap();

    view.click(&id);
    assert_eq!(view.selection(), &Selection::Selected(id.clone()));
    assert_eq!(view.form(), &support::kennel("Training Kennel", "3", "In Training"));

    view.click(&id);
    assert!(view.selection().is_idle());
    assert_eq!(view.form(), &KennelDraft::default());
}

#[test]
fn switching_rows_repopulates_without_clearing() {
    let conn = open_db_in_memory().unwrap();
    let mut view = ListView::load(service::<Kennel>(&conn, 3)).unwrap();
    *view.form_mut() = support::kennel("Daycare Kennel", "4", "Occupied");
    let first = view.create().unwrap();
    *view.form_mut() = support::kennel("Private Kennel", "1", "Reserved");
    let second = view.create().unwrap();

    view.click(&first);
    view.activate(&second);
    assert_eq!(view.selection(), &Selection::Selected(second.clone()));
    assert_eq!(view.form().name, "Private Kennel");

    view.activate(&second);
    assert_eq!(view.selection(), &Selection::Selected(second));
}

#[test]
fn save_updates_cached_row() {
    let conn = open_db_in_memory().unwrap();
    let mut view = ListView::load(service::<Kennel>(&conn, 4)).unwrap();
    *view.form_mut() = support::kennel("Rescue/Shelter Kennel", "8", "Vacant");
    let id = view.create().unwrap();

    view.click(&id);
    view.form_mut().capacity = "10".to_string();
    let outcome = view.save().unwrap();

    assert!(matches!(outcome, SaveOutcome::Updated(_)));
    assert_eq!(view.rows()[0].fields.capacity, 10);
    assert_eq!(view.form().capacity, "10");

    assert_eq!(view.save().unwrap(), SaveOutcome::Unchanged);
}

#[test]
fn failed_save_keeps_cache_and_form() {
    let conn = open_db_in_memory().unwrap();
    let mut view = ListView::load(service::<Kennel>(&conn, 5)).unwrap();
    *view.form_mut() = support::kennel("Veterinary Kennel", "2", "Vacant");
    let id = view.create().unwrap();

    view.click(&id);
    view.form_mut().capacity = "two".to_string();
    let err = view.save().unwrap_err();

    assert!(matches!(err, LifecycleError::Validation(_)));
    assert_eq!(view.rows()[0].fields.capacity, 2);
    assert_eq!(view.form().capacity, "two");
    assert_eq!(view.selection(), &Selection::Selected(id));
}

#[test]
fn delete_removes_row_and_returns_to_idle() {
    let conn = open_db_in_memory().unwrap();
    let mut view = ListView::load(service::<Kennel>(&conn, 6)).unwrap();
    *view.form_mut() = support::kennel("Breed-specific Kennel", "5", "Quarantine");
    let id = view.create().unwrap();
    view.click(&id);

    assert_eq!(
        view.delete(Confirmation::Declined).unwrap(),
        DeleteOutcome::Cancelled
    );
    assert_eq!(view.rows().len(), 1);
    assert!(!view.selection().is_idle());

    assert_eq!(
        view.delete(Confirmation::Confirmed).unwrap(),
        DeleteOutcome::Deleted(id)
    );
    assert!(view.rows().is_empty());
    assert!(view.selection().is_idle());
    assert_eq!(view.service().store().count().unwrap(), 0);
}

#[test]
fn refresh_drops_selection_of_vanished_row() {
    let conn = open_db_in_memory().unwrap();
    let mut view = ListView::load(service::<Kennel>(&conn, 7)).unwrap();
    *view.form_mut() = support::kennel("Boarding Kennel", "6", "Occupied");
    let id = view.create().unwrap();
    view.click(&id);

    conn.execute("DELETE FROM kennels;", []).unwrap();
    view.refresh().unwrap();

    assert!(view.rows().is_empty());
    assert!(view.selection().is_idle());
    assert_eq!(view.form(), &KennelDraft::default());
}
