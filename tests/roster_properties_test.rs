use anyhow::Result;
use student_roster::{
    Address, QueryEngine, Rejection, RosterError, RosterStore, ScoreUpdate, StudentRecord, Variant,
};

fn undergraduate(id: &str, name: &str, class_name: &str) -> Result<StudentRecord> {
    Ok(StudentRecord::undergraduate(
        id,
        name,
        20,
        class_name,
        Address::new("Guangdong", "Shenzhen", "Nanshan", "1"),
        "Software Engineering",
    )?)
}

fn ids(records: &[StudentRecord]) -> Vec<String> {
    records.iter().map(|r| r.id().to_string()).collect()
}

/// 建構子回傳去除空白後的值，空白必填欄位一律拒絕
#[test]
fn test_constructor_round_trips_values() -> Result<()> {
    let record = StudentRecord::graduate(
        "G24001",
        " Wang Wu ",
        24,
        "CS-G24",
        Address::new("Shanghai", "Pudong", "Century Ave", "2001"),
        "Prof. Zhao",
        "Artificial Intelligence",
    )?;

    assert_eq!(record.id(), "G24001");
    assert_eq!(record.name(), "Wang Wu");
    assert_eq!(record.age(), 24);
    assert_eq!(record.class_name(), "CS-G24");
    assert_eq!(record.address().city(), Some("Pudong"));
    assert_eq!(record.supervisor(), Some("Prof. Zhao"));
    assert_eq!(record.research_direction(), Some("Artificial Intelligence"));

    let blank = StudentRecord::undergraduate("U1", "A", 20, "   ", Address::default(), "M");
    assert!(matches!(blank, Err(RosterError::InvalidArgument { .. })));
    Ok(())
}

#[test]
fn test_duplicate_add_keeps_single_record() -> Result<()> {
    let mut store = RosterStore::new();
    assert!(store.add(undergraduate("U1", "Sanjay", "CS-1")?).is_ok());
    assert!(matches!(
        store.add(undergraduate("U1", "Li", "EE-1")?),
        Err(Rejection::DuplicateId(_))
    ));
    assert_eq!(store.len(), 1);
    Ok(())
}

#[test]
fn test_modify_with_id_change_moves_record_to_end() -> Result<()> {
    let mut store = RosterStore::new();
    store.add(undergraduate("U1", "Sanjay", "CS-1")?)?;
    store.add(undergraduate("U3", "Li", "EE-1")?)?;

    store.modify("U1", undergraduate("U2", "Sanjay K", "CS-1")?)?;

    assert!(store.find_by_id("U1").is_none());
    assert_eq!(store.find_by_id("U2").map(|r| r.name()), Some("Sanjay K"));
    assert_eq!(ids(&store.all_records()), vec!["U3", "U2"]);
    Ok(())
}

#[test]
fn test_modify_in_place_keeps_position() -> Result<()> {
    let mut store = RosterStore::new();
    store.add(undergraduate("U1", "Sanjay", "CS-1")?)?;
    store.add(undergraduate("U3", "Li", "EE-1")?)?;

    store.modify("U1", undergraduate("U1", "Sanjay", "CS-9")?)?;

    assert_eq!(ids(&store.all_records()), vec!["U1", "U3"]);
    assert_eq!(store.find_by_id("U1").map(|r| r.class_name()), Some("CS-9"));
    Ok(())
}

#[test]
fn test_sort_by_unknown_course_is_rejected_without_mutation() -> Result<()> {
    let mut store = RosterStore::new();
    let mut record = undergraduate("U1", "Sanjay", "CS-1")?;
    assert_eq!(record.add_or_update_score("Java", 80.0), ScoreUpdate::Added);
    store.add(record)?;

    let before = ids(&store.all_records());
    let result = QueryEngine::new(&store).sort_by("course:Nonexistent", true);

    assert_eq!(result, Err(Rejection::UnknownCourse("Nonexistent".to_string())));
    assert_eq!(ids(&store.all_records()), before);
    Ok(())
}

#[test]
fn test_total_score_sort_directions_are_reverses() -> Result<()> {
    let mut store = RosterStore::new();
    for (id, java, rust) in [("U1", 80.0, 70.0), ("U2", 95.0, 90.0), ("U3", 60.0, 99.0), ("U4", 10.0, 0.0)] {
        let mut record = undergraduate(id, "N", "C")?;
        assert!(!record.add_or_update_score("Java", java).is_rejected());
        assert!(!record.add_or_update_score("Rust", rust).is_rejected());
        store.add(record)?;
    }

    let engine = QueryEngine::new(&store);
    let descending = ids(&engine.sort_by("totalScore", false)?);
    let mut ascending = ids(&engine.sort_by("totalScore", true)?);
    ascending.reverse();

    assert_eq!(descending, ascending);
    assert_eq!(descending, vec!["U2", "U3", "U1", "U4"]);
    Ok(())
}

#[test]
fn test_rejected_scores_leave_map_unchanged() -> Result<()> {
    let mut record = undergraduate("U1", "Sanjay", "CS-1")?;
    assert!(record.add_or_update_score("Java", 150.0).is_rejected());
    assert!(record.add_or_update_score("", 50.0).is_rejected());
    assert!(record.scores().is_empty());
    Ok(())
}

#[test]
fn test_name_search_matches_substrings_in_store_order() -> Result<()> {
    let mut store = RosterStore::new();
    store.add(undergraduate("U1", "Sanjay", "CS-1")?)?;
    store.add(undergraduate("U2", "Li", "CS-1")?)?;
    store.add(undergraduate("U3", "Susan", "CS-2")?)?;

    let results = QueryEngine::new(&store).search("san", "name");
    assert_eq!(ids(&results), vec!["U1", "U3"]);
    Ok(())
}

#[test]
fn test_all_records_snapshot_is_detached() -> Result<()> {
    let mut store = RosterStore::new();
    store.add(undergraduate("U1", "Sanjay", "CS-1")?)?;
    store.add(undergraduate("U2", "Li", "CS-1")?)?;

    let mut snapshot = store.all_records();
    snapshot.pop();
    snapshot[0].set_name("Changed")?;

    let fresh = store.all_records();
    assert_eq!(fresh.len(), 2);
    assert_eq!(fresh[0].name(), "Sanjay");
    Ok(())
}

#[test]
fn test_counts_and_filters_agree() -> Result<()> {
    let mut store = RosterStore::new();
    store.add(undergraduate("U1", "Sanjay", "CS-1")?)?;
    store.add(StudentRecord::graduate(
        "G1",
        "Li",
        26,
        "CS-G",
        Address::default(),
        "Prof",
        "Systems",
    )?)?;

    let counts = store.count_by_variant();
    let engine = QueryEngine::new(&store);
    assert_eq!(counts.total, 2);
    assert_eq!(counts.undergraduate, engine.filter_by_variant(Variant::Undergraduate).len());
    assert_eq!(counts.graduate, engine.filter_by_variant(Variant::Graduate).len());
    Ok(())
}
