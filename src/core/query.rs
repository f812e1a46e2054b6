use crate::core::store::RosterStore;
use crate::domain::model::{StudentRecord, Variant};
use crate::utils::error::Rejection;
use std::cmp::Ordering;
use std::str::FromStr;

const COURSE_PREFIX: &str = "course:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Id,
    Name,
    Class,
}

impl FromStr for SearchField {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "id" => Ok(SearchField::Id),
            "name" => Ok(SearchField::Name),
            "class" => Ok(SearchField::Class),
            _ => Err(Rejection::UnknownSearchField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Id,
    TotalScore,
    /// 課程名已去除前後空白，比對時區分大小寫
    Course(String),
}

impl SortKey {
    pub fn description(&self) -> String {
        match self {
            SortKey::Id => "学号".to_string(),
            SortKey::TotalScore => "总成绩".to_string(),
            SortKey::Course(course) => format!("课程 '{}' 成绩", course),
        }
    }
}

impl FromStr for SortKey {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        let lower = key.to_lowercase();

        if lower == "id" {
            return Ok(SortKey::Id);
        }
        if lower == "totalscore" {
            return Ok(SortKey::TotalScore);
        }

        let has_prefix = key
            .get(..COURSE_PREFIX.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(COURSE_PREFIX));
        if has_prefix {
            let course = key[COURSE_PREFIX.len()..].trim();
            if course.is_empty() {
                return Err(Rejection::EmptyCourseName);
            }
            return Ok(SortKey::Course(course.to_string()));
        }

        Err(Rejection::UnknownSortKey(s.to_string()))
    }
}

/// 名冊上的唯讀查詢：篩選、搜尋、排序。結果皆為快照。
pub struct QueryEngine<'a> {
    store: &'a RosterStore,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a RosterStore) -> Self {
        Self { store }
    }

    pub fn filter_by_variant(&self, variant: Variant) -> Vec<StudentRecord> {
        self.store
            .iter()
            .filter(|record| record.variant() == variant)
            .cloned()
            .collect()
    }

    /// 以文字欄位名搜尋；空白條件或未知欄位回傳空結果
    pub fn search(&self, criteria: &str, field: &str) -> Vec<StudentRecord> {
        match field.parse::<SearchField>() {
            Ok(field) => self.search_field(criteria, field),
            Err(rejection) => {
                tracing::warn!("Search skipped: {}", rejection);
                Vec::new()
            }
        }
    }

    /// 學號為不分大小寫的完全比對；姓名與班級為不分大小寫的子字串比對
    pub fn search_field(&self, criteria: &str, field: SearchField) -> Vec<StudentRecord> {
        let needle = criteria.trim().to_lowercase();
        if needle.is_empty() {
            tracing::debug!("Search skipped: empty criteria");
            return Vec::new();
        }

        self.store
            .iter()
            .filter(|record| match field {
                SearchField::Id => record.id().to_lowercase() == needle,
                SearchField::Name => record.name().to_lowercase().contains(&needle),
                SearchField::Class => record.class_name().to_lowercase().contains(&needle),
            })
            .cloned()
            .collect()
    }

    pub fn sort_by(&self, key: &str, ascending: bool) -> Result<Vec<StudentRecord>, Rejection> {
        let key = key.parse::<SortKey>()?;
        self.sort_by_key(&key, ascending)
    }

    /// 穩定排序。降序是反轉比較器，相等者仍保留名冊原順序。
    ///
    /// 依課程排序時，若沒有任何記錄有該課程成績則拒絕，以免拼錯課程名時全部以 0 排序。
    pub fn sort_by_key(
        &self,
        key: &SortKey,
        ascending: bool,
    ) -> Result<Vec<StudentRecord>, Rejection> {
        if let SortKey::Course(course) = key {
            if !self.store.iter().any(|record| record.has_course(course)) {
                tracing::warn!("Sort rejected: no scores for course {}", course);
                return Err(Rejection::UnknownCourse(course.clone()));
            }
        }

        let compare = |a: &StudentRecord, b: &StudentRecord| -> Ordering {
            match key {
                SortKey::Id => a.id().cmp(b.id()),
                SortKey::TotalScore => total_score(a).total_cmp(&total_score(b)),
                SortKey::Course(course) => a.score(course).total_cmp(&b.score(course)),
            }
        };

        let mut records = self.store.all_records();
        if ascending {
            records.sort_by(compare);
        } else {
            records.sort_by(|a, b| compare(a, b).reverse());
        }
        Ok(records)
    }
}

/// 所有課程成績總和，沒有成績時為 0.0
pub fn total_score(record: &StudentRecord) -> f64 {
    record.total_score()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Address;

    fn record(id: &str, name: &str, class_name: &str, scores: &[(&str, f64)]) -> StudentRecord {
        let mut record =
            StudentRecord::undergraduate(id, name, 20, class_name, Address::default(), "SE")
                .unwrap();
        for (course, score) in scores {
            assert!(!record.add_or_update_score(course, *score).is_rejected());
        }
        record
    }

    fn ids(records: &[StudentRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_search_field_parsing() {
        assert_eq!("ID".parse::<SearchField>(), Ok(SearchField::Id));
        assert_eq!(" name ".parse::<SearchField>(), Ok(SearchField::Name));
        assert_eq!("class".parse::<SearchField>(), Ok(SearchField::Class));
        assert!("age".parse::<SearchField>().is_err());
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("id".parse::<SortKey>(), Ok(SortKey::Id));
        assert_eq!("totalScore".parse::<SortKey>(), Ok(SortKey::TotalScore));
        assert_eq!(
            "Course: Java ".parse::<SortKey>(),
            Ok(SortKey::Course("Java".to_string()))
        );
        assert_eq!("course:  ".parse::<SortKey>(), Err(Rejection::EmptyCourseName));
        assert_eq!(
            "age".parse::<SortKey>(),
            Err(Rejection::UnknownSortKey("age".to_string()))
        );
    }

    #[test]
    fn test_search_is_case_insensitive_and_ordered() {
        let mut store = RosterStore::new();
        store.add(record("U2", "Sanjay", "CS-1", &[])).unwrap();
        store.add(record("U1", "Li", "EE-2", &[])).unwrap();
        store.add(record("U3", "Hassan", "cs-2", &[])).unwrap();
        let engine = QueryEngine::new(&store);

        assert_eq!(ids(&engine.search("san", "name")), vec!["U2", "U3"]);
        assert_eq!(ids(&engine.search("CS", "class")), vec!["U2", "U3"]);
        assert_eq!(ids(&engine.search("u1", "id")), vec!["U1"]);
        // 學號不做子字串比對
        assert!(engine.search("U", "id").is_empty());
        assert!(engine.search("  ", "name").is_empty());
        assert!(engine.search("san", "major").is_empty());
    }

    #[test]
    fn test_filter_by_variant() {
        let mut store = RosterStore::new();
        store.add(record("U1", "A", "C", &[])).unwrap();
        store
            .add(StudentRecord::graduate("G1", "B", 25, "C", Address::default(), "S", "R").unwrap())
            .unwrap();
        store.add(record("U2", "C", "C", &[])).unwrap();
        let engine = QueryEngine::new(&store);

        assert_eq!(ids(&engine.filter_by_variant(Variant::Undergraduate)), vec!["U1", "U2"]);
        assert_eq!(ids(&engine.filter_by_variant(Variant::Graduate)), vec!["G1"]);
    }

    #[test]
    fn test_sort_by_id() {
        let mut store = RosterStore::new();
        store.add(record("U3", "A", "C", &[])).unwrap();
        store.add(record("U1", "B", "C", &[])).unwrap();
        store.add(record("U2", "C", "C", &[])).unwrap();
        let engine = QueryEngine::new(&store);

        assert_eq!(ids(&engine.sort_by("id", true).unwrap()), vec!["U1", "U2", "U3"]);
        assert_eq!(ids(&engine.sort_by("id", false).unwrap()), vec!["U3", "U2", "U1"]);
    }

    #[test]
    fn test_sort_ties_keep_store_order_in_both_directions() {
        let mut store = RosterStore::new();
        store.add(record("A", "a", "C", &[("Java", 80.0)])).unwrap();
        store.add(record("B", "b", "C", &[("Java", 90.0)])).unwrap();
        store.add(record("C", "c", "C", &[("Java", 80.0)])).unwrap();
        let engine = QueryEngine::new(&store);

        assert_eq!(ids(&engine.sort_by("course:Java", true).unwrap()), vec!["A", "C", "B"]);
        assert_eq!(ids(&engine.sort_by("course:Java", false).unwrap()), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_sort_by_course_defaults_missing_to_zero() {
        let mut store = RosterStore::new();
        store.add(record("A", "a", "C", &[("Java", 60.0)])).unwrap();
        store.add(record("B", "b", "C", &[("Rust", 99.0)])).unwrap();
        let engine = QueryEngine::new(&store);

        assert_eq!(ids(&engine.sort_by("course:Java", true).unwrap()), vec!["B", "A"]);
    }

    #[test]
    fn test_sort_by_unknown_course_is_rejected() {
        let mut store = RosterStore::new();
        store.add(record("A", "a", "C", &[("Java", 60.0)])).unwrap();
        let engine = QueryEngine::new(&store);

        assert_eq!(
            engine.sort_by("course:java", true),
            Err(Rejection::UnknownCourse("java".to_string()))
        );

        let empty = RosterStore::new();
        assert!(QueryEngine::new(&empty).sort_by("course:Java", true).is_err());
        assert_eq!(QueryEngine::new(&empty).sort_by("id", true), Ok(Vec::new()));
    }

    #[test]
    fn test_total_score() {
        assert_eq!(total_score(&record("A", "a", "C", &[])), 0.0);
        assert_eq!(
            total_score(&record("A", "a", "C", &[("Java", 60.5), ("Rust", 30.0)])),
            90.5
        );
    }
}
