use crate::utils::error::{Result, RosterError};
use crate::utils::validation::{require_text, validate_positive_number, validate_range};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// 輸入端（選單、設定檔）接受的年齡範圍；記錄本身只要求大於 0
pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 120;

/// 地址：各欄位皆可省略，空白視同未填
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    province: Option<String>,
    city: Option<String>,
    street: Option<String>,
    house_number: Option<String>,
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Address {
    pub fn new(province: &str, city: &str, street: &str, house_number: &str) -> Self {
        Self {
            province: optional_text(province),
            city: optional_text(city),
            street: optional_text(street),
            house_number: optional_text(house_number),
        }
    }

    pub fn province(&self) -> Option<&str> {
        self.province.as_deref()
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }

    pub fn house_number(&self) -> Option<&str> {
        self.house_number.as_deref()
    }
}

impl fmt::Display for Address {
    // 省→市→街道→門牌，不加分隔符
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in [&self.province, &self.city, &self.street, &self.house_number]
            .into_iter()
            .flatten()
        {
            f.write_str(part)?;
        }
        Ok(())
    }
}

/// 學生類型標籤，用於篩選與統計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Undergraduate,
    Graduate,
}

impl Variant {
    pub fn label(&self) -> &'static str {
        match self {
            Variant::Undergraduate => "本科生",
            Variant::Graduate => "研究生",
        }
    }
}

/// 各類型特有欄位
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentKind {
    Undergraduate {
        major: String,
    },
    Graduate {
        supervisor: String,
        research_direction: String,
    },
}

impl StudentKind {
    pub fn undergraduate(major: &str) -> Result<Self> {
        Ok(StudentKind::Undergraduate {
            major: require_text("major", major)?,
        })
    }

    pub fn graduate(supervisor: &str, research_direction: &str) -> Result<Self> {
        Ok(StudentKind::Graduate {
            supervisor: require_text("supervisor", supervisor)?,
            research_direction: require_text("research_direction", research_direction)?,
        })
    }

    pub fn variant(&self) -> Variant {
        match self {
            StudentKind::Undergraduate { .. } => Variant::Undergraduate,
            StudentKind::Graduate { .. } => Variant::Graduate,
        }
    }

    // 變體欄位是公開的，外部直接組出的值要重新驗證
    fn validated(self) -> Result<Self> {
        match self {
            StudentKind::Undergraduate { major } => Self::undergraduate(&major),
            StudentKind::Graduate {
                supervisor,
                research_direction,
            } => Self::graduate(&supervisor, &research_direction),
        }
    }
}

/// 成績新增/更新被拒絕的原因
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreWarning {
    #[error("course name is empty, score not recorded")]
    EmptyCourse,

    #[error("score {score} for course `{course}` is outside 0-100, score not recorded")]
    OutOfRange { course: String, score: f64 },
}

#[must_use]
#[derive(Debug, Clone, PartialEq)]
pub enum ScoreUpdate {
    Added,
    Updated { previous: f64 },
    Rejected(ScoreWarning),
}

impl ScoreUpdate {
    pub fn is_rejected(&self) -> bool {
        matches!(self, ScoreUpdate::Rejected(_))
    }

    pub fn warning(&self) -> Option<&ScoreWarning> {
        match self {
            ScoreUpdate::Rejected(warning) => Some(warning),
            _ => None,
        }
    }
}

/// 學生記錄。相等與雜湊只看學號。
#[derive(Debug, Clone)]
pub struct StudentRecord {
    id: String,
    name: String,
    age: u32,
    class_name: String,
    address: Address,
    scores: BTreeMap<String, f64>,
    kind: StudentKind,
}

impl StudentRecord {
    /// 建立記錄；任何欄位無效時回傳 `InvalidArgument`，不會產生半成品
    pub fn new(
        id: &str,
        name: &str,
        age: u32,
        class_name: &str,
        address: Address,
        kind: StudentKind,
    ) -> Result<Self> {
        let id = require_text("student_id", id)?;
        let name = require_text("name", name)?;
        validate_positive_number("age", age, 1)?;
        let class_name = require_text("class_name", class_name)?;
        let kind = kind.validated()?;

        Ok(Self {
            id,
            name,
            age,
            class_name,
            address,
            scores: BTreeMap::new(),
            kind,
        })
    }

    pub fn undergraduate(
        id: &str,
        name: &str,
        age: u32,
        class_name: &str,
        address: Address,
        major: &str,
    ) -> Result<Self> {
        let kind = StudentKind::undergraduate(major)?;
        Self::new(id, name, age, class_name, address, kind)
    }

    pub fn graduate(
        id: &str,
        name: &str,
        age: u32,
        class_name: &str,
        address: Address,
        supervisor: &str,
        research_direction: &str,
    ) -> Result<Self> {
        let kind = StudentKind::graduate(supervisor, research_direction)?;
        Self::new(id, name, age, class_name, address, kind)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn kind(&self) -> &StudentKind {
        &self.kind
    }

    pub fn variant(&self) -> Variant {
        self.kind.variant()
    }

    pub fn major(&self) -> Option<&str> {
        match &self.kind {
            StudentKind::Undergraduate { major } => Some(major),
            StudentKind::Graduate { .. } => None,
        }
    }

    pub fn supervisor(&self) -> Option<&str> {
        match &self.kind {
            StudentKind::Graduate { supervisor, .. } => Some(supervisor),
            StudentKind::Undergraduate { .. } => None,
        }
    }

    pub fn research_direction(&self) -> Option<&str> {
        match &self.kind {
            StudentKind::Graduate {
                research_direction, ..
            } => Some(research_direction),
            StudentKind::Undergraduate { .. } => None,
        }
    }

    pub fn set_id(&mut self, id: &str) -> Result<()> {
        self.id = require_text("student_id", id)?;
        Ok(())
    }

    pub fn set_name(&mut self, name: &str) -> Result<()> {
        self.name = require_text("name", name)?;
        Ok(())
    }

    pub fn set_age(&mut self, age: u32) -> Result<()> {
        validate_positive_number("age", age, 1)?;
        self.age = age;
        Ok(())
    }

    pub fn set_class_name(&mut self, class_name: &str) -> Result<()> {
        self.class_name = require_text("class_name", class_name)?;
        Ok(())
    }

    pub fn set_address(&mut self, address: Address) {
        self.address = address;
    }

    pub fn set_kind(&mut self, kind: StudentKind) -> Result<()> {
        self.kind = kind.validated()?;
        Ok(())
    }

    pub fn set_major(&mut self, value: &str) -> Result<()> {
        let value = require_text("major", value)?;
        match &mut self.kind {
            StudentKind::Undergraduate { major } => {
                *major = value;
                Ok(())
            }
            StudentKind::Graduate { .. } => Err(RosterError::invalid_argument(
                "major",
                "only undergraduates have a major",
            )),
        }
    }

    pub fn set_supervisor(&mut self, value: &str) -> Result<()> {
        let value = require_text("supervisor", value)?;
        match &mut self.kind {
            StudentKind::Graduate { supervisor, .. } => {
                *supervisor = value;
                Ok(())
            }
            StudentKind::Undergraduate { .. } => Err(RosterError::invalid_argument(
                "supervisor",
                "only graduates have a supervisor",
            )),
        }
    }

    pub fn set_research_direction(&mut self, value: &str) -> Result<()> {
        let value = require_text("research_direction", value)?;
        match &mut self.kind {
            StudentKind::Graduate {
                research_direction, ..
            } => {
                *research_direction = value;
                Ok(())
            }
            StudentKind::Undergraduate { .. } => Err(RosterError::invalid_argument(
                "research_direction",
                "only graduates have a research direction",
            )),
        }
    }

    pub fn scores(&self) -> &BTreeMap<String, f64> {
        &self.scores
    }

    /// 新增或覆寫課程成績。無效輸入不會改動記錄，而是以 `ScoreUpdate::Rejected` 回報。
    pub fn add_or_update_score(&mut self, course: &str, score: f64) -> ScoreUpdate {
        let course = course.trim();
        if course.is_empty() {
            return ScoreUpdate::Rejected(ScoreWarning::EmptyCourse);
        }
        if validate_range("score", score, MIN_SCORE, MAX_SCORE).is_err() {
            return ScoreUpdate::Rejected(ScoreWarning::OutOfRange {
                course: course.to_string(),
                score,
            });
        }

        match self.scores.insert(course.to_string(), score) {
            Some(previous) => ScoreUpdate::Updated { previous },
            None => ScoreUpdate::Added,
        }
    }

    /// 指定課程成績，沒有該課程時為 0.0
    pub fn score(&self, course: &str) -> f64 {
        self.scores.get(course).copied().unwrap_or(0.0)
    }

    pub fn has_course(&self, course: &str) -> bool {
        self.scores.contains_key(course)
    }

    pub fn total_score(&self) -> f64 {
        self.scores.values().sum()
    }

    /// 把另一筆記錄的成績複製進來，同名課程以對方為準
    pub fn merge_scores_from(&mut self, other: &StudentRecord) {
        for (course, score) in &other.scores {
            self.scores.insert(course.clone(), *score);
        }
    }
}

impl PartialEq for StudentRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StudentRecord {}

impl Hash for StudentRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StudentKind::Undergraduate { major } => {
                write!(f, "类型: 本科生, 专业: {}, ", major)?;
            }
            StudentKind::Graduate {
                supervisor,
                research_direction,
            } => {
                write!(
                    f,
                    "类型: 研究生, 导师: {}, 研究方向: {}, ",
                    supervisor, research_direction
                )?;
            }
        }

        let scores = if self.scores.is_empty() {
            "无".to_string()
        } else {
            self.scores
                .iter()
                .map(|(course, score)| format!("{}: {:.1}", course, score))
                .collect::<Vec<_>>()
                .join(", ")
        };

        write!(
            f,
            "学号: {}, 姓名: {}, 年龄: {}, 班级: {}, 地址: {}, 总分: {:.2}, 成绩: {{{}}}",
            self.id,
            self.name,
            self.age,
            self.class_name,
            self.address,
            self.total_score(),
            scores
        )
    }
}
