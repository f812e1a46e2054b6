use crate::domain::model::{
    Address, ScoreUpdate, StudentKind, StudentRecord, MAX_AGE, MIN_AGE,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, RosterError};
use crate::utils::validation::{validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub students: Vec<SeedStudent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShellConfig {
    pub seed_demo_data: Option<bool>,
    pub pause_after_action: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedKind {
    Undergraduate,
    Graduate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddressEntry {
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub house_number: String,
}

/// 設定檔中的一筆初始學生
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedStudent {
    pub kind: SeedKind,
    pub id: String,
    pub name: String,
    pub age: u32,
    pub class_name: String,
    #[serde(default)]
    pub address: AddressEntry,
    pub major: Option<String>,
    pub supervisor: Option<String>,
    pub research_direction: Option<String>,
    #[serde(default)]
    pub scores: BTreeMap<String, f64>,
}

impl SeedStudent {
    /// 經由驗證建構子產生記錄；年齡套用與選單相同的範圍，無效成績視為錯誤而非警告
    pub fn to_record(&self) -> Result<StudentRecord> {
        validate_range(
            &format!("students.{}.age", self.id),
            self.age,
            MIN_AGE,
            MAX_AGE,
        )?;

        let kind = match self.kind {
            SeedKind::Undergraduate => {
                StudentKind::undergraduate(self.major.as_deref().unwrap_or_default())?
            }
            SeedKind::Graduate => StudentKind::graduate(
                self.supervisor.as_deref().unwrap_or_default(),
                self.research_direction.as_deref().unwrap_or_default(),
            )?,
        };

        let address = Address::new(
            &self.address.province,
            &self.address.city,
            &self.address.street,
            &self.address.house_number,
        );

        let mut record =
            StudentRecord::new(&self.id, &self.name, self.age, &self.class_name, address, kind)?;

        for (course, score) in &self.scores {
            if let ScoreUpdate::Rejected(warning) = record.add_or_update_score(course, *score) {
                return Err(RosterError::InvalidConfigValueError {
                    field: format!("students.{}.scores", self.id),
                    value: format!("{} = {}", course, score),
                    reason: warning.to_string(),
                });
            }
        }

        Ok(record)
    }
}

impl RosterConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RosterError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ROSTER_CLASS})；未設定的變數視為配置錯誤
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RosterError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let mut missing = Vec::new();
        let result = re
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| {
                    missing.push(var_name.to_string());
                    caps[0].to_string()
                })
            })
            .into_owned();

        if let Some(var_name) = missing.first() {
            return Err(RosterError::ConfigValidationError {
                field: format!("${{{}}}", var_name),
                message: format!("Environment variable `{}` is not set", var_name),
            });
        }

        Ok(result)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for student in &self.students {
            let record = student.to_record()?;
            if !seen.insert(record.id().to_string()) {
                return Err(RosterError::InvalidConfigValueError {
                    field: "students.id".to_string(),
                    value: record.id().to_string(),
                    reason: "Duplicate student id in seed data".to_string(),
                });
            }
        }
        Ok(())
    }
}

impl ConfigProvider for RosterConfig {
    fn seed_demo_data(&self) -> bool {
        self.shell.seed_demo_data.unwrap_or(true)
    }

    fn pause_after_action(&self) -> bool {
        self.shell.pause_after_action.unwrap_or(true)
    }

    fn seed_students(&self) -> Result<Vec<StudentRecord>> {
        self.students.iter().map(SeedStudent::to_record).collect()
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
