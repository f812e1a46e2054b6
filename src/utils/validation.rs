use crate::utils::error::{Result, RosterError};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 必填文字欄位，回傳去除前後空白後的值
pub fn require_text(field_name: &str, value: &str) -> Result<String> {
    validate_non_empty_string(field_name, value)?;
    Ok(value.trim().to_string())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RosterError::invalid_argument(
            field_name,
            format!("{} cannot be empty or whitespace-only", field_name),
        ));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(RosterError::invalid_argument(
            field_name,
            format!("{} must be at least {}, got {}", field_name, min_value, value),
        ));
    }
    Ok(())
}

/// 閉區間檢查；NaN 一律視為超出範圍
pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if !(min..=max).contains(&value) {
        return Err(RosterError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 設定檔路徑：不可為空、不含 NUL，副檔名須為 .toml
pub fn validate_config_path(field_name: &str, path: &str) -> Result<()> {
    let invalid = |reason: &str| RosterError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: path.to_string(),
        reason: reason.to_string(),
    };

    if path.trim().is_empty() {
        return Err(invalid("Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid("Path contains null bytes"));
    }

    let is_toml = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if !is_toml {
        return Err(invalid("Roster configuration must be a .toml file"));
    }

    Ok(())
}
