use crate::domain::model::{StudentRecord, Variant};
use crate::utils::error::Rejection;
use std::collections::HashMap;

// 刪除留下的空槽超過此數且多於存活記錄時才壓縮
const COMPACT_THRESHOLD: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RosterCounts {
    pub total: usize,
    pub undergraduate: usize,
    /// 總數減本科生數，而非逐一計數
    pub graduate: usize,
}

/// 以學號為鍵的學生名冊，迭代順序即插入順序。
///
/// 記錄存放在 `slots` 中，`index` 把學號映射到槽位；刪除只留下空槽，
/// 所以查找、新增、刪除都是平均 O(1)。
#[derive(Debug, Default)]
pub struct RosterStore {
    slots: Vec<Option<StudentRecord>>,
    index: HashMap<String, usize>,
}

impl RosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn add(&mut self, record: StudentRecord) -> Result<(), Rejection> {
        if self.index.contains_key(record.id()) {
            tracing::warn!("Rejected add: id {} already exists", record.id());
            return Err(Rejection::DuplicateId(record.id().to_string()));
        }

        tracing::debug!("Adding student {} ({})", record.id(), record.name());
        self.push(record);
        Ok(())
    }

    pub fn find_by_id(&self, id: &str) -> Option<&StudentRecord> {
        self.index
            .get(id)
            .and_then(|&slot| self.slots[slot].as_ref())
    }

    /// 以新記錄取代 `old_id` 的記錄。
    ///
    /// 學號不變時原地替換、位置不動；學號改變時移除舊項並把新記錄放到最後。
    pub fn modify(&mut self, old_id: &str, record: StudentRecord) -> Result<(), Rejection> {
        let Some(&slot) = self.index.get(old_id) else {
            tracing::warn!("Rejected modify: id {} not found", old_id);
            return Err(Rejection::NotFound(old_id.to_string()));
        };

        if record.id() == old_id {
            tracing::debug!("Replacing student {} in place", old_id);
            self.slots[slot] = Some(record);
            return Ok(());
        }

        if self.index.contains_key(record.id()) {
            tracing::warn!(
                "Rejected modify: new id {} collides with another student",
                record.id()
            );
            return Err(Rejection::IdTaken(record.id().to_string()));
        }

        tracing::debug!("Moving student {} to new id {}", old_id, record.id());
        self.index.remove(old_id);
        self.slots[slot] = None;
        self.push(record);
        self.maybe_compact();
        Ok(())
    }

    pub fn remove(&mut self, id: &str) -> Result<StudentRecord, Rejection> {
        let removed = self
            .index
            .remove(id)
            .and_then(|slot| self.slots[slot].take());

        match removed {
            Some(record) => {
                tracing::debug!("Removed student {} ({})", record.id(), record.name());
                self.maybe_compact();
                Ok(record)
            }
            None => {
                tracing::warn!("Rejected remove: id {} not found", id);
                Err(Rejection::NotFound(id.to_string()))
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudentRecord> {
        self.slots.iter().flatten()
    }

    /// 目前順序的快照；修改回傳的 Vec 不影響名冊
    pub fn all_records(&self) -> Vec<StudentRecord> {
        self.iter().cloned().collect()
    }

    pub fn count_by_variant(&self) -> RosterCounts {
        let total = self.len();
        let undergraduate = self
            .iter()
            .filter(|record| record.variant() == Variant::Undergraduate)
            .count();

        RosterCounts {
            total,
            undergraduate,
            graduate: total - undergraduate,
        }
    }

    fn push(&mut self, record: StudentRecord) {
        self.index.insert(record.id().to_string(), self.slots.len());
        self.slots.push(Some(record));
    }

    fn maybe_compact(&mut self) {
        let vacant = self.slots.len() - self.index.len();
        if vacant <= COMPACT_THRESHOLD || vacant <= self.index.len() {
            return;
        }

        tracing::debug!("Compacting roster: {} vacant slots", vacant);
        self.slots.retain(Option::is_some);
        for (slot, record) in self.slots.iter().enumerate() {
            if let Some(record) = record {
                self.index.insert(record.id().to_string(), slot);
            }
        }
    }
}
