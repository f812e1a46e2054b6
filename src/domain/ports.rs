use crate::domain::model::StudentRecord;
use crate::utils::error::Result;

/// 互動介面需要的設定來源
pub trait ConfigProvider {
    /// 啟動時是否載入示範資料
    fn seed_demo_data(&self) -> bool;

    /// 每次操作後是否等待 Enter
    fn pause_after_action(&self) -> bool;

    /// 設定檔中宣告的初始學生；非空時取代示範資料
    fn seed_students(&self) -> Result<Vec<StudentRecord>>;
}
