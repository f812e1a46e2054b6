use crate::domain::model::{Address, StudentRecord};
use crate::utils::error::{Result, RosterError};

fn with_scores(mut record: StudentRecord, scores: &[(&str, f64)]) -> Result<StudentRecord> {
    for (course, score) in scores {
        if let Some(warning) = record.add_or_update_score(course, *score).warning() {
            return Err(RosterError::invalid_argument("score", warning.to_string()));
        }
    }
    Ok(record)
}

/// 啟動時載入的示範資料：兩名本科生、兩名研究生、再一名本科生
pub fn demo_records() -> Result<Vec<StudentRecord>> {
    let addr1 = Address::new("广东", "深圳", "南山", "科技园路1号");
    let addr2 = Address::new("北京", "海淀", "中关村大街", "100号");
    let addr3 = Address::new("上海", "浦东", "世纪大道", "2001号");
    let addr4 = Address::new("广东", "广州", "天河", "软件路10号");

    Ok(vec![
        with_scores(
            StudentRecord::undergraduate("U24001", "张三", 24, "计算机2401", addr1.clone(), "软件工程")?,
            &[("Java", 85.5), ("数据结构", 90.0)],
        )?,
        with_scores(
            StudentRecord::undergraduate("U24002", "李四", 24, "自动化2402", addr2, "控制理论")?,
            &[("电路", 78.0), ("自控原理", 88.5)],
        )?,
        with_scores(
            StudentRecord::graduate("G24001", "王五", 24, "计算机研24", addr3, "赵教授", "人工智能")?,
            &[("机器学习", 92.0), ("深度学习", 89.5), ("Java", 75.0)],
        )?,
        with_scores(
            StudentRecord::graduate("G24002", "马六", 24, "通信研24", addr1, "钱教授", "无线通信")?,
            &[("通信原理", 95.0), ("信息论", 91.0)],
        )?,
        with_scores(
            StudentRecord::undergraduate("U24005", "陈七", 24, "软件工程2401", addr4, "软件测试")?,
            &[("软件测试", 88.0), ("Java", 92.5)],
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Variant;

    #[test]
    fn test_demo_records_shape() {
        let records = demo_records().unwrap();
        let variants: Vec<Variant> = records.iter().map(|r| r.variant()).collect();
        assert_eq!(
            variants,
            vec![
                Variant::Undergraduate,
                Variant::Undergraduate,
                Variant::Graduate,
                Variant::Graduate,
                Variant::Undergraduate,
            ]
        );
        assert_eq!(records[2].score("Java"), 75.0);
        assert_eq!(records[0].total_score(), 175.5);
    }
}
