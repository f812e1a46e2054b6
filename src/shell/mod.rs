//! 文字選單介面：負責提示、重問與顯示，所有規則都交給名冊與查詢引擎。

pub mod console;
pub mod demo;

use crate::core::{QueryEngine, RosterStore, SearchField, SortKey};
use crate::domain::model::{Address, ScoreUpdate, StudentKind, StudentRecord, Variant};
use crate::domain::model::{MAX_AGE, MAX_SCORE, MIN_AGE, MIN_SCORE};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Rejection, Result, RosterError};
use console::Console;
use std::io::{BufRead, Write};

const RULE: &str = "--------------------";

pub struct InteractionShell<R, W, C> {
    store: RosterStore,
    console: Console<R, W>,
    config: C,
}

impl<R: BufRead, W: Write, C: ConfigProvider> InteractionShell<R, W, C> {
    pub fn new(input: R, output: W, config: C) -> Result<Self> {
        let mut shell = Self {
            store: RosterStore::new(),
            console: Console::new(input, output),
            config,
        };
        shell.seed()?;
        Ok(shell)
    }

    pub fn store(&self) -> &RosterStore {
        &self.store
    }

    pub fn into_parts(self) -> (RosterStore, W) {
        (self.store, self.console.into_output())
    }

    /// 執行主選單直到選擇退出或輸入結束
    pub fn run(&mut self) -> Result<()> {
        match self.run_menu() {
            Ok(()) | Err(RosterError::InputClosed) => {
                tracing::info!("Shell finished with {} students", self.store.len());
                self.console.say("系统已退出。感谢使用！")
            }
            Err(e) => Err(e),
        }
    }

    fn seed(&mut self) -> Result<()> {
        let configured = self.config.seed_students()?;
        let records = if !configured.is_empty() {
            tracing::info!("Seeding {} students from configuration", configured.len());
            configured
        } else if self.config.seed_demo_data() {
            tracing::info!("Seeding demo students");
            demo::demo_records()?
        } else {
            return Ok(());
        };

        for record in records {
            if let Err(rejection) = self.store.add(record) {
                tracing::warn!("Skipping seed student: {}", rejection);
            }
        }
        Ok(())
    }

    fn run_menu(&mut self) -> Result<()> {
        loop {
            self.print_main_menu()?;
            let choice = self.console.read_int("请输入选项 (0-7): ", 0, 7)?;

            match choice {
                1 => self.add_student()?,
                2 => self.modify_student()?,
                3 => self.delete_student()?,
                4 => self.browse_students()?,
                5 => self.search_students()?,
                6 => self.sort_students()?,
                7 => self.print_counts()?,
                _ => {
                    self.console.say("正在退出系统...")?;
                    return Ok(());
                }
            }

            if self.config.pause_after_action() {
                self.console.say("\n按 Enter 键继续...")?;
                self.console.read_line()?;
            }
        }
    }

    fn print_main_menu(&mut self) -> Result<()> {
        for line in [
            "\n--- 学生信息管理系统 ---",
            "1. 增加学生信息",
            "2. 修改学生信息",
            "3. 删除学生信息",
            "4. 浏览学生信息",
            "5. 查询学生信息",
            "6. 排序学生信息",
            "7. 统计学生人数",
            "0. 退出系统",
            "------------------------",
        ] {
            self.console.say(line)?;
        }
        Ok(())
    }

    fn display_list(&mut self, records: &[StudentRecord], title: &str) -> Result<()> {
        self.console
            .say(format!("\n--- {} ({} 条) ---", title, records.len()))?;
        if records.is_empty() {
            return self.console.say("没有找到符合条件的学生。");
        }
        for record in records {
            self.console.say(record)?;
        }
        self.console.say(RULE)
    }

    // --- 新增 ---

    fn add_student(&mut self) -> Result<()> {
        self.console.say("\n--- 添加学生信息 ---")?;
        match self.read_new_student() {
            Ok(Some(record)) => {
                let name = record.name().to_string();
                match self.store.add(record) {
                    Ok(()) => self.console.say(format!("学生 {} 添加成功！", name)),
                    Err(rejection) => self.report_rejection(&rejection),
                }
            }
            Ok(None) => Ok(()),
            Err(RosterError::InvalidArgument { message, .. }) => {
                self.console.say(format!("添加失败：{}", message))
            }
            Err(e) => Err(e),
        }
    }

    fn read_new_student(&mut self) -> Result<Option<StudentRecord>> {
        let variant = self.read_variant("选择学生类型 (1: 本科生, 2: 研究生): ")?;

        let id = self.console.prompt("学号: ")?;
        if id.is_empty() {
            self.console.say("错误：学号不能为空！")?;
            return Ok(None);
        }
        if self.store.contains(&id) {
            self.console
                .say(format!("错误：学号 {} 已存在！无法添加。", id))?;
            return Ok(None);
        }

        let name = self.console.prompt("姓名: ")?;
        let age = self.read_age("年龄 (1-120): ")?;
        let class_name = self.console.prompt("班级: ")?;
        let address = self.read_address()?;

        let kind = match variant {
            Variant::Undergraduate => {
                let major = self.console.prompt("专业: ")?;
                StudentKind::undergraduate(&major)?
            }
            Variant::Graduate => {
                let supervisor = self.console.prompt("导师: ")?;
                let research_direction = self.console.prompt("研究方向: ")?;
                StudentKind::graduate(&supervisor, &research_direction)?
            }
        };

        let mut record = StudentRecord::new(&id, &name, age, &class_name, address, kind)?;
        self.console
            .say("--- 输入成绩 (输入课程名和分数，输入 'done' 结束) ---")?;
        self.read_scores(&mut record)?;
        Ok(Some(record))
    }

    fn read_variant(&mut self, text: &str) -> Result<Variant> {
        Ok(match self.console.read_int(text, 1, 2)? {
            1 => Variant::Undergraduate,
            _ => Variant::Graduate,
        })
    }

    fn read_age(&mut self, text: &str) -> Result<u32> {
        let age = self.console
            .read_int(text, i64::from(MIN_AGE), i64::from(MAX_AGE))?;
        u32::try_from(age).map_err(|_| RosterError::invalid_argument("age", "age out of range"))
    }

    fn read_address(&mut self) -> Result<Address> {
        self.console.say("--- 输入地址信息 ---")?;
        let province = self.console.prompt("省份: ")?;
        let city = self.console.prompt("城市: ")?;
        let street = self.console.prompt("街道: ")?;
        let house_number = self.console.prompt("门牌号: ")?;
        Ok(Address::new(&province, &city, &street, &house_number))
    }

    fn read_scores(&mut self, record: &mut StudentRecord) -> Result<()> {
        loop {
            let course = self.console.prompt("课程名 (或输入 'done' 结束): ")?;
            if course.eq_ignore_ascii_case("done") {
                return Ok(());
            }
            if course.is_empty() {
                self.console.say("课程名不能为空，请重新输入。")?;
                continue;
            }

            let text = if record.has_course(&course) {
                format!("修改 '{}' 成绩为 (0-100): ", course)
            } else {
                format!("新增课程 '{}' 成绩为 (0-100): ", course)
            };
            let score = self.console.read_f64(&text, MIN_SCORE, MAX_SCORE)?;

            if let ScoreUpdate::Rejected(warning) = record.add_or_update_score(&course, score) {
                self.console.say(format!("警告：{}", warning))?;
            }
        }
    }

    // --- 修改 ---

    fn modify_student(&mut self) -> Result<()> {
        self.console.say("\n--- 修改学生信息 ---")?;
        let id = self.console.prompt("请输入要修改的学生的学号: ")?;

        let Some(old) = self.store.find_by_id(&id).cloned() else {
            return self
                .console
                .say(format!("错误：未找到学号为 {} 的学生！", id));
        };
        self.console.say("找到学生，当前信息:")?;
        self.console.say(&old)?;
        self.console.say(RULE)?;
        self.console.say("\n请输入新信息 (留空不改):")?;

        match self.read_updated_student(&old) {
            Ok(Some(updated)) => {
                let new_id = updated.id().to_string();
                match self.store.modify(&id, updated) {
                    Ok(()) if new_id == id => {
                        self.console.say(format!("学号 {} 的学生信息已更新！", id))
                    }
                    Ok(()) => self.console.say(format!(
                        "学号 {} 的学生信息已更新！ 新学号为 {}",
                        id, new_id
                    )),
                    Err(rejection) => self.report_rejection(&rejection),
                }
            }
            Ok(None) => Ok(()),
            Err(RosterError::InvalidArgument { message, .. }) => {
                self.console.say(format!("修改失败：{}", message))
            }
            Err(e) => Err(e),
        }
    }

    fn read_updated_student(&mut self, old: &StudentRecord) -> Result<Option<StudentRecord>> {
        let mut new_id = old.id().to_string();
        if self.console.confirm("是否修改学号? (y/n, 默认 n): ")? {
            new_id = self.console.prompt("新学号: ")?;
            if new_id.is_empty() {
                self.console.say("错误：新学号不能为空！修改失败。")?;
                return Ok(None);
            }
            if new_id != old.id() && self.store.contains(&new_id) {
                self.console
                    .say(format!("错误：新学号 {} 已被其他学生使用！修改失败。", new_id))?;
                return Ok(None);
            }
        }

        let name = self
            .console
            .read_text_or_keep(&format!("新姓名 (当前: {}, 留空不改): ", old.name()), old.name())?;
        let age = self.console.read_int_or_keep(
            &format!("新年龄 (当前: {}, 输入-1或留空不改): ", old.age()),
            i64::from(old.age()),
            i64::from(MIN_AGE),
            i64::from(MAX_AGE),
        )?;
        let age =
            u32::try_from(age).map_err(|_| RosterError::invalid_argument("age", "age out of range"))?;
        let class_name = self.console.read_text_or_keep(
            &format!("新班级 (当前: {}, 留空不改): ", old.class_name()),
            old.class_name(),
        )?;
        let address = if self.console.confirm("是否修改地址? (y/n, 默认 n): ")? {
            self.read_address()?
        } else {
            old.address().clone()
        };

        let Some(kind) = self.read_updated_kind(old)? else {
            return Ok(None);
        };

        let mut updated = StudentRecord::new(&new_id, &name, age, &class_name, address, kind)?;
        updated.merge_scores_from(old);

        if self.console.confirm("是否修改成绩? (y/n, 默认 n): ")? {
            self.console
                .say("--- 修改/添加成绩 (输入课程名和新分数, 输入 'done' 结束) ---")?;
            self.read_scores(&mut updated)?;
        }
        Ok(Some(updated))
    }

    fn read_updated_kind(&mut self, old: &StudentRecord) -> Result<Option<StudentKind>> {
        let current = old.variant();
        let answer = self.console.prompt(&format!(
            "当前为{}。是否修改类型? (1: 本科生, 2: 研究生, 其他输入表示不改): ",
            current.label()
        ))?;
        let target = match answer.as_str() {
            "1" => Variant::Undergraduate,
            "2" => Variant::Graduate,
            _ => current,
        };

        let kind = match (old.kind(), target) {
            (StudentKind::Undergraduate { major }, Variant::Undergraduate) => {
                let major = self
                    .console
                    .read_text_or_keep(&format!("新专业 (当前: {}, 留空不改): ", major), major)?;
                StudentKind::undergraduate(&major)?
            }
            (
                StudentKind::Graduate {
                    supervisor,
                    research_direction,
                },
                Variant::Graduate,
            ) => {
                let supervisor = self.console.read_text_or_keep(
                    &format!("新导师 (当前: {}, 留空不改): ", supervisor),
                    supervisor,
                )?;
                let research_direction = self.console.read_text_or_keep(
                    &format!("新研究方向 (当前: {}, 留空不改): ", research_direction),
                    research_direction,
                )?;
                StudentKind::graduate(&supervisor, &research_direction)?
            }
            (_, Variant::Undergraduate) => {
                let major = self.console.prompt("专业 (类型改变必须输入): ")?;
                if major.is_empty() {
                    self.console
                        .say("错误：改为本科生时，专业不能为空！修改失败。")?;
                    return Ok(None);
                }
                StudentKind::undergraduate(&major)?
            }
            (_, Variant::Graduate) => {
                let supervisor = self.console.prompt("导师 (类型改变必须输入): ")?;
                let research_direction = self.console.prompt("研究方向 (类型改变必须输入): ")?;
                if supervisor.is_empty() || research_direction.is_empty() {
                    self.console
                        .say("错误：改为研究生时，导师和研究方向不能为空！修改失败。")?;
                    return Ok(None);
                }
                StudentKind::graduate(&supervisor, &research_direction)?
            }
        };
        Ok(Some(kind))
    }

    // --- 刪除 ---

    fn delete_student(&mut self) -> Result<()> {
        self.console.say("\n--- 删除学生信息 ---")?;
        let id = self.console.prompt("请输入要删除的学生的学号: ")?;

        let Some(record) = self.store.find_by_id(&id).cloned() else {
            return self
                .console
                .say(format!("错误：未找到学号为 {} 的学生！", id));
        };
        self.console.say("找到学生:")?;
        self.console.say(&record)?;
        self.console.say(RULE)?;

        if !self.console.confirm("确认删除该学生? (y/n): ")? {
            return self.console.say("删除操作已取消。");
        }
        match self.store.remove(&id) {
            Ok(removed) => self.console.say(format!(
                "学号为 {} 的学生 ({}) 已被删除。",
                id,
                removed.name()
            )),
            Err(rejection) => self.report_rejection(&rejection),
        }
    }

    // --- 瀏覽 / 查詢 / 排序 ---

    fn browse_students(&mut self) -> Result<()> {
        self.console.say("\n--- 浏览学生信息 ---")?;
        self.console.say("1. 浏览所有学生")?;
        self.console.say("2. 浏览本科生")?;
        self.console.say("3. 浏览研究生")?;
        let choice = self.console.read_int("请选择浏览类型 (1-3): ", 1, 3)?;

        let engine = QueryEngine::new(&self.store);
        let (records, title) = match choice {
            1 => (self.store.all_records(), "所有学生信息"),
            2 => (
                engine.filter_by_variant(Variant::Undergraduate),
                "所有本科生信息",
            ),
            _ => (engine.filter_by_variant(Variant::Graduate), "所有研究生信息"),
        };
        self.display_list(&records, title)
    }

    fn search_students(&mut self) -> Result<()> {
        self.console.say("\n--- 查询学生信息 ---")?;
        self.console.say("查询方式 (1: 按班级, 2: 按姓名, 3: 按学号): ")?;
        let (field, text) = match self.console.read_int("请选择查询方式 (1-3): ", 1, 3)? {
            1 => (SearchField::Class, "请输入班级关键字: "),
            2 => (SearchField::Name, "请输入姓名关键字: "),
            _ => (SearchField::Id, "请输入完整学号: "),
        };

        let criteria = self.console.prompt(text)?;
        if criteria.is_empty() {
            return self.console.say("查询关键字不能为空！");
        }

        let results = QueryEngine::new(&self.store).search_field(&criteria, field);
        self.display_list(&results, "查询结果")
    }

    fn sort_students(&mut self) -> Result<()> {
        self.console.say("\n--- 排序学生信息 ---")?;
        if self.store.is_empty() {
            return self.console.say("系统中没有学生信息可供排序。");
        }

        self.console.say("排序依据 (1: 学号, 2: 总成绩, 3: 课程成绩): ")?;
        let key = match self.console.read_int("请选择排序依据 (1-3): ", 1, 3)? {
            1 => SortKey::Id,
            2 => SortKey::TotalScore,
            _ => {
                let course = self.console.prompt("请输入课程名称: ")?;
                if course.is_empty() {
                    return self.console.say("课程名称不能为空！");
                }
                SortKey::Course(course)
            }
        };
        let ascending = self
            .console
            .read_int("排序方式 (1: 升序, 2: 降序): ", 1, 2)?
            == 1;

        match QueryEngine::new(&self.store).sort_by_key(&key, ascending) {
            Ok(records) => {
                let title = format!(
                    "按 {} {} 排序后的学生信息",
                    key.description(),
                    if ascending { "升序" } else { "降序" }
                );
                self.display_list(&records, &title)
            }
            Err(rejection) => self.report_rejection(&rejection),
        }
    }

    fn print_counts(&mut self) -> Result<()> {
        let counts = self.store.count_by_variant();
        self.console.say("\n--- 学生人数统计 ---")?;
        self.console.say(format!("总人数: {}", counts.total))?;
        self.console.say(format!("本科生: {}", counts.undergraduate))?;
        self.console.say(format!("研究生: {}", counts.graduate))?;
        self.console.say(RULE)
    }

    fn report_rejection(&mut self, rejection: &Rejection) -> Result<()> {
        tracing::debug!("Reporting rejection to user: {}", rejection);
        let message = match rejection {
            Rejection::DuplicateId(id) => format!("学号 {} 已存在，添加失败！", id),
            Rejection::NotFound(id) => format!("未找到学号为 {} 的学生！", id),
            Rejection::IdTaken(id) => format!("新学号 {} 已被其他学生使用，修改失败！", id),
            Rejection::UnknownCourse(course) => {
                format!("系统中没有关于课程 '{}' 的成绩记录，无法排序。", course)
            }
            Rejection::EmptyCourseName => "未指定课程名称进行排序。".to_string(),
            Rejection::UnknownSortKey(key) => format!("无效的排序依据 '{}'！", key),
            Rejection::UnknownSearchField(field) => format!("未知的查询类型 '{}'。", field),
        };
        self.console.say(format!("错误：{}", message))
    }
}
