//! Static dataset fixtures used across harnesses.
//!
//! The JSON bodies mirror the shape of the published datasets, including the
//! Chinese keys of the roster and timetable, a numeric password, `null`
//! fields and records without a brand.

use lookup_core::config::DatasetsConfig;
use std::path::Path;
use tempfile::TempDir;

pub const CREDENTIALS_JSON: &str = r#"[
  {"brand":"TP-Link","model":"WR841N","type":"路由器","username":"admin","password":"admin","description":"家用无线路由器"},
  {"brand":"TP-Link","model":"Archer C7","type":"路由器","username":"admin","password":"admin","description":""},
  {"brand":"华为","model":"S5700","type":"交换机","username":"admin","password":"admin@huawei.com","description":null},
  {"brand":"华为","model":"AR1220","type":"路由器","username":"admin","password":"Admin@huawei","description":"企业路由器"},
  {"brand":"Cisco","model":"Catalyst 2960","type":"交换机","username":"cisco","password":"cisco","description":"default enable secret"},
  {"brand":"海康威视","model":"DS-2CD2T47","type":"摄像头","username":"admin","password":12345,"description":"网络摄像机"},
  {"brand":"","model":"Generic IPC","type":"摄像头","username":"root","password":"","description":"no-name camera"},
  {"model":"Mystery Box","type":"路由器","username":"","password":"","description":""}
]"#;

pub const ROSTER_JSON: &str = r#"[
  {"姓名":"张三","学号":"20230101","值日时间":"星期一,星期三","值日任务":"扫地"},
  {"姓名":"李四","学号":20230102,"值日时间":"星期二","值日任务":"擦黑板"},
  {"姓名":"王五","学号":"20230103","值日时间":"星期一","值日任务":"倒垃圾"},
  {"姓名":"张三丰","学号":"20230104","值日时间":"星期五","值日任务":"拖地"}
]"#;

pub const SCHEDULE_JSON: &str = r#"[
  {"星期":"星期一","节次":"第一节","课程":"语文","单双周":"单周"},
  {"星期":"星期一","节次":"第一节","课程":"英语","单双周":"双周"},
  {"星期":"星期一","节次":"第二节","课程":"数学","单双周":"单周"},
  {"星期":"星期一","节次":"第二节","课程":"数学","单双周":"双周"},
  {"星期":"星期三","节次":"第五节","课程":"物理","单双周":"单周"},
  {"星期":"星期五","节次":"第八节","课程":"班会","单双周":"双周"},
  {"星期":"星期六","节次":"第一节","课程":"补课","单双周":"单周"},
  {"星期":"星期二","节次":"第九节","课程":"自习","单双周":"单周"}
]"#;

/// A temporary directory holding the three fixture datasets, plus a
/// [`DatasetsConfig`] pointing at them.
pub struct DatasetDir {
    pub dir: TempDir,
    pub config: DatasetsConfig,
}

impl DatasetDir {
    /// Write all three fixtures.
    pub fn fixtures() -> Self {
        Self::with(CREDENTIALS_JSON, ROSTER_JSON, SCHEDULE_JSON)
    }

    /// Write the given bodies as `passwords.json`, `students.json` and
    /// `course_schedule.json`.
    pub fn with(credentials: &str, roster: &str, schedule: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let write = |name: &str, body: &str| {
            let path = dir.path().join(name);
            std::fs::write(&path, body).expect("write fixture");
            path.display().to_string()
        };
        let config = DatasetsConfig {
            base_url: String::new(),
            credentials: write("passwords.json", credentials),
            roster: write("students.json", roster),
            schedule: write("course_schedule.json", schedule),
        };
        Self { dir, config }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A config file location inside the directory that does not exist, so
    /// the binary falls back to built-in defaults without touching `$HOME`.
    pub fn config_file(&self) -> String {
        self.dir.path().join("config.toml").display().to_string()
    }
}
