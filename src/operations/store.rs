//! 操作记录存储和异步服务

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use rusqlite::Connection;

use super::model::{NewOperation, Operation};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS operations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task TEXT NOT NULL,
    input TEXT NOT NULL,
    output TEXT NOT NULL,
    created_at TEXT NOT NULL
);";

/// 数据库中的原始行：(id, task, input, output, created_at)
type RawRow = (i64, String, String, String, String);

/// 底层 SQLite 存储（同步）
struct OperationStore {
    conn: Mutex<Connection>,
}

impl OperationStore {
    fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("打开数据库失败: {}", db_path.display()))?;
        Self::with_connection(conn)
    }

    #[cfg(test)]
    fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA).context("初始化 operations 表失败")?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn insert(&self, op: &NewOperation) -> Result<Operation> {
        let output = serde_json::to_string(&op.output)?;
        let conn = self.conn.lock();

        // created_at 必须随插入顺序单调不减：系统时钟回拨时沿用已存储的最大值
        let latest: Option<String> =
            conn.query_row("SELECT MAX(created_at) FROM operations", [], |row| {
                row.get(0)
            })?;
        let now = format_timestamp(Utc::now());
        let created_at = match latest {
            Some(latest) if latest > now => latest,
            _ => now,
        };

        conn.execute(
            "INSERT INTO operations (task, input, output, created_at) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![op.task, op.input, output, created_at],
        )?;
        let id = conn.last_insert_rowid();

        Ok(Operation {
            id,
            task: op.task.clone(),
            input: op.input.clone(),
            output: op.output.clone(),
            created_at: parse_timestamp(&created_at)?,
        })
    }

    /// 按 created_at 升序返回全部记录（相同时间戳按 id 升序）
    fn list(&self) -> Result<Vec<Operation>> {
        let rows = {
            let conn = self.conn.lock();
            let mut stmt = conn.prepare(
                "SELECT id, task, input, output, created_at
                 FROM operations ORDER BY created_at ASC, id ASC",
            )?;
            stmt.query_map([], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
            })?
            .collect::<std::result::Result<Vec<RawRow>, _>>()?
        };

        rows.into_iter().map(row_to_operation).collect()
    }
}

fn row_to_operation((id, task, input, output, created_at): RawRow) -> Result<Operation> {
    let output = serde_json::from_str(&output)
        .with_context(|| format!("操作 #{} 的 output 不是合法 JSON", id))?;
    Ok(Operation {
        id,
        task,
        input,
        output,
        created_at: parse_timestamp(&created_at)?,
    })
}

/// 固定微秒精度的 RFC3339 UTC 字符串，保证字典序与时间顺序一致
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    let ts = DateTime::parse_from_rfc3339(s)
        .with_context(|| format!("无效的 created_at: {}", s))?;
    Ok(ts.with_timezone(&Utc))
}

/// 异步操作日志服务（公开 API）
///
/// SQLite 调用都在阻塞线程池中执行
#[derive(Clone)]
pub struct OperationLog {
    store: Arc<OperationStore>,
}

impl OperationLog {
    /// 打开（或创建）指定路径的数据库
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            store: Arc::new(OperationStore::open(db_path.as_ref())?),
        })
    }

    /// 使用内存数据库（进程退出即丢失）
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        Ok(Self {
            store: Arc::new(OperationStore::open_in_memory()?),
        })
    }

    /// 直接在底层连接上执行 SQL
    #[cfg(test)]
    pub(crate) fn execute_batch(&self, sql: &str) -> Result<()> {
        self.store.conn.lock().execute_batch(sql)?;
        Ok(())
    }

    /// 写入一条新记录，返回含 id 与 createdAt 的完整记录
    pub async fn create(&self, op: NewOperation) -> Result<Operation> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.insert(&op)).await?
    }

    /// 查询全部记录（按 createdAt 升序）
    pub async fn list(&self) -> Result<Vec<Operation>> {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || store.list()).await?
    }
}
