use std::path::PathBuf;

use shared::models::MerchantIdentity;

/// 排班服務配置
///
/// # 環境變數
///
/// 所有配置項都可以通過環境變數覆蓋：
///
/// | 環境變數 | 默認值 | 說明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目錄 |
/// | SCHEDULE_DB_FILE | schedule.redb | redb 檔名 (位於 WORK_DIR) |
/// | EXPORT_DIR | {WORK_DIR}/exports | CSV 匯出目錄 |
/// | LOG_LEVEL | info | 日誌級別 |
/// | LOG_DIR | (未設定) | 設定後按日滾動寫入日誌檔 |
/// | MERCHANT_ID | (未設定) | 店家 ID |
/// | MERCHANT_AUTH_SUBJECT | (未設定) | 外部認證 subject |
/// | MERCHANT_USERNAME | (未設定) | 店家帳號 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/schedule MERCHANT_ID=42 cargo run -p schedule-store
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目錄，存放資料庫與匯出檔
    pub work_dir: String,
    pub db_file: String,
    pub export_dir: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// 目前店家身分，決定讀寫哪一份排班資料
    pub merchant: MerchantIdentity,
}

impl Config {
    /// 從環境變數加載配置
    ///
    /// 如果環境變數未設置，使用默認值
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let work_dir = var("WORK_DIR").unwrap_or_else(|| "./data".into());
        let export_dir = var("EXPORT_DIR").unwrap_or_else(|| {
            PathBuf::from(&work_dir)
                .join("exports")
                .to_string_lossy()
                .into_owned()
        });

        Self {
            db_file: var("SCHEDULE_DB_FILE").unwrap_or_else(|| "schedule.redb".into()),
            export_dir,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: var("LOG_DIR"),
            merchant: MerchantIdentity {
                id: var("MERCHANT_ID"),
                auth_subject: var("MERCHANT_AUTH_SUBJECT"),
                username: var("MERCHANT_USERNAME"),
            },
            work_dir,
        }
    }

    /// Full path of the redb database file
    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join(&self.db_file)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.work_dir, "./data");
        assert_eq!(config.db_path(), PathBuf::from("./data").join("schedule.redb"));
        assert_eq!(
            PathBuf::from(&config.export_dir),
            PathBuf::from("./data").join("exports")
        );
        assert_eq!(config.log_level, "info");
        assert!(config.log_dir.is_none());
        assert!(config.merchant.storage_key().is_none());
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("WORK_DIR", "/var/lib/schedule"),
            ("SCHEDULE_DB_FILE", "m.redb"),
            ("LOG_LEVEL", "debug"),
            ("MERCHANT_ID", ""),
            ("MERCHANT_USERNAME", "noodle-bar"),
        ]);
        let config = Config::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.db_path(), PathBuf::from("/var/lib/schedule/m.redb"));
        assert_eq!(
            PathBuf::from(&config.export_dir),
            PathBuf::from("/var/lib/schedule/exports")
        );
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.merchant.id, None);
        assert_eq!(
            config.merchant.storage_key().unwrap().as_str(),
            "merchantScheduleData_noodle-bar"
        );
    }
}
