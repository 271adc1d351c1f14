use schedule_store::{Config, ScheduleStorage, init_logger_with_file, open_session};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 環境 (.env) 與日誌
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    tracing::info!(work_dir = %config.work_dir, "Schedule store starting");

    // 2. 開啟儲存
    std::fs::create_dir_all(&config.work_dir)?;
    let storage = ScheduleStorage::open(config.db_path())?;

    // 3. 載入目前店家的排班
    let loaded = open_session(&storage, &config.merchant)?;
    if let Some(warning) = &loaded.warning {
        tracing::warn!(
            category = warning.code.category().name(),
            error = %warning,
            "Continuing with an empty schedule"
        );
    }
    let store = loaded.store;

    let summary = store.summary();
    tracing::info!(
        needed = summary.total_needed,
        assigned = summary.total_assigned,
        shortage = summary.shortage,
        "Schedule summary"
    );

    // 4. 匯出班表
    match store.export_csv() {
        Some(artifact) => {
            std::fs::create_dir_all(&config.export_dir)?;
            let path = artifact.write_to(&config.export_dir)?;
            tracing::info!(path = %path.display(), "Schedule CSV written");
        }
        None => tracing::info!("No shifts to export"),
    }

    Ok(())
}
