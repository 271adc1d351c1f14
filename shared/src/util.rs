use crate::error::{AppError, AppResult, ErrorCode};

/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Monotonic, time-ordered id source for shift and staff records.
///
/// Ids are creation timestamps in milliseconds, bumped by one whenever two
/// records are created within the same millisecond or the clock steps back,
/// so an id is never handed out twice within a session. Once `i64::MAX` has
/// been issued or observed there is nothing left to hand out and
/// [`IdSource::next_id`] fails instead of repeating it.
#[derive(Debug, Clone, Default)]
pub struct IdSource {
    last: i64,
}

impl IdSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id, strictly greater than every id issued or observed so far
    pub fn next_id(&mut self) -> AppResult<i64> {
        self.next_id_at(now_millis())
    }

    fn next_id_at(&mut self, now: i64) -> AppResult<i64> {
        let floor = self.last.checked_add(1).ok_or_else(|| {
            AppError::new(ErrorCode::IdExhausted).with_detail("lastId", self.last)
        })?;
        let id = now.max(floor);
        self.last = id;
        Ok(id)
    }

    /// Whether at least one more id can be issued after `id`
    pub fn has_headroom(id: i64) -> bool {
        id < i64::MAX
    }

    /// Record an id that came from elsewhere (e.g. a loaded document)
    pub fn observe(&mut self, id: i64) {
        self.last = self.last.max(id);
    }

    pub fn last_issued(&self) -> i64 {
        self.last
    }
}
