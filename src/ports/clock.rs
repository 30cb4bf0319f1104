use chrono::{DateTime, Utc};

/// 時計ポート
///
/// 貸出日時・返却日時の取得元を抽象化する。
/// テストでは固定時刻の実装に差し替える。
pub trait Clock: Send + Sync {
    /// 現在時刻を返す
    fn now(&self) -> DateTime<Utc>;
}
