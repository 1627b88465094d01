#[derive(Debug, Clone)]
pub struct LedgerSettings {
    pub default_balance: i64,
}
