use domain::account::AccountId;

/// Balance records live under `<account>/balance`, optionally prefixed by
/// `<namespace>:`. The fixed suffix keeps the mapping injective.
#[derive(Debug, Clone, Default)]
pub struct RedisKeyBuilder {
    namespace: Option<String>,
}

impl RedisKeyBuilder {
    pub fn new(namespace: Option<&str>) -> Self {
        Self {
            namespace: namespace.map(ToString::to_string),
        }
    }

    pub fn balance_key(&self, account: &AccountId) -> String {
        match &self.namespace {
            Some(namespace) => format!("{}:{}/balance", namespace, account),
            None => format!("{}/balance", account),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(raw: &str) -> AccountId {
        AccountId::parse(raw).unwrap()
    }

    #[test]
    fn plain_layout_appends_balance_suffix() {
        let keys = RedisKeyBuilder::new(None);
        assert_eq!(keys.balance_key(&account("account")), "account/balance");
    }

    #[test]
    fn namespace_prefixes_key() {
        let keys = RedisKeyBuilder::new(Some("ledger:test"));
        assert_eq!(
            keys.balance_key(&account("alice")),
            "ledger:test:alice/balance"
        );
    }

    #[test]
    fn nested_looking_accounts_do_not_collide() {
        let keys = RedisKeyBuilder::default();
        assert_ne!(
            keys.balance_key(&account("a")),
            keys.balance_key(&account("a/balance"))
        );
    }
}
